//! Core domain layer for masthead.
//!
//! This module contains pure values with ZERO I/O: the pipeline item model,
//! content in its two modes, the source-map payload, and the template
//! context. All rendering, joining, and filesystem concerns are reached via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: a `Streamed` content value *carries* a reader, it never
//!   drives one
//! - **No external crates**: only std + thiserror + serde

// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    file::{ByteStream, Contents, FileObject, PipelineItem},
    header::HeaderConfig,
    source_map::{SOURCE_MAP_VERSION, SourceMap},
};

pub use error::DomainError;

pub use value_objects::{TemplateContext, TemplateData, TemplateValue};
