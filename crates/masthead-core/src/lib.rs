//! Masthead Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the masthead
//! build-pipeline transform: for every file the host pipeline delivers, a
//! header template is rendered against per-file context and prepended to the
//! file's content - buffered or streamed - without breaking its source map.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Host build pipeline              │
//! │  (delivers items, drives backpressure)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           HeaderService                 │
//! │  eligibility → render → merge → emit    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TemplateRenderer, ContentJoiner,       │
//! │  PathProbe)                             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   masthead-adapters (Infrastructure)    │
//! │ (DelimiterRenderer, SourceMapJoiner,    │
//! │  LocalProbe, MemoryProbe)               │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (FileObject, Contents, SourceMap,       │
//! │  TemplateContext)   No I/O              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use masthead_core::prelude::*;
//!
//! // 1. Create the immutable configuration
//! let config = HeaderConfig::new("/* <%= file.relative %> */\n");
//!
//! // 2. Build the service (with injected adapters)
//! let service = HeaderService::new(config, renderer, joiner, probe);
//!
//! // 3. Drive it once per pipeline item
//! service.process(&mut item).unwrap();
//! ```
//!
//! The library only *emits* `tracing` spans and events; installing a
//! subscriber is the host's concern.

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        HeaderService,
        ports::{ContentJoiner, JoinPiece, Joined, PathProbe, TemplateRenderer},
    };
    pub use crate::domain::{
        ByteStream, Contents, FileObject, HeaderConfig, PipelineItem, RelativePath, SourceMap,
        TemplateContext, TemplateData, TemplateValue,
    };
    pub use crate::error::{MastheadError, MastheadResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
