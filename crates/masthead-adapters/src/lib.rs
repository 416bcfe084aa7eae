//! Infrastructure adapters for masthead.
//!
//! This crate implements the ports defined in
//! `masthead_core::application::ports`: delimiter-auto-detecting template
//! rendering, source-map-aware content joining, and filesystem path probing.

pub mod joiner;
pub mod probe;
pub mod renderer;

// Re-export commonly used adapters
pub use joiner::SourceMapJoiner;
pub use probe::{LocalProbe, MemoryProbe};
pub use renderer::DelimiterRenderer;
