//! Application layer for masthead.
//!
//! This layer contains:
//! - **Services**: the per-item transform orchestrator (`HeaderService`)
//! - **Ports**: interface definitions (traits) for external collaborators
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! parsing, joining, or filesystem logic itself; those live behind ports.

pub mod error;
pub mod ports;
pub mod services;

// Re-export the service
pub use services::HeaderService;

// Re-export port traits (for adapter implementation)
pub use ports::{ContentJoiner, PathProbe, TemplateRenderer};

pub use error::ApplicationError;
