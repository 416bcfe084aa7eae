//! Domain layer errors: invalid values, never orchestration failures.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (hosts may retry whole items)
/// - Categorizable (for display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// File identities are always relative to the pipeline base.
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    /// Only Source Map revision 3 payloads are understood.
    #[error("Unsupported source map version: {version} (only revision 3 is supported)")]
    UnsupportedSourceMapVersion { version: u32 },

    /// The serialized source map could not be parsed.
    #[error("Invalid source map payload: {reason}")]
    InvalidSourceMap { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("Path must be relative to the pipeline base: {}", path),
                "Pass the absolute location via the file's `path`, not `relative`".into(),
            ],
            Self::UnsupportedSourceMapVersion { version } => vec![
                format!("Got source map version {}, expected 3", version),
                "Regenerate the map with a revision 3 producer".into(),
            ],
            Self::InvalidSourceMap { .. } => vec![
                "The upstream stage attached a map that is not valid JSON".into(),
                "Check the producer that generated the source map".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
