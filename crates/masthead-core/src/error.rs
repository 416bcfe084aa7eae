//! Unified error handling for Masthead Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for masthead operations.
///
/// This enum wraps all possible errors that can occur when using
/// masthead-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MastheadError {
    /// Errors from the domain layer (invalid paths, bad source-map payloads).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (rendering and joining failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MastheadError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in masthead".into(),
                "Please report this issue with the header template that triggered it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this is a rendering failure: the item that caused it was not
    /// forwarded downstream.
    pub fn is_template_error(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_template_error())
    }
}

/// Error categories for host display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    Internal,
}

/// Convenient result type alias.
pub type MastheadResult<T> = Result<T, MastheadError>;
