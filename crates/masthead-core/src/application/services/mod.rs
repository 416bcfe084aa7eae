//! Application services.

pub mod header_service;

pub use header_service::{HeaderService, display_name};
