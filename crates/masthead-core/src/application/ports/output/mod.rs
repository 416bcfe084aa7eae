//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the header transform needs from external
//! systems. The `masthead-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{SourceMap, TemplateContext};
use crate::error::MastheadResult;

#[cfg(test)]
use mockall::automock;

/// Port for header template rendering.
///
/// Implemented by:
/// - `masthead_adapters::renderer::DelimiterRenderer` (auto-detected
///   `<%= %>` / `${ }` syntax)
///
/// ## Design Notes
///
/// - Which delimiter family matched a given template is a diagnostic
///   detail, never part of the observable contract
/// - Unresolved references fail loudly; silently emitting a wrongly
///   headered file would corrupt build output
#[cfg_attr(test, automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against the per-file context.
    fn render(&self, template: &str, context: &TemplateContext) -> MastheadResult<String>;
}

/// One named byte piece handed to the joiner.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinPiece {
    /// Join key, used for diagnostics and the combined map's metadata.
    pub name: String,
    pub content: Vec<u8>,
    /// Map participation: `Some` rebases this piece's map into the combined
    /// output; `None` registers a pseudo-source contributing no mappings.
    pub source_map: Option<SourceMap>,
}

impl JoinPiece {
    /// A piece with no source-map contribution (e.g. a rendered header).
    pub fn unmapped(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
            source_map: None,
        }
    }

    /// A piece participating in source-map combination.
    pub fn mapped(
        name: impl Into<String>,
        content: Vec<u8>,
        source_map: Option<SourceMap>,
    ) -> Self {
        Self {
            name: name.into(),
            content,
            source_map,
        }
    }
}

/// The joiner's output: one concatenated buffer and, when any input piece
/// contributed a map, one combined source map.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    pub content: Vec<u8>,
    pub source_map: Option<SourceMap>,
}

/// Port for concatenating named byte pieces and combining their source maps.
///
/// Implemented by:
/// - `masthead_adapters::joiner::SourceMapJoiner`
#[cfg_attr(test, automock)]
pub trait ContentJoiner: Send + Sync {
    /// Concatenate `pieces`, in order, into one buffer named `target`.
    ///
    /// # Errors
    /// Fails when a contributed source map cannot be decoded; the caller
    /// must not forward the item in that case.
    fn join(&self, target: &str, pieces: Vec<JoinPiece>) -> MastheadResult<Joined>;
}

/// Port for the eligibility existence check.
///
/// Implemented by:
/// - `masthead_adapters::probe::LocalProbe` (production)
/// - `masthead_adapters::probe::MemoryProbe` (testing)
#[cfg_attr(test, automock)]
pub trait PathProbe: Send + Sync {
    /// Whether `path` exists on the backing store and is not a directory.
    ///
    /// Probe failures (permission errors, races) answer `false`: failing
    /// open to passthrough is safer than templating unrelated content.
    fn is_processable_file(&self, path: &Path) -> bool;
}
