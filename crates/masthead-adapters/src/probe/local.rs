//! Local filesystem probe using std::fs.

use std::path::Path;

use masthead_core::application::ports::PathProbe;

/// Production probe backed by `std::fs` metadata.
///
/// Any metadata failure - missing entry, permission error, race - answers
/// `false`, so the transform passes the file through instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProbe;

impl LocalProbe {
    /// Create a new local probe.
    pub fn new() -> Self {
        Self
    }
}

impl PathProbe for LocalProbe {
    fn is_processable_file(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|metadata| !metadata.is_dir())
            .unwrap_or(false)
    }
}
