//! In-memory path probe for testing.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use masthead_core::application::ports::PathProbe;

/// In-memory probe: paths answer by registration, not by disk state.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    inner: Arc<RwLock<MemoryProbeInner>>,
}

#[derive(Debug, Default)]
struct MemoryProbeInner {
    files: HashSet<PathBuf>,
    directories: HashSet<PathBuf>,
}

impl MemoryProbe {
    /// Create a new empty probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing file.
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.inner.write().unwrap().files.insert(path.into());
    }

    /// Register an existing directory.
    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        self.inner.write().unwrap().directories.insert(path.into());
    }

    /// Forget all registrations.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl PathProbe for MemoryProbe {
    fn is_processable_file(&self, path: &Path) -> bool {
        // a poisoned lock reads as "does not exist", like any probe failure
        let Ok(inner) = self.inner.read() else {
            return false;
        };
        inner.files.contains(path) && !inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_by_registration() {
        let probe = MemoryProbe::new();
        probe.add_file("/work/a.txt");
        probe.add_directory("/work/dir");

        assert!(probe.is_processable_file(Path::new("/work/a.txt")));
        assert!(!probe.is_processable_file(Path::new("/work/dir")));
        assert!(!probe.is_processable_file(Path::new("/work/missing.txt")));
    }

    #[test]
    fn clear_forgets_everything() {
        let probe = MemoryProbe::new();
        probe.add_file("/work/a.txt");
        probe.clear();
        assert!(!probe.is_processable_file(Path::new("/work/a.txt")));
    }

    #[test]
    fn clones_share_the_registry() {
        let probe = MemoryProbe::new();
        let clone = probe.clone();
        probe.add_file("/work/a.txt");
        assert!(clone.is_processable_file(Path::new("/work/a.txt")));
    }
}
