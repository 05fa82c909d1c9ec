//! Recursive removal.

use std::fs;
use std::path::Path;

use pocketfs_core::FsError;

use crate::executor::FsOps;
use crate::listing::list_ex;
use crate::path::is_directory;

impl FsOps {
    /// Remove a file, or a directory and everything below it.
    ///
    /// Children go first. The first failure aborts the walk and nothing
    /// already removed is restored.
    pub fn remove(&self, path: &str) -> Result<(), FsError> {
        tracing::debug!(path, "remove");
        remove_path(Path::new(path)).inspect_err(|e| {
            tracing::warn!(path, "remove failed: {}", e);
        })
    }
}

fn remove_path(path: &Path) -> Result<(), FsError> {
    if !is_directory(path) {
        return fs::remove_file(path).map_err(|e| FsError::io(path, e));
    }

    for child in list_ex(path) {
        remove_path(&child.path)?;
    }
    fs::remove_dir(path).map_err(|e| FsError::io(path, e))
}

/// Remove `path` recursively with the default configuration.
pub fn remove(path: &str) -> Result<(), FsError> {
    FsOps::default().remove(path)
}
