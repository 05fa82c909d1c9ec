//! Directory creation and fixed-content file generation.

use std::fs::{DirBuilder, File};
use std::io::Write;
use std::path::Path;

use pocketfs_core::{FillPattern, FsError};

use crate::buffer::alloc_buffer;
use crate::executor::FsOps;
use crate::path::exists;
use crate::progress::{OperationKind, ProgressReporter, TransferProgress};

impl FsOps {
    /// Create a single directory. Fails with `AlreadyExists` if `path` exists.
    pub fn mkdir(&self, path: &str) -> Result<(), FsError> {
        tracing::debug!(path, "mkdir");

        if exists(path) {
            return Err(FsError::AlreadyExists { path: path.into() });
        }
        self.create_dir(Path::new(path))
    }

    /// Create `path` as a file of exactly `size` bytes filled with `pattern`.
    ///
    /// The pattern fills one transfer buffer which is written repeatedly, so
    /// a progression restarts at every buffer boundary. Files smaller than
    /// `progress_min_size` never report progress.
    pub fn create_fixed_content_file(
        &self,
        path: &str,
        size: u64,
        pattern: FillPattern,
        reporter: Option<&mut dyn ProgressReporter>,
    ) -> Result<(), FsError> {
        tracing::debug!(path, size, ?pattern, "create fixed-content file");

        if exists(path) {
            return Err(FsError::AlreadyExists { path: path.into() });
        }

        let reporter = reporter.filter(|_| size >= self.config().progress_min_size);
        let mut progress = TransferProgress::new(
            reporter,
            OperationKind::Generating,
            self.config().progress_path_width,
        );

        self.write_pattern(Path::new(path), size, pattern, &mut progress)
            .inspect_err(|e| {
                tracing::warn!(path, size, "fixed-content file failed: {}", e);
            })
    }

    fn write_pattern(
        &self,
        path: &Path,
        size: u64,
        pattern: FillPattern,
        progress: &mut TransferProgress<'_>,
    ) -> Result<(), FsError> {
        progress.tick(path, 0, 1)?;

        let mut buffer =
            alloc_buffer(self.config().chunk_size(size)).map_err(|e| FsError::io(path, e))?;
        pattern.fill(&mut buffer);
        let mut file = File::create(path).map_err(|e| FsError::io(path, e))?;

        let mut pos = 0u64;
        while pos < size {
            let chunk = usize::try_from(size - pos)
                .map_or(buffer.len(), |rest| rest.min(buffer.len()));
            file.write_all(&buffer[..chunk])
                .map_err(|e| FsError::io(path, e))?;
            pos += chunk as u64;
            progress.tick(path, pos, size)?;
        }

        if pos != size {
            return Err(FsError::short_transfer(path, pos, size));
        }
        Ok(())
    }

    /// Create one directory with the configured mode.
    pub(crate) fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config().dir_mode);
        }
        builder.create(path).map_err(|e| FsError::io(path, e))
    }
}

/// Create a directory with the default configuration.
pub fn mkdir(path: &str) -> Result<(), FsError> {
    FsOps::default().mkdir(path)
}

/// Create a fixed-content file with the default configuration.
pub fn create_fixed_content_file(
    path: &str,
    size: u64,
    pattern: FillPattern,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<(), FsError> {
    FsOps::default().create_fixed_content_file(path, size, pattern, reporter)
}
