//! Recursive copy with throttled progress.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use pocketfs_core::FsError;

use crate::buffer::alloc_buffer;
use crate::executor::FsOps;
use crate::listing::list_ex;
use crate::path::{child_path, exists, file_size, is_directory, path_is_inside};
use crate::progress::{OperationKind, ProgressReporter, TransferProgress};

impl FsOps {
    /// Copy a file or directory tree from `src` to `dest`.
    ///
    /// Fails with `AlreadyExists` if `dest` exists and with `Unsupported`
    /// if a directory would be copied into itself. Directory children are
    /// copied directories first, stopping at the first failure; whatever
    /// was already copied stays in place.
    pub fn copy(
        &self,
        src: &str,
        dest: &str,
        reporter: Option<&mut dyn ProgressReporter>,
    ) -> Result<(), FsError> {
        tracing::debug!(src, dest, "copy");

        let mut progress = TransferProgress::new(
            reporter,
            OperationKind::Copying,
            self.config().progress_path_width,
        );
        self.copy_path(Path::new(src), Path::new(dest), &mut progress)
            .inspect_err(|e| {
                tracing::warn!(src, dest, "copy failed: {}", e);
            })
    }

    fn copy_path(
        &self,
        src: &Path,
        dest: &Path,
        progress: &mut TransferProgress<'_>,
    ) -> Result<(), FsError> {
        if exists(dest) {
            return Err(FsError::AlreadyExists { path: dest.into() });
        }
        progress.tick(src, 0, 1)?;

        if !is_directory(src) {
            return self.copy_file(src, dest, progress);
        }

        if path_is_inside(dest, src) {
            return Err(FsError::unsupported(
                dest,
                format!("cannot copy '{}' into itself", src.display()),
            ));
        }
        self.create_dir(dest)?;
        progress.tick(src, 1, 2)?;

        for child in list_ex(src) {
            self.copy_path(&child.path, &child_path(dest, child.raw_name()), progress)?;
        }
        Ok(())
    }

    fn copy_file(
        &self,
        src: &Path,
        dest: &Path,
        progress: &mut TransferProgress<'_>,
    ) -> Result<(), FsError> {
        let total = file_size(src);
        let mut reader = File::open(src).map_err(|e| FsError::io(src, e))?;
        let mut writer = File::create(dest).map_err(|e| FsError::io(dest, e))?;
        let mut buffer =
            alloc_buffer(self.config().chunk_size(total)).map_err(|e| FsError::io(src, e))?;

        let mut pos = 0u64;
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FsError::io(src, e)),
            };
            writer
                .write_all(&buffer[..read])
                .map_err(|e| FsError::io(dest, e))?;
            pos += read as u64;
            progress.tick(src, pos, total)?;
        }

        if pos != total {
            return Err(FsError::short_transfer(dest, pos, total));
        }
        Ok(())
    }
}

/// Copy `src` to `dest` with the default configuration.
pub fn copy(
    src: &str,
    dest: &str,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<(), FsError> {
    FsOps::default().copy(src, dest, reporter)
}
