//! Rename operation.

use std::fs;

use pocketfs_core::FsError;

use crate::executor::FsOps;
use crate::path::{exists, is_inside};

impl FsOps {
    /// Rename `src` to `dest`.
    ///
    /// Fails with `Unsupported` if `dest` lies lexically inside `src` and
    /// with `AlreadyExists` if `dest` exists.
    pub fn rename(&self, src: &str, dest: &str) -> Result<(), FsError> {
        tracing::debug!(src, dest, "rename");

        if is_inside(dest, src) {
            return Err(FsError::unsupported(
                dest,
                format!("cannot move '{src}' into itself"),
            ));
        }
        if exists(dest) {
            return Err(FsError::AlreadyExists { path: dest.into() });
        }

        fs::rename(src, dest).map_err(|e| {
            let err = FsError::io(src, e);
            tracing::warn!(src, dest, "rename failed: {}", err);
            err
        })
    }
}

/// Rename `src` to `dest` with the default configuration.
pub fn rename(src: &str, dest: &str) -> Result<(), FsError> {
    FsOps::default().rename(src, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketfs_core::ErrorKind;
    use tempfile::TempDir;

    fn root(temp: &TempDir) -> String {
        temp.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_rename_file() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::write(format!("{root}/old.txt"), b"content").unwrap();

        rename(&format!("{root}/old.txt"), &format!("{root}/new.txt")).unwrap();

        assert!(!exists(&format!("{root}/old.txt")));
        assert_eq!(fs::read(format!("{root}/new.txt")).unwrap(), b"content");
    }

    #[test]
    fn test_rename_directory() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir(format!("{root}/dir")).unwrap();
        fs::write(format!("{root}/dir/f"), b"f").unwrap();

        rename(&format!("{root}/dir"), &format!("{root}/moved")).unwrap();

        assert!(exists(&format!("{root}/moved/f")));
    }

    #[test]
    fn test_rename_collision() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::write(format!("{root}/a"), b"a").unwrap();
        fs::write(format!("{root}/b"), b"b").unwrap();

        let err = rename(&format!("{root}/a"), &format!("{root}/b")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs::read(format!("{root}/a")).unwrap(), b"a");
    }

    #[test]
    fn test_rename_into_itself() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir(format!("{root}/dir")).unwrap();

        let err = rename(&format!("{root}/dir"), &format!("{root}/dir/sub")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert!(exists(&format!("{root}/dir")));
    }

    #[test]
    fn test_rename_missing_source() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);

        let err = rename(&format!("{root}/gone"), &format!("{root}/new")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
