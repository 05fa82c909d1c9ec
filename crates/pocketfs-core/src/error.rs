//! Error types for filesystem operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a mutating filesystem operation.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// The target of a copy, rename or create already exists.
    #[error("Path already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// The request cannot be carried out as asked.
    #[error("Unsupported operation on {path}: {reason}")]
    Unsupported { path: PathBuf, reason: String },

    /// The caller asked to stop mid-operation.
    #[error("Operation cancelled: {path}")]
    Cancelled { path: PathBuf },

    /// Open, read, write or allocation failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error for a transfer that ended short of its expected size.
    pub fn short_transfer(path: impl Into<PathBuf>, done: u64, expected: u64) -> Self {
        Self::Io {
            path: path.into(),
            source: std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("transferred {done} of {expected} bytes"),
            ),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::Unsupported { path, .. }
            | Self::Cancelled { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unsupported,
    Cancelled,
    IoFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Not found"),
            Self::AlreadyExists => write!(f, "Already exists"),
            Self::Unsupported => write!(f, "Unsupported"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::IoFailure => write!(f, "I/O failure"),
        }
    }
}
