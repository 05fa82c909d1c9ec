//! Core types for pocketfs.
//!
//! This crate provides the value types shared by every filesystem
//! operation: directory entries, fill patterns, configuration, and the
//! error categories operations fail with.

mod config;
mod entry;
mod error;
mod pattern;

pub use config::{FsConfig, FsConfigBuilder, DEFAULT_TRANSFER_BUFFER_SIZE};
pub use entry::{DirectoryEntry, DirectoryEntryEx};
pub use error::{ErrorKind, FsError};
pub use pattern::FillPattern;
