//! Filesystem operations engine for pocketfs.
//!
//! This crate provides path queries, directory listing, a windowed
//! streaming reader, and recursive copy/delete/rename/create operations
//! with throttled progress reporting and cooperative cancellation.
//!
//! Everything runs on the caller's thread. Progress and cancellation flow
//! through the [`ProgressReporter`] seam, free space through
//! [`VolumeResourceQuery`], and the stream loop consults a
//! [`ProcessLiveness`] to know when to give up.

mod buffer;
mod copy;
mod create;
mod executor;
mod liveness;
mod listing;
mod path;
mod progress;
mod remove;
mod rename;
mod stream;
mod volume;

pub use copy::copy;
pub use create::{create_fixed_content_file, mkdir};
pub use executor::FsOps;
pub use liveness::{AlwaysRunning, LivenessFn, ProcessLiveness};
pub use listing::{list_ex, list_raw};
pub use path::{
    exists, extension, file_name, file_size, free_space, has_any_extension, has_extension,
    is_directory, is_inside,
};
pub use progress::{
    truncate_path, ChannelReporter, NoProgress, OperationKind, ProgressReporter, ProgressThrottle,
    ProgressUpdate,
};
pub use remove::remove;
pub use rename::rename;
pub use stream::{
    stream, FnHandler, IdleAction, StreamHandler, StreamOutcome, WindowAction, WindowedStream,
};
pub use volume::{StatvfsVolume, VolumeResource, VolumeResourceQuery};

pub use pocketfs_core::{
    DirectoryEntry, DirectoryEntryEx, ErrorKind, FillPattern, FsConfig, FsError,
};

/// Default channel buffer size for progress updates.
pub const PROGRESS_CHANNEL_SIZE: usize = 100;
