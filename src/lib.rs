//! pocketfs - filesystem utilities for constrained devices.
//!
//! - [`exists`], [`is_directory`], [`file_size`], [`free_space`] and friends:
//!   total path queries that never fail.
//! - [`list_raw`] and [`list_ex`]: directory listings, the latter sorted
//!   directories first, then by name ignoring case.
//! - [`stream`] and [`WindowedStream`]: seekable fixed-size windows over a
//!   file that reuse overlapping bytes between moves.
//! - [`copy`], [`remove`], [`rename`], [`mkdir`],
//!   [`create_fixed_content_file`]: mutating operations with throttled
//!   progress and cooperative cancellation.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocketfs::{stream, AlwaysRunning, IdleAction, WindowAction};
//!
//! let mut first = Vec::new();
//! let outcome = stream(
//!     "/sd/data.bin",
//!     0,
//!     4096,
//!     &AlwaysRunning,
//!     |_| IdleAction::Done,
//!     |window, _| {
//!         first.extend_from_slice(window);
//!         WindowAction::Continue
//!     },
//! )
//! .unwrap();
//! assert!(outcome.is_completed());
//! ```

pub use pocketfs_core::{
    DirectoryEntry, DirectoryEntryEx, ErrorKind, FillPattern, FsConfig, FsConfigBuilder, FsError,
    DEFAULT_TRANSFER_BUFFER_SIZE,
};
pub use pocketfs_ops::{
    copy, create_fixed_content_file, exists, extension, file_name, file_size, free_space,
    has_any_extension, has_extension, is_directory, is_inside, list_ex, list_raw, mkdir, remove,
    rename, stream, truncate_path, AlwaysRunning, ChannelReporter, FnHandler, FsOps, IdleAction,
    LivenessFn, NoProgress, OperationKind, ProcessLiveness, ProgressReporter, ProgressThrottle,
    ProgressUpdate, StatvfsVolume, StreamHandler, StreamOutcome, VolumeResource,
    VolumeResourceQuery, WindowAction, WindowedStream, PROGRESS_CHANNEL_SIZE,
};
