//! Windowed streaming reads over a file.
//!
//! A [`WindowedStream`] keeps a fixed-size window of a file in memory and
//! moves it on request. When the new window overlaps the old one, the
//! shared bytes are shifted inside the buffer and only the rest is read
//! from disk. Bytes past end-of-file read as zero.
//!
//! The driving loop alternates between two hooks on a [`StreamHandler`]:
//! `on_idle` while the window is current (the handler may seek or finish),
//! and `on_window_ready` right after every refresh.

use std::fs::File;
use std::path::PathBuf;

use pocketfs_core::FsError;
use serde::{Deserialize, Serialize};

use crate::buffer::WindowBuffer;
use crate::liveness::ProcessLiveness;
use crate::path::{exists, file_size};

/// What an idle handler wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    /// Keep the current window and poll again.
    Continue,
    /// Move the window to a new offset.
    Seek(u64),
    /// Stop streaming.
    Done,
}

/// What a handler wants after receiving a fresh window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    Continue,
    Done,
}

/// How a stream loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamOutcome {
    /// A handler asked to stop.
    Completed,
    /// The process stopped running before any handler finished.
    Terminated,
}

impl StreamOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Transition hooks for the stream loop.
pub trait StreamHandler {
    /// Called while the window at `offset` is current.
    fn on_idle(&mut self, offset: u64) -> IdleAction;

    /// Called with the window that now starts at `offset`.
    fn on_window_ready(&mut self, window: &[u8], offset: u64) -> WindowAction;
}

/// Adapts a pair of closures into a [`StreamHandler`].
pub struct FnHandler<I, U> {
    pub on_idle: I,
    pub on_window_ready: U,
}

impl<I, U> StreamHandler for FnHandler<I, U>
where
    I: FnMut(u64) -> IdleAction,
    U: FnMut(&[u8], u64) -> WindowAction,
{
    fn on_idle(&mut self, offset: u64) -> IdleAction {
        (self.on_idle)(offset)
    }

    fn on_window_ready(&mut self, window: &[u8], offset: u64) -> WindowAction {
        (self.on_window_ready)(window, offset)
    }
}

/// A fixed-size window into an open file.
#[derive(Debug)]
pub struct WindowedStream {
    path: PathBuf,
    file: File,
    window: WindowBuffer,
    file_size: u64,
    offset: u64,
    /// Offset the window holds; `None` until the first fill.
    previous_offset: Option<u64>,
}

impl WindowedStream {
    /// Open `path` with a window of `window_size` bytes at `initial_offset`.
    ///
    /// Nothing is read until the first loop iteration.
    pub fn open(path: &str, initial_offset: u64, window_size: usize) -> Result<Self, FsError> {
        if window_size == 0 {
            return Err(FsError::unsupported(path, "window size must be non-zero"));
        }
        if !exists(path) {
            return Err(FsError::NotFound { path: path.into() });
        }

        let file = File::open(path).map_err(|e| FsError::io(path, e))?;
        let window = WindowBuffer::new(window_size).map_err(|e| FsError::io(path, e))?;

        Ok(Self {
            path: path.into(),
            file,
            window,
            file_size: file_size(path),
            offset: initial_offset,
            previous_offset: None,
        })
    }

    /// Size of the file when it was opened.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Window capacity in bytes.
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// The requested offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Request a new window position. Takes effect on the next iteration.
    pub fn seek(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// The current window contents.
    pub fn window(&self) -> &[u8] {
        self.window.as_slice()
    }

    /// Drive `handler` until it finishes or `liveness` stops.
    pub fn run<H, L>(&mut self, liveness: &L, handler: &mut H) -> Result<StreamOutcome, FsError>
    where
        H: StreamHandler + ?Sized,
        L: ProcessLiveness + ?Sized,
    {
        while liveness.is_running() {
            if self.offset > self.file_size {
                self.offset = self.file_size;
                continue;
            }

            if self.previous_offset == Some(self.offset) {
                match handler.on_idle(self.offset) {
                    IdleAction::Continue => {}
                    IdleAction::Seek(offset) => self.offset = offset,
                    IdleAction::Done => return Ok(StreamOutcome::Completed),
                }
                continue;
            }

            self.refresh()?;
            if handler.on_window_ready(self.window.as_slice(), self.offset) == WindowAction::Done {
                return Ok(StreamOutcome::Completed);
            }
        }

        tracing::warn!(path = %self.path.display(), "stream terminated before completion");
        Ok(StreamOutcome::Terminated)
    }

    /// Move the window to `self.offset`, reusing overlapping bytes.
    fn refresh(&mut self) -> Result<(), FsError> {
        let size = self.window.capacity();
        let width = size as u64;
        let offset = self.offset;

        let overlap = match self.previous_offset {
            Some(previous) if offset < previous => {
                // The old head becomes the new tail; read the front.
                let overlap = offset
                    .saturating_add(width)
                    .saturating_sub(previous)
                    .min(width) as usize;
                self.window.move_head_to_tail(overlap);
                self.window
                    .fill_from(&mut self.file, offset, 0, size - overlap)
                    .map_err(|e| FsError::io(&self.path, e))?;
                overlap
            }
            previous => {
                // The old tail becomes the new head; read the rest.
                let overlap = previous.map_or(0, |previous| {
                    previous
                        .saturating_add(width)
                        .saturating_sub(offset)
                        .min(width)
                }) as usize;
                self.window.move_tail_to_head(overlap);
                if offset.saturating_add(width) > self.file_size {
                    self.window.zero_from(overlap);
                }
                self.window
                    .fill_from(&mut self.file, offset + overlap as u64, overlap, size)
                    .map_err(|e| FsError::io(&self.path, e))?;
                overlap
            }
        };

        tracing::debug!(
            offset,
            previous = ?self.previous_offset,
            overlap,
            "window refreshed"
        );
        self.previous_offset = Some(offset);
        Ok(())
    }
}

/// Stream `path` through a window of `window_size` bytes, starting at
/// `initial_offset`, until a hook returns done or `liveness` stops.
pub fn stream<L, I, U>(
    path: &str,
    initial_offset: u64,
    window_size: usize,
    liveness: &L,
    on_idle: I,
    on_window_ready: U,
) -> Result<StreamOutcome, FsError>
where
    L: ProcessLiveness + ?Sized,
    I: FnMut(u64) -> IdleAction,
    U: FnMut(&[u8], u64) -> WindowAction,
{
    let mut stream = WindowedStream::open(path, initial_offset, window_size)?;
    let mut handler = FnHandler {
        on_idle,
        on_window_ready,
    };
    stream.run(liveness, &mut handler)
}
