//! Progress reporting and cooperative cancellation for transfers.

use std::path::Path;

use pocketfs_core::FsError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::PROGRESS_CHANNEL_SIZE;

/// The kind of transfer being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Copying,
    Generating,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copying => write!(f, "Copying"),
            Self::Generating => write!(f, "Generating"),
        }
    }
}

/// A single progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// The type of operation.
    pub operation: OperationKind,
    /// The path being processed, truncated for display.
    pub path: String,
    /// Units done so far.
    pub current: u64,
    /// Units in total.
    pub total: u64,
    /// Whole percentage, `current * 100 / total`.
    pub percent: u32,
}

/// Receives progress and answers cancellation polls.
pub trait ProgressReporter {
    /// Show a progress update.
    fn report(&mut self, update: &ProgressUpdate);

    /// Check whether the user asked to stop.
    fn poll_cancel_requested(&mut self) -> bool;
}

/// A reporter that shows nothing and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}

    fn poll_cancel_requested(&mut self) -> bool {
        false
    }
}

/// Forwards updates over a channel and cancels through a token.
///
/// Sends never block: when the receiver lags, updates are dropped.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::Sender<ProgressUpdate>,
    cancel: CancellationToken,
}

impl ChannelReporter {
    /// Create a reporter around an existing sender.
    pub fn new(tx: mpsc::Sender<ProgressUpdate>, cancel: CancellationToken) -> Self {
        Self { tx, cancel }
    }

    /// Create a reporter and the receiver for its updates.
    pub fn channel(cancel: CancellationToken) -> (Self, mpsc::Receiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_SIZE);
        (Self::new(tx, cancel), rx)
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&mut self, update: &ProgressUpdate) {
        if let Err(e) = self.tx.try_send(update.clone()) {
            tracing::debug!(percent = update.percent, "progress update dropped: {}", e);
        }
    }

    fn poll_cancel_requested(&mut self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Debounces reports to one per whole-percentage change.
///
/// Lives for one top-level operation.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    last_percent: Option<u32>,
    path_width: usize,
}

impl ProgressThrottle {
    /// Create a throttle that truncates paths to `path_width` characters.
    pub fn new(path_width: usize) -> Self {
        Self {
            last_percent: None,
            path_width,
        }
    }

    /// Whole percentage of `current` over `total`. An empty total is complete.
    pub fn percent(current: u64, total: u64) -> u32 {
        if total == 0 {
            return 100;
        }
        (u128::from(current) * 100 / u128::from(total)) as u32
    }

    /// The last percentage that reached the reporter.
    pub fn last_percent(&self) -> Option<u32> {
        self.last_percent
    }

    /// Report if the percentage moved. Returns `false` when the reporter
    /// asked to cancel.
    pub fn tick(
        &mut self,
        reporter: &mut dyn ProgressReporter,
        operation: OperationKind,
        path: &str,
        current: u64,
        total: u64,
    ) -> bool {
        let percent = Self::percent(current, total);
        if self.last_percent == Some(percent) {
            return true;
        }
        self.last_percent = Some(percent);

        reporter.report(&ProgressUpdate {
            operation,
            path: truncate_path(path, self.path_width),
            current,
            total,
            percent,
        });
        !reporter.poll_cancel_requested()
    }
}

/// Shorten `path` to at most `width` characters, keeping its tail.
pub fn truncate_path(path: &str, width: usize) -> String {
    const ELLIPSIS: &str = "...";

    let len = path.chars().count();
    if len <= width {
        return path.to_string();
    }
    if width <= ELLIPSIS.len() {
        return path.chars().skip(len - width).collect();
    }

    let keep = width - ELLIPSIS.len();
    let tail: String = path.chars().skip(len - keep).collect();
    format!("{ELLIPSIS}{tail}")
}

/// Per-call transfer state: an optional reporter plus its throttle.
pub(crate) struct TransferProgress<'a> {
    reporter: Option<&'a mut dyn ProgressReporter>,
    throttle: ProgressThrottle,
    operation: OperationKind,
}

impl<'a> TransferProgress<'a> {
    pub(crate) fn new(
        reporter: Option<&'a mut dyn ProgressReporter>,
        operation: OperationKind,
        path_width: usize,
    ) -> Self {
        Self {
            reporter,
            throttle: ProgressThrottle::new(path_width),
            operation,
        }
    }

    /// Throttled report for `path`; `Cancelled` if the reporter asked to stop.
    pub(crate) fn tick(&mut self, path: &Path, current: u64, total: u64) -> Result<(), FsError> {
        let Some(reporter) = self.reporter.as_deref_mut() else {
            return Ok(());
        };

        let display_path = path.to_string_lossy();
        if self
            .throttle
            .tick(reporter, self.operation, &display_path, current, total)
        {
            Ok(())
        } else {
            tracing::warn!(path = %display_path, current, total, "{} cancelled", self.operation);
            Err(FsError::Cancelled { path: path.into() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<ProgressUpdate>,
        polls: usize,
        cancel_after: Option<usize>,
    }

    impl ProgressReporter for Recorder {
        fn report(&mut self, update: &ProgressUpdate) {
            self.updates.push(update.clone());
        }

        fn poll_cancel_requested(&mut self) -> bool {
            self.polls += 1;
            self.cancel_after.is_some_and(|n| self.polls > n)
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(ProgressThrottle::percent(0, 1), 0);
        assert_eq!(ProgressThrottle::percent(1, 2), 50);
        assert_eq!(ProgressThrottle::percent(999, 1000), 99);
        assert_eq!(ProgressThrottle::percent(0, 0), 100);
        assert_eq!(ProgressThrottle::percent(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_throttle_reports_once_per_percent() {
        let mut recorder = Recorder::default();
        let mut throttle = ProgressThrottle::new(36);

        for current in 0..=1000u64 {
            assert!(throttle.tick(&mut recorder, OperationKind::Copying, "/sd/a", current, 1000));
        }

        assert_eq!(recorder.updates.len(), 101);
        assert_eq!(recorder.polls, 101);
        assert_eq!(throttle.last_percent(), Some(100));
        assert_eq!(recorder.updates[50].percent, 50);
        assert_eq!(recorder.updates[0].operation, OperationKind::Copying);
    }

    #[test]
    fn test_throttle_cancel_only_polled_on_change() {
        let mut recorder = Recorder {
            cancel_after: Some(1),
            ..Default::default()
        };
        let mut throttle = ProgressThrottle::new(36);

        assert!(throttle.tick(&mut recorder, OperationKind::Generating, "/f", 0, 100));
        // Same percentage: no poll, so no cancellation yet.
        assert!(throttle.tick(&mut recorder, OperationKind::Generating, "/f", 0, 100));
        assert!(!throttle.tick(&mut recorder, OperationKind::Generating, "/f", 1, 100));
        assert_eq!(recorder.polls, 2);
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("/sd/a.txt", 36), "/sd/a.txt");
        assert_eq!(truncate_path("/sd/very/long/path.bin", 10), "...ath.bin");
        assert_eq!(truncate_path("abcdef", 3), "def");
        assert_eq!(truncate_path("/sd/very/long/path.bin", 12).chars().count(), 12);
    }

    #[test]
    fn test_transfer_progress_without_reporter() {
        let mut progress = TransferProgress::new(None, OperationKind::Copying, 36);
        assert!(progress.tick(Path::new("/a"), 0, 1).is_ok());
    }

    #[test]
    fn test_transfer_progress_cancel() {
        let mut recorder = Recorder {
            cancel_after: Some(0),
            ..Default::default()
        };
        let mut progress =
            TransferProgress::new(Some(&mut recorder), OperationKind::Copying, 36);
        let err = progress.tick(Path::new("/sd/a"), 0, 1).unwrap_err();
        assert!(matches!(err, FsError::Cancelled { .. }));
    }

    #[tokio::test]
    async fn test_channel_reporter() {
        let cancel = CancellationToken::new();
        let (mut reporter, mut rx) = ChannelReporter::channel(cancel.clone());

        let mut throttle = ProgressThrottle::new(36);
        assert!(throttle.tick(&mut reporter, OperationKind::Copying, "/sd/a", 1, 4));

        let update = rx.recv().await.unwrap();
        assert_eq!(update.percent, 25);
        assert_eq!(update.path, "/sd/a");

        cancel.cancel();
        assert!(!throttle.tick(&mut reporter, OperationKind::Copying, "/sd/a", 2, 4));
    }
}
