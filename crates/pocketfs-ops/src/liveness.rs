//! Process liveness checks consulted by long-running loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Reports whether the surrounding process should keep going.
pub trait ProcessLiveness {
    fn is_running(&self) -> bool;
}

/// Never asks a loop to stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRunning;

impl ProcessLiveness for AlwaysRunning {
    fn is_running(&self) -> bool {
        true
    }
}

/// Adapts a closure into a liveness check.
#[derive(Debug, Clone, Copy)]
pub struct LivenessFn<F>(pub F);

impl<F: Fn() -> bool> ProcessLiveness for LivenessFn<F> {
    fn is_running(&self) -> bool {
        (self.0)()
    }
}

/// Running while the flag is set.
impl ProcessLiveness for AtomicBool {
    fn is_running(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Running until the token is cancelled.
impl ProcessLiveness for CancellationToken {
    fn is_running(&self) -> bool {
        !self.is_cancelled()
    }
}

impl<T: ProcessLiveness + ?Sized> ProcessLiveness for &T {
    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}

impl<T: ProcessLiveness + ?Sized> ProcessLiveness for Arc<T> {
    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}
