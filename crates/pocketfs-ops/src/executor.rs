//! Operation entry point carrying shared configuration.

use pocketfs_core::FsConfig;

/// Runs mutating filesystem operations with a shared [`FsConfig`].
///
/// Operations are synchronous and run on the caller's thread. At most one
/// mutating operation should target a given tree at a time.
#[derive(Debug, Clone, Default)]
pub struct FsOps {
    config: FsConfig,
}

impl FsOps {
    /// Create an executor with the given config.
    pub fn new(config: FsConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FsConfig {
        &self.config
    }
}
