//! Operation configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Upper bound on the buffer used by copy and fixed-content generation.
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Configuration for mutating filesystem operations.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct FsConfig {
    /// Largest buffer allocated for a single copy or fill chunk.
    #[builder(default = "DEFAULT_TRANSFER_BUFFER_SIZE")]
    #[serde(default = "default_transfer_buffer_size")]
    pub transfer_buffer_size: usize,

    /// Fixed-content files smaller than this never report progress.
    #[builder(default = "DEFAULT_TRANSFER_BUFFER_SIZE as u64")]
    #[serde(default = "default_progress_min_size")]
    pub progress_min_size: u64,

    /// Maximum width of the path shown alongside progress.
    #[builder(default = "36")]
    #[serde(default = "default_progress_path_width")]
    pub progress_path_width: usize,

    /// Permission mode for created directories (unix only).
    #[builder(default = "0o777")]
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
}

fn default_transfer_buffer_size() -> usize {
    DEFAULT_TRANSFER_BUFFER_SIZE
}

fn default_progress_min_size() -> u64 {
    DEFAULT_TRANSFER_BUFFER_SIZE as u64
}

fn default_progress_path_width() -> usize {
    36
}

fn default_dir_mode() -> u32 {
    0o777
}

impl FsConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.transfer_buffer_size == Some(0) {
            return Err("Transfer buffer size cannot be zero".to_string());
        }
        if self.progress_path_width == Some(0) {
            return Err("Progress path width cannot be zero".to_string());
        }
        Ok(())
    }
}

impl FsConfig {
    /// Create a new config builder.
    pub fn builder() -> FsConfigBuilder {
        FsConfigBuilder::default()
    }

    /// Buffer size for transferring `total` bytes. Never zero unless `total` is.
    pub fn chunk_size(&self, total: u64) -> usize {
        let cap = self.transfer_buffer_size.max(1);
        usize::try_from(total).map_or(cap, |total| total.min(cap))
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
            progress_min_size: DEFAULT_TRANSFER_BUFFER_SIZE as u64,
            progress_path_width: default_progress_path_width(),
            dir_mode: default_dir_mode(),
        }
    }
}
