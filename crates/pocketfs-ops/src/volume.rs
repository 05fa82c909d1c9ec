//! Free-space queries against the backing volume.

use std::path::PathBuf;

use pocketfs_core::FsError;
use serde::{Deserialize, Serialize};

/// Allocation units available on a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeResource {
    /// Bytes per cluster.
    pub cluster_size: u64,
    /// Clusters available for new data.
    pub free_clusters: u64,
}

impl VolumeResource {
    /// Create a new volume resource.
    pub fn new(cluster_size: u64, free_clusters: u64) -> Self {
        Self {
            cluster_size,
            free_clusters,
        }
    }

    /// Free space in bytes.
    pub fn free_bytes(&self) -> u64 {
        self.cluster_size.saturating_mul(self.free_clusters)
    }
}

/// Source of volume free-space information.
pub trait VolumeResourceQuery {
    /// Query the volume's cluster size and free cluster count.
    fn query_free_space(&self) -> Result<VolumeResource, FsError>;
}

/// Queries the volume mounted at `mount` with `statvfs`.
#[derive(Debug, Clone)]
pub struct StatvfsVolume {
    pub mount: PathBuf,
}

impl StatvfsVolume {
    pub fn new(mount: impl Into<PathBuf>) -> Self {
        Self {
            mount: mount.into(),
        }
    }
}

#[cfg(unix)]
impl VolumeResourceQuery for StatvfsVolume {
    fn query_free_space(&self) -> Result<VolumeResource, FsError> {
        let stat = nix::sys::statvfs::statvfs(&self.mount)
            .map_err(|errno| FsError::io(&self.mount, std::io::Error::from(errno)))?;

        Ok(VolumeResource::new(
            stat.fragment_size() as u64,
            stat.blocks_available() as u64,
        ))
    }
}

#[cfg(not(unix))]
impl VolumeResourceQuery for StatvfsVolume {
    fn query_free_space(&self) -> Result<VolumeResource, FsError> {
        Err(FsError::unsupported(
            &self.mount,
            "statvfs is not available on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_bytes_saturates() {
        assert_eq!(VolumeResource::new(512, 4).free_bytes(), 2048);
        assert_eq!(VolumeResource::new(u64::MAX, 2).free_bytes(), u64::MAX);
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_volume() {
        let temp = tempfile::TempDir::new().unwrap();
        let resource = StatvfsVolume::new(temp.path()).query_free_space().unwrap();
        assert!(resource.cluster_size > 0);

        let missing = StatvfsVolume::new(temp.path().join("missing"));
        assert!(missing.query_free_space().is_err());
        assert_eq!(crate::free_space(&missing), 0);
    }
}
