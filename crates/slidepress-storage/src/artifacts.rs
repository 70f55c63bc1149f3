//! Directory converted artifacts are written to and served from.

use crate::traits::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    base_path: PathBuf,
}

impl ArtifactDirectory {
    /// Open (creating if needed) the artifact directory.
    pub async fn open(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create output directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        tracing::info!(path = %base_path.display(), "Artifact directory ready");

        Ok(ArtifactDirectory { base_path })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }
}
