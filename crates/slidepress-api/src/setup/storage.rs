//! Storage setup and initialization

use anyhow::{Context, Result};
use slidepress_core::Config;
use slidepress_storage::{create_publisher, ArtifactDirectory, RemotePublisher, UploadStore};
use std::sync::Arc;

/// Open the upload store and the artifact directory.
///
/// Opening the upload store scans the upload directory; duplicate identifiers left
/// on disk abort startup here.
pub async fn setup_storage(config: &Config) -> Result<(Arc<UploadStore>, ArtifactDirectory)> {
    tracing::info!("Initializing local storage...");

    let uploads = UploadStore::open(config.upload_dir())
        .await
        .context("Failed to open upload store")?;
    let artifacts = ArtifactDirectory::open(config.output_dir())
        .await
        .context("Failed to open output directory")?;

    tracing::info!(
        upload_dir = %uploads.base_path().display(),
        output_dir = %artifacts.path().display(),
        indexed_uploads = uploads.len().await,
        "Local storage initialized successfully"
    );

    Ok((Arc::new(uploads), artifacts))
}

/// Remote publisher when remote storage is fully configured.
pub async fn setup_publisher(config: &Config) -> Option<Arc<dyn RemotePublisher>> {
    let publisher = create_publisher(config).await;
    if publisher.is_none() {
        tracing::info!(
            prefix = config.local_files_prefix(),
            "Remote storage not configured, serving converted files locally"
        );
    }
    publisher
}
