use crate::RemotePublisher;
#[cfg(feature = "storage-s3")]
use crate::S3Publisher;
use slidepress_core::Config;
use std::sync::Arc;

/// Create the remote publisher, if remote storage is configured.
///
/// `None` means artifacts are delivered from the local artifact directory.
pub async fn create_publisher(config: &Config) -> Option<Arc<dyn RemotePublisher>> {
    let remote = config.remote_storage()?;

    #[cfg(feature = "storage-s3")]
    {
        tracing::info!(
            bucket = %remote.bucket,
            region = %remote.region,
            endpoint = ?remote.endpoint_url,
            "Remote delivery enabled"
        );
        let publisher = S3Publisher::new(remote).await;
        Some(Arc::new(publisher))
    }

    #[cfg(not(feature = "storage-s3"))]
    {
        tracing::warn!(
            bucket = %remote.bucket,
            "Remote storage configured but the storage-s3 feature is not enabled, delivering locally"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_remote_config_means_local_delivery() {
        let config = Config::for_directories("/tmp/slidepress-u", "/tmp/slidepress-o");
        assert!(create_publisher(&config).await.is_none());
    }
}
