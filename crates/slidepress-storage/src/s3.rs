use crate::keys::{content_type_for, object_key, public_object_url};
use crate::traits::{PublishError, RemotePublisher};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use slidepress_core::RemoteStorageConfig;
use std::path::Path;

/// Publishes converted artifacts to an S3 bucket with a public-read ACL.
#[derive(Clone)]
pub struct S3Publisher {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Publisher {
    /// Create a publisher from explicit credentials.
    ///
    /// Credentials come from configuration only; the ambient AWS credential chain
    /// is not consulted. Retries are disabled, a failed publish is reported as is.
    pub async fn new(remote: &RemoteStorageConfig) -> Self {
        let credentials = Credentials::new(
            remote.access_key_id.clone(),
            remote.secret_access_key.clone(),
            None,
            None,
            "slidepress-config",
        );

        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(remote.region.clone()));

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let client = match remote.endpoint_url {
            Some(ref endpoint) => {
                // Path-style addressing is required by MinIO and most S3-compatible providers
                let s3_config = aws_sdk_s3::config::Builder::from(&shared)
                    .endpoint_url(endpoint)
                    .force_path_style(true)
                    .build();
                Client::from_conf(s3_config)
            }
            None => Client::new(&shared),
        };

        S3Publisher {
            client,
            bucket: remote.bucket.clone(),
            region: remote.region.clone(),
            endpoint_url: remote.endpoint_url.clone(),
        }
    }

    fn generate_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, self.endpoint_url.as_deref(), key)
    }
}

#[async_trait]
impl RemotePublisher for S3Publisher {
    async fn publish(&self, file_path: &Path) -> Result<String, PublishError> {
        let key = object_key(file_path)?;
        let content_type = content_type_for(file_path);

        let body = ByteStream::from_path(file_path)
            .await
            .map_err(|e| PublishError::Read {
                path: file_path.display().to_string(),
                reason: e.to_string(),
            })?;
        let size = body.size_hint().0;

        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                let reason = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %reason,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 publish failed"
                );
                PublishError::Upload(reason)
            })?;

        let url = self.generate_url(&key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 publish successful"
        );

        Ok(url)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
