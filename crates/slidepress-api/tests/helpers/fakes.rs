//! In-process stand-ins for the converter and the remote publisher.

#![allow(dead_code)]

use async_trait::async_trait;
use slidepress_processing::DocumentConverter;
use slidepress_storage::{public_object_url, PublishError, RemotePublisher};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n% slidepress test artifact\n%%EOF\n";

pub const TEST_BUCKET: &str = "slidepress-test";
pub const TEST_REGION: &str = "eu-west-1";

/// Writes `FAKE_PDF` where LibreOffice would, or fails with a fixed diagnostic.
pub struct FakeConverter {
    failure: Option<&'static str>,
}

impl FakeConverter {
    pub fn succeeding() -> Self {
        Self { failure: None }
    }

    pub fn failing(diagnostic: &'static str) -> Self {
        Self {
            failure: Some(diagnostic),
        }
    }
}

#[async_trait]
impl DocumentConverter for FakeConverter {
    async fn convert(&self, input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
        if let Some(diagnostic) = self.failure {
            anyhow::bail!("{}", diagnostic);
        }
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("input has no stem"))?;
        let output = output_dir.join(format!("{}.pdf", stem));
        tokio::fs::write(&output, FAKE_PDF).await?;
        Ok(output)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Records published keys and answers with the canonical S3 URL.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<String>>,
}

#[async_trait]
impl RemotePublisher for RecordingPublisher {
    async fn publish(&self, file_path: &Path) -> Result<String, PublishError> {
        let key = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PublishError::InvalidPath(file_path.display().to_string()))?
            .to_string();
        let url = public_object_url(TEST_BUCKET, TEST_REGION, None, &key);
        self.published
            .lock()
            .expect("publisher lock poisoned")
            .push(key);
        Ok(url)
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}

/// Always rejects the upload, as S3 does for bad credentials.
pub struct DenyingPublisher;

#[async_trait]
impl RemotePublisher for DenyingPublisher {
    async fn publish(&self, _file_path: &Path) -> Result<String, PublishError> {
        Err(PublishError::Upload(
            "AccessDenied: Access Denied".to_string(),
        ))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}
