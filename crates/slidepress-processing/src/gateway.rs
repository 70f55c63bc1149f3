//! Conversion gateway
//!
//! Runs the converter collaborator against a stored upload. The converter works in a
//! private staging directory created inside the output directory; once its output
//! is verified, the artifact is moved to `{original_stem}.pdf` so it carries the
//! user's file name rather than the identifier-prefixed stored name.

use crate::converter::DocumentConverter;
use slidepress_core::constants::ARTIFACT_EXTENSION;
use slidepress_core::{AppError, ConversionResult, UploadRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("input {0} does not exist")]
    MissingInput(PathBuf),

    #[error("{0}")]
    Converter(String),

    #[error("converter produced no output at {0}")]
    NoOutput(PathBuf),

    #[error("converter produced an empty file at {0}")]
    EmptyOutput(PathBuf),

    #[error("failed to prepare output: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        AppError::ConversionFailed {
            reason: err.to_string(),
        }
    }
}

pub struct ConversionGateway {
    converter: Arc<dyn DocumentConverter>,
    output_dir: PathBuf,
}

impl ConversionGateway {
    pub fn new(converter: Arc<dyn DocumentConverter>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            converter,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Convert one upload. Never retries.
    pub async fn convert(&self, upload: &UploadRecord) -> Result<ConversionResult, ConversionError> {
        let input = &upload.stored_path;
        if !fs::try_exists(input).await.unwrap_or(false) {
            return Err(ConversionError::MissingInput(input.clone()));
        }

        let staging = tempfile::Builder::new()
            .prefix(".convert-")
            .tempdir_in(&self.output_dir)?;

        let start = Instant::now();
        tracing::debug!(
            file_id = %upload.identifier,
            converter = self.converter.name(),
            path = %input.display(),
            "Starting conversion"
        );

        let produced = self
            .converter
            .convert(input, staging.path())
            .await
            .map_err(|e| {
                tracing::error!(
                    file_id = %upload.identifier,
                    converter = self.converter.name(),
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Conversion failed"
                );
                ConversionError::Converter(format!("{:#}", e))
            })?;

        let size = match fs::metadata(&produced).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(ConversionError::NoOutput(produced)),
        };
        if size == 0 {
            return Err(ConversionError::EmptyOutput(produced));
        }
        // Readable, not just present.
        fs::File::open(&produced).await?;

        let output_path = self
            .output_dir
            .join(format!("{}.{}", upload.original_stem(), ARTIFACT_EXTENSION));
        fs::rename(&produced, &output_path).await?;

        tracing::info!(
            file_id = %upload.identifier,
            path = %output_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Conversion completed"
        );

        Ok(ConversionResult::new(output_path))
    }
}
