//! Storage errors and the remote publishing trait.

use async_trait::async_trait;
use slidepress_core::AppError;
use std::path::Path;
use thiserror::Error;

/// Upload store and artifact directory errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Identifier {identifier} is claimed by both {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Reading the incoming stream or writing it to disk failed. Keeps the original
    /// error so callers can inspect what the stream reported.
    #[error("Upload stream failed: {0}")]
    StreamFailed(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedMediaType(msg) => AppError::UnsupportedMediaType(msg),
            StorageError::InvalidFilename(msg) => AppError::InvalidInput(msg),
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg) => AppError::Internal(msg),
            StorageError::StreamFailed(err) => {
                AppError::Internal(format!("Upload stream failed: {}", err))
            }
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            err @ (StorageError::DuplicateIdentifier { .. } | StorageError::ConfigError(_)) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Remote publishing errors. Always surfaced to the client as a publish failure,
/// never as a conversion failure.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("artifact path has no usable file name: {0}")]
    InvalidPath(String),

    #[error("failed to read artifact {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("{0}")]
    Upload(String),
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        AppError::PublishFailed {
            reason: err.to_string(),
        }
    }
}

/// Pushes a converted artifact to object storage.
///
/// Implementations upload under a key equal to the file's base name, make the
/// object publicly readable and return its canonical public URL. Two artifacts
/// with the same base name overwrite each other.
#[async_trait]
pub trait RemotePublisher: Send + Sync {
    async fn publish(&self, file_path: &Path) -> Result<String, PublishError>;

    /// Bucket the publisher writes to, for logging.
    fn bucket(&self) -> &str;
}
