//! Slidepress Storage Library
//!
//! This crate owns everything that touches persisted bytes:
//!
//! - [`UploadStore`]: raw uploads on local disk, indexed by identifier
//! - [`ArtifactDirectory`]: the directory converted artifacts are written to and served from
//! - [`RemotePublisher`]: pushes an artifact to object storage and returns its public URL
//!
//! # Stored name format
//!
//! Raw uploads are stored flat as `{identifier}_{original_filename}`. The identifier
//! is a hyphenated UUID, which never contains `_`, so the first `_` always splits
//! the name unambiguously. Name handling lives in the `keys` module.

pub mod artifacts;
pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod upload_store;

// Re-export commonly used types
pub use artifacts::ArtifactDirectory;
pub use factory::create_publisher;
pub use keys::public_object_url;
#[cfg(feature = "storage-s3")]
pub use s3::S3Publisher;
pub use traits::{PublishError, RemotePublisher, StorageError, StorageResult};
pub use upload_store::UploadStore;
