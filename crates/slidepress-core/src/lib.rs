//! Slidepress Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and the
//! identity generator shared by every Slidepress component.

pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod models;

// Re-export commonly used types
pub use config::{Config, RemoteStorageConfig, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use identity::{new_identifier, FileId};
pub use models::{ConversionResult, DeliveryTarget, UploadRecord};
