//! Data models for the application
//!
//! Domain records live in [upload] and [conversion]; request/response bodies
//! for the HTTP surface live in [api].

mod api;
mod conversion;
mod upload;

// Re-export all models for convenient imports
pub use api::{ConvertResponse, RootResponse, UploadResponse};
pub use conversion::{ConversionResult, DeliveryTarget};
pub use upload::UploadRecord;
