use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UploadRecord;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Body returned by `POST /upload/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Opaque handle to pass to `POST /convert/`
    #[schema(value_type = String, format = Uuid)]
    pub file_id: String,
    pub filename: String,
    /// Size in bytes, measured after the write
    pub size: u64,
}

impl From<UploadRecord> for UploadResponse {
    fn from(record: UploadRecord) -> Self {
        Self {
            file_id: record.identifier.to_string(),
            filename: record.original_filename,
            size: record.size,
        }
    }
}

/// Body returned by `POST /convert/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    pub download_url: String,
}
