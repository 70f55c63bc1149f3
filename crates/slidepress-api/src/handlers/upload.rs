use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::store_multipart_file;
use axum::{
    extract::{Multipart, State},
    Json,
};
use slidepress_core::models::UploadResponse;
use slidepress_infra::ErrorResponse;
use std::sync::Arc;

/// Receive a presentation and return the handle used to convert it.
///
/// Only the file is stored here; conversion happens on `POST /convert/`.
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "conversion",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Single field `file` carrying a .pptx presentation"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Not a .pptx file or malformed form", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let record = store_multipart_file(multipart, &state.uploads).await?;
    Ok(Json(UploadResponse::from(record)))
}
