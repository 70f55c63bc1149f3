use crate::constants::FILE_ID_FIELD;
use crate::error::HttpAppError;
use crate::services::{convert_upload, RequestOrigin};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file_id;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
    Form, Json,
};
use serde::Deserialize;
use slidepress_core::models::ConvertResponse;
use slidepress_core::{AppError, FileId};
use slidepress_infra::ErrorResponse;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Identifier returned by `POST /upload/`
    pub file_id: String,
}

/// `file_id` from either a multipart or a urlencoded form body.
#[derive(Debug)]
pub struct ConvertForm(pub String);

impl<S> FromRequest<S> for ConvertForm
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::InvalidInput(format!("Invalid multipart body: {}", e.body_text()))
            })?;
            return Ok(ConvertForm(extract_multipart_file_id(multipart).await?));
        }

        let Form(body) = Form::<ConvertRequest>::from_request(req, state)
            .await
            .map_err(|e| {
                AppError::InvalidInput(format!(
                    "Expected form field '{}': {}",
                    FILE_ID_FIELD,
                    e.body_text()
                ))
            })?;
        Ok(ConvertForm(body.file_id))
    }
}

/// Convert a previously uploaded presentation and return where to download it.
#[utoipa::path(
    post,
    path = "/convert/",
    tag = "conversion",
    request_body(content = ConvertRequest, content_type = "application/x-www-form-urlencoded",
        description = "`file_id` as a form field; multipart/form-data is accepted too"),
    responses(
        (status = 200, description = "Converted; download location", body = ConvertResponse),
        (status = 400, description = "Missing file_id", body = ErrorResponse),
        (status = 404, description = "Unknown or already converted file_id", body = ErrorResponse),
        (status = 500, description = "Conversion or publish failure", body = ErrorResponse)
    )
)]
pub async fn convert_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ConvertForm(raw_id): ConvertForm,
) -> Result<Json<ConvertResponse>, HttpAppError> {
    // Anything that does not parse was never issued.
    let file_id: FileId = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("No upload with file_id {}", raw_id.trim())))?;

    let origin = RequestOrigin::from_headers(&headers);
    let target = convert_upload(&state, &file_id, &origin).await?;

    Ok(Json(ConvertResponse {
        download_url: target.into_download_url(),
    }))
}
