//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Anything that converts into
//! `AppError` converts into `HttpAppError` and renders the same `ErrorResponse`.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use slidepress_core::{AppError, ErrorMetadata, LogLevel};
use slidepress_infra::ErrorResponse;
use slidepress_processing::ConversionError;
use slidepress_storage::{PublishError, StorageError};
use std::sync::OnceLock;

static PRODUCTION_MODE: OnceLock<bool> = OnceLock::new();

/// Record, once at startup, whether error details must be withheld from clients.
/// Later calls are ignored.
pub fn set_production_mode(is_production: bool) {
    let _ = PRODUCTION_MODE.set(is_production);
}

fn is_production_mode() -> bool {
    PRODUCTION_MODE.get().copied().unwrap_or(false)
}

/// Wrapper type for AppError to implement IntoResponse (orphan rule)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        // A failing upload stream usually means the client, not the disk
        if let StorageError::StreamFailed(ref io) = err {
            if let Some(multipart) = io
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<MultipartError>())
            {
                return HttpAppError(multipart_error(multipart));
            }
        }
        HttpAppError(err.into())
    }
}

impl From<ConversionError> for HttpAppError {
    fn from(err: ConversionError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<PublishError> for HttpAppError {
    fn from(err: PublishError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(multipart_error(&err))
    }
}

fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart body: {}", err.body_text()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl HttpAppError {
    fn render(&self, is_production: bool) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let hide_details = is_production || app_error.is_sensitive();
        let body = ErrorResponse {
            error: app_error.client_message(),
            details: (!hide_details).then(|| app_error.detailed_message()),
            error_type: (!hide_details).then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        self.render(is_production_mode())
    }
}
