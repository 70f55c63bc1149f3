//! Liveness and readiness probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    upload_dir: String,
    output_dir: String,
    delivery: &'static str,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

async fn directory_status(path: &Path) -> String {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => "healthy".to_string(),
        Ok(meta) if meta.is_dir() => "read-only".to_string(),
        Ok(_) => "not a directory".to_string(),
        Err(e) => format!("unavailable: {}", e),
    }
}

/// Readiness probe - both managed directories exist and are writable.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let upload_dir = directory_status(state.uploads.base_path()).await;
    let output_dir = directory_status(state.artifacts.path()).await;
    let ready = upload_dir == "healthy" && output_dir == "healthy";

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            upload_dir,
            output_dir,
            delivery: if state.delivery.is_remote() {
                "remote"
            } else {
                "local"
            },
        }),
    )
}
