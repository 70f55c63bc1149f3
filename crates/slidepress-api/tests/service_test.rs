//! Health, docs, request ids and request limits.
//!
//! Run with: `cargo test -p slidepress-api --test service_test`

mod helpers;

use helpers::fakes::FakeConverter;
use helpers::fixtures::file_form;
use helpers::{setup_test_app, setup_test_app_from_config};
use slidepress_core::Config;
use std::sync::Arc;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_local_delivery() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/ready").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["delivery"], "local");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/upload/").is_some());
    assert!(body["paths"].get("/convert/").is_some());
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let app = setup_test_app().await;

    let generated = app.client().get("/").await;
    assert!(generated.headers().get("x-request-id").is_some());

    let propagated = app
        .client()
        .get("/")
        .add_header("X-Request-ID", "trace-me-123")
        .await;
    assert_eq!(
        propagated.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = Config::for_directories(
        temp_dir.path().join("uploads"),
        temp_dir.path().join("converted"),
    );
    config.0.max_upload_size_bytes = 1024;

    let app = setup_test_app_from_config(
        config,
        temp_dir,
        Arc::new(FakeConverter::succeeding()),
        None,
    )
    .await;

    let response = app
        .client()
        .post("/upload/")
        .multipart(file_form("huge.pptx", &vec![0u8; 8 * 1024]))
        .await;

    assert_eq!(response.status_code(), 413);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_body_limit_after_file_leaves_nothing_stored() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = Config::for_directories(
        temp_dir.path().join("uploads"),
        temp_dir.path().join("converted"),
    );
    config.0.max_upload_size_bytes = 1024;

    let app = setup_test_app_from_config(
        config,
        temp_dir,
        Arc::new(FakeConverter::succeeding()),
        None,
    )
    .await;

    let form = file_form("small.pptx", b"0123456789").add_text("note", "x".repeat(8 * 1024));
    let response = app.client().post("/upload/").multipart(form).await;

    assert_eq!(response.status_code(), 413);
    assert!(app.uploaded_files().is_empty());
}
