//! Request builders shared by the integration tests.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Ten bytes standing in for a presentation; the service never inspects content.
pub const TEN_BYTES: &[u8] = b"0123456789";

pub fn file_form(filename: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(filename.to_string())
        .mime_type(PPTX_MIME);
    MultipartForm::new().add_part("file", part)
}

/// Upload a file and return the parsed 200 body.
pub async fn upload(client: &TestServer, filename: &str, data: &[u8]) -> Value {
    let response = client
        .post("/upload/")
        .multipart(file_form(filename, data))
        .await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());
    response.json()
}

pub fn file_id_of(upload_body: &Value) -> String {
    upload_body
        .get("file_id")
        .and_then(Value::as_str)
        .expect("Expected 'file_id' in upload response")
        .to_string()
}
