//! Upload → convert → download, with local delivery.
//!
//! Run with: `cargo test -p slidepress-api --test conversion_test`

mod helpers;

use helpers::fakes::{FakeConverter, FAKE_PDF};
use helpers::fixtures::{file_form, file_id_of, upload, PPTX_MIME, TEN_BYTES};
use helpers::{path_of, setup_test_app, setup_test_app_with};
use std::sync::Arc;

#[tokio::test]
async fn test_root_returns_greeting() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Hello World");
}

#[tokio::test]
async fn test_upload_reports_identifier_name_and_size() {
    let app = setup_test_app().await;

    let body = upload(app.client(), "slides.pptx", TEN_BYTES).await;

    assert_eq!(body["filename"], "slides.pptx");
    assert_eq!(body["size"], 10);
    let file_id = file_id_of(&body);
    assert_eq!(
        app.uploaded_files(),
        vec![format!("{}_slides.pptx", file_id)]
    );
}

#[tokio::test]
async fn test_upload_rejects_other_extensions() {
    let app = setup_test_app().await;

    for name in ["notes.docx", "slides.ppt", "slides.PPTX"] {
        let response = app
            .client()
            .post("/upload/")
            .multipart(file_form(name, TEN_BYTES))
            .await;

        assert_eq!(response.status_code(), 400, "{} should be rejected", name);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(body["error"].as_str().unwrap().contains(".pptx"));
    }

    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("note", "no file here");
    let response = app.client().post("/upload/").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_two_file_fields_leave_nothing_stored() {
    let app = setup_test_app().await;

    let form = file_form("first.pptx", TEN_BYTES).add_part(
        "file",
        axum_test::multipart::Part::bytes(bytes::Bytes::from_static(TEN_BYTES))
            .file_name("second.pptx")
            .mime_type(PPTX_MIME),
    );
    let response = app.client().post("/upload/").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_overlong_filename_is_rejected() {
    let app = setup_test_app().await;

    let name = format!("{}.pptx", "a".repeat(250));
    let response = app
        .client()
        .post("/upload/")
        .multipart(file_form(&name, TEN_BYTES))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_same_filename_twice_gives_two_uploads() {
    let app = setup_test_app().await;

    let first = file_id_of(&upload(app.client(), "slides.pptx", b"first").await);
    let second = file_id_of(&upload(app.client(), "slides.pptx", b"second").await);

    assert_ne!(first, second);
    assert_eq!(app.uploaded_files().len(), 2);
}

#[tokio::test]
async fn test_upload_convert_download() {
    let app = setup_test_app().await;
    let client = app.client();

    let file_id = file_id_of(&upload(client, "slides.pptx", TEN_BYTES).await);

    let response = client
        .post("/convert/")
        .form(&[("file_id", file_id.as_str())])
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let body: serde_json::Value = response.json();
    let download_url = body["download_url"].as_str().unwrap().to_string();
    assert!(
        download_url.ends_with("/local-files/slides.pdf"),
        "unexpected download_url {}",
        download_url
    );

    let download = client.get(path_of(&download_url)).await;
    assert_eq!(download.status_code(), 200);
    assert_eq!(download.as_bytes().as_ref(), FAKE_PDF);

    assert_eq!(app.converted_files(), vec!["slides.pdf".to_string()]);
}

#[tokio::test]
async fn test_convert_accepts_multipart_form() {
    let app = setup_test_app().await;
    let client = app.client();

    let file_id = file_id_of(&upload(client, "quarterly.pptx", TEN_BYTES).await);

    let form = axum_test::multipart::MultipartForm::new().add_text("file_id", file_id);
    let response = client.post("/convert/").multipart(form).await;

    assert_eq!(response.status_code(), 200, "{}", response.text());
    let body: serde_json::Value = response.json();
    assert!(body["download_url"]
        .as_str()
        .unwrap()
        .ends_with("/local-files/quarterly.pdf"));
}

#[tokio::test]
async fn test_convert_host_header_makes_url_absolute() {
    let app = setup_test_app().await;
    let client = app.client();

    let file_id = file_id_of(&upload(client, "slides.pptx", TEN_BYTES).await);

    let response = client
        .post("/convert/")
        .add_header("Host", "convert.example.com")
        .form(&[("file_id", file_id.as_str())])
        .await;

    assert_eq!(response.status_code(), 200, "{}", response.text());
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["download_url"],
        "http://convert.example.com/local-files/slides.pdf"
    );
}

#[tokio::test]
async fn test_convert_unknown_identifier_is_404() {
    let app = setup_test_app().await;

    for unknown in [
        "6f1c1e52-8a43-4c55-9d7e-2f0b8f3b9a10".to_string(),
        "not-an-identifier".to_string(),
    ] {
        let response = app
            .client()
            .post("/convert/")
            .form(&[("file_id", unknown.as_str())])
            .await;

        assert_eq!(response.status_code(), 404, "{} should be unknown", unknown);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_convert_without_file_id_is_400() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/convert/")
        .form(&[("something_else", "x")])
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_conversion_consumes_the_upload() {
    let app = setup_test_app().await;
    let client = app.client();

    let file_id = file_id_of(&upload(client, "slides.pptx", TEN_BYTES).await);

    let first = client
        .post("/convert/")
        .form(&[("file_id", file_id.as_str())])
        .await;
    assert_eq!(first.status_code(), 200);
    assert!(app.uploaded_files().is_empty());

    let second = client
        .post("/convert/")
        .form(&[("file_id", file_id.as_str())])
        .await;
    assert_eq!(second.status_code(), 404);
}

#[tokio::test]
async fn test_conversion_failure_is_500_with_diagnostic() {
    let app = setup_test_app_with(
        Arc::new(FakeConverter::failing("source file could not be loaded")),
        None,
    )
    .await;
    let client = app.client();

    let file_id = file_id_of(&upload(client, "broken.pptx", TEN_BYTES).await);

    let response = client
        .post("/convert/")
        .form(&[("file_id", file_id.as_str())])
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONVERSION_FAILED");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("source file could not be loaded"));

    // raw upload is removed even when conversion fails; nothing was produced
    assert!(app.uploaded_files().is_empty());
    assert!(app.converted_files().is_empty());
}

#[tokio::test]
async fn test_missing_local_file_is_404() {
    let app = setup_test_app().await;

    let response = app.client().get("/local-files/never-converted.pdf").await;

    assert_eq!(response.status_code(), 404);
}
