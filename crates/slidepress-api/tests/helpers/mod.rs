//! Test helpers: build AppState and router for integration tests.
//!
//! Every `TestApp` owns its own upload and output directories, so tests run in
//! parallel without sharing state. Run with `cargo test -p slidepress-api`.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use axum_test::TestServer;
use slidepress_api::setup::{routes, services};
use slidepress_core::Config;
use slidepress_processing::DocumentConverter;
use slidepress_storage::RemotePublisher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the directories behind it.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in a directory, sorted.
    pub fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read directory")
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        Self::files_in(&self.upload_dir)
    }

    pub fn converted_files(&self) -> Vec<String> {
        Self::files_in(&self.output_dir)
    }
}

/// Local delivery, converter that always succeeds.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(fakes::FakeConverter::succeeding()), None).await
}

pub async fn setup_test_app_with(
    converter: Arc<dyn DocumentConverter>,
    publisher: Option<Arc<dyn RemotePublisher>>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = Config::for_directories(
        temp_dir.path().join("uploads"),
        temp_dir.path().join("converted"),
    );
    setup_test_app_from_config(config, temp_dir, converter, publisher).await
}

pub async fn setup_test_app_from_config(
    config: Config,
    temp_dir: TempDir,
    converter: Arc<dyn DocumentConverter>,
    publisher: Option<Arc<dyn RemotePublisher>>,
) -> TestApp {
    let state = services::initialize_services(&config, converter, publisher)
        .await
        .expect("Failed to initialize services");
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        upload_dir: config.upload_dir().to_path_buf(),
        output_dir: config.output_dir().to_path_buf(),
        _temp_dir: temp_dir,
    }
}

/// Path component of a download URL, whether or not it was made absolute.
pub fn path_of(download_url: &str) -> &str {
    match download_url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or("/"),
        None => download_url,
    }
}
