//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p pixpack-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pixpack_api::setup::routes;
use pixpack_api::state::AppState;
use pixpack_core::{Config, ServiceConfig};
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the directory workspaces are created in.
pub struct TestApp {
    pub server: TestServer,
    pub workspace_root: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of entries left in the workspace root
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.workspace_root.path())
            .expect("Failed to read workspace root")
            .count()
    }
}

pub fn create_test_config(workspace_root: &TempDir) -> Config {
    let mut service = ServiceConfig::default();
    service.workspace_dir = Some(workspace_root.path().to_string_lossy().into_owned());
    Config(Box::new(service))
}

/// Setup test app with an isolated workspace root.
pub fn setup_test_app() -> TestApp {
    let workspace_root = tempfile::tempdir().expect("Failed to create workspace root");
    setup_test_app_with(workspace_root, |_| {})
}

/// Setup test app after letting the caller adjust the configuration.
pub fn setup_test_app_with(
    workspace_root: TempDir,
    configure: impl FnOnce(&mut ServiceConfig),
) -> TestApp {
    let mut config = create_test_config(&workspace_root);
    configure(config.0.as_mut());

    let state = Arc::new(AppState::new(config.clone()));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        workspace_root,
    }
}

/// File part with the given name and bytes.
pub fn file_part(file_name: &str, data: Vec<u8>, mime_type: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}

/// Form with an `options` field and one `files` part per entry.
pub fn conversion_form(options: &serde_json::Value, files: Vec<Part>) -> MultipartForm {
    files.into_iter().fold(
        MultipartForm::new().add_text("options", options.to_string()),
        |form, part| form.add_part("files", part),
    )
}

/// Entry names of a ZIP archive, in archive order.
pub fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("Response is not a ZIP archive");
    (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .expect("Failed to read ZIP entry")
                .name()
                .to_string()
        })
        .collect()
}

/// Raw bytes of the ZIP entry at `index`.
pub fn zip_entry_bytes(bytes: &[u8], index: usize) -> Vec<u8> {
    use std::io::Read;

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("Response is not a ZIP archive");
    let mut entry = archive.by_index(index).expect("Failed to read ZIP entry");
    let mut data = Vec::new();
    entry
        .read_to_end(&mut data)
        .expect("Failed to read ZIP entry data");
    data
}
