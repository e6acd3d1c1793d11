//! Upload endpoint integration tests

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use quillpost::articles::InMemoryArticles;
use quillpost::config::QuillpostConfig;
use quillpost::handlers::router;
use quillpost::state::QuillpostState;
use quillpost::upload::UploadResponse;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn server_with_root(root: PathBuf) -> TestServer {
    let mut config = QuillpostConfig::default();
    config.upload.root = root;

    let state = QuillpostState::with_config(config, Arc::new(InMemoryArticles::default()))
        .expect("valid config");
    TestServer::new(router(state)).expect("Failed to create test server")
}

fn image_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_type("application/octet-stream");
    MultipartForm::new().add_part("file", part)
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                found.extend(files_under(&path));
            } else {
                found.push(path);
            }
        }
    }
    found
}

#[tokio::test]
async fn test_png_upload_is_stored_and_served() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("static").join("upload");
    let server = server_with_root(root.clone());

    let response = server
        .post("/upload/article")
        .multipart(image_form("photo.png", vec![42u8; 2000]))
        .await;

    response.assert_status_ok();
    let body: UploadResponse = response.json();
    assert_eq!(body.code, 1);
    assert_eq!(body.message, "upload succeeded");

    let url = body.url.expect("url on success");
    assert!(url.contains("/static/upload/article/"), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    let stored = files_under(&root);
    assert_eq!(stored.len(), 1);
    assert_eq!(std::fs::read(&stored[0]).unwrap().len(), 2000);

    let served = server.get(&url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().len(), 2000);
}

#[tokio::test]
async fn test_pdf_is_rejected() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let response = server
        .post("/upload/article")
        .multipart(image_form("doc.pdf", b"%PDF-1.4".to_vec()))
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({"code": 0, "message": "Filetype not allowed"}));
    assert!(files_under(temp.path()).is_empty());
}

#[tokio::test]
async fn test_oversize_image_gets_structured_failure() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let response = server
        .post("/upload/article")
        .multipart(image_form("photo.jpg", vec![0u8; 6_000_000]))
        .await;

    response.assert_status_ok();
    let body: UploadResponse = response.json();
    assert_eq!(body.code, 0);
    assert_eq!(body.message, "File is too large");
    assert!(files_under(temp.path()).is_empty());
}

#[tokio::test]
async fn test_empty_image_is_too_small() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let response = server
        .post("/upload/article")
        .multipart(image_form("tiny.gif", Vec::new()))
        .await;

    let body: UploadResponse = response.json();
    assert_eq!(body.code, 0);
    assert_eq!(body.message, "File is too small");
}

#[tokio::test]
async fn test_directory_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("upload");
    std::fs::write(&root, b"not a directory").unwrap();
    let server = server_with_root(root.clone());

    let response = server
        .post("/upload/article")
        .multipart(image_form("photo.png", vec![1u8; 2000]))
        .await;

    response.assert_status_ok();
    let body: UploadResponse = response.json();
    assert_eq!(body.code, 0);
    assert!(body.message.starts_with("directory creation failed"));
    assert_eq!(files_under(temp.path()), vec![root]);
}

#[tokio::test]
async fn test_missing_file_field_is_retrieval_error() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let form = MultipartForm::new().add_text("title", "no file here");
    let response = server.post("/upload/article").multipart(form).await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({"code": 0, "message": "retrieval error"}));
}

#[tokio::test]
async fn test_invalid_namespace() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let response = server
        .post("/upload/bad.name")
        .multipart(image_form("photo.png", vec![1u8; 10]))
        .await;

    let body: UploadResponse = response.json();
    assert_eq!(body.code, 0);
    assert_eq!(body.message, "invalid namespace");
    assert!(files_under(temp.path()).is_empty());
}

#[tokio::test]
async fn test_health() {
    let temp = TempDir::new().unwrap();
    let server = server_with_root(temp.path().join("upload"));

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}
