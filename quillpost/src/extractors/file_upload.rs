//! File upload extractor for multipart form data
//!
//! Reads the `file` field of a multipart request into a
//! [`MemoryUpload`]. Validation is left to the upload pipeline; this
//! extractor only fails when the stream or its name cannot be read, or the
//! client takes longer than the state's [`ReadTimeout`] to send it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use quillpost::extractors::{ImageUpload, RetrievalError};
//! use quillpost::upload::UploadSource;
//!
//! async fn handler(upload: Result<ImageUpload, RetrievalError>) -> String {
//!     match upload {
//!         Ok(ImageUpload(file)) => format!("Received: {}", file.file_name()),
//!         Err(err) => err.to_string(),
//!     }
//! }
//! ```

use crate::upload::{MemoryUpload, UploadResponse, UploadResult};
use axum::{
    extract::{FromRef, FromRequest, Multipart, Request},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Why the upload could not be read from the request
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The request is not multipart or the body could not be read
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// No `file` field with a file name was sent
    #[error("No file found in upload")]
    MissingFile,

    /// The client did not finish sending the upload in time
    #[error("Upload read timed out after {0:?}")]
    Timeout(Duration),
}

/// Upper bound on reading an upload from the client
///
/// Taken from the router state through [`FromRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTimeout(pub Duration);

impl IntoResponse for RetrievalError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Upload could not be retrieved");
        Json(UploadResponse::from(UploadResult::failure("retrieval error"))).into_response()
    }
}

/// Extractor for a single uploaded file
///
/// Non-file fields and fields with other names are skipped.
#[derive(Debug)]
pub struct ImageUpload(pub MemoryUpload);

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
    ReadTimeout: FromRef<S>,
{
    type Rejection = RetrievalError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ReadTimeout(limit) = ReadTimeout::from_ref(state);

        tokio::time::timeout(limit, read_upload(req, state))
            .await
            .map_err(|_| RetrievalError::Timeout(limit))?
    }
}

async fn read_upload<S>(req: Request, state: &S) -> Result<ImageUpload, RetrievalError>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| RetrievalError::Multipart(e.body_text()))?;

    while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RetrievalError::Multipart(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| RetrievalError::Multipart(e.body_text()))?;

        return Ok(ImageUpload(MemoryUpload::new(file_name, data)));
    }

    Err(RetrievalError::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadSource;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use bytes::Bytes;
    use futures_util::stream::{self, StreamExt};
    use std::fmt::Write;

    const BOUNDARY: &str = "----QuillpostBoundary7MA4YWxkTrZu0gW";

    const STATE: ReadTimeout = ReadTimeout(Duration::from_secs(5));

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = String::new();

        for (name, filename, content) in parts {
            write!(body, "--{BOUNDARY}\r\n").unwrap();
            match filename {
                Some(filename) => write!(
                    body,
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                )
                .unwrap(),
                None => write!(body, "Content-Disposition: form-data; name=\"{name}\"\r\n").unwrap(),
            }
            body.push_str("Content-Type: application/octet-stream\r\n\r\n");
            body.push_str(&String::from_utf8_lossy(content));
            body.push_str("\r\n");
        }
        write!(body, "--{BOUNDARY}--\r\n").unwrap();

        Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_file_field() {
        let req = multipart_request(&[
            ("title", None, &b"Cover"[..]),
            ("file", Some("photo.png"), &b"PNG DATA"[..]),
        ]);

        let ImageUpload(file) = ImageUpload::from_request(req, &STATE).await.unwrap();
        assert_eq!(file.file_name(), "photo.png");
        assert_eq!(file.size(), Some(8));
        assert_eq!(file.data().as_ref(), b"PNG DATA");
    }

    #[tokio::test]
    async fn test_ignores_other_file_fields() {
        let req = multipart_request(&[("avatar", Some("me.png"), &b"x"[..])]);

        let result = ImageUpload::from_request(req, &STATE).await;
        assert!(matches!(result, Err(RetrievalError::MissingFile)));
    }

    #[tokio::test]
    async fn test_file_field_without_name_is_missing() {
        let req = multipart_request(&[("file", None, &b"x"[..])]);

        let result = ImageUpload::from_request(req, &STATE).await;
        assert!(matches!(result, Err(RetrievalError::MissingFile)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_body_times_out() {
        // The part header arrives, the file bytes never do
        let head = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\r\nPNG"
        );
        let body = stream::iter([Ok::<_, std::io::Error>(Bytes::from(head))]).chain(stream::pending());

        let req = Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from_stream(body))
            .unwrap();

        let result = ImageUpload::from_request(req, &STATE).await;
        assert!(matches!(result, Err(RetrievalError::Timeout(limit)) if limit == STATE.0));
    }

    #[tokio::test]
    async fn test_not_multipart() {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let result = ImageUpload::from_request(req, &STATE).await;
        assert!(matches!(result, Err(RetrievalError::Multipart(_))));
    }

    #[tokio::test]
    async fn test_rejection_is_structured_failure() {
        let response = RetrievalError::MissingFile.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "message": "retrieval error"}));
    }
}
