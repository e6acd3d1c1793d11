//! Application-level error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error type
///
/// Upload failures never surface here; the pipeline turns them into an
/// [`UploadResult`](crate::upload::UploadResult).
#[derive(Debug, Error)]
pub enum QuillpostError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Article store failure
    #[error("Article store error: {0}")]
    Articles(String),

    /// I/O error outside the upload pipeline
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for QuillpostError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
