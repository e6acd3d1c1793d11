//! Upload endpoint

use crate::extractors::{ImageUpload, RetrievalError};
use crate::state::QuillpostState;
use crate::upload::{UploadError, UploadResponse};
use axum::{
    extract::{Path, State},
    Json,
};

/// `POST /upload/{namespace}`
///
/// Always answers `200 OK`; the outcome is in the body:
///
/// ```json
/// { "code": 1, "message": "upload succeeded", "url": "/static/upload/article/2026-10/17/upload_3f9a2c1b_1760688000.png" }
/// ```
pub async fn upload(
    State(state): State<QuillpostState>,
    Path(namespace): Path<String>,
    upload: Result<ImageUpload, RetrievalError>,
) -> Json<UploadResponse> {
    let retrieved = upload
        .map(|ImageUpload(file)| file)
        .map_err(|e| UploadError::Retrieval(e.to_string()));

    let result = state.pipeline().process(&namespace, retrieved).await;

    Json(result.into())
}
