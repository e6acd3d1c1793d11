//! Axum extractors for quillpost
//!
//! Provides the multipart extractor that turns an upload request into an
//! [`UploadSource`](crate::upload::UploadSource) for the pipeline.

mod file_upload;

pub use file_upload::{ImageUpload, ReadTimeout, RetrievalError, UPLOAD_FIELD};
