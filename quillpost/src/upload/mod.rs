//! Upload validation and placement
//!
//! The request boundary hands an [`UploadSource`] to the [`UploadPipeline`],
//! which checks the declared extension and size, plans a date-partitioned
//! destination, writes the bytes and reports an [`UploadResult`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use quillpost::config::UploadSettings;
//! use quillpost::upload::{MemoryUpload, UploadPipeline, UploadResponse};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pipeline = UploadPipeline::from_settings(&UploadSettings::default())?;
//! let result = pipeline
//!     .process("article", Ok(MemoryUpload::new("cover.jpg", vec![0xFF, 0xD8, 0xFF])))
//!     .await;
//!
//! let body = serde_json::to_string(&UploadResponse::from(result))?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file_info;
mod namespace;
mod pipeline;
mod result;
mod source;

pub use error::UploadError;
pub use file_info::{AcceptedTypes, FileInfo, SizeLimits, IMAGE_TYPES};
pub use namespace::Namespace;
pub use pipeline::{Clock, StoredUpload, SystemClock, UploadFailure, UploadPipeline, UploadStage};
pub use result::{UploadResponse, UploadResult, SUCCESS_MESSAGE};
pub use source::{MemoryUpload, StreamUpload, UploadSource};
