//! quillpost: a small blog server with a validated image upload pipeline
//!
//! Uploaded images are checked against an accepted-extension pattern and
//! inclusive size bounds, then written to a namespace- and date-partitioned
//! directory:
//!
//! ```text
//! static/upload/<namespace>/<YYYY-MM>/<DD>/<prefix>_<token>_<unix seconds>.<ext>
//! ```
//!
//! Every outcome is reported as a structured result; nothing in the upload
//! path panics on bad input or I/O failure.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quillpost::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     quillpost::observability::init()?;
//!
//!     let config = QuillpostConfig::load_for_service("blog")?;
//!     let state = QuillpostState::with_config(config, std::sync::Arc::new(InMemoryArticles::default()))?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`upload`]: validation, the upload state machine and results
//! - [`storage`]: path planning and the filesystem writer
//! - [`articles`]: article store, home listing and tag cloud
//! - [`handlers`]: the axum router

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::missing_errors_doc)]

pub mod articles;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod observability;
pub mod state;
pub mod storage;
pub mod upload;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use quillpost::prelude::*;
    //! ```

    // Upload pipeline
    pub use crate::upload::{
        FileInfo, MemoryUpload, Namespace, StreamUpload, UploadError, UploadPipeline,
        UploadResponse, UploadResult, UploadSource, UploadStage,
    };

    // Storage
    pub use crate::storage::{LocalStorage, PathPlanner, StorageError, StoragePlan, UploadStore};

    // Articles
    pub use crate::articles::{Article, ArticleSource, InMemoryArticles};

    // Extractors
    pub use crate::extractors::{ImageUpload, RetrievalError};

    // Configuration, errors and state
    pub use crate::config::QuillpostConfig;
    pub use crate::error::QuillpostError;
    pub use crate::state::QuillpostState;

    // Router
    pub use crate::handlers::router;

    // Re-export key dependencies
    pub use axum;

    // Convenience for JSON responses
    pub use serde_json::json;
}
