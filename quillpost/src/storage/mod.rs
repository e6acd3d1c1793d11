//! Upload placement and persistence
//!
//! - [`PathPlanner`] decides where an upload goes (pure)
//! - [`UploadStore`] writes it there; [`LocalStorage`] is the filesystem backend
//!
//! # Examples
//!
//! ```rust,no_run
//! use quillpost::storage::{LocalStorage, PathPlanner, UploadStore};
//! use quillpost::upload::Namespace;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let planner = PathPlanner::new("static/upload", "upload", true);
//! let plan = planner.plan(&Namespace::new("article")?, chrono::Utc::now(), "png");
//!
//! let storage = LocalStorage::new(Duration::from_secs(30));
//! storage.ensure_directory(&plan.directory).await?;
//! let mut bytes: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
//! storage.write_stream(&mut bytes, &plan.full_path).await?;
//! # Ok(())
//! # }
//! ```

mod local;
mod planner;
mod traits;
mod types;

pub use local::LocalStorage;
pub use planner::{PathPlanner, StoragePlan};
pub use traits::UploadStore;
pub use types::{StorageError, StorageResult};
