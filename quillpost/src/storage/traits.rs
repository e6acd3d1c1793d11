//! Storage trait definitions

use super::types::StorageResult;
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncRead;

/// Backend that persists upload streams at planned paths
///
/// Implementations must:
/// - Treat an already existing directory as success, including one created
///   concurrently by another request
/// - Overwrite an existing file at the destination
/// - Leave no partially written file behind when a write fails
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Creates `path` and all missing parents
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Directory`](super::StorageError::Directory) if
    /// the directory cannot be created.
    async fn ensure_directory(&self, path: &Path) -> StorageResult<()>;

    /// Copies all of `source` into `destination`, returning the bytes written
    ///
    /// The parent directory is created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the copy
    /// fails, or the copy exceeds the backend's time bound.
    async fn write_stream(
        &self,
        source: &mut (dyn AsyncRead + Send + Unpin),
        destination: &Path,
    ) -> StorageResult<u64>;

    /// Removes a stored file
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    async fn remove(&self, path: &Path) -> StorageResult<()>;
}
