//! Local filesystem storage implementation

use super::traits::UploadStore;
use super::types::{StorageError, StorageResult};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Local filesystem storage backend
///
/// Writes uploads to the paths chosen by the
/// [`PathPlanner`](super::PathPlanner), creating directories on demand.
///
/// # Examples
///
/// ```rust,no_run
/// use quillpost::storage::{LocalStorage, UploadStore};
/// use std::path::Path;
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let storage = LocalStorage::new(Duration::from_secs(30));
/// let mut data: &[u8] = b"GIF89a";
/// storage
///     .write_stream(&mut data, Path::new("static/upload/article/2026-10/17/a.gif"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Upper bound on a single copy
    write_timeout: Duration,
}

impl LocalStorage {
    /// Creates a local storage backend with the given copy timeout
    #[must_use]
    pub const fn new(write_timeout: Duration) -> Self {
        Self { write_timeout }
    }
}

#[async_trait]
impl UploadStore for LocalStorage {
    async fn ensure_directory(&self, path: &Path) -> StorageResult<()> {
        let source = match fs::create_dir_all(path).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        // Another request created it between our check and mkdir
        if source.kind() == io::ErrorKind::AlreadyExists && is_dir(path).await {
            return Ok(());
        }

        Err(StorageError::Directory {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn write_stream(
        &self,
        source: &mut (dyn AsyncRead + Send + Unpin),
        destination: &Path,
    ) -> StorageResult<u64> {
        if let Some(parent) = destination.parent() {
            self.ensure_directory(parent).await?;
        }

        match tokio::time::timeout(self.write_timeout, copy_to_file(source, destination)).await {
            Ok(Ok(written)) => Ok(written),
            Ok(Err(err)) => {
                remove_partial(destination).await;
                Err(StorageError::Io(err))
            }
            Err(_) => {
                remove_partial(destination).await;
                Err(StorageError::Timeout(self.write_timeout))
            }
        }
    }

    async fn remove(&self, path: &Path) -> StorageResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

async fn copy_to_file(
    source: &mut (dyn AsyncRead + Send + Unpin),
    destination: &Path,
) -> io::Result<u64> {
    let mut file = fs::File::create(destination).await?;
    let written = tokio::io::copy(source, &mut file).await?;
    file.flush().await?;
    Ok(written)
}

async fn remove_partial(destination: &Path) {
    // Only regular files; a directory at the destination is not ours to remove
    if fs::metadata(destination).await.is_ok_and(|meta| meta.is_file()) {
        if let Err(err) = fs::remove_file(destination).await {
            tracing::warn!(
                path = %destination.display(),
                error = %err,
                "Failed to remove partially written upload"
            );
        }
    }
}
