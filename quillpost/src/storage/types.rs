//! Core types for upload storage

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while placing an upload on disk
#[derive(Debug, Error)]
pub enum StorageError {
    /// The destination directory could not be created
    #[error("Cannot create directory {}: {source}", path.display())]
    Directory {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// I/O error while writing the upload
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Copying the upload took longer than the configured bound
    #[error("Write timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_names_path() {
        let err = StorageError::Directory {
            path: PathBuf::from("static/upload/article"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("static/upload/article"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_io_error_from() {
        let err: StorageError = io::Error::other("disk full").into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
