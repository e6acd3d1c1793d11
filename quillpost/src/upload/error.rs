//! Upload failure taxonomy

use crate::storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons an upload can fail
///
/// The `Display` text of each variant is the message shown to the client, so
/// every failure names its cause.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The uploaded stream or its metadata could not be read from the request
    #[error("retrieval error")]
    Retrieval(String),

    /// The caller passed a namespace that cannot be used as a path segment
    #[error("invalid namespace")]
    InvalidNamespace(String),

    /// The file extension is not in the accepted set
    #[error("Filetype not allowed")]
    TypeNotAllowed {
        /// Extension derived from the file name
        file_type: String,
    },

    /// The file is smaller than the minimum size
    #[error("File is too small")]
    TooSmall {
        /// Actual size in bytes
        size: u64,
        /// Minimum allowed
        min: u64,
    },

    /// The file is larger than the maximum size
    #[error("File is too large")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed
        max: u64,
    },

    /// The upload source cannot report its length
    #[error("size unavailable")]
    SizeUnavailable,

    /// The stream length did not match the size the source declared
    #[error("size mismatch")]
    SizeMismatch {
        /// Size reported by the source
        declared: u64,
        /// Bytes actually read, capped one past `declared`
        written: u64,
    },

    /// The destination directory could not be created
    #[error("directory creation failed: {}", directory.display())]
    Directory {
        /// Directory that was being created
        directory: PathBuf,
        /// Storage failure
        source: StorageError,
    },

    /// The bytes could not be persisted
    #[error("write failed")]
    Write(#[source] StorageError),
}

impl UploadError {
    /// Whether the failure was caused by the client's input rather than the server
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Retrieval(_)
                | Self::InvalidNamespace(_)
                | Self::TypeNotAllowed { .. }
                | Self::TooSmall { .. }
                | Self::TooLarge { .. }
                | Self::SizeUnavailable
                | Self::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_name_the_cause() {
        assert_eq!(
            UploadError::TypeNotAllowed { file_type: "pdf".into() }.to_string(),
            "Filetype not allowed"
        );
        assert_eq!(UploadError::TooSmall { size: 0, min: 1 }.to_string(), "File is too small");
        assert_eq!(
            UploadError::TooLarge { size: 6_000_000, max: 5_000_000 }.to_string(),
            "File is too large"
        );
        assert_eq!(UploadError::SizeUnavailable.to_string(), "size unavailable");
        assert_eq!(UploadError::Retrieval("no field".into()).to_string(), "retrieval error");
    }

    #[test]
    fn test_directory_message_includes_path() {
        let err = UploadError::Directory {
            directory: PathBuf::from("static/upload/article/2026-10/17"),
            source: StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };
        assert_eq!(
            err.to_string(),
            "directory creation failed: static/upload/article/2026-10/17"
        );
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_rejection_classification() {
        assert!(UploadError::SizeUnavailable.is_rejection());
        assert!(UploadError::SizeMismatch { declared: 10, written: 11 }.is_rejection());
        assert!(UploadError::TooLarge { size: 2, max: 1 }.is_rejection());
        assert!(!UploadError::Write(StorageError::Io(io::Error::other("x")))
            .is_rejection());
    }
}
