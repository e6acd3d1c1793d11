//! Upload sources handed to the pipeline by the request boundary

use bytes::Bytes;
use std::io::Cursor;
use tokio::io::AsyncRead;

/// An uploaded byte stream plus the metadata the pipeline needs
///
/// Reporting the size is part of the contract: a source that cannot tell
/// its length returns `None`, and the pipeline rejects it with
/// [`UploadError::SizeUnavailable`](super::UploadError::SizeUnavailable).
///
/// The pipeline takes sources by value, so the stream is released on every
/// exit path.
pub trait UploadSource: Send {
    /// File name declared by the client
    fn file_name(&self) -> &str;

    /// Length of the stream in bytes, if known
    fn size(&self) -> Option<u64>;

    /// Converts the source into its byte stream
    fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin>
    where
        Self: Sized;
}

/// Upload fully buffered in memory
///
/// # Examples
///
/// ```rust
/// use quillpost::upload::{MemoryUpload, UploadSource};
///
/// let file = MemoryUpload::new("photo.png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(file.size(), Some(4));
/// assert_eq!(file.file_name(), "photo.png");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryUpload {
    file_name: String,
    data: Bytes,
}

impl MemoryUpload {
    /// Creates an in-memory upload
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Uploaded bytes
    #[must_use]
    pub const fn data(&self) -> &Bytes {
        &self.data
    }
}

impl UploadSource for MemoryUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn size(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }

    fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin> {
        Box::new(Cursor::new(self.data))
    }
}

/// Upload backed by an arbitrary reader
///
/// The length is whatever the boundary declared, possibly nothing.
pub struct StreamUpload<R> {
    file_name: String,
    size: Option<u64>,
    reader: R,
}

impl<R> StreamUpload<R>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    /// Creates a stream upload with a known or unknown length
    pub fn new(file_name: impl Into<String>, size: Option<u64>, reader: R) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            reader,
        }
    }
}

impl<R> UploadSource for StreamUpload<R>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn size(&self) -> Option<u64> {
        self.size
    }

    fn into_reader(self) -> Box<dyn AsyncRead + Send + Unpin> {
        Box::new(self.reader)
    }
}
