//! Per-upload metadata and validation

use super::error::UploadError;
use crate::config::UploadSettings;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Default accepted extensions: common raster image formats
pub const IMAGE_TYPES: &str = "jpg|gif|p?jpeg|(x-)?png";

/// Accepted file type pattern
///
/// The pattern must match the whole extension and is case-insensitive.
///
/// ```rust
/// use quillpost::upload::{AcceptedTypes, IMAGE_TYPES};
///
/// let accepted = AcceptedTypes::new(IMAGE_TYPES).unwrap();
/// assert!(accepted.matches("JPEG"));
/// assert!(accepted.matches("x-png"));
/// assert!(!accepted.matches("pdf"));
/// assert!(!accepted.matches("jpgx"));
/// ```
#[derive(Debug, Clone)]
pub struct AcceptedTypes {
    pattern: Regex,
}

impl AcceptedTypes {
    /// Compiles an accepted-type pattern
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    /// Whether `file_type` is accepted
    #[must_use]
    pub fn matches(&self, file_type: &str) -> bool {
        self.pattern.is_match(file_type)
    }
}

/// Inclusive size bounds in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    /// Smallest accepted size
    pub min: u64,
    /// Largest accepted size
    pub max: u64,
}

impl SizeLimits {
    /// Creates size limits
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Reads limits from upload settings
    #[must_use]
    pub const fn from_settings(settings: &UploadSettings) -> Self {
        Self::new(settings.min_size, settings.max_size)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(1, 5_000_000)
    }
}

/// Metadata and validation state for one uploaded file
///
/// Created per request. Validation methods record the first failure in
/// `error`, which stays `None` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Declared file name
    pub name: String,

    /// Extension derived from `name`, case preserved, without the dot
    #[serde(rename = "type")]
    pub file_type: String,

    /// Size in bytes, once known
    pub size: u64,

    /// Validation failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileInfo {
    /// Creates file info for a declared name, deriving its type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let file_type = Self::derive_type(&name);
        Self {
            name,
            file_type,
            size: 0,
            error: None,
        }
    }

    /// Extension of the last path segment of `name`
    ///
    /// Returns an empty string when there is no extension.
    ///
    /// ```rust
    /// use quillpost::upload::FileInfo;
    ///
    /// assert_eq!(FileInfo::derive_type("photo.PNG"), "PNG");
    /// assert_eq!(FileInfo::derive_type("archive.tar.gz"), "gz");
    /// assert_eq!(FileInfo::derive_type("README"), "");
    /// assert_eq!(FileInfo::derive_type("v1.2/notes"), "");
    /// ```
    #[must_use]
    pub fn derive_type(name: &str) -> String {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        base.rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default()
    }

    /// Lowercase extension used for the stored file name
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_type.to_ascii_lowercase()
    }

    /// Checks the type against `accepted`
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TypeNotAllowed`] when the type does not match.
    pub fn check_type(&self, accepted: &AcceptedTypes) -> Result<(), UploadError> {
        if accepted.matches(&self.file_type) {
            Ok(())
        } else {
            Err(UploadError::TypeNotAllowed {
                file_type: self.file_type.clone(),
            })
        }
    }

    /// Checks the size against `limits`
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TooSmall`] or [`UploadError::TooLarge`] when the
    /// size is outside the inclusive bounds.
    pub fn check_size(&self, limits: SizeLimits) -> Result<(), UploadError> {
        if self.size < limits.min {
            Err(UploadError::TooSmall {
                size: self.size,
                min: limits.min,
            })
        } else if self.size > limits.max {
            Err(UploadError::TooLarge {
                size: self.size,
                max: limits.max,
            })
        } else {
            Ok(())
        }
    }

    /// Validates the type, recording "Filetype not allowed" on failure
    pub fn validate_type(&mut self, accepted: &AcceptedTypes) -> bool {
        let result = self.check_type(accepted);
        self.record(result)
    }

    /// Validates the size, recording "File is too small" or "File is too large"
    pub fn validate_size(&mut self, limits: SizeLimits) -> bool {
        let result = self.check_size(limits);
        self.record(result)
    }

    fn record(&mut self, result: Result<(), UploadError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }
}
