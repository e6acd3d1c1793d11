//! Upload namespaces

use super::error::UploadError;
use std::fmt;

/// Feature or category that groups uploads on disk (e.g. `article`)
///
/// Always lowercase and limited to ASCII letters, digits, `-` and `_`, so it
/// is safe to use as a single path segment.
///
/// ```rust
/// use quillpost::upload::Namespace;
///
/// let ns = Namespace::new("Article").unwrap();
/// assert_eq!(ns.as_str(), "article");
///
/// assert!(Namespace::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Validates and lowercases a namespace
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidNamespace`] if `raw` is empty or contains
    /// anything other than ASCII letters, digits, `-` or `_`.
    pub fn new(raw: &str) -> Result<Self, UploadError> {
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(UploadError::InvalidNamespace(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Namespace as a path segment
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
