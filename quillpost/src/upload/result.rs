//! Externally visible upload outcomes

use serde::{Deserialize, Serialize};

/// Message returned for a stored upload
pub const SUCCESS_MESSAGE: &str = "upload succeeded";

/// Outcome of one upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Root-relative URL of the stored file, only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Whether the file was stored
    pub uploaded: bool,

    /// Human-readable outcome
    pub message: String,
}

impl UploadResult {
    /// Successful upload served at `url`
    #[must_use]
    pub fn success(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            uploaded: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Failed upload with a specific reason
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            url: None,
            uploaded: false,
            message: message.into(),
        }
    }
}

/// JSON body sent to upload clients
///
/// ```json
/// { "code": 1, "message": "upload succeeded", "url": "/static/upload/article/2026-10/17/upload_1760688000.png" }
/// { "code": 0, "message": "Filetype not allowed" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// 1 on success, 0 on failure
    pub code: u8,

    /// Human-readable outcome
    pub message: String,

    /// Root-relative URL, only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            code: u8::from(result.uploaded),
            message: result.message,
            url: result.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response_json() {
        let response = UploadResponse::from(UploadResult::success("/static/upload/a.png"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"code": 1, "message": "upload succeeded", "url": "/static/upload/a.png"})
        );
    }

    #[test]
    fn test_failure_response_has_no_url() {
        let response = UploadResponse::from(UploadResult::failure("File is too large"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"code": 0, "message": "File is too large"})
        );
    }
}
