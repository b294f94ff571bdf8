//! Upload outcome reported by the application

use serde::{Deserialize, Serialize};

/// JSON payload the application renders into its result container after
/// processing an upload.
///
/// Every field except `status` is optional. The shape is validated once
/// here, at the page boundary, so downstream code never probes loosely
/// typed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Top-level outcome, `"success"` or `"error"`.
    pub status: String,

    /// Successfully imported records, one per accepted CSV row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<serde_json::Value>>,

    /// Per-row (or file-level) error messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Free-form fallback message used when `errors` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadResult {
    /// Error message substituted when the result container never appears.
    pub const TIMEOUT_MESSAGE: &'static str = "Timeout: No response received from the frontend.";

    /// Synthetic result for a result container that did not appear within
    /// the wait window.
    pub fn timeout() -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            errors: Some(vec![Self::TIMEOUT_MESSAGE.to_string()]),
            message: None,
        }
    }

    /// Synthetic result for any other browser-side failure, including a
    /// result container whose text is not valid JSON.
    pub fn parse_failure(detail: impl std::fmt::Display) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            errors: Some(vec![format!("Unexpected error while parsing result: {detail}")]),
            message: None,
        }
    }

    /// Parse the result container's text content.
    pub fn from_container_text(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_success_payload() {
        let result = UploadResult::from_container_text(
            r#"{"status":"success","data":[{"name":"Desk Lamp","price":24.99}]}"#,
        )
        .unwrap();
        assert_eq!(result.status, "success");
        assert_eq!(result.data.unwrap(), vec![json!({"name":"Desk Lamp","price":24.99})]);
        assert!(result.errors.is_none());
        assert!(result.message.is_none());
    }

    #[test]
    fn parses_error_payload_with_message_only() {
        let result = UploadResult::from_container_text(
            r#"{"status":"error","message":"CSV could not be processed"}"#,
        )
        .unwrap();
        assert_eq!(result.status, "error");
        assert_eq!(result.message.as_deref(), Some("CSV could not be processed"));
    }

    #[test]
    fn rejects_payload_without_status() {
        assert!(UploadResult::from_container_text(r#"{"data":[]}"#).is_err());
    }

    #[test]
    fn synthetic_timeout_shape() {
        let result = UploadResult::timeout();
        assert_eq!(result.status, "error");
        assert_eq!(result.errors.unwrap(), vec![UploadResult::TIMEOUT_MESSAGE.to_string()]);
    }

    #[test]
    fn synthetic_parse_failure_carries_detail() {
        let result = UploadResult::parse_failure("expected value at line 1 column 1");
        let errors = result.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Unexpected error while parsing result: "));
        assert!(errors[0].contains("line 1 column 1"));
    }
}
