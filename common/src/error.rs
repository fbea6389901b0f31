//! Client-side validation failures and helpers for reading error bodies.

use serde_json::Value;
use thiserror::Error;

/// A problem detected before any request leaves the browser.
///
/// The `Display` text is the toast description; [`ValidationError::title`]
/// is the toast heading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a CSV, XLSX, or JSON file.")]
    InvalidFileType,
    #[error("Files larger than {limit_mb} MB are not accepted.")]
    FileTooLarge { limit_mb: u64 },
    #[error("The file needs at least two numeric columns.")]
    NotEnoughNumericColumns,
    #[error("Please select at least one X column and one Y column.")]
    MissingColumns,
    #[error("Minimum 2 points required.")]
    InsufficientPoints,
    #[error("Numbers only.")]
    NonNumeric,
    #[error("Please analyze data first.")]
    NoModel,
    #[error("Please enter a value for {0}.")]
    MissingInput(String),
    #[error("Please enter a valid number for {0}.")]
    InvalidNumber(String),
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::InvalidFileType => "Invalid file type",
            ValidationError::FileTooLarge { .. } => "File too large",
            ValidationError::NotEnoughNumericColumns => "Not enough numeric columns",
            ValidationError::MissingColumns => "Missing information",
            ValidationError::InsufficientPoints => "Insufficient Data",
            ValidationError::NonNumeric => "Invalid Input",
            ValidationError::NoModel => "No model available",
            ValidationError::MissingInput(_) => "Missing input",
            ValidationError::InvalidNumber(_) => "Invalid input",
        }
    }
}

/// Shown when a failed upload answer carries no readable message.
pub const UPLOAD_FAILED: &str = "Failed to upload file. Please try again.";
/// Shown when a failed analysis answer carries no readable message.
pub const ANALYSIS_FAILED: &str = "Failed to analyze data. Please try again.";

/// Extracts a human readable message from an error response body.
///
/// The analysis backend answers with `{"detail": "..."}` (or a list of
/// `{"msg": ...}` objects for rejected payloads); same-origin routes answer
/// with `{"error": "..."}`. Anything else yields `fallback`.
pub fn describe_failure(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => return detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }
        _ => {}
    }

    match value.get("error") {
        Some(Value::String(error)) if !error.trim().is_empty() => error.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = UPLOAD_FAILED;

    #[test]
    fn prefers_backend_detail() {
        let body = r#"{"detail":"Unsupported file format. Please upload CSV, XLSX, or JSON files."}"#;
        assert_eq!(
            describe_failure(body, FALLBACK),
            "Unsupported file format. Please upload CSV, XLSX, or JSON files."
        );
    }

    #[test]
    fn joins_validation_messages() {
        let body = r#"{"detail":[{"loc":["body","x"],"msg":"field required"},{"msg":"value is not a valid float"}]}"#;
        assert_eq!(
            describe_failure(body, FALLBACK),
            "field required; value is not a valid float"
        );
    }

    #[test]
    fn reads_same_origin_error_field() {
        assert_eq!(
            describe_failure(r#"{"error":"User already exists!"}"#, FALLBACK),
            "User already exists!"
        );
    }

    #[test]
    fn falls_back_on_garbage() {
        assert_eq!(describe_failure("<html>502</html>", FALLBACK), FALLBACK);
        assert_eq!(describe_failure(r#"{"detail":""}"#, FALLBACK), FALLBACK);
    }

    #[test]
    fn analysis_fallback_asks_to_retry() {
        assert_eq!(
            describe_failure("", ANALYSIS_FAILED),
            "Failed to analyze data. Please try again."
        );
        assert_eq!(
            describe_failure(r#"{"detail":[]}"#, UPLOAD_FAILED),
            "Failed to upload file. Please try again."
        );
    }

    #[test]
    fn titles_match_notices() {
        assert_eq!(ValidationError::InsufficientPoints.title(), "Insufficient Data");
        assert_eq!(
            ValidationError::MissingInput("x1".into()).to_string(),
            "Please enter a value for x1."
        );
    }
}
