//! PDF report export.
//!
//! Generation is asynchronous on the backend: `POST /generate-pdf` returns a
//! job id, and the file becomes available at `GET /download-report/{job_id}`
//! once rendered. [`ReportPoller`] decides, per response of that URL, whether
//! the report is ready, still pending, or lost.

use crate::model::analysis::{AnalysisResult, Coefficients};
use serde_json::Value;

pub const DEFAULT_REPORT_FILENAME: &str = "uploaded_file";
pub const POLL_INTERVAL_MS: u32 = 1_000;
pub const MAX_POLL_ATTEMPTS: u32 = 30;

/// Form fields of `POST /generate-pdf`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub data_points: usize,
    pub filename: String,
    pub x_columns: Vec<String>,
    pub y_columns: Vec<String>,
    pub coefficients: Coefficients,
    pub functions: Vec<String>,
    /// Numbers for multi-target answers, labels for single-target ones.
    pub accuracies: Vec<Value>,
}

impl ReportRequest {
    pub fn from_result(result: &AnalysisResult, filename: Option<&str>) -> Self {
        let model = result.model();
        let (functions, accuracies, result_filename) = match result {
            AnalysisResult::SingleTarget(single) => (
                vec![single.function.clone()],
                vec![Value::from(single.accuracy.clone().unwrap_or_default())],
                None,
            ),
            AnalysisResult::MultiTarget(multi) => (
                multi.functions.clone(),
                multi.accuracies.iter().map(|a| Value::from(*a)).collect(),
                multi.filename.clone(),
            ),
        };

        Self {
            data_points: result.data_points(),
            filename: filename
                .map(str::to_string)
                .or(result_filename)
                .unwrap_or_else(|| DEFAULT_REPORT_FILENAME.to_string()),
            x_columns: model.map(|m| m.feature_names.clone()).unwrap_or_default(),
            y_columns: model.map(|m| m.target_names.clone()).unwrap_or_default(),
            coefficients: model.map(|m| m.coefficients.clone()).unwrap_or_default(),
            functions,
            accuracies,
        }
    }

    /// Every list is sent as a JSON document in its own text field.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("data_points", self.data_points.to_string()),
            ("filename", self.filename.clone()),
            ("x_columns", serde_json::to_string(&self.x_columns)?),
            ("y_columns", serde_json::to_string(&self.y_columns)?),
            ("coefficients", serde_json::to_string(&self.coefficients)?),
            ("functions", serde_json::to_string(&self.functions)?),
            ("accuracies", serde_json::to_string(&self.accuracies)?),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The response body is the report.
    Ready,
    /// Not rendered yet; ask again after the delay.
    Retry { after_ms: u32 },
    TimedOut,
    Failed(String),
}

/// Bounded polling of the report download URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPoller {
    interval_ms: u32,
    max_attempts: u32,
    attempts: u32,
}

impl Default for ReportPoller {
    fn default() -> Self {
        Self::new(POLL_INTERVAL_MS, MAX_POLL_ATTEMPTS)
    }
}

impl ReportPoller {
    pub fn new(interval_ms: u32, max_attempts: u32) -> Self {
        Self {
            interval_ms,
            max_attempts: max_attempts.max(1),
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Feeds the status of one download attempt. `404` (unknown yet) and
    /// `202` (accepted, still rendering) mean "not ready".
    pub fn observe(&mut self, status: u16, message: &str) -> PollOutcome {
        self.attempts += 1;
        match status {
            202 | 404 if self.attempts >= self.max_attempts => PollOutcome::TimedOut,
            202 | 404 => PollOutcome::Retry {
                after_ms: self.interval_ms,
            },
            200..=299 => PollOutcome::Ready,
            _ => PollOutcome::Failed(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_target_report_wraps_scalars() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"function": "y = 2x", "accuracy": "95%", "data_points": 7,
                "model": {"coefficients": [2.0], "intercept": 0.0, "feature_names": ["x"]}}"#,
        )
        .unwrap();
        let request = ReportRequest::from_result(&result, None);
        assert_eq!(request.filename, DEFAULT_REPORT_FILENAME);

        let fields = request.form_fields().unwrap();
        assert_eq!(
            fields,
            vec![
                ("data_points", "7".to_string()),
                ("filename", "uploaded_file".to_string()),
                ("x_columns", r#"["x"]"#.to_string()),
                ("y_columns", "[]".to_string()),
                ("coefficients", "[2.0]".to_string()),
                ("functions", r#"["y = 2x"]"#.to_string()),
                ("accuracies", r#"["95%"]"#.to_string()),
            ]
        );
    }

    #[test]
    fn multi_target_report_keeps_arrays() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"functions": ["a = x", "b = 2x"], "accuracies": [99.1, 80.0], "data_points": 30,
                "model": {"coefficients": [[1.0], [2.0]], "intercepts": [0.0, 0.0],
                          "feature_names": ["x"], "target_names": ["a", "b"]}}"#,
        )
        .unwrap();
        let request = ReportRequest::from_result(&result, Some("sales.xlsx"));
        assert_eq!(request.filename, "sales.xlsx");
        assert_eq!(request.y_columns, vec!["a", "b"]);
        let fields = request.form_fields().unwrap();
        assert_eq!(fields[4].1, "[[1.0],[2.0]]");
        assert_eq!(fields[6].1, "[99.1,80.0]");
    }

    #[test]
    fn poller_waits_for_the_report() {
        let mut poller = ReportPoller::new(500, 3);
        assert_eq!(poller.observe(404, ""), PollOutcome::Retry { after_ms: 500 });
        assert_eq!(poller.observe(202, ""), PollOutcome::Retry { after_ms: 500 });
        assert_eq!(poller.observe(200, ""), PollOutcome::Ready);
        assert_eq!(poller.attempts(), 3);
    }

    #[test]
    fn poller_gives_up_after_the_last_attempt() {
        let mut poller = ReportPoller::new(10, 2);
        assert!(matches!(poller.observe(404, ""), PollOutcome::Retry { .. }));
        assert_eq!(poller.observe(404, ""), PollOutcome::TimedOut);
    }

    #[test]
    fn poller_reports_server_errors() {
        let mut poller = ReportPoller::default();
        assert_eq!(
            poller.observe(500, "Report not found or expired"),
            PollOutcome::Failed("Report not found or expired".to_string())
        );
    }
}
