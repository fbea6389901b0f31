use serde::{Deserialize, Serialize};

/// Answer of `POST /generate-pdf`: the report is produced asynchronously and
/// fetched later from a job-scoped URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportJob {
    pub job_id: String,
    pub filename: String,
}

impl ReportJob {
    pub fn download_path(&self) -> String {
        format!("download-report/{}", self.job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_path_is_job_scoped() {
        let job: ReportJob = serde_json::from_str(
            r#"{"success": true, "job_id": "5f0c", "filename": "fluent_analysis.pdf"}"#,
        )
        .unwrap();
        assert_eq!(job.download_path(), "download-report/5f0c");
        assert_eq!(job.filename, "fluent_analysis.pdf");
    }
}
