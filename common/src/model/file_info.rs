use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Summary of an uploaded dataset, produced by the analysis backend's
/// `POST /upload-file`.
///
/// It only lives for the current page session: the column selector is built
/// from `numeric_columns`, and the preview table from `head`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    /// `(rows, columns)` after the backend dropped empty rows and columns.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// Columns the backend classified as numeric; the only ones eligible for
    /// regression input or output.
    pub numeric_columns: Vec<String>,
    /// First rows of the dataset as JSON records keyed by column name.
    #[serde(default)]
    pub head: Vec<Value>,
    #[serde(default)]
    pub dtypes: BTreeMap<String, String>,
}

/// Envelope of the upload answer. A `success: false` answer still carries a
/// sanitized (usually empty) `FileInfo` plus a warning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub data: FileInfo,
    #[serde(default)]
    pub warning: Option<String>,
}

impl UploadResponse {
    pub fn into_file_info(self) -> Result<FileInfo, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .warning
                .unwrap_or_else(|| "The file could not be read.".to_string()))
        }
    }
}

impl FileInfo {
    pub fn rows(&self) -> usize {
        self.shape.0
    }

    pub fn column_count(&self) -> usize {
        self.shape.1
    }

    pub fn has_enough_numeric_columns(&self) -> bool {
        self.numeric_columns.len() >= 2
    }

    /// Shown in place of the column pickers when the file cannot be analysed.
    pub fn numeric_column_notice(&self) -> Option<String> {
        if self.has_enough_numeric_columns() {
            return None;
        }
        let found = match self.numeric_columns.as_slice() {
            [] => "No numeric columns were found".to_string(),
            [only] => format!("Found 1 numeric column ({})", only),
            many => format!("Found {} numeric columns", many.len()),
        };
        Some(format!("{}. At least two are needed for analysis.", found))
    }

    /// Renders up to `limit` head records as cells ordered like `columns`.
    /// Missing keys and nulls become empty cells.
    pub fn preview_rows(&self, limit: usize) -> Vec<Vec<String>> {
        self.head
            .iter()
            .take(limit)
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| match record.get(column) {
                        None | Some(Value::Null) => String::new(),
                        Some(Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_row_csv() -> &'static str {
        r#"{
            "success": true,
            "data": {
                "filename": "points.csv",
                "shape": [10, 2],
                "columns": ["x", "y"],
                "dtypes": {"x": "int64", "y": "float64"},
                "head": [{"x": 1, "y": 3.0}, {"x": 2, "y": null}],
                "numeric_columns": ["x", "y"]
            }
        }"#
    }

    #[test]
    fn decodes_upload_answer() {
        let response: UploadResponse = serde_json::from_str(ten_row_csv()).unwrap();
        let info = response.into_file_info().unwrap();
        assert_eq!(info.shape, (10, 2));
        assert_eq!(info.rows(), 10);
        assert_eq!(info.numeric_columns, vec!["x", "y"]);
        assert!(info.has_enough_numeric_columns());
    }

    #[test]
    fn preview_follows_column_order() {
        let response: UploadResponse = serde_json::from_str(ten_row_csv()).unwrap();
        let rows = response.data.preview_rows(5);
        assert_eq!(rows, vec![vec!["1", "3.0"], vec!["2", ""]]);
    }

    #[test]
    fn single_numeric_column_is_explained() {
        let response: UploadResponse = serde_json::from_str(ten_row_csv()).unwrap();
        let mut info = response.into_file_info().unwrap();
        assert_eq!(info.numeric_column_notice(), None);

        info.numeric_columns = vec!["x".into()];
        assert!(!info.has_enough_numeric_columns());
        assert_eq!(
            info.numeric_column_notice().unwrap(),
            "Found 1 numeric column (x). At least two are needed for analysis."
        );

        info.numeric_columns.clear();
        assert_eq!(
            info.numeric_column_notice().unwrap(),
            "No numeric columns were found. At least two are needed for analysis."
        );
    }

    #[test]
    fn unsuccessful_upload_surfaces_warning() {
        let response: UploadResponse = serde_json::from_str(
            r#"{"success": false,
                "data": {"filename": "bad.csv", "shape": [0, 0], "columns": [], "head": [], "numeric_columns": []},
                "warning": "File loaded with issues and was sanitized."}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_file_info().unwrap_err(),
            "File loaded with issues and was sanitized."
        );
    }
}
