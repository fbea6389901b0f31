//! Denormalized analysis records mirrored to the server for signed-in users.

use crate::model::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    File,
    Manual,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::File => "file",
            AnalysisType::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(AnalysisType::File),
            "manual" => Some(AnalysisType::Manual),
            _ => None,
        }
    }
}

/// Body of `POST /api/analysis/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecordInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub data_points: usize,
    pub analysis_type: AnalysisType,
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_columns: Option<Vec<String>>,
    #[serde(default = "default_poly_degree")]
    pub poly_degree: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

fn default_poly_degree() -> u32 {
    1
}

/// Where an analysis came from, as far as the record cares.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisSource {
    File {
        filename: String,
        file_size: u64,
        x_columns: Vec<String>,
        y_columns: Vec<String>,
        poly_degree: u32,
    },
    Manual,
}

impl AnalysisRecordInput {
    pub fn from_result(result: &AnalysisResult, source: &AnalysisSource) -> Self {
        let (accuracy, accuracies) = match result {
            AnalysisResult::SingleTarget(single) => (single.accuracy.clone(), None),
            AnalysisResult::MultiTarget(_) => (
                None,
                Some(result.accuracy_labels().into_iter().flatten().collect()),
            ),
        };

        let mut record = Self {
            filename: None,
            data_points: result.data_points(),
            analysis_type: AnalysisType::Manual,
            functions: result.functions(),
            accuracy,
            accuracies,
            x_columns: None,
            y_columns: None,
            poly_degree: 1,
            file_size: None,
        };

        if let AnalysisSource::File {
            filename,
            file_size,
            x_columns,
            y_columns,
            poly_degree,
        } = source
        {
            record.analysis_type = AnalysisType::File;
            record.filename = Some(filename.clone());
            record.file_size = Some(*file_size);
            record.x_columns = Some(x_columns.clone());
            record.y_columns = Some(y_columns.clone());
            record.poly_degree = (*poly_degree).max(1);
        }
        record
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.functions.is_empty() || self.functions.iter().all(|f| f.trim().is_empty()) {
            return Err("At least one function is required".to_string());
        }
        if self.poly_degree == 0 {
            return Err("polyDegree must be at least 1".to_string());
        }
        Ok(())
    }
}

/// A stored record as listed back to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub input: AnalysisRecordInput,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> AnalysisResult {
        serde_json::from_str(
            r#"{"functions": ["a = x", "b = 2x"], "accuracies": [91.5, 88], "data_points": 12}"#,
        )
        .unwrap()
    }

    #[test]
    fn file_source_fills_selection() {
        let record = AnalysisRecordInput::from_result(
            &multi(),
            &AnalysisSource::File {
                filename: "data.csv".into(),
                file_size: 2048,
                x_columns: vec!["x".into()],
                y_columns: vec!["a".into(), "b".into()],
                poly_degree: 2,
            },
        );
        assert_eq!(record.analysis_type, AnalysisType::File);
        assert_eq!(record.filename.as_deref(), Some("data.csv"));
        assert_eq!(
            record.accuracies,
            Some(vec!["91.5%".to_string(), "88%".to_string()])
        );
        assert_eq!(record.poly_degree, 2);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn manual_source_keeps_single_accuracy() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"function": "y = x", "accuracy": "99%", "data_points": 3}"#)
                .unwrap();
        let record = AnalysisRecordInput::from_result(&result, &AnalysisSource::Manual);
        assert_eq!(record.analysis_type, AnalysisType::Manual);
        assert_eq!(record.accuracy.as_deref(), Some("99%"));
        assert_eq!(record.accuracies, None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["analysisType"], "manual");
        assert_eq!(json["dataPoints"], 3);
        assert!(json.get("xColumns").is_none());
    }

    #[test]
    fn empty_functions_are_invalid() {
        let mut record = AnalysisRecordInput::from_result(&multi(), &AnalysisSource::Manual);
        record.functions = vec![" ".into()];
        assert!(record.validate().is_err());
    }
}
