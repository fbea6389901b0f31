//! Analysis results returned by the backend.
//!
//! The backend answers with two shapes: manual entry yields a single
//! `function`/`accuracy` pair, file analysis yields `functions`/`accuracies`
//! arrays (one entry per target column). Both are decoded through
//! [`RawAnalysisResult`] into the [`AnalysisResult`] union so that renderers
//! match on the shape once instead of probing optional fields.

use serde::{Deserialize, Serialize};

/// Fitted coefficients: a flat vector for one target, or one row per target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficients {
    Flat(Vec<f64>),
    PerTarget(Vec<Vec<f64>>),
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients::Flat(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Intercept {
    Single(f64),
    PerTarget(Vec<f64>),
}

/// Serialized regression parameters; enough to ask the backend for
/// predictions without resending the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub target_names: Vec<String>,
    #[serde(default)]
    pub coefficients: Coefficients,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercepts: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept: Option<f64>,
    #[serde(default)]
    pub is_polynomial: bool,
    #[serde(default = "default_degree")]
    pub degree: u32,
    #[serde(default)]
    pub multi_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

fn default_degree() -> u32 {
    1
}

impl ModelDescriptor {
    /// `intercepts` wins over `intercept`; a descriptor with neither has a
    /// zero intercept.
    pub fn intercept(&self) -> Intercept {
        match (&self.intercepts, self.intercept) {
            (Some(per_target), _) => Intercept::PerTarget(per_target.clone()),
            (None, Some(single)) => Intercept::Single(single),
            (None, None) => Intercept::Single(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetVisualization {
    pub target: String,
    /// Base64 encoded PNG.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum AccuracyValue {
    Label(String),
    Percent(f64),
}

impl AccuracyValue {
    fn into_label(self) -> String {
        match self {
            AccuracyValue::Label(label) => label,
            AccuracyValue::Percent(value) => percent_label(value),
        }
    }
}

/// Wire shape of an analysis answer, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysisResult {
    #[serde(default)]
    function: Option<String>,
    #[serde(default)]
    accuracy: Option<AccuracyValue>,
    #[serde(default)]
    functions: Option<Vec<String>>,
    #[serde(default)]
    accuracies: Option<Vec<f64>>,
    #[serde(default)]
    visualization: Option<String>,
    #[serde(default)]
    target_visualizations: Option<Vec<TargetVisualization>>,
    #[serde(default)]
    data_points: usize,
    #[serde(default)]
    x_columns: Option<Vec<String>>,
    #[serde(default)]
    y_columns: Option<Vec<String>>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    model: Option<ModelDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleTargetResult {
    pub function: String,
    /// Pre-formatted by the backend, e.g. `"95%"`.
    pub accuracy: Option<String>,
    pub visualization: Option<String>,
    pub data_points: usize,
    pub model: Option<ModelDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiTargetResult {
    pub functions: Vec<String>,
    /// Percentages aligned with `functions`; may be shorter or empty.
    pub accuracies: Vec<f64>,
    pub visualization: Option<String>,
    pub target_visualizations: Vec<TargetVisualization>,
    pub data_points: usize,
    pub x_columns: Vec<String>,
    pub y_columns: Vec<String>,
    pub filename: Option<String>,
    pub model: Option<ModelDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub enum AnalysisResult {
    SingleTarget(SingleTargetResult),
    MultiTarget(MultiTargetResult),
}

/// One line of the rendered result list.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedFunction {
    pub target: Option<String>,
    pub function: String,
    pub accuracy: Option<String>,
}

impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = String;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        if let Some(functions) = raw.functions {
            return Ok(AnalysisResult::MultiTarget(MultiTargetResult {
                functions,
                accuracies: raw.accuracies.unwrap_or_default(),
                visualization: raw.visualization,
                target_visualizations: raw.target_visualizations.unwrap_or_default(),
                data_points: raw.data_points,
                x_columns: raw.x_columns.unwrap_or_default(),
                y_columns: raw.y_columns.unwrap_or_default(),
                filename: raw.filename,
                model: raw.model,
            }));
        }

        match raw.function {
            Some(function) => Ok(AnalysisResult::SingleTarget(SingleTargetResult {
                function,
                accuracy: raw.accuracy.map(AccuracyValue::into_label),
                visualization: raw.visualization,
                data_points: raw.data_points,
                model: raw.model,
            })),
            None => Err("analysis result carries neither `function` nor `functions`".to_string()),
        }
    }
}

impl AnalysisResult {
    pub fn is_multi_target(&self) -> bool {
        matches!(self, AnalysisResult::MultiTarget(_))
    }

    pub fn data_points(&self) -> usize {
        match self {
            AnalysisResult::SingleTarget(single) => single.data_points,
            AnalysisResult::MultiTarget(multi) => multi.data_points,
        }
    }

    pub fn model(&self) -> Option<&ModelDescriptor> {
        match self {
            AnalysisResult::SingleTarget(single) => single.model.as_ref(),
            AnalysisResult::MultiTarget(multi) => multi.model.as_ref(),
        }
    }

    pub fn functions(&self) -> Vec<String> {
        match self {
            AnalysisResult::SingleTarget(single) => vec![single.function.clone()],
            AnalysisResult::MultiTarget(multi) => multi.functions.clone(),
        }
    }

    /// Accuracy label per function, `None` where the backend sent none.
    pub fn accuracy_labels(&self) -> Vec<Option<String>> {
        match self {
            AnalysisResult::SingleTarget(single) => vec![single.accuracy.clone()],
            AnalysisResult::MultiTarget(multi) => (0..multi.functions.len())
                .map(|idx| multi.accuracies.get(idx).copied().map(percent_label))
                .collect(),
        }
    }

    /// Functions paired with their accuracy and, for multi-target answers,
    /// the target they predict (model target names, then `y_columns`).
    pub fn fitted_functions(&self) -> Vec<FittedFunction> {
        let targets: Vec<String> = match self {
            AnalysisResult::SingleTarget(_) => Vec::new(),
            AnalysisResult::MultiTarget(multi) => multi
                .model
                .as_ref()
                .map(|model| model.target_names.clone())
                .filter(|names| !names.is_empty())
                .unwrap_or_else(|| multi.y_columns.clone()),
        };

        self.functions()
            .into_iter()
            .zip(self.accuracy_labels())
            .enumerate()
            .map(|(idx, (function, accuracy))| FittedFunction {
                target: targets.get(idx).cloned(),
                function,
                accuracy,
            })
            .collect()
    }

    /// `(label, base64 png)` pairs to display. Per-target plots replace the
    /// combined one when present.
    pub fn visualizations(&self) -> Vec<(String, String)> {
        let (visualization, per_target) = match self {
            AnalysisResult::SingleTarget(single) => (&single.visualization, &[][..]),
            AnalysisResult::MultiTarget(multi) => {
                (&multi.visualization, multi.target_visualizations.as_slice())
            }
        };

        if !per_target.is_empty() {
            return per_target
                .iter()
                .map(|tv| (tv.target.clone(), tv.image.clone()))
                .collect();
        }
        visualization
            .iter()
            .filter(|image| !image.is_empty())
            .map(|image| ("Data visualization".to_string(), image.clone()))
            .collect()
    }
}

/// `95.0` → `"95%"`, `97.25` → `"97.25%"`.
pub fn percent_label(value: f64) -> String {
    format!("{}%", value)
}

pub fn png_data_url(base64: &str) -> String {
    format!("data:image/png;base64,{}", base64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> AnalysisResult {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn arrays_take_the_multi_target_path() {
        let result = decode(r#"{"functions": ["y=2x"], "accuracies": [95], "data_points": 4}"#);
        assert!(result.is_multi_target());
        assert_eq!(result.functions(), vec!["y=2x"]);
        assert_eq!(result.accuracy_labels(), vec![Some("95%".to_string())]);
    }

    #[test]
    fn scalar_fields_take_the_single_target_path() {
        let result = decode(r#"{"function": "y=2x+1", "accuracy": "95%", "data_points": 5}"#);
        match &result {
            AnalysisResult::SingleTarget(single) => {
                assert_eq!(single.function, "y=2x+1");
                assert_eq!(single.accuracy.as_deref(), Some("95%"));
            }
            AnalysisResult::MultiTarget(_) => panic!("expected single target"),
        }
        assert_eq!(result.data_points(), 5);
    }

    #[test]
    fn numeric_single_accuracy_becomes_label() {
        let result = decode(r#"{"function": "y=x", "accuracy": 97.3}"#);
        assert_eq!(result.accuracy_labels(), vec![Some("97.3%".to_string())]);
    }

    #[test]
    fn shapeless_answer_is_rejected() {
        let err = serde_json::from_str::<AnalysisResult>(r#"{"accuracy": "95%"}"#).unwrap_err();
        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn verbatim_function_text_is_kept() {
        let result = decode(
            r#"{"success": true, "function": "y = 2.00x + 1.00", "accuracy": "97.3%", "data_points": 10}"#,
        );
        let fitted = result.fitted_functions();
        assert_eq!(fitted.len(), 1);
        assert_eq!(fitted[0].function, "y = 2.00x + 1.00");
        assert_eq!(fitted[0].accuracy.as_deref(), Some("97.3%"));
        assert_eq!(fitted[0].target, None);
    }

    #[test]
    fn multi_target_pairs_functions_with_targets() {
        let result = decode(
            r#"{
                "functions": ["y1 = 2x", "y2 = 3x"],
                "accuracies": [99.5],
                "data_points": 20,
                "x_columns": ["x"],
                "y_columns": ["y1", "y2"],
                "target_visualizations": [{"target": "y1", "image": "AAA"}, {"target": "y2", "image": "BBB"}],
                "visualization": "AAA",
                "model": {
                    "coefficients": [[2.0], [3.0]],
                    "intercepts": [0.0, 0.0],
                    "is_polynomial": false,
                    "degree": 1,
                    "feature_names": ["x"],
                    "target_names": ["y1", "y2"],
                    "multi_output": true,
                    "model_id": "m-1"
                }
            }"#,
        );
        let fitted = result.fitted_functions();
        assert_eq!(fitted[1].target.as_deref(), Some("y2"));
        assert_eq!(fitted[1].accuracy, None);
        assert_eq!(
            result.visualizations(),
            vec![
                ("y1".to_string(), "AAA".to_string()),
                ("y2".to_string(), "BBB".to_string())
            ]
        );

        let model = result.model().unwrap();
        assert_eq!(
            model.coefficients,
            Coefficients::PerTarget(vec![vec![2.0], vec![3.0]])
        );
        assert_eq!(model.intercept(), Intercept::PerTarget(vec![0.0, 0.0]));
    }

    #[test]
    fn manual_model_uses_scalar_intercept() {
        let result = decode(
            r#"{"function": "y = 5x", "accuracy": "100.0%", "visualization": "PNG",
                "model": {"coefficients": [5.0], "intercept": 0.5, "is_polynomial": false,
                          "degree": 1, "feature_names": ["x"]}}"#,
        );
        let model = result.model().unwrap();
        assert_eq!(model.coefficients, Coefficients::Flat(vec![5.0]));
        assert_eq!(model.intercept(), Intercept::Single(0.5));
        assert_eq!(
            result.visualizations(),
            vec![("Data visualization".to_string(), "PNG".to_string())]
        );
    }
}
