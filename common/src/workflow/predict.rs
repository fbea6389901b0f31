//! Follow-up predictions from a fitted model descriptor.

use crate::error::ValidationError;
use crate::model::analysis::{Coefficients, Intercept, ModelDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Feature names the user must type a value for.
///
/// Polynomial models list derived terms such as `x1^2` or `x1*x2`; those are
/// computed by the backend from the base features and are left out. Order of
/// first appearance is kept, duplicates dropped.
pub fn base_features(feature_names: &[String]) -> Vec<String> {
    let mut base: Vec<String> = Vec::new();
    for name in feature_names {
        if name.contains('^') || name.contains('*') {
            continue;
        }
        if !base.contains(name) {
            base.push(name.clone());
        }
    }
    base
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub x_values: Vec<Vec<f64>>,
    pub coefficients: Coefficients,
    pub intercept: Intercept,
    pub is_polynomial: bool,
    pub degree: u32,
    pub multi_output: bool,
    pub feature_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// Checks one input per base feature and assembles the request.
pub fn build_predict_request(
    model: Option<&ModelDescriptor>,
    inputs: &HashMap<String, String>,
) -> Result<PredictRequest, ValidationError> {
    let model = model
        .filter(|m| !m.feature_names.is_empty())
        .ok_or(ValidationError::NoModel)?;

    let mut row = Vec::new();
    for feature in base_features(&model.feature_names) {
        let raw = inputs.get(&feature).map(|v| v.trim()).unwrap_or_default();
        if raw.is_empty() {
            return Err(ValidationError::MissingInput(feature));
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => row.push(value),
            _ => return Err(ValidationError::InvalidNumber(feature)),
        }
    }

    Ok(PredictRequest {
        x_values: vec![row],
        coefficients: model.coefficients.clone(),
        intercept: model.intercept(),
        is_polynomial: model.is_polynomial,
        degree: model.degree.max(1),
        multi_output: model.multi_output,
        feature_names: model.feature_names.clone(),
        model_id: model.model_id.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Scalar(f64),
    PerTarget(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl PredictResponse {
    /// The prediction for the single submitted row, if the backend produced one.
    pub fn first(&self) -> Option<&Prediction> {
        if self.success {
            self.predictions.first()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPrediction {
    pub target: String,
    pub value: f64,
}

impl fmt::Display for LabeledPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.target, self.value)
    }
}

/// Names each predicted value after its target; unnamed targets become
/// `Target n`. A model without target names reports its first output as `Output`.
pub fn label_prediction(prediction: &Prediction, target_names: &[String]) -> Vec<LabeledPrediction> {
    let fallback = ["Output".to_string()];
    let names = if target_names.is_empty() {
        &fallback[..]
    } else {
        target_names
    };

    let name_at = |idx: usize| {
        names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("Target {}", idx + 1))
    };

    match prediction {
        Prediction::Scalar(value) => vec![LabeledPrediction {
            target: name_at(0),
            value: *value,
        }],
        Prediction::PerTarget(values) => values
            .iter()
            .enumerate()
            .map(|(idx, value)| LabeledPrediction {
                target: name_at(idx),
                value: *value,
            })
            .collect(),
    }
}
