use common::workflow::predict::LabeledPrediction;
use std::collections::HashMap;

pub struct ResultsComponent {
    /// Raw text typed for each base feature, keyed by feature name.
    pub inputs: HashMap<String, String>,

    pub prediction: Option<Vec<LabeledPrediction>>,

    pub predicting: bool,

    /// A report job is being created or polled.
    pub exporting: bool,
}

impl ResultsComponent {
    pub fn new() -> Self {
        Self {
            inputs: HashMap::new(),
            prediction: None,
            predicting: false,
            exporting: false,
        }
    }
}
