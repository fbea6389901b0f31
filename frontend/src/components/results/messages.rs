use crate::api::ApiError;
use common::workflow::predict::PredictResponse;

pub enum Msg {
    SetInput(String, String),
    Predict,
    Predicted(Result<PredictResponse, ApiError>),
    Export,
    Exported(Result<String, ApiError>),
}
