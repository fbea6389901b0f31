use common::config::BackendConfig;
use common::workflow::predict::{build_predict_request, label_prediction};
use common::workflow::report::ReportRequest;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::components::report_failure;
use crate::helpers::{download_bytes, show_toast};

use super::messages::Msg;
use super::state::ResultsComponent;

pub fn update(component: &mut ResultsComponent, ctx: &Context<ResultsComponent>, msg: Msg) -> bool {
    let props = ctx.props();
    match msg {
        Msg::SetInput(feature, value) => {
            component.inputs.insert(feature, value);
            false
        }
        Msg::Predict => {
            if component.predicting {
                return false;
            }
            let request = match build_predict_request(props.result.model(), &component.inputs) {
                Ok(request) => request,
                Err(e) => {
                    show_toast(e.title(), &e.to_string());
                    return false;
                }
            };

            component.predicting = true;
            let backend = props.backend.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let response = api::predict(&backend, &request).await;
                link.send_message(Msg::Predicted(response));
            });
            true
        }
        Msg::Predicted(response) => {
            component.predicting = false;
            match response {
                Ok(response) => match response.first() {
                    Some(prediction) => {
                        let target_names = props
                            .result
                            .model()
                            .map(|m| m.target_names.clone())
                            .unwrap_or_default();
                        component.prediction = Some(label_prediction(prediction, &target_names));
                    }
                    None => show_toast("Prediction failed", "The backend returned no prediction."),
                },
                Err(e) => report_failure("Prediction failed", &e),
            }
            true
        }
        Msg::Export => {
            if component.exporting {
                return false;
            }
            component.exporting = true;
            let request = ReportRequest::from_result(&props.result, props.filename.as_deref());
            let backend = props.backend.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = export(&backend, &request).await;
                link.send_message(Msg::Exported(outcome));
            });
            true
        }
        Msg::Exported(outcome) => {
            component.exporting = false;
            match outcome {
                Ok(filename) => show_toast("Report downloaded", &filename),
                Err(e) => report_failure("Export failed", &e),
            }
            true
        }
    }
}

/// Starts a report job, waits for it and saves the PDF. Returns the name the
/// file was saved under.
async fn export(
    backend: &BackendConfig,
    request: &ReportRequest,
) -> Result<String, ApiError> {
    let job = api::generate_report(backend, request).await?;
    let bytes = api::download_report(backend, &job).await?;
    download_bytes(&bytes, &job.filename)
        .map_err(|e| ApiError::Rejected(format!("Could not save the report: {:?}", e)))?;
    Ok(job.filename)
}
