//! Update function for the upload panel.
//!
//! Every network call runs in `spawn_local` and reports back through a
//! message; the busy flags keep the buttons disabled meanwhile.

use common::error::ValidationError;
use common::model::record::AnalysisSource;
use common::workflow::upload::{validate_file, AnalyzeDataForm, ColumnSelection};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::{
    report_failure, reserve_request, settle_reservation, AnalysisOutcome, Reservation,
};
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::UploadComponent;

pub fn update(component: &mut UploadComponent, ctx: &Context<UploadComponent>, msg: Msg) -> bool {
    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::SetDragging(dragging) => {
            let changed = component.dragging != dragging;
            component.dragging = dragging;
            changed
        }
        Msg::FilePicked(file) => {
            component.dragging = false;
            if component.busy() {
                return true;
            }
            let size = file.size().max(0.0) as u64;
            if let Err(e) = validate_file(&file.name(), size, &ctx.props().limits) {
                show_validation(&e);
                return true;
            }

            component.uploading = true;
            let backend = ctx.props().backend.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::upload_file(&backend, &file).await {
                    Ok(info) => link.send_message(Msg::Uploaded(file, info)),
                    Err(e) => link.send_message(Msg::UploadFailed(e)),
                }
            });
            true
        }
        Msg::Uploaded(file, info) => {
            component.uploading = false;
            if info.has_enough_numeric_columns() {
                show_toast(
                    "File uploaded",
                    &format!("{} is ready for analysis.", info.filename),
                );
                component.selection = Some(ColumnSelection::new(&info));
                component.file = Some(file);
            } else {
                // The summary stays up so the user sees what was detected.
                show_validation(&ValidationError::NotEnoughNumericColumns);
                component.selection = None;
                component.file = None;
            }
            component.file_info = Some(info);
            true
        }
        Msg::UploadFailed(e) => {
            component.uploading = false;
            report_failure("Upload failed", &e);
            true
        }
        Msg::Toggle(axis, column) => {
            if let Some(selection) = component.selection.as_mut() {
                selection.toggle(axis, &column);
            }
            true
        }
        Msg::SelectAll(axis) => {
            if let Some(selection) = component.selection.as_mut() {
                selection.select_all(axis);
            }
            true
        }
        Msg::SelectRemaining(axis) => {
            if let Some(selection) = component.selection.as_mut() {
                selection.select_remaining(axis);
            }
            true
        }
        Msg::Clear(axis) => {
            if let Some(selection) = component.selection.as_mut() {
                selection.clear(axis);
            }
            true
        }
        Msg::SetDegree(raw) => {
            component.poly_degree = raw.trim().parse::<u32>().unwrap_or(1).max(1);
            true
        }
        Msg::Analyze => {
            if component.busy() {
                return false;
            }
            let (Some(file), Some(selection), Some(info)) = (
                component.file.clone(),
                component.selection.as_ref(),
                component.file_info.as_ref(),
            ) else {
                show_toast("No file", "Upload a dataset first.");
                return false;
            };
            let form = match AnalyzeDataForm::new(selection, component.poly_degree) {
                Ok(form) => form,
                Err(e) => {
                    show_validation(&e);
                    return false;
                }
            };

            let source = AnalysisSource::File {
                filename: info.filename.clone(),
                file_size: file.size().max(0.0) as u64,
                x_columns: form.x_columns.clone(),
                y_columns: form.y_columns.clone(),
                poly_degree: form.poly_degree,
            };
            component.analyzing = true;
            let props = ctx.props().clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let reservation = reserve_request(props.signed_in).await;
                match &reservation {
                    Reservation::Refused => {
                        link.send_message(Msg::AnalysisAborted);
                        return;
                    }
                    Reservation::Counted(counted) => props.on_quota.emit(counted.clone()),
                    Reservation::Anonymous => {}
                }

                let result = api::analyze_data(&props.backend, &file, &form).await;
                if let Ok(result) = &result {
                    props.on_analyzed.emit(AnalysisOutcome {
                        result: result.clone(),
                        source,
                    });
                }
                settle_reservation(&reservation, result.is_ok(), &props.on_quota).await;
                link.send_message(Msg::AnalysisFinished(result));
            });
            true
        }
        Msg::AnalysisAborted => {
            component.analyzing = false;
            true
        }
        Msg::AnalysisFinished(result) => {
            component.analyzing = false;
            if let Err(e) = result {
                report_failure("Analysis failed", &e);
            }
            true
        }
        Msg::Reset => {
            if component.busy() {
                return false;
            }
            let file_input_ref = component.file_input_ref.clone();
            *component = UploadComponent::new();
            component.file_input_ref = file_input_ref;
            true
        }
    }
}

fn show_validation(error: &ValidationError) {
    show_toast(error.title(), &error.to_string());
}
