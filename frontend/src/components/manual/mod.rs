//! Manual entry panel: an editable table of (x, y) points.
//!
//! An x cell holding `"1, 2, 3"` is sent as a vector, anything else as a
//! scalar. Rows with a blank cell are skipped; at least two complete rows are
//! needed before anything is sent.

use common::model::record::AnalysisSource;
use common::workflow::manual::{PointTable, MIN_POINTS};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{
    report_failure, reserve_request, settle_reservation, AnalysisOutcome, InputPanelProps,
    Reservation,
};
use crate::api::{self, ApiError};
use crate::helpers::show_toast;
use common::model::analysis::AnalysisResult;

pub enum Msg {
    SetX(usize, String),
    SetY(usize, String),
    AddRow,
    RemoveRow(usize),
    Analyze,
    AnalysisAborted,
    AnalysisFinished(Result<AnalysisResult, ApiError>),
}

pub struct ManualEntryComponent {
    table: PointTable,
    analyzing: bool,
}

impl Component for ManualEntryComponent {
    type Message = Msg;
    type Properties = InputPanelProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            table: PointTable::default(),
            analyzing: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetX(index, value) => {
                self.table.set_x(index, value);
                false
            }
            Msg::SetY(index, value) => {
                self.table.set_y(index, value);
                false
            }
            Msg::AddRow => {
                self.table.add_row();
                true
            }
            Msg::RemoveRow(index) => {
                if !self.table.remove_row(index) {
                    show_toast(
                        "Cannot remove row",
                        &format!("At least {} points are required.", MIN_POINTS),
                    );
                }
                true
            }
            Msg::Analyze => {
                if self.analyzing {
                    return false;
                }
                let request = match self.table.to_request() {
                    Ok(request) => request,
                    Err(e) => {
                        show_toast(e.title(), &e.to_string());
                        return false;
                    }
                };

                self.analyzing = true;
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

                    let result = api::analyze_manual(&props.backend, &request).await;
                    if let Ok(result) = &result {
                        props.on_analyzed.emit(AnalysisOutcome {
                            result: result.clone(),
                            source: AnalysisSource::Manual,
                        });
                    }
                    settle_reservation(&reservation, result.is_ok(), &props.on_quota).await;
                    link.send_message(Msg::AnalysisFinished(result));
                });
                true
            }
            Msg::AnalysisAborted => {
                self.analyzing = false;
                true
            }
            Msg::AnalysisFinished(result) => {
                self.analyzing = false;
                if let Err(e) = result {
                    report_failure("Analysis failed", &e);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let can_remove = self.table.rows().len() > MIN_POINTS;

        html! {
            <div class="manual-panel">
                <p class="hint">
                    {"Enter one point per row. For several input variables type x as a comma separated list, e.g. 1, 2, 3."}
                </p>
                <table class="point-table">
                    <thead>
                        <tr><th>{"#"}</th><th>{"X"}</th><th>{"Y"}</th><th></th></tr>
                    </thead>
                    <tbody>
                        { for self.table.rows().iter().enumerate().map(|(index, row)| {
                            let on_x = link.callback(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::SetX(index, input.value())
                            });
                            let on_y = link.callback(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::SetY(index, input.value())
                            });
                            html! {
                                <tr key={index}>
                                    <td>{ index + 1 }</td>
                                    <td><input type="text" value={row.x.clone()} oninput={on_x} /></td>
                                    <td><input type="text" value={row.y.clone()} oninput={on_y} /></td>
                                    <td>
                                        <button
                                            class="icon-btn"
                                            title="Remove row"
                                            disabled={!can_remove}
                                            onclick={link.callback(move |_| Msg::RemoveRow(index))}
                                        >
                                            <i class="material-icons">{"delete"}</i>
                                        </button>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                <div class="analyze-bar">
                    <button class="text-btn" onclick={link.callback(|_| Msg::AddRow)}>
                        {"Add point"}
                    </button>
                    <button
                        class="primary-btn"
                        disabled={self.analyzing}
                        onclick={link.callback(|_| Msg::Analyze)}
                    >
                        { if self.analyzing { "Analyzing…" } else { "Analyze" } }
                    </button>
                </div>
            </div>
        }
    }
}
