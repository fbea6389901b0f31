//! View rendering for the upload panel: drop zone, file summary with a
//! preview table, the two column pickers and the analyze button. A file
//! without two numeric columns keeps its summary plus a notice instead of
//! the pickers.

use common::model::file_info::FileInfo;
use common::workflow::upload::{Axis, ColumnSelection, ACCEPT_ATTRIBUTE};
use web_sys::{DragEvent, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::helpers::format_count;

use super::messages::Msg;
use super::state::UploadComponent;

const PREVIEW_ROWS: usize = 5;

pub fn view(component: &UploadComponent, ctx: &Context<UploadComponent>) -> Html {
    let link = ctx.link();
    let limit_mb = ctx.props().limits.max_file_size_mb;

    html! {
        <div class="upload-panel">
            { build_drop_zone(component, link, limit_mb) }
            {
                match (&component.file_info, &component.selection) {
                    (Some(info), Some(selection)) => html! {
                        <>
                            { build_file_summary(info, link) }
                            { build_preview(info) }
                            <div class="column-pickers">
                                { build_column_picker(selection, Axis::X, link) }
                                { build_column_picker(selection, Axis::Y, link) }
                            </div>
                            { build_analyze_bar(component, link) }
                        </>
                    },
                    (Some(info), None) => html! {
                        <>
                            { build_file_summary(info, link) }
                            { build_preview(info) }
                            <p class="column-notice">
                                { info.numeric_column_notice().unwrap_or_default() }
                            </p>
                        </>
                    },
                    _ => html! {},
                }
            }
        </div>
    }
}

fn build_drop_zone(component: &UploadComponent, link: &Scope<UploadComponent>, limit_mb: u64) -> Html {
    let ondragover = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });
    let ondragleave = link.callback(|_: DragEvent| Msg::SetDragging(false));
    let ondrop = link.batch_callback(|e: DragEvent| {
        e.prevent_default();
        let file = e
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        match file {
            Some(file) => vec![Msg::FilePicked(file)],
            None => vec![Msg::SetDragging(false)],
        }
    });
    let onchange = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        // Lets the same file be picked again after a reset.
        input.set_value("");
        file.map(Msg::FilePicked)
    });

    let label = if component.uploading {
        "Uploading…".to_string()
    } else {
        format!("Drop a CSV, Excel or JSON file here, or click to browse (max {} MB)", limit_mb)
    };

    // The input sits outside the zone so its synthetic click does not bubble
    // back into `OpenFileDialog`.
    html! {
        <>
            <div
                class={classes!("drop-zone", component.dragging.then_some("dragging"))}
                onclick={link.callback(|_| Msg::OpenFileDialog)}
                {ondragover}
                {ondragleave}
                {ondrop}
            >
                <i class="material-icons">{"upload_file"}</i>
                <p>{ label }</p>
            </div>
            <input
                type="file"
                accept={ACCEPT_ATTRIBUTE}
                style="display:none"
                ref={component.file_input_ref.clone()}
                {onchange}
            />
        </>
    }
}

fn build_file_summary(info: &FileInfo, link: &Scope<UploadComponent>) -> Html {
    html! {
        <div class="file-summary">
            <strong>{ info.filename.clone() }</strong>
            <span>
                { format!(
                    "{} rows × {} columns, {} numeric",
                    format_count(info.rows()),
                    format_count(info.column_count()),
                    info.numeric_columns.len()
                ) }
            </span>
            <button class="text-btn" onclick={link.callback(|_| Msg::Reset)}>
                {"Choose another file"}
            </button>
        </div>
    }
}

fn build_preview(info: &FileInfo) -> Html {
    let rows = info.preview_rows(PREVIEW_ROWS);
    if rows.is_empty() {
        return html! {};
    }
    html! {
        <div class="preview">
            <table>
                <thead>
                    <tr>{ for info.columns.iter().map(|c| html! { <th>{ c.clone() }</th> }) }</tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|row| html! {
                        <tr>{ for row.into_iter().map(|cell| html! { <td>{ cell }</td> }) }</tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn build_column_picker(selection: &ColumnSelection, axis: Axis, link: &Scope<UploadComponent>) -> Html {
    let title = match axis {
        Axis::X => "Input columns (X)",
        Axis::Y => "Output columns (Y)",
    };

    html! {
        <div class="column-picker">
            <h3>{ title }</h3>
            <div class="picker-actions">
                <button class="text-btn" onclick={link.callback(move |_| Msg::SelectAll(axis))}>
                    {"Select All"}
                </button>
                <button class="text-btn" onclick={link.callback(move |_| Msg::SelectRemaining(axis))}>
                    { format!("Select Remaining (not {})", axis.other().label()) }
                </button>
                <button class="text-btn" onclick={link.callback(move |_| Msg::Clear(axis))}>
                    {"Clear"}
                </button>
            </div>
            <ul>
                { for selection.numeric_columns().iter().map(|column| {
                    let name = column.clone();
                    let onchange = link.callback(move |_: Event| Msg::Toggle(axis, name.clone()));
                    html! {
                        <li>
                            <label>
                                <input
                                    type="checkbox"
                                    checked={selection.is_selected(axis, column)}
                                    {onchange}
                                />
                                { column.clone() }
                            </label>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}

fn build_analyze_bar(component: &UploadComponent, link: &Scope<UploadComponent>) -> Html {
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetDegree(input.value())
    });

    html! {
        <div class="analyze-bar">
            <label>
                {"Polynomial degree"}
                <input
                    type="number"
                    min="1"
                    max="10"
                    value={component.poly_degree.to_string()}
                    {oninput}
                />
            </label>
            <button
                class="primary-btn"
                disabled={component.busy()}
                onclick={link.callback(|_| Msg::Analyze)}
            >
                { if component.analyzing { "Analyzing…" } else { "Analyze" } }
            </button>
        </div>
    }
}
