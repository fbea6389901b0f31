use common::model::analysis::{png_data_url, AnalysisResult};
use common::workflow::predict::base_features;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::helpers::format_count;

use super::messages::Msg;
use super::state::ResultsComponent;

pub fn view(component: &ResultsComponent, ctx: &Context<ResultsComponent>) -> Html {
    let props = ctx.props();
    let link = ctx.link();
    let on_reset = props.on_reset.reform(|_: MouseEvent| ());

    html! {
        <div class="results-panel">
            <div class="results-header">
                { build_summary(&props.result) }
                <div class="results-actions">
                    <button
                        class="text-btn"
                        disabled={component.exporting}
                        onclick={link.callback(|_| Msg::Export)}
                    >
                        <i class="material-icons">{"picture_as_pdf"}</i>
                        { if component.exporting { "Preparing report…" } else { "Export PDF" } }
                    </button>
                    <button class="text-btn" onclick={on_reset}>{"New analysis"}</button>
                </div>
            </div>
            { build_functions(&props.result) }
            { build_plots(&props.result) }
            { build_predict_form(component, &props.result, link) }
        </div>
    }
}

fn build_summary(result: &AnalysisResult) -> Html {
    let points = format_count(result.data_points());
    match result {
        AnalysisResult::SingleTarget(_) => html! {
            <p class="summary">{ format!("Fitted one function from {} data points.", points) }</p>
        },
        AnalysisResult::MultiTarget(multi) => html! {
            <p class="summary">
                { format!(
                    "Fitted {} function(s) from {} data points. Inputs: {}. Outputs: {}.",
                    multi.functions.len(),
                    points,
                    multi.x_columns.join(", "),
                    multi.y_columns.join(", ")
                ) }
            </p>
        },
    }
}

fn build_functions(result: &AnalysisResult) -> Html {
    html! {
        <ul class="functions">
            { for result.fitted_functions().into_iter().map(|fitted| html! {
                <li>
                    {
                        match fitted.target {
                            Some(target) => html! { <span class="target">{ target }</span> },
                            None => html! {},
                        }
                    }
                    <code>{ fitted.function }</code>
                    {
                        match fitted.accuracy {
                            Some(accuracy) => html! {
                                <span class="accuracy">{ format!("Accuracy: {}", accuracy) }</span>
                            },
                            None => html! {},
                        }
                    }
                </li>
            }) }
        </ul>
    }
}

fn build_plots(result: &AnalysisResult) -> Html {
    html! {
        <div class="plots">
            { for result.visualizations().into_iter().map(|(label, image)| html! {
                <figure>
                    <img src={png_data_url(&image)} alt={label.clone()} />
                    <figcaption>{ label }</figcaption>
                </figure>
            }) }
        </div>
    }
}

fn build_predict_form(
    component: &ResultsComponent,
    result: &AnalysisResult,
    link: &Scope<ResultsComponent>,
) -> Html {
    let Some(model) = result.model() else {
        return html! {};
    };
    let features = base_features(&model.feature_names);
    if features.is_empty() {
        return html! {};
    }

    html! {
        <div class="predict-form">
            <h3>{"Predict"}</h3>
            { for features.into_iter().map(|feature| {
                let name = feature.clone();
                let oninput = link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetInput(name.clone(), input.value())
                });
                let value = component.inputs.get(&feature).cloned().unwrap_or_default();
                html! {
                    <label>
                        { feature.clone() }
                        <input type="number" step="any" {value} {oninput} />
                    </label>
                }
            }) }
            <button
                class="primary-btn"
                disabled={component.predicting}
                onclick={link.callback(|_| Msg::Predict)}
            >
                { if component.predicting { "Predicting…" } else { "Predict" } }
            </button>
            {
                match &component.prediction {
                    Some(values) => html! {
                        <ul class="prediction">
                            { for values.iter().map(|v| html! { <li>{ v.to_string() }</li> }) }
                        </ul>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}
