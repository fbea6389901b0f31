use common::model::record::{AnalysisRecord, AnalysisType};
use common::model::user::SessionUser;
use common::quota::Allowance;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::TopSheet;

use super::{AuthComponent, Mode, Msg};

pub fn view(component: &AuthComponent, ctx: &Context<AuthComponent>) -> Html {
    let props = ctx.props();
    let link = ctx.link();

    let (button_label, title) = match &props.session {
        Some(user) => (
            format!(
                "{} · {}",
                user.name,
                Allowance::for_user(user.request_count, user.is_premium, &props.limits)
            ),
            "Your account".to_string(),
        ),
        None => (
            "Sign in".to_string(),
            match component.mode {
                Mode::SignIn => "Sign in".to_string(),
                Mode::Register => "Create an account".to_string(),
            },
        ),
    };

    html! {
        <>
            <button class="account-btn" onclick={link.callback(|_| Msg::Open)}>
                <i class="material-icons">{"account_circle"}</i>
                <span>{ button_label }</span>
            </button>
            <TopSheet
                node_ref={component.sheet_ref.clone()}
                {title}
                on_close={link.callback(|_| Msg::Close)}
            >
                {
                    match &props.session {
                        Some(user) => build_dashboard(component, user, ctx),
                        None => build_credentials_form(component, link),
                    }
                }
            </TopSheet>
        </>
    }
}

fn build_dashboard(component: &AuthComponent, user: &SessionUser, ctx: &Context<AuthComponent>) -> Html {
    let link = ctx.link();
    let allowance = Allowance::for_user(user.request_count, user.is_premium, &ctx.props().limits);

    html! {
        <div class="dashboard">
            <p><strong>{ user.name.clone() }</strong>{ format!(" ({})", user.email) }</p>
            <p>
                { format!("Requests used: {}. ", user.request_count) }
                <span class={classes!("allowance", allowance.is_exhausted().then_some("exhausted"))}>
                    { allowance.to_string() }
                </span>
            </p>
            <h3>{"Recent analyses"}</h3>
            {
                match &component.history {
                    None => html! { <p>{"Loading…"}</p> },
                    Some(records) if records.is_empty() => html! { <p>{"No analyses yet."}</p> },
                    Some(records) => html! {
                        <ul class="history">
                            { for records.iter().map(build_history_entry) }
                        </ul>
                    },
                }
            }
            <button class="text-btn" onclick={link.callback(|_| Msg::SignOut)}>{"Sign out"}</button>
        </div>
    }
}

fn build_history_entry(record: &AnalysisRecord) -> Html {
    let source = match record.input.analysis_type {
        AnalysisType::File => record
            .input
            .filename
            .clone()
            .unwrap_or_else(|| "file".to_string()),
        AnalysisType::Manual => "manual entry".to_string(),
    };
    html! {
        <li>
            <span class="when">{ record.created_at.clone() }</span>
            <span class="source">{ format!("{}, {} points", source, record.input.data_points) }</span>
            <code>{ record.input.functions.join("; ") }</code>
        </li>
    }
}

fn build_credentials_form(component: &AuthComponent, link: &Scope<AuthComponent>) -> Html {
    let on_name = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetName(input.value())
    });
    let on_email = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetEmail(input.value())
    });
    let on_password = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetPassword(input.value())
    });
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    let (submit_label, switch_label, other_mode) = match component.mode {
        Mode::SignIn => ("Sign in", "No account yet? Register", Mode::Register),
        Mode::Register => ("Register", "Already registered? Sign in", Mode::SignIn),
    };

    html! {
        <form class="credentials" {onsubmit}>
            {
                if component.mode == Mode::Register {
                    html! {
                        <label>{"Name"}
                            <input type="text" value={component.name.clone()} oninput={on_name} />
                        </label>
                    }
                } else {
                    html! {}
                }
            }
            <label>{"Email"}
                <input type="email" value={component.email.clone()} oninput={on_email} />
            </label>
            <label>{"Password"}
                <input type="password" value={component.password.clone()} oninput={on_password} />
            </label>
            <button class="primary-btn" type="submit" disabled={component.submitting}>
                { submit_label }
            </button>
            <button
                class="text-btn"
                type="button"
                onclick={link.callback(move |_| Msg::SetMode(other_mode))}
            >
                { switch_label }
            </button>
        </form>
    }
}
