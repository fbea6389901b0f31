//! Root component. Loads the public config and the current session once,
//! then hands both down as properties to the panels.

use common::config::PublicConfig;
use common::model::record::{AnalysisRecordInput, AnalysisSource};
use common::model::user::SessionUser;
use common::requests::UpdateRequestsResponse;
use gloo_console::{log, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::auth::AuthComponent;
use crate::components::manual::ManualEntryComponent;
use crate::components::results::ResultsComponent;
use crate::components::upload::UploadComponent;
use crate::components::{report_failure, AnalysisOutcome};
use crate::config::load_config;
use crate::helpers::show_toast;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputTab {
    Upload,
    Manual,
}

pub enum Msg {
    ConfigLoaded(PublicConfig),
    SessionLoaded(Option<SessionUser>),
    SetTab(InputTab),
    Analyzed(AnalysisOutcome),
    QuotaUpdated(UpdateRequestsResponse),
    SignedIn(SessionUser),
    SignedOut,
    Reset,
}

pub struct App {
    /// Defaults until `/config.json` has been read.
    config: PublicConfig,
    session: Option<SessionUser>,
    tab: InputTab,
    outcome: Option<AnalysisOutcome>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(load_config().await));
            match api::fetch_session().await {
                Ok(session) => link.send_message(Msg::SessionLoaded(session)),
                Err(e) => warn!(format!("Session unavailable: {}", e)),
            }
        });

        Self {
            config: PublicConfig::default(),
            session: None,
            tab: InputTab::Upload,
            outcome: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                self.config = config;
                true
            }
            Msg::SessionLoaded(session) => {
                self.session = session;
                true
            }
            Msg::SignedIn(user) => {
                self.session = Some(user);
                true
            }
            Msg::SetTab(tab) => {
                self.tab = tab;
                true
            }
            Msg::Analyzed(outcome) => {
                if self.session.is_some() {
                    let record = AnalysisRecordInput::from_result(&outcome.result, &outcome.source);
                    spawn_local(async move {
                        match api::save_analysis(&record).await {
                            Ok(saved) => log!(format!("Saved analysis {}", saved.analysis_id)),
                            Err(e) => report_failure("Could not save the analysis", &e),
                        }
                    });
                }
                show_toast("Analysis complete", "The fitted functions are ready.");
                self.outcome = Some(outcome);
                true
            }
            Msg::QuotaUpdated(counted) => {
                if let Some(user) = self.session.as_mut() {
                    user.request_count = counted.request_count;
                    user.is_premium = counted.is_premium;
                }
                true
            }
            Msg::SignedOut => {
                self.session = None;
                true
            }
            Msg::Reset => {
                self.outcome = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let signed_in = self.session.is_some();
        let on_analyzed = link.callback(Msg::Analyzed);
        let on_quota = link.callback(Msg::QuotaUpdated);

        html! {
            <div class="workbench">
                <header>
                    <h1>{"Fluent"}</h1>
                    <AuthComponent
                        session={self.session.clone()}
                        limits={self.config.limits.clone()}
                        on_signed_in={link.callback(Msg::SignedIn)}
                        on_signed_out={link.callback(|_| Msg::SignedOut)}
                    />
                </header>
                {
                    match &self.outcome {
                        Some(outcome) => html! {
                            <ResultsComponent
                                result={outcome.result.clone()}
                                filename={report_filename(&outcome.source)}
                                backend={self.config.backend.clone()}
                                on_reset={link.callback(|_| Msg::Reset)}
                            />
                        },
                        None => html! {
                            <>
                                { self.build_tabs(link) }
                                {
                                    match self.tab {
                                        InputTab::Upload => html! {
                                            <UploadComponent
                                                backend={self.config.backend.clone()}
                                                limits={self.config.limits.clone()}
                                                {signed_in}
                                                on_analyzed={on_analyzed.clone()}
                                                on_quota={on_quota.clone()}
                                            />
                                        },
                                        InputTab::Manual => html! {
                                            <ManualEntryComponent
                                                backend={self.config.backend.clone()}
                                                limits={self.config.limits.clone()}
                                                {signed_in}
                                                {on_analyzed}
                                                {on_quota}
                                            />
                                        },
                                    }
                                }
                            </>
                        },
                    }
                }
            </div>
        }
    }
}

impl App {
    fn build_tabs(&self, link: &yew::html::Scope<Self>) -> Html {
        let tab_class = |tab: InputTab| classes!("tab-btn", (self.tab == tab).then_some("active"));
        html! {
            <div class="tab-bar">
                <button
                    class={tab_class(InputTab::Upload)}
                    onclick={link.callback(|_| Msg::SetTab(InputTab::Upload))}
                >
                    {"Upload file"}
                </button>
                <button
                    class={tab_class(InputTab::Manual)}
                    onclick={link.callback(|_| Msg::SetTab(InputTab::Manual))}
                >
                    {"Manual entry"}
                </button>
            </div>
        }
    }
}

fn report_filename(source: &AnalysisSource) -> Option<String> {
    match source {
        AnalysisSource::File { filename, .. } => Some(filename.clone()),
        AnalysisSource::Manual => None,
    }
}
