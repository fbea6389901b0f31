//! Account sheet: sign-in and registration forms for anonymous users, and a
//! small dashboard (remaining allowance, recent analyses, sign out) for
//! signed-in ones.

use common::config::Limits;
use common::model::record::AnalysisRecord;
use common::model::user::SessionUser;
use common::requests::{LoginRequest, RegisterRequest};
use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::components::report_failure;
use crate::helpers::show_toast;
use crate::tops_sheet::{close_top_sheet, open_top_sheet};

mod view;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    Register,
}

pub enum Msg {
    Open,
    Close,
    SetMode(Mode),
    SetName(String),
    SetEmail(String),
    SetPassword(String),
    Submit,
    SignedIn(Result<SessionUser, ApiError>),
    SignOut,
    SignedOut(Result<(), ApiError>),
    HistoryLoaded(Result<Vec<AnalysisRecord>, ApiError>),
}

#[derive(Properties, PartialEq, Clone)]
pub struct AuthProps {
    pub session: Option<SessionUser>,
    pub limits: Limits,
    pub on_signed_in: Callback<SessionUser>,
    pub on_signed_out: Callback<()>,
}

pub struct AuthComponent {
    pub sheet_ref: NodeRef,
    pub mode: Mode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub history: Option<Vec<AnalysisRecord>>,
}

impl Component for AuthComponent {
    type Message = Msg;
    type Properties = AuthProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            sheet_ref: NodeRef::default(),
            mode: Mode::SignIn,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            submitting: false,
            history: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Open => {
                open_top_sheet(&self.sheet_ref);
                if ctx.props().session.is_some() {
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        link.send_message(Msg::HistoryLoaded(api::fetch_history().await));
                    });
                }
                false
            }
            Msg::Close => {
                close_top_sheet(&self.sheet_ref);
                false
            }
            Msg::SetMode(mode) => {
                self.mode = mode;
                true
            }
            Msg::SetName(name) => {
                self.name = name;
                false
            }
            Msg::SetEmail(email) => {
                self.email = email;
                false
            }
            Msg::SetPassword(password) => {
                self.password = password;
                false
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if self.email.trim().is_empty()
                    || self.password.is_empty()
                    || (self.mode == Mode::Register && self.name.trim().is_empty())
                {
                    show_toast("Missing information", "Please fill in every field.");
                    return false;
                }

                self.submitting = true;
                let mode = self.mode;
                let register = RegisterRequest {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    if mode == Mode::Register {
                        if let Err(e) = api::register(&register).await {
                            link.send_message(Msg::SignedIn(Err(e)));
                            return;
                        }
                    }
                    let login = LoginRequest {
                        email: register.email,
                        password: register.password,
                    };
                    link.send_message(Msg::SignedIn(api::login(&login).await));
                });
                true
            }
            Msg::SignedIn(outcome) => {
                self.submitting = false;
                match outcome {
                    Ok(user) => {
                        log!(format!("Signed in as {}", user.email));
                        self.password.clear();
                        close_top_sheet(&self.sheet_ref);
                        show_toast("Welcome", &format!("Signed in as {}", user.name));
                        ctx.props().on_signed_in.emit(user);
                    }
                    Err(e) => report_failure("Authentication failed", &e),
                }
                true
            }
            Msg::SignOut => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::SignedOut(api::logout().await));
                });
                false
            }
            Msg::SignedOut(outcome) => {
                match outcome {
                    Ok(()) => {
                        self.history = None;
                        close_top_sheet(&self.sheet_ref);
                        ctx.props().on_signed_out.emit(());
                    }
                    Err(e) => report_failure("Sign out failed", &e),
                }
                true
            }
            Msg::HistoryLoaded(outcome) => {
                match outcome {
                    Ok(records) => self.history = Some(records),
                    Err(e) => report_failure("History unavailable", &e),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
