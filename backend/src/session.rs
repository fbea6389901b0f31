//! Cookie-backed sessions.
//!
//! The browser holds an opaque token in an HttpOnly cookie; the row it points
//! to lives in the `sessions` table and carries the expiry.

use crate::error::ServiceError;
use crate::store::Store;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest};
use common::model::user::User;

pub const SESSION_COOKIE: &str = "fluent_session";

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    cookie
}

pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

/// The signed-in account, or `None` when there is no live session.
pub async fn current_user(
    req: &HttpRequest,
    store: &web::Data<Store>,
) -> Result<Option<User>, ServiceError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    let store = store.clone();
    let user = web::block(move || store.session_user(&token)).await??;
    Ok(user)
}

/// Like [`current_user`] but rejects anonymous callers with 401.
pub async fn require_user(
    req: &HttpRequest,
    store: &web::Data<Store>,
) -> Result<User, ServiceError> {
    current_user(req, store)
        .await?
        .ok_or(ServiceError::Unauthorized)
}
