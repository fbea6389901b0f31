//! # Auth Service Module
//!
//! Credential accounts and cookie sessions under `/api/auth`.
//!
//! ## Sub-modules:
//! - `register`: creates a credentials account with an Argon2 password hash.
//! - `login`: checks credentials and opens a session cookie.
//! - `logout`: drops the session row and clears the cookie.
//! - `session`: reports the signed-in account to the browser.
//! - `password`: hashing and verification helpers.

mod login;
mod logout;
mod password;
mod register;
mod session;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/auth";

/// # Registered Routes:
///
/// *   **`POST /register`**: `{name, email, password}`, 201 on success, 400 when
///     a field is missing or the email is taken.
/// *   **`POST /login`**: `{email, password}`, sets the session cookie and returns
///     the `SessionUser`. 401 for unknown email or wrong password, 409 for an
///     account that signs in through an OAuth provider.
/// *   **`POST /logout`**: always 200.
/// *   **`GET /session`**: the `SessionUser`, or 401 without a live session.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/register", post().to(register::process))
        .route("/login", post().to(login::process))
        .route("/logout", post().to(logout::process))
        .route("/session", get().to(session::process))
}
