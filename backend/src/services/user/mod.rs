//! Per-account counters under `/api/user`.
//!
//! `POST /update-requests` counts one analysis against the signed-in account.
//! The browser calls it before it sends an analysis and gives up on 429.
//! `POST /release-request` hands the slot back when that analysis failed.

mod release_request;
mod update_requests;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/user";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/update-requests", post().to(update_requests::process))
        .route("/release-request", post().to(release_request::process))
}
