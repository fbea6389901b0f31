//! Analysis records mirrored for signed-in users, under `/api/analysis`.
//!
//! - `POST /save`: stores an `AnalysisRecordInput` for the session user, 201
//!   with the new id. 400 when `functions` is empty or the degree is zero.
//! - `GET /history`: the user's latest records, newest first.

mod history;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/analysis";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/history", get().to(history::process))
}
