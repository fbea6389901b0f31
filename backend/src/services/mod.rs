//! Same-origin API of the workbench. The analysis service itself lives
//! elsewhere; these routes cover accounts, quota and saved analyses.

pub mod analysis;
pub mod auth;
mod public_config;
pub mod user;

use crate::error::ServiceError;
use actix_web::web;

/// JSON bodies larger than this are rejected before deserialization.
const JSON_LIMIT: usize = 1024 * 1024;

/// Registers every API scope plus `/config.json`. Shared by `main` and the
/// route tests so both see the same app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| ServiceError::BadRequest(err.to_string()).into()),
    )
    .route("/config.json", web::get().to(public_config::process))
    .service(auth::configure_routes())
    .service(user::configure_routes())
    .service(analysis::configure_routes());
}
