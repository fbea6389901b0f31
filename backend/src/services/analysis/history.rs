use crate::error::ServiceError;
use crate::session::require_user;
use crate::store::{Store, HISTORY_LIMIT};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::record::AnalysisRecord;

pub async fn process(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match history(&req, store).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn history(
    req: &HttpRequest,
    store: web::Data<Store>,
) -> Result<Vec<AnalysisRecord>, ServiceError> {
    let user = require_user(req, &store).await?;
    let records = web::block(move || store.list_analyses(&user.id, HISTORY_LIMIT)).await??;
    Ok(records)
}
