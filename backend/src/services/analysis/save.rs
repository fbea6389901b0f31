use crate::error::ServiceError;
use crate::session::require_user;
use crate::store::Store;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::record::AnalysisRecordInput;
use common::requests::SaveAnalysisResponse;
use log::info;

pub async fn process(
    req: HttpRequest,
    payload: web::Json<AnalysisRecordInput>,
    store: web::Data<Store>,
) -> impl Responder {
    match save_analysis(&req, payload.into_inner(), store).await {
        Ok(body) => HttpResponse::Created().json(body),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn save_analysis(
    req: &HttpRequest,
    input: AnalysisRecordInput,
    store: web::Data<Store>,
) -> Result<SaveAnalysisResponse, ServiceError> {
    let user = require_user(req, &store).await?;
    input.validate().map_err(ServiceError::BadRequest)?;

    let user_id = user.id.clone();
    let analysis_id = web::block(move || store.insert_analysis(&user_id, &input)).await??;
    info!("Saved analysis {} for {}", analysis_id, user.email);

    Ok(SaveAnalysisResponse {
        message: "Analysis saved successfully".into(),
        analysis_id,
    })
}
