use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::session::require_user;
use crate::store::Store;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::quota::Allowance;
use common::requests::UpdateRequestsResponse;
use log::info;

pub async fn process(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match release_request(&req, store, config).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn release_request(
    req: &HttpRequest,
    store: web::Data<Store>,
    config: web::Data<ServerConfig>,
) -> Result<UpdateRequestsResponse, ServiceError> {
    let user = require_user(req, &store).await?;

    let user_id = user.id.clone();
    let released = web::block(move || store.release_request(&user_id)).await??;
    let user = released.ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
    info!("Released one request for {} ({})", user.email, user.request_count);

    Ok(UpdateRequestsResponse {
        message: "Request released".into(),
        request_count: user.request_count,
        is_premium: user.is_premium,
        remaining: Allowance::for_user(user.request_count, user.is_premium, &config.limits)
            .remaining(),
    })
}
