use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::session::require_user;
use crate::store::{RequestOutcome, Store};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::quota::Allowance;
use common::requests::UpdateRequestsResponse;
use log::warn;

pub async fn process(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match update_requests(&req, store, config).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn update_requests(
    req: &HttpRequest,
    store: web::Data<Store>,
    config: web::Data<ServerConfig>,
) -> Result<UpdateRequestsResponse, ServiceError> {
    let user = require_user(req, &store).await?;
    let free_requests = config.limits.free_requests;

    let user_id = user.id.clone();
    let outcome = web::block(move || store.consume_request(&user_id, free_requests)).await??;

    match outcome {
        RequestOutcome::Counted(user) => Ok(UpdateRequestsResponse {
            message: "Request count updated".into(),
            request_count: user.request_count,
            is_premium: user.is_premium,
            remaining: Allowance::for_user(user.request_count, user.is_premium, &config.limits)
                .remaining(),
        }),
        RequestOutcome::LimitReached(user) => {
            warn!(
                "User {} hit the request limit ({}/{})",
                user.email, user.request_count, free_requests
            );
            Err(ServiceError::LimitReached)
        }
        RequestOutcome::UnknownUser => Err(ServiceError::NotFound("User not found".into())),
    }
}
