use crate::session::require_user;
use crate::store::Store;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::user::SessionUser;

pub async fn process(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match require_user(&req, &store).await {
        Ok(user) => HttpResponse::Ok().json(SessionUser::from(&user)),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}
