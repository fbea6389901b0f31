use crate::error::ServiceError;
use crate::session::{removal_cookie, session_token};
use crate::store::Store;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::MessageBody;

pub async fn process(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match logout(&req, store).await {
        Ok(()) => HttpResponse::Ok().cookie(removal_cookie()).json(MessageBody {
            message: "Signed out".into(),
        }),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn logout(req: &HttpRequest, store: web::Data<Store>) -> Result<(), ServiceError> {
    if let Some(token) = session_token(req) {
        web::block(move || store.delete_session(&token)).await??;
    }
    Ok(())
}
