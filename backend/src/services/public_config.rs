use crate::config::ServerConfig;
use actix_web::{web, HttpResponse, Responder};

/// `GET /config.json`: only the sections the browser needs.
pub async fn process(config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-cache"))
        .json(config.public())
}
