mod config;
mod error;
mod services;
mod session;
mod store;

use crate::config::ServerConfig;
use crate::store::Store;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::io;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the compiled frontend; unknown paths fall back to `index.html` so
/// client-side routes survive a reload.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::load();
    let store = Store::open(&config.database.path).map_err(|e| {
        error!("Cannot open database {}: {}", config.database.path, e);
        io::Error::other(e.to_string())
    })?;
    info!("Using database {}", config.database.path);

    let host = config.server.host.clone();
    let port = config.server.port;
    let url = format!("http://{}:{}", host, port);

    if config.server.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);

    let store = web::Data::new(store);
    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(config.clone())
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
