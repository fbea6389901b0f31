use super::password::verify_password;
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::session::session_cookie;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder};
use common::model::user::{Provider, SessionUser};
use common::requests::LoginRequest;
use log::{error, info};

pub async fn process(
    payload: web::Json<LoginRequest>,
    store: web::Data<Store>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match login(payload.into_inner(), store, config.auth.session_hours).await {
        Ok((token, user)) => HttpResponse::Ok()
            .cookie(session_cookie(token))
            .json(user),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn login(
    payload: LoginRequest,
    store: web::Data<Store>,
    session_hours: i64,
) -> Result<(String, SessionUser), ServiceError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::BadRequest("Email and password are required".into()));
    }

    web::block(move || {
        let user = store
            .find_user_by_email(&email)?
            .ok_or_else(|| ServiceError::InvalidCredentials("User not found!".into()))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(ServiceError::ProviderMismatch(format!(
                "This account signs in with {}",
                provider_label(user.provider)
            )));
        };

        let matches = verify_password(&payload.password, hash).map_err(|e| {
            error!("unreadable password hash for {}: {}", user.email, e);
            ServiceError::Internal("Something went wrong!".into())
        })?;
        if !matches {
            return Err(ServiceError::InvalidCredentials("Wrong Credentials!".into()));
        }

        let token = store.create_session(&user.id, session_hours)?;
        info!("User {} signed in", user.email);
        Ok((token, SessionUser::from(&user)))
    })
    .await?
}

fn provider_label(provider: Provider) -> &'static str {
    match provider {
        Provider::Credentials => "email and password",
        Provider::Google => "Google",
    }
}
