use super::password::hash_password;
use crate::error::ServiceError;
use crate::store::{NewUser, Store};
use actix_web::{web, HttpResponse, Responder};
use common::model::user::Provider;
use common::requests::{MessageBody, RegisterRequest};
use log::{error, info};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

pub async fn process(
    payload: web::Json<RegisterRequest>,
    store: web::Data<Store>,
) -> impl Responder {
    match register(payload.into_inner(), store).await {
        Ok(body) => HttpResponse::Created().json(body),
        Err(e) => actix_web::ResponseError::error_response(&e),
    }
}

async fn register(
    payload: RegisterRequest,
    store: web::Data<Store>,
) -> Result<MessageBody, ServiceError> {
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::BadRequest("All fields are required".into()));
    }
    if !EMAIL_RE.is_match(&email) {
        return Err(ServiceError::BadRequest("Invalid email address".into()));
    }

    let password = payload.password;
    let user = web::block(move || {
        let hash = hash_password(&password).map_err(|e| {
            error!("{}", e);
            ServiceError::Internal("Something went wrong while registering!".into())
        })?;
        store
            .create_user(NewUser {
                name: &name,
                email: &email,
                password_hash: Some(&hash),
                provider: Provider::Credentials,
                image: None,
            })
            .map_err(ServiceError::from)
    })
    .await??;

    info!("Registered user {}", user.email);
    Ok(MessageBody {
        message: "User registered successfully!".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_plain_addresses_only() {
        assert!(EMAIL_RE.is_match("ada@example.com"));
        assert!(!EMAIL_RE.is_match("ada@example"));
        assert!(!EMAIL_RE.is_match("ada example@example.com"));
        assert!(!EMAIL_RE.is_match("@example.com"));
    }
}
