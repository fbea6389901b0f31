use crate::store::StoreError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ApiErrorBody;
use log::error;
use thiserror::Error;

/// Failures of the same-origin API, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ProviderMismatch(String),

    #[error("Request limit reached")]
    LimitReached,

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized | ServiceError::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ProviderMismatch(_) => StatusCode::CONFLICT,
            ServiceError::LimitReached => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => ServiceError::BadRequest("User already exists!".into()),
            other => {
                error!("store failure: {}", other);
                ServiceError::Internal("Something went wrong!".into())
            }
        }
    }
}

impl From<BlockingError> for ServiceError {
    fn from(e: BlockingError) -> Self {
        error!("blocking task failed: {}", e);
        ServiceError::Internal("Something went wrong!".into())
    }
}
