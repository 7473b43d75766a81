use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::use_cases::{auth_service::AuthError, crud_error::CrudError};

/// Everything a handler can answer with besides success.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Ownership(String),
    #[error("{0}")]
    NotFound(String),
    /// Delete of a resource that is not there.
    #[error("{0}")]
    MissingTarget(String),
    #[error("{0}")]
    Conflict(String),
    #[error("unknown endpoint")]
    UnknownEndpoint,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            // reuses 400 rather than 403 for non-creator attempts
            ApiError::Ownership(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingTarget(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UsernameTooShort | AuthError::PasswordTooShort => {
                ApiError::Validation(err.to_string())
            }
            AuthError::UsernameTaken => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Auth(err.to_string())
            }
            AuthError::PasswordHashingFailed(_)
            | AuthError::ErrorVerifying(_)
            | AuthError::EncodingTokenError
            | AuthError::DatabaseError(_) => {
                error!("auth failure: {err}");
                ApiError::Internal
            }
        }
    }
}

impl From<CrudError> for ApiError {
    fn from(err: CrudError) -> Self {
        match err {
            CrudError::Validation(_) | CrudError::UnknownUser => {
                ApiError::Validation(err.to_string())
            }
            CrudError::NotOwner(_) => ApiError::Ownership(err.to_string()),
            CrudError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CrudError::NothingToDelete(_) => ApiError::MissingTarget(err.to_string()),
            CrudError::DatabaseError(_) => {
                error!("store failure: {err}");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation("malformatted id".to_string()))
}
