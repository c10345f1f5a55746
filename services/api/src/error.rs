//! Custom error types for the back-office API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the back-office API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required field
    #[error("{0}")]
    Validation(String),

    /// An event with the requested slug already exists
    #[error("Um evento com este slug já existe. Por favor, use um título diferente.")]
    DuplicateSlug,

    /// A user with the requested email already exists
    #[error("Já existe um usuário com este email.")]
    DuplicateEmail,

    /// Status value outside the event status enum
    #[error("Invalid status value")]
    InvalidStatus,

    /// Wrong email/password combination; never reveals which one
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    /// Missing, invalid or expired session token
    #[error("Unauthorized")]
    Unauthorized,

    /// No record matches the given id or slug
    #[error("{0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// True when the error is a PostgreSQL unique-index violation (code 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::DuplicateSlug | ApiError::DuplicateEmail | ApiError::InvalidStatus => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
