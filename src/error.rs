//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed id or body. Answered with an empty 400.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unregistered tag. Answered with an empty 404.
    #[error("not found: {0}")]
    NotFound(String),
    /// Read path failure. Answered with an empty 500.
    #[error("query failed: {0}")]
    QueryFailed(String),
    /// Write batch rolled back. Attributed to the client: 400 with the backend message.
    #[error("{0}")]
    TransactionFailed(String),
    /// Server-side failure reported with its message.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Re-attribute a write failure to the server (used by delete).
    pub fn into_internal(self) -> AppError {
        match self {
            AppError::TransactionFailed(msg) => AppError::Internal(msg),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST.into_response(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            AppError::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            AppError::TransactionFailed(msg) => {
                (StatusCode::BAD_REQUEST, Json(crate::response::error_body(msg))).into_response()
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(crate::response::error_body(msg)),
            )
                .into_response(),
        }
    }
}
