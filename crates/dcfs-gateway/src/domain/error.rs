//! Gateway error types and their HTTP mapping.
//!
//! Error bodies are `{"error": "<message>"}`. Messages never carry the
//! reason a mutation failed inside the middleware.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dcfs_middleware::MiddlewareError;
use std::fmt;

/// HTTP-facing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("not found: {}", resource.into()),
        )
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }

    pub fn bad_gateway() -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "block store unavailable")
    }

    pub fn gateway_timeout(details: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, details)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

// Conversions from common error types

impl From<MiddlewareError> for ApiError {
    fn from(e: MiddlewareError) -> Self {
        match e {
            MiddlewareError::BackendUnavailable { .. } => ApiError::bad_gateway(),
            MiddlewareError::BackendTimeout { .. } => ApiError::gateway_timeout("block store timed out"),
            MiddlewareError::Crypto(_) | MiddlewareError::Pipeline { .. } => ApiError::internal(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Server-level errors (startup and shutdown)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accept loop failure
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
