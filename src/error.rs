use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    /// Rendered as a bare 404 without a body.
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub const TOKEN_MISSING_OR_INVALID: &str = "token missing or invalid";

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized(TOKEN_MISSING_OR_INVALID.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::BadRequest(msg),
            e @ StoreError::Duplicate { .. } => Self::BadRequest(e.to_string()),
            StoreError::NotFound => Self::NotFound,
            StoreError::Database(e) => Self::Internal(e.into()),
        }
    }
}

// Body parse failures (bad syntax, wrong types, wrong content type) are the
// caller's fault and share the `{ "error" }` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Internal(e) => {
                error!(error = %e, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
