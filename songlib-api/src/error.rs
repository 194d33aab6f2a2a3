//! Error types for the HTTP layer
//!
//! Every error response has the body `{"error": "<message>"}`. Messages are
//! generic; the underlying cause is only logged.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use songlib_common::Error;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or duplicate song (400)
    #[error("{0}")]
    BadRequest(String),

    /// Song or verse does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Any other failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a store failure and log its cause
    ///
    /// `action` is the client-facing message for unexpected failures, e.g.
    /// "Failed to update song".
    pub fn from_store(err: Error, action: &str) -> Self {
        if err.is_client_error() {
            warn!("{}: {}", action, err);
        } else {
            error!("{}: {}", action, err);
        }

        match err {
            Error::NotFound(_) => ApiError::NotFound("Song not found".to_string()),
            Error::VerseOutOfRange { .. } => ApiError::NotFound("Verse not found".to_string()),
            Error::Conflict(_) => ApiError::BadRequest("This song already exists".to_string()),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            _ => ApiError::Internal(action.to_string()),
        }
    }

    /// Log a store failure and report it as 500 whatever its kind
    pub fn internal(err: Error, action: &str) -> Self {
        error!("{}: {}", action, err);
        ApiError::Internal(action.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
