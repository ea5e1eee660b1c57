//! Concierge error types with HTTP status code mapping.
//!
//! [`ConciergeError`] is the central error type for the service. Expected
//! business conditions (no free table, unknown table on checkout) are plain
//! return values in the domain layer; this enum covers invalid input and
//! failures of the model and speech backends.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "table not found: T9-1"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                 |
/// |-----------|-----------------|-----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request             |
/// | 2000–2999 | Not Found       | 404 Not Found               |
/// | 3000–3999 | Server          | 500 Internal Server Error   |
/// | 5000–5999 | Upstream        | 502 / 503                   |
#[derive(Debug, thiserror::Error)]
pub enum ConciergeError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Party size was zero, negative, or not a whole number.
    #[error("invalid party size: {0}")]
    InvalidPartySize(String),

    /// Table with the given ID does not exist.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// No chat model is configured (missing API key).
    #[error("chat model unavailable")]
    ModelUnavailable,

    /// The chat model backend failed.
    #[error("model error: {0}")]
    Model(String),

    /// No speech backend is configured.
    #[error("speech synthesis unavailable")]
    SpeechUnavailable,

    /// The speech backend failed.
    #[error("speech error: {0}")]
    Speech(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConciergeError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidPartySize(_) => 1002,
            Self::TableNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::ModelUnavailable => 5001,
            Self::Model(_) => 5002,
            Self::SpeechUnavailable => 5003,
            Self::Speech(_) => 5004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidPartySize(_) => StatusCode::BAD_REQUEST,
            Self::TableNotFound(_) => StatusCode::NOT_FOUND,
            Self::ModelUnavailable | Self::SpeechUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Model(_) | Self::Speech(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConciergeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
