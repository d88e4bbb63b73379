//! HTTP error types for the DAIV.PRO server.
//!
//! Maps relay errors from `daiv-core` into HTTP responses. Every error
//! produces a JSON body with a human-readable `message`; internal and
//! validation failures add an `error` string for diagnostics. Upstream
//! response bodies and credentials never reach the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use daiv_core::error::RelayError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Webhook settings are missing.
    Configuration,
    /// The webhook answered with this non-success status.
    Upstream(StatusCode),
    /// Strict validation rejected the submission.
    BadRequest(String),
    /// Anything else: transport failure, malformed input or output.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            Self::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error.",
                None,
            ),
            Self::Upstream(status) => (status, "Failed to submit form.", None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Invalid submission.", Some(msg)),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                Some(msg),
            ),
        };

        let body = ErrorBody { message, error };

        (status, axum::Json(body)).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingConfig { .. } => Self::Configuration,
            RelayError::UpstreamRejected { status, .. } => {
                Self::Upstream(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY))
            }
            RelayError::InvalidSubmission(inner) => Self::BadRequest(inner.to_string()),
            RelayError::MalformedSubmission { .. }
            | RelayError::Transport { .. }
            | RelayError::MalformedUpstream { .. } => Self::Internal(err.to_string()),
        }
    }
}
