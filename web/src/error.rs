//! Error types for web handlers.
//!
//! Every error leaving a behavior is a client error as far as the transport is
//! concerned. This module turns such errors into the JSON body clients see.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use behavior_core::environment::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application error type for web handlers.
///
/// Implements Axum's `IntoResponse`, producing an [`ExceptionResponse`] body.
///
/// # Examples
///
/// ```ignore
/// async fn handler(body: Bytes) -> Result<Json<Data>, AppError> {
///     let request = serde_json::from_slice(&body)
///         .map_err(|e| AppError::bad_request(e.to_string()))?;
///     Ok(Json(request))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// When the error occurred
    timestamp: DateTime<Utc>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error, timestamped by the system clock.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::stamped(&SystemClock, status, message)
    }

    /// Create a new application error, timestamped by `clock`.
    #[must_use]
    pub fn stamped(clock: &dyn Clock, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: clock.now(),
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing message of this error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The body sent to the client.
    #[must_use]
    pub fn to_exception_response(&self) -> ExceptionResponse {
        ExceptionResponse {
            timestamp: self.timestamp,
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionResponse {
    /// When the error occurred.
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status.
    pub status: u16,
    /// Reason phrase of the HTTP status.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                message = %self.message,
                error = ?self.source,
                "Internal server error"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                message = %self.message,
                error = ?self.source,
                "Request rejected"
            );
        }

        let body = self.to_exception_response();
        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}
