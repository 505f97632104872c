//! Error types for dispatch operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for dispatch operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Nothing at this layer retries; callers decide.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be turned into a valid HTTP request
    /// (bad URL, malformed attachment content type, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote API rejected the request.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl DispatchError {
    /// Returns the rejection details when the remote API answered with a
    /// non-success status.
    #[must_use]
    pub const fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }
}

/// A non-success response from the remote API.
///
/// Carries the status and the raw error body so callers can tell, for
/// example, an unknown webhook (404) from an invalid payload (400).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

impl RequestError {
    /// Creates a new request error.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Decodes the platform's JSON error payload, if the body holds one.
    #[must_use]
    pub fn payload(&self) -> Option<RemoteErrorPayload> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request rejected with status {}", self.status)?;
        match self.payload() {
            Some(payload) => write!(f, ": {} (code {})", payload.message, payload.code),
            None => Ok(()),
        }
    }
}

impl std::error::Error for RequestError {}

/// Error body returned by the remote API.
///
/// ```json
/// {
///     "code": 10015,
///     "message": "Unknown Webhook"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteErrorPayload {
    /// Platform-specific error code
    pub code: u64,
    /// Human-readable message
    pub message: String,
    /// Per-field validation errors, when the payload was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}
