//! API Client Error Types
//!
//! Failures talking to the rewards backend. Any non-success response is a
//! failure; the backend's message is kept for display.

use thiserror::Error;

use super::dto::ErrorBody;

/// Backend client errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built
    #[error("Request build error: {0}")]
    Request(String),
}

impl ClientError {
    /// Build a status error from a raw response body.
    ///
    /// JSON `{"detail": ...}` bodies contribute their detail; anything else is
    /// shown as-is, and an empty body falls back to the status code.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) if body.trim().is_empty() => format!("Request failed ({})", status),
            Err(_) => body.trim().to_string(),
        };

        ClientError::Status { status, message }
    }
}

/// Result type for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
