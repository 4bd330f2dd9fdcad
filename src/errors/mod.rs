use serde::Deserialize;
use std::fmt;

/// Error body returned by the game server.
///
/// Format: `{ "error": { "code": "...", "message": "..." } }`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Inner part of [`ErrorResponse`].
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code
    #[serde(default)]
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Client error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, reset)
    Transport(String),
    /// The server answered with a non-2xx status
    Http { status: u16, message: String },
    /// The response body could not be decoded
    Decode(String),
    /// Local validation failed before anything was sent
    Validation(String),
    /// The session actor is no longer running
    SessionClosed,
}

impl ClientError {
    /// Build an HTTP error from a status code and the raw response body.
    ///
    /// Uses the server's error message when the body follows the standard
    /// error format, otherwise the raw body (or the status reason when empty).
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        let message = if message.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Request failed")
                .to_string()
        } else {
            message
        };

        Self::Http { status, message }
    }

    /// Check if this is a local validation failure rather than a network one
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Network error: {msg}"),
            Self::Http { status, message } => write!(f, "Server error ({status}): {message}"),
            Self::Decode(msg) => write!(f, "Unexpected server response: {msg}"),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::SessionClosed => write!(f, "Game session is closed"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Convert `reqwest` errors to `ClientError`
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), "")
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Convert JSON decoding errors to `ClientError`
impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
