//! Error types for the BigBlueButton client

use thiserror::Error;

/// Message for calls that produced no usable server reply, or a FAILED reply without text
pub const NO_RESPONSE_MESSAGE: &str = "no response message from server";

/// Broad category of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a usable response
    Transport,
    /// The server answered with `returncode` other than `SUCCESS`
    Application,
    /// The client was configured incorrectly
    Config,
}

/// Errors returned by [`crate::BigBlueButtonClient`] operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error, timeout or connection failure
    #[error("{call}: request failed: {reason}")]
    Transport { call: String, reason: String },

    /// Server answered with a non-2xx status
    #[error("{call}: HTTP status {status}")]
    HttpStatus { call: String, status: u16 },

    /// Body was not XML or lacked a `returncode`
    #[error("{call}: malformed response: {reason}")]
    MalformedResponse { call: String, reason: String },

    /// Server answered `returncode` FAILED
    #[error("{call} failed ({}): {message}", .message_key.as_deref().unwrap_or("unknown"))]
    Failed {
        call: String,
        message_key: Option<String>,
        message: String,
    },

    /// Missing or invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. }
            | ApiError::HttpStatus { .. }
            | ApiError::MalformedResponse { .. } => ErrorKind::Transport,
            ApiError::Failed { .. } => ErrorKind::Application,
            ApiError::Config(_) | ApiError::Client(_) => ErrorKind::Config,
        }
    }

    /// Human-readable message: the server's own text for application failures,
    /// the generic no-response text when the call itself failed.
    /// Diagnostic detail stays in `Display`.
    pub fn message(&self) -> String {
        match self {
            ApiError::Failed { message, .. } => message.clone(),
            ApiError::Transport { .. }
            | ApiError::HttpStatus { .. }
            | ApiError::MalformedResponse { .. } => NO_RESPONSE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// The BBB `messageKey` of an application failure
    pub fn message_key(&self) -> Option<&str> {
        match self {
            ApiError::Failed { message_key, .. } => message_key.as_deref(),
            _ => None,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
