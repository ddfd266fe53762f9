//! Error types for the engine
//!
//! Collaborator failures are classified once, at the HTTP boundary, into a
//! typed taxonomy so callers never re-inspect status codes or message
//! strings. `is_retryable` lets calling layers suppress noisy logging for
//! expected transient conditions without suppressing genuine failures.

use thiserror::Error;

/// Result type alias using our EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Transport-level failure with an HTTP status from a collaborator
    #[error("transport error (status {status}): {message}")]
    Transport {
        status: u16,
        message: String,
        retryable: bool,
    },

    /// Request aborted before a response arrived (connection reset, timeout)
    #[error("request aborted: {0}")]
    Aborted(String),

    /// Invalid API response
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Build a `Transport` error from a response status and body,
    /// classifying retryability in one place.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        EngineError::Transport {
            status,
            message: message.into(),
            retryable: status_is_retryable(status),
        }
    }

    /// Classify a reqwest error at the collaborator boundary: interrupted
    /// connections become `Aborted`, everything else stays a request error.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            EngineError::Aborted(err.to_string())
        } else {
            EngineError::HttpRequest(err)
        }
    }

    /// Whether the failure is an expected transient condition worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Transport { retryable, .. } => *retryable,
            EngineError::Aborted(_) => true,
            EngineError::HttpRequest(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

/// 408/429 and 5xx-class statuses are transient; everything else is definitive.
fn status_is_retryable(status: u16) -> bool {
    matches!(status, 408 | 429) || (500..=599).contains(&status)
}
