//! Error types for backend calls and session persistence
//!
//! Every failed API call resolves to one `ApiError`. Callers never inspect
//! transport details: they show `user_message` and return to an
//! interactive state.

use thiserror::Error;

/// Result alias for API client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered 401; the session has already been cleared
    #[error("Unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx answer
    #[error("Request failed with status {status}")]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 2xx answer whose body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The `message` field of the backend's error body, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Server { message, .. } => {
                message.as_deref()
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Text for a user-facing notice: the server message or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Errors from durable session storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
