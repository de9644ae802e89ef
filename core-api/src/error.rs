//! Error types for the character API client

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors surfaced by the request builder, transport, decoder and client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Base URL, path and query could not be combined into a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request produced no response after all retry attempts
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("Bad status code: {status}")]
    BadStatus { status: u16, body: String },

    /// The body did not match the expected shape
    #[error("Decoding failed: {0}")]
    Decoding(String),

    /// The caller cancelled the request, usually because a newer one superseded it
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<BridgeError> for ApiError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::Cancelled => ApiError::Cancelled,
            BridgeError::Network(message) => ApiError::Transport(message),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
