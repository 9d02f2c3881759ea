//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body matched none of the expected shapes
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage I/O failed
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<shared::response::UnexpectedShape> for ClientError {
    fn from(err: shared::response::UnexpectedShape) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
