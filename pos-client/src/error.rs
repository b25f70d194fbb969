//! Client error types

use shared::gateway::GatewayError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the platform
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Platform error {status}: {message}")]
    Status { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => GatewayError::Transport(e.to_string()),
            ClientError::InvalidResponse(m) => GatewayError::Transport(m),
            ClientError::Unauthorized => GatewayError::Status {
                status: 401,
                message: "authentication required".to_string(),
            },
            ClientError::NotFound(m) => GatewayError::NotFound(m),
            ClientError::Validation(m) => GatewayError::Status {
                status: 400,
                message: m,
            },
            ClientError::Status { status, message } => GatewayError::Status { status, message },
            ClientError::Serialization(e) => GatewayError::Transport(e.to_string()),
        }
    }
}
