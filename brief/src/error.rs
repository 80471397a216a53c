//! Client error types

use thiserror::Error;

/// Errors that can occur while talking to the brief backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Required configuration is missing; the connection layer cannot start
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No discovery candidate answered its probe
    #[error("Could not connect to backend. Tried: {}", .attempted.join(", "))]
    Discovery { attempted: Vec<String> },

    /// The request never produced a response (refused, unreachable, timed out)
    #[error("Network error ({url}): {message}")]
    Transport { url: String, message: String },

    /// The backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Build a transport error for a URL
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        ClientError::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Check if this is a network-level failure that may indicate a stale connection
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    /// Check if this error must halt startup
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::Configuration(_))
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(e.to_string())
    }
}
