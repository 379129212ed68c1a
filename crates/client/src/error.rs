//! Error types for the PiNet client.

use serde::{Deserialize, Serialize};

/// Result type for client operations.
pub type PiNetResult<T> = Result<T, PiNetError>;

/// Error types that can occur when talking to the PiNet API.
#[derive(Debug, thiserror::Error)]
pub enum PiNetError {
    /// Input rejected, either locally or by the API (400/422).
    #[error("{0}")]
    Validation(String),

    /// The API could not be reached.
    #[error("{0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("{0}")]
    Timeout(String),

    /// The API rejected our credentials (401/403).
    #[error("{0}")]
    Authentication(String),

    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// HTTP request failed for a reason other than connectivity.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Coarse failure category, used by callers that report errors by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Authentication,
    Unexpected,
}

impl PiNetError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Network(_) | Self::Timeout(_) => ErrorKind::Network,
            Self::Authentication(_) => ErrorKind::Authentication,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Create an error from a non-success status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (message, details) = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_response) => (error_response.error, error_response.details),
            Err(_) if body.trim().is_empty() => (format!("HTTP {}", status), None),
            Err(_) => (body.trim().to_string(), None),
        };

        match status {
            401 | 403 => Self::Authentication(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Api {
                status,
                message,
                details,
            },
        }
    }
}

/// Error response from the PiNet API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
