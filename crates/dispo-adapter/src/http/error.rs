/*
[INPUT]:  Error sources (HTTP transport, API envelopes, auth, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the disposition-service adapter
#[derive(Error, Debug)]
pub enum DispoError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but flagged the envelope as unsuccessful
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Session could not be refreshed, a new sign-in is required
    #[error("session expired, sign in again")]
    SessionExpired,

    /// An authenticated endpoint was called without a stored token
    #[error("no active session")]
    NotAuthenticated,

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DispoError {
    /// Check if the error is worth retrying as-is
    pub fn is_retryable(&self) -> bool {
        match self {
            DispoError::Http(_) => true,
            DispoError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the error indicates a failed or missing authentication
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            DispoError::SessionExpired
                | DispoError::NotAuthenticated
                | DispoError::Api { status: 401, .. }
                | DispoError::Api { status: 403, .. }
        )
    }

    /// Whether the server rejected the presented access token
    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, DispoError::Api { status: 401, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        DispoError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, DispoError>;
