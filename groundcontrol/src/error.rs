//! Error types and the error-handler callback.

use std::sync::Arc;
use thiserror::Error;

/// Result type for GroundControl operations.
pub type Result<T> = std::result::Result<T, GroundControlError>;

/// Errors produced while checking a flag against the remote service.
///
/// None of these escape the boolean-returning check API: the client funnels
/// every failure to the configured [error handler](crate::GroundControlClient::on_error)
/// and the check resolves to `false`.
#[derive(Debug, Error)]
pub enum GroundControlError {
    /// Network-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status. The message is the server-provided `message`
    /// field when the error body carries one, else the HTTP status text.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server message or status text.
        message: String,
    },

    /// Success status but the body was not valid JSON.
    #[error("Failed to parse response from {url}")]
    Parse {
        /// The request URL.
        url: String,
    },

    /// Success status and valid JSON, but `enabled` was missing or not a
    /// boolean.
    #[error("Invalid response")]
    InvalidResponse,

    /// The configured base URL or the derived request URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GroundControlError {
    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Callback invoked once per failed remote check.
pub type ErrorHandler = Arc<dyn Fn(&GroundControlError) + Send + Sync>;

/// Default error handler: log the failure.
pub(crate) fn default_error_handler() -> ErrorHandler {
    Arc::new(|err| {
        tracing::error!(error = %err, "feature flag check failed");
    })
}
