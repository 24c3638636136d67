//! Kite-specific error types.

use thiserror::Error;

use crate::application::ports::BrokerageError;

/// Errors from the Kite adapter.
#[derive(Debug, Error, Clone)]
pub enum KiteError {
    /// HTTP client could not be built or the request was malformed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error envelope.
    #[error("API error ({status}): {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Kite exception class (e.g. `TokenException`).
        error_type: String,
        /// Error message from the API.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Envelope was well-formed but carried no usable data.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<KiteError> for BrokerageError {
    fn from(err: KiteError) -> Self {
        match err {
            KiteError::Http(message) | KiteError::Network(message) => {
                Self::Connection { message }
            }
            KiteError::Api {
                error_type,
                message,
                ..
            } => Self::Rejected {
                kind: error_type,
                message,
            },
            KiteError::JsonParse(message) | KiteError::InvalidResponse(message) => {
                Self::InvalidResponse { message }
            }
        }
    }
}
