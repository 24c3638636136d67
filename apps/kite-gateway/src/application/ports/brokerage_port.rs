//! Brokerage Port (Driven Port)
//!
//! Interface for the brokerage login handshake and authenticated reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Holdings;

/// Result of a successful request-token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    /// Access token for authenticated calls.
    pub access_token: String,
    /// Brokerage user ID.
    pub user_id: String,
}

impl std::fmt::Debug for SessionGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGrant")
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Brokerage port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerageError {
    /// The brokerage rejected the request.
    #[error("{kind}: {message}")]
    Rejected {
        /// Upstream error category (e.g. `TokenException`).
        kind: String,
        /// Upstream message.
        message: String,
    },

    /// The brokerage could not be reached.
    #[error("brokerage connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// The brokerage answered with something unreadable.
    #[error("invalid brokerage response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for brokerage interactions.
///
/// The access token is passed explicitly on every authenticated call so
/// the adapter holds no mutable session state of its own.
#[async_trait]
pub trait BrokeragePort: Send + Sync {
    /// URL the user visits to log in and obtain a request token.
    fn login_url(&self) -> String;

    /// Exchange a one-time request token for an access token.
    async fn generate_session(
        &self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<SessionGrant, BrokerageError>;

    /// Fetch mutual fund holdings for the given access token.
    async fn mf_holdings(&self, access_token: &str) -> Result<Holdings, BrokerageError>;

    /// Invalidate an access token at the brokerage.
    async fn invalidate_session(&self, access_token: &str) -> Result<(), BrokerageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_kind_and_message() {
        let err = BrokerageError::Rejected {
            kind: "TokenException".to_string(),
            message: "Token is invalid or has expired.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "TokenException: Token is invalid or has expired."
        );
    }

    #[test]
    fn grant_debug_redacts_token() {
        let grant = SessionGrant {
            access_token: "abc".to_string(),
            user_id: "U1".to_string(),
        };
        let debug = format!("{grant:?}");
        assert!(!debug.contains("\"abc\""));
        assert!(debug.contains("U1"));
    }
}
