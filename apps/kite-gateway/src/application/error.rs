//! Gateway error taxonomy.

use thiserror::Error;

/// Errors surfaced by the session gateway.
///
/// Each variant carries the full client-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// A required input was missing or empty.
    #[error("{0}")]
    InvalidInput(String),

    /// The brokerage rejected the token exchange.
    #[error("Failed to generate session: {0}")]
    UpstreamAuthFailure(String),

    /// An authenticated operation was attempted without a session.
    #[error("No active session. Call /api/kite/session first")]
    NoActiveSession,

    /// An authenticated brokerage call failed.
    #[error("Failed to get MF holdings: {0}")]
    UpstreamRequestFailure(String),
}

impl GatewayError {
    /// Error for a missing `request_token` query parameter.
    #[must_use]
    pub fn missing_request_token() -> Self {
        Self::InvalidInput("request_token query parameter required".to_string())
    }

    /// Stable code for logs and metrics.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UpstreamAuthFailure(_) => "upstream_auth_failure",
            Self::NoActiveSession => "no_active_session",
            Self::UpstreamRequestFailure(_) => "upstream_request_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            GatewayError::missing_request_token().to_string(),
            "request_token query parameter required"
        );
        assert_eq!(
            GatewayError::UpstreamAuthFailure("TokenException: bad".to_string()).to_string(),
            "Failed to generate session: TokenException: bad"
        );
        assert_eq!(
            GatewayError::NoActiveSession.to_string(),
            "No active session. Call /api/kite/session first"
        );
        assert_eq!(
            GatewayError::UpstreamRequestFailure("timeout".to_string()).to_string(),
            "Failed to get MF holdings: timeout"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            GatewayError::missing_request_token().code(),
            GatewayError::UpstreamAuthFailure(String::new()).code(),
            GatewayError::NoActiveSession.code(),
            GatewayError::UpstreamRequestFailure(String::new()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
