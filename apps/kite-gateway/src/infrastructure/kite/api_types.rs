//! Kite Connect request and response types.
//!
//! These types map directly to Kite's REST API format.

use serde::{Deserialize, Serialize};

use crate::application::ports::SessionGrant;

// ============================================================================
// Envelope
// ============================================================================

/// Response envelope wrapping every Kite API payload.
#[derive(Debug, Clone, Deserialize)]
pub struct KiteEnvelope<T> {
    /// `success` or `error`.
    pub status: String,
    /// Payload on success.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Error message on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Exception class on failure.
    #[serde(default)]
    pub error_type: Option<String>,
}

impl<T> KiteEnvelope<T> {
    /// Whether the envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// Form body for `POST /session/token`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTokenForm<'a> {
    /// API key.
    pub api_key: &'a str,
    /// One-time request token from the login redirect.
    pub request_token: &'a str,
    /// SHA-256 checksum of key, token and secret.
    pub checksum: &'a str,
}

/// Query for `DELETE /session/token`.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateTokenQuery<'a> {
    /// API key.
    pub api_key: &'a str,
    /// Access token to invalidate.
    pub access_token: &'a str,
}

/// User session returned by the token exchange.
///
/// Kite returns a full user profile; only the fields the gateway uses
/// are required.
#[derive(Clone, Deserialize)]
pub struct KiteUserSession {
    /// Kite user ID.
    pub user_id: String,
    /// Access token for authenticated calls.
    pub access_token: String,
    /// Display name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Login timestamp as reported by Kite.
    #[serde(default)]
    pub login_time: Option<String>,
}

impl std::fmt::Debug for KiteUserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KiteUserSession")
            .field("user_id", &self.user_id)
            .field("access_token", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .field("login_time", &self.login_time)
            .finish()
    }
}

impl From<KiteUserSession> for SessionGrant {
    fn from(session: KiteUserSession) -> Self {
        Self {
            access_token: session.access_token,
            user_id: session.user_id,
        }
    }
}
