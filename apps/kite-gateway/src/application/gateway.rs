//! Session Gateway
//!
//! Owns the session slot and runs the login handshake against the
//! brokerage port.

use std::sync::Arc;

use crate::domain::{Holdings, Session, SessionStore};
use crate::infrastructure::metrics::set_session_active;

use super::error::GatewayError;
use super::ports::{BrokeragePort, SessionGrant};

/// Note returned alongside the login URL.
pub const LOGIN_URL_NOTE: &str =
    "Visit this URL to authorize and get request token. Token is valid for ~2 minutes";

/// Message returned after a successful token exchange.
pub const SESSION_CREATED_MESSAGE: &str =
    "Session created successfully. Access token valid for this session";

/// Session use cases over a single in-memory session.
pub struct SessionGateway<B>
where
    B: BrokeragePort,
{
    broker: Arc<B>,
    api_secret: String,
    store: SessionStore,
}

impl<B> SessionGateway<B>
where
    B: BrokeragePort,
{
    /// Create a gateway with no active session.
    ///
    /// The session gauge follows every write to the slot.
    pub fn new(broker: Arc<B>, api_secret: impl Into<String>) -> Self {
        Self {
            broker,
            api_secret: api_secret.into(),
            store: SessionStore::with_observer(set_session_active),
        }
    }

    /// URL the user visits to start the login handshake.
    pub fn issue_login_url(&self) -> String {
        self.broker.login_url()
    }

    /// Exchange a request token and store the resulting session.
    ///
    /// The token is forwarded exactly as received. The slot is only
    /// written after the brokerage accepts the exchange; a failed exchange
    /// leaves any previous session in place.
    pub async fn create_session(&self, request_token: &str) -> Result<SessionGrant, GatewayError> {
        if request_token.is_empty() {
            return Err(GatewayError::missing_request_token());
        }

        let grant = self
            .broker
            .generate_session(request_token, &self.api_secret)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Token exchange rejected");
                GatewayError::UpstreamAuthFailure(e.to_string())
            })?;

        let replaced = self
            .store
            .set(Session::new(grant.access_token.clone(), grant.user_id.clone()));

        match replaced {
            Some(previous) => tracing::info!(
                user_id = %grant.user_id,
                replaced_user_id = %previous.user_id(),
                replaced_established_at = %previous.established_at(),
                "Session replaced"
            ),
            None => tracing::info!(user_id = %grant.user_id, "Session established"),
        }

        Ok(grant)
    }

    /// Fetch holdings with the stored access token.
    pub async fn get_holdings(&self) -> Result<Holdings, GatewayError> {
        let session = self.store.get().ok_or(GatewayError::NoActiveSession)?;

        let holdings = self
            .broker
            .mf_holdings(session.access_token())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %session.user_id(), error = %e, "Holdings fetch failed");
                GatewayError::UpstreamRequestFailure(e.to_string())
            })?;

        tracing::debug!(
            user_id = %session.user_id(),
            records = holdings.record_count(),
            "Holdings fetched"
        );

        Ok(holdings)
    }

    /// Clear the session and invalidate its token at the brokerage.
    ///
    /// Returns `false` when no session was active. Upstream invalidation
    /// failures are logged; the local slot is cleared regardless.
    pub async fn end_session(&self) -> bool {
        let Some(session) = self.store.clear() else {
            return false;
        };

        if let Err(e) = self.broker.invalidate_session(session.access_token()).await {
            tracing::warn!(
                user_id = %session.user_id(),
                error = %e,
                "Upstream token invalidation failed"
            );
        }

        tracing::info!(
            user_id = %session.user_id(),
            established_at = %session.established_at(),
            "Session ended"
        );
        true
    }

    /// Snapshot of the current session.
    pub fn current_session(&self) -> Option<Arc<Session>> {
        self.store.get()
    }
}
