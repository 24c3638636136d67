//! Kite broker adapter implementing `BrokeragePort`.

use std::time::Instant;

use async_trait::async_trait;

use crate::application::ports::{BrokerageError, BrokeragePort, SessionGrant};
use crate::domain::Holdings;
use crate::infrastructure::metrics::{UpstreamOperation, record_upstream_call};

use super::api_types::{InvalidateTokenQuery, KiteUserSession, SessionTokenForm};
use super::auth::session_checksum;
use super::config::KiteConfig;
use super::error::KiteError;
use super::http_client::KiteHttpClient;

const SESSION_TOKEN_PATH: &str = "/session/token";
const MF_HOLDINGS_PATH: &str = "/mf/holdings";

/// Kite Connect broker adapter.
#[derive(Debug, Clone)]
pub struct KiteBrokerAdapter {
    client: KiteHttpClient,
    login_url: String,
}

impl KiteBrokerAdapter {
    /// Create a new Kite broker adapter.
    pub fn new(config: &KiteConfig) -> Result<Self, KiteError> {
        Ok(Self {
            client: KiteHttpClient::new(config)?,
            login_url: config.login_url(),
        })
    }
}

#[async_trait]
impl BrokeragePort for KiteBrokerAdapter {
    fn login_url(&self) -> String {
        self.login_url.clone()
    }

    async fn generate_session(
        &self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<SessionGrant, BrokerageError> {
        let api_key = self.client.api_key();
        let checksum = session_checksum(api_key, request_token, api_secret);
        let form = SessionTokenForm {
            api_key,
            request_token,
            checksum: &checksum,
        };

        let started = Instant::now();
        let result = self
            .client
            .post_form::<KiteUserSession, _>(SESSION_TOKEN_PATH, &form)
            .await;
        record_upstream_call(
            UpstreamOperation::GenerateSession,
            result.is_ok(),
            started.elapsed(),
        );

        let session = result?;
        tracing::debug!(
            user_id = %session.user_id,
            user_name = session.user_name.as_deref(),
            login_time = session.login_time.as_deref(),
            "Kite session generated"
        );
        Ok(session.into())
    }

    async fn mf_holdings(&self, access_token: &str) -> Result<Holdings, BrokerageError> {
        let started = Instant::now();
        let result = self
            .client
            .get_authorized::<serde_json::Value>(MF_HOLDINGS_PATH, access_token)
            .await;
        record_upstream_call(
            UpstreamOperation::MfHoldings,
            result.is_ok(),
            started.elapsed(),
        );

        Ok(Holdings::new(result?.unwrap_or(serde_json::Value::Null)))
    }

    async fn invalidate_session(&self, access_token: &str) -> Result<(), BrokerageError> {
        let query = InvalidateTokenQuery {
            api_key: self.client.api_key(),
            access_token,
        };

        let started = Instant::now();
        let result = self
            .client
            .delete_authorized::<serde_json::Value, _>(SESSION_TOKEN_PATH, &query, access_token)
            .await;
        record_upstream_call(
            UpstreamOperation::InvalidateSession,
            result.is_ok(),
            started.elapsed(),
        );

        result?;
        Ok(())
    }
}
