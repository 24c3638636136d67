//! HTTP client wrapper for the Kite REST API.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::KiteEnvelope;
use super::config::{KITE_API_VERSION, KiteConfig};
use super::error::KiteError;

/// HTTP client for the Kite API.
///
/// Sends the version header on every request and unwraps the response
/// envelope. Holds no session state; access tokens are passed per call.
#[derive(Debug, Clone)]
pub struct KiteHttpClient {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl KiteHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &KiteConfig) -> Result<Self, KiteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kite-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KiteError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API key this client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// POST a form body without authorization.
    pub async fn post_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<T, KiteError> {
        let request = self.client.post(self.url(path)).form(form);
        self.execute(request).await
    }

    /// GET with the given access token.
    ///
    /// A success envelope whose `data` is missing or `null` yields `None`.
    pub async fn get_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<Option<T>, KiteError> {
        let request = self
            .client
            .get(self.url(path))
            .header("Authorization", self.authorization(access_token));
        self.execute_envelope(request).await
    }

    /// DELETE with query parameters and the given access token.
    pub async fn delete_authorized<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        access_token: &str,
    ) -> Result<T, KiteError> {
        let request = self
            .client
            .delete(self.url(path))
            .query(query)
            .header("Authorization", self.authorization(access_token));
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }

    fn authorization(&self, access_token: &str) -> String {
        format!("token {}:{access_token}", self.api_key)
    }

    /// Send the request and require a `data` payload.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, KiteError> {
        self.execute_envelope(request)
            .await?
            .ok_or_else(|| KiteError::InvalidResponse("envelope has no data".to_string()))
    }

    /// Send the request and unwrap the envelope.
    async fn execute_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, KiteError> {
        let response = request
            .header("X-Kite-Version", KITE_API_VERSION)
            .send()
            .await
            .map_err(|e| KiteError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KiteError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let envelope: KiteEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| KiteError::JsonParse(e.to_string()))?;

        if !envelope.is_success() {
            return Err(KiteError::Api {
                status: status.as_u16(),
                error_type: envelope
                    .error_type
                    .unwrap_or_else(|| "GeneralException".to_string()),
                message: envelope.message.unwrap_or_default(),
            });
        }

        Ok(envelope.data)
    }
}

/// Build an API error from a non-2xx response.
fn api_error(status: StatusCode, body: &str) -> KiteError {
    match serde_json::from_str::<KiteEnvelope<serde_json::Value>>(body) {
        Ok(envelope) => KiteError::Api {
            status: status.as_u16(),
            error_type: envelope
                .error_type
                .unwrap_or_else(|| default_error_type(status).to_string()),
            message: envelope.message.unwrap_or_else(|| status.to_string()),
        },
        Err(_) => KiteError::Api {
            status: status.as_u16(),
            error_type: default_error_type(status).to_string(),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            },
        },
    }
}

/// Exception class Kite would report for a bare status code.
const fn default_error_type(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "InputException",
        403 => "TokenException",
        429 => "NetworkException",
        500..=599 => "GeneralException",
        _ => "DataException",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_from_envelope() {
        let body = r#"{"status":"error","message":"Invalid `checksum`.","error_type":"TokenException"}"#;
        match api_error(StatusCode::FORBIDDEN, body) {
            KiteError::Api {
                status,
                error_type,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(error_type, "TokenException");
                assert_eq!(message, "Invalid `checksum`.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_from_plain_body() {
        match api_error(StatusCode::BAD_GATEWAY, "upstream down") {
            KiteError::Api {
                error_type,
                message,
                ..
            } => {
                assert_eq!(error_type, "GeneralException");
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_from_empty_body() {
        match api_error(StatusCode::FORBIDDEN, "") {
            KiteError::Api { message, .. } => assert_eq!(message, "403 Forbidden"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn authorization_header_format() {
        let client = KiteHttpClient::new(&KiteConfig::new("key")).unwrap();
        assert_eq!(client.authorization("tok"), "token key:tok");
    }

    #[test]
    fn url_joins_base_and_path() {
        let config = KiteConfig::new("key").with_api_base_url("http://localhost:1234/");
        let client = KiteHttpClient::new(&config).unwrap();
        assert_eq!(client.url("/mf/holdings"), "http://localhost:1234/mf/holdings");
    }
}
