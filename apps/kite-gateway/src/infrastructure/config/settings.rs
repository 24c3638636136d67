//! Gateway Configuration Settings
//!
//! Configuration types for the gateway, loaded from environment variables.

use std::time::Duration;

use crate::infrastructure::kite::KiteConfig;

const API_KEY_VAR: &str = "KITE_CONNECT_API_KEY";
const API_SECRET_VAR: &str = "KITE_CONNECT_API_SECRET";
const PORT_VAR: &str = "BACKEND_PORT";
const API_BASE_URL_VAR: &str = "KITE_API_BASE_URL";
const LOGIN_BASE_URL_VAR: &str = "KITE_LOGIN_BASE_URL";
const TIMEOUT_VAR: &str = "KITE_HTTP_TIMEOUT_SECS";

/// Kite Connect API credentials.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Listen port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 7140 }
    }
}

/// Kite endpoint settings.
#[derive(Debug, Clone)]
pub struct KiteSettings {
    /// REST API base URL.
    pub api_base_url: Option<String>,
    /// Login host base URL.
    pub login_base_url: Option<String>,
    /// Upstream request timeout.
    pub timeout: Duration,
}

impl Default for KiteSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            login_base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// Listener settings.
    pub server: ServerSettings,
    /// Kite endpoint settings.
    pub kite: KiteSettings,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or empty, or if an
    /// optional value is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let api_secret = required(&lookup, API_SECRET_VAR)?;

        let port = match lookup(PORT_VAR) {
            Some(raw) => parse_port(&raw)?,
            None => ServerSettings::default().port,
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                })?,
            None => KiteSettings::default().timeout,
        };

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            server: ServerSettings { port },
            kite: KiteSettings {
                api_base_url: non_empty(lookup(API_BASE_URL_VAR)),
                login_base_url: non_empty(lookup(LOGIN_BASE_URL_VAR)),
                timeout,
            },
        })
    }

    /// Build the Kite adapter configuration.
    #[must_use]
    pub fn kite_config(&self) -> KiteConfig {
        let mut config =
            KiteConfig::new(self.credentials.api_key()).with_timeout(self.kite.timeout);
        if let Some(url) = &self.kite.api_base_url {
            config = config.with_api_base_url(url.clone());
        }
        if let Some(url) = &self.kite.login_base_url {
            config = config.with_login_base_url(url.clone());
        }
        config
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: PORT_VAR.to_string(),
            value: raw.to_string(),
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDS: [(&str, &str); 2] = [
        ("KITE_CONNECT_API_KEY", "key"),
        ("KITE_CONNECT_API_SECRET", "secret"),
    ];

    #[test]
    fn minimal_config_uses_defaults() {
        let config = GatewayConfig::from_lookup(lookup_from(&CREDS)).unwrap();
        assert_eq!(config.credentials.api_key(), "key");
        assert_eq!(config.credentials.api_secret(), "secret");
        assert_eq!(config.server.port, 7140);
        assert_eq!(config.kite.timeout, Duration::from_secs(30));
        assert!(config.kite.api_base_url.is_none());
    }

    #[test]
    fn missing_api_key_is_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[CREDS[1]])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("KITE_CONNECT_API_KEY".to_string())
        );
    }

    #[test]
    fn missing_api_secret_is_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[CREDS[0]])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("KITE_CONNECT_API_SECRET".to_string())
        );
    }

    #[test]
    fn empty_secret_is_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            ("KITE_CONNECT_API_KEY", "key"),
            ("KITE_CONNECT_API_SECRET", "  "),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyValue("KITE_CONNECT_API_SECRET".to_string())
        );
    }

    #[test]
    fn custom_port() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            CREDS[0],
            CREDS[1],
            ("BACKEND_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn invalid_port_is_error() {
        for raw in ["abc", "0", "70000"] {
            let err = GatewayConfig::from_lookup(lookup_from(&[
                CREDS[0],
                CREDS[1],
                ("BACKEND_PORT", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{raw}");
        }
    }

    #[test]
    fn invalid_timeout_is_error() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            CREDS[0],
            CREDS[1],
            ("KITE_HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn kite_config_applies_overrides() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            CREDS[0],
            CREDS[1],
            ("KITE_API_BASE_URL", "http://127.0.0.1:9999"),
            ("KITE_LOGIN_BASE_URL", "http://127.0.0.1:9998"),
            ("KITE_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        let kite = config.kite_config();
        assert_eq!(kite.api_key, "key");
        assert_eq!(kite.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(kite.timeout, Duration::from_secs(5));
        assert!(kite.login_url().starts_with("http://127.0.0.1:9998/connect/login"));
    }

    #[test]
    fn credentials_redacted_debug() {
        let creds = Credentials::new("key123".to_string(), "secret456".to_string());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("key123"));
        assert!(!debug.contains("secret456"));
        assert!(debug.contains("[REDACTED]"));
    }
}
