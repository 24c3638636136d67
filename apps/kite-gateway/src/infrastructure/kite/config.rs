//! Kite adapter configuration.

use std::time::Duration;

/// Default Kite Connect REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.kite.trade";

/// Default Kite login host.
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://kite.zerodha.com";

/// Kite Connect API version sent with every request.
pub const KITE_API_VERSION: &str = "3";

/// Configuration for the Kite broker adapter.
#[derive(Debug, Clone)]
pub struct KiteConfig {
    /// API key issued for the Kite Connect app.
    pub api_key: String,
    /// REST API base URL.
    pub api_base_url: String,
    /// Login host base URL.
    pub login_base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl KiteConfig {
    /// Create a configuration pointing at the production Kite endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_base_url: DEFAULT_LOGIN_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the REST API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the login host base URL.
    #[must_use]
    pub fn with_login_base_url(mut self, url: impl Into<String>) -> Self {
        self.login_base_url = url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Login URL for this API key.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!(
            "{}/connect/login?api_key={}&v={}",
            self.login_base_url.trim_end_matches('/'),
            self.api_key,
            KITE_API_VERSION
        )
    }
}
