//! Client configuration.

use std::time::Duration;

use folio_core::{ApiError, ApiUrl};

use crate::endpoints::REFRESH_TOKEN;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// How long a token refresh may take before the cycle is failed.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-request timeout applied by the HTTP transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`AuthenticatedClient`](crate::AuthenticatedClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are joined onto it.
    pub api_url: ApiUrl,
    /// Path of the token refresh endpoint.
    pub refresh_path: String,
    /// Upper bound on one refresh call.
    pub refresh_timeout: Duration,
    /// Upper bound on any other call, `None` for no limit.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            refresh_path: REFRESH_TOKEN.to_string(),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read the base URL from `FOLIO_API_URL`, falling back to the local
    /// development backend when unset.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = match std::env::var(API_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => ApiUrl::new(value.trim())?,
            _ => ApiUrl::default(),
        };
        Ok(Self::new(api_url))
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiUrl::default())
    }
}
