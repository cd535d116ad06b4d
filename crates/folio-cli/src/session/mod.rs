//! Client construction from global CLI options.

mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::debug;

use folio_core::ApiUrl;
use folio_http::{AuthenticatedClient, ClientConfig};

/// Global options every command needs to reach the backend.
#[derive(Debug, Clone)]
pub struct Context {
    api_url: Option<String>,
    store: Option<PathBuf>,
}

impl Context {
    pub fn new(api_url: Option<String>, store: Option<PathBuf>) -> Self {
        Self { api_url, store }
    }

    /// Build a client over the persistent credential store.
    pub fn client(&self) -> Result<AuthenticatedClient> {
        let api_url = match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => ApiUrl::new(url).context("Invalid API URL")?,
            _ => ApiUrl::default(),
        };

        let store = storage::open(self.store.as_deref())?;
        debug!(api_url = %api_url, store = %store.path().display(), "Building client");

        AuthenticatedClient::new(ClientConfig::new(api_url), Arc::new(store))
            .context("Failed to create HTTP client")
    }

    /// Build a client and fail unless a session is stored. A refresh token
    /// alone is enough; the client trades it for an access token on first use.
    pub fn signed_in_client(&self) -> Result<AuthenticatedClient> {
        let client = self.client()?;
        let session = client.session();
        let resumable = session
            .is_authenticated()
            .and_then(|signed_in| Ok(signed_in || session.refresh_token()?.is_some()))
            .context("Failed to read credentials")?;
        anyhow::ensure!(
            resumable,
            "No active session. Run 'folio auth login' first."
        );
        Ok(client)
    }
}
