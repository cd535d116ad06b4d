#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use folio_core::{ApiUrl, CredentialStore, MemoryStore, StorageKey};
use folio_http::{AuthenticatedClient, ClientConfig};
use wiremock::MockServer;

/// Base path the mock backend serves the API under.
pub const BASE_PATH: &str = "/api/v1";

/// Absolute mock path for an endpoint path.
pub fn api_path(endpoint: &str) -> String {
    format!("{}{}", BASE_PATH, endpoint)
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    let url = ApiUrl::new(&format!("{}{}", server.uri(), BASE_PATH)).unwrap();
    ClientConfig::new(url).with_request_timeout(Some(Duration::from_secs(5)))
}

pub fn client_for(server: &MockServer, store: &MemoryStore) -> AuthenticatedClient {
    AuthenticatedClient::new(config_for(server), Arc::new(store.clone())).unwrap()
}

/// A store holding access token `A1` and refresh token `R1`.
pub fn signed_in_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set(StorageKey::AccessToken, "A1").unwrap();
    store.set(StorageKey::RefreshToken, "R1").unwrap();
    store
}

pub fn stored(store: &MemoryStore, key: StorageKey) -> Option<String> {
    store.get(key).unwrap()
}
