//! folio-http - Authenticated HTTP client for the folio admin API.
//!
//! [`AuthenticatedClient`] attaches the stored bearer token to every request
//! and, when the server answers 401, refreshes the token once for all
//! concurrent callers before retrying them.
//!
//! ```no_run
//! use std::sync::Arc;
//! use folio_core::MemoryStore;
//! use folio_http::{AuthenticatedClient, ClientConfig};
//!
//! # async fn example() -> folio_core::Result<()> {
//! let client = AuthenticatedClient::new(ClientConfig::from_env()?, Arc::new(MemoryStore::new()))?;
//! let posts = client.blogs().list().await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod coordinator;
pub mod endpoints;
pub mod services;
mod transport;

pub use client::{AuthenticatedClient, NO_REFRESH_TOKEN_MESSAGE};
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_REFRESH_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use coordinator::{RefreshOutcome, TokenRefreshCoordinator};
pub use services::{OtpPurpose, ProfileAsset};
pub use transport::ReqwestTransport;
