//! The authenticated client.
//!
//! Every call goes through two steps around [`Transport::send`]:
//!
//! - `decorate` attaches `Authorization: Bearer <token>` from the credential
//!   store, or leaves the request alone when nobody is signed in.
//! - `intercept` passes 2xx through, recovers from a 401 by refreshing the
//!   access token once and resending, and normalizes everything else.
//!
//! Refreshes are shared: any number of requests failing with 401 at the same
//! time cause a single call to the refresh endpoint.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use folio_core::error::TransportError;
use folio_core::request::AUTHORIZATION;
use folio_core::{
    AccessToken, ApiError, ApiRequest, ApiResponse, CredentialStore, Envelope, NormalizedError,
    RefreshToken, SessionState, Transport,
};

use crate::config::ClientConfig;
use crate::coordinator::TokenRefreshCoordinator;
use crate::endpoints::{RefreshRequest, RefreshResponse};
use crate::services::{
    AnalyticsService, AuthService, BlogService, CommentService, LikeService, ProfileService,
};
use crate::transport::ReqwestTransport;

/// Message of the error a refresh cycle fails with when nothing can be refreshed.
pub const NO_REFRESH_TOKEN_MESSAGE: &str = "No refresh token available";

/// HTTP client that attaches bearer tokens and refreshes them on 401.
///
/// Cloning is cheap; clones share the transport, the credential store and
/// the refresh state.
#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: SessionState,
    coordinator: TokenRefreshCoordinator,
    default_token: RwLock<Option<AccessToken>>,
}

impl AuthenticatedClient {
    /// Create a client talking HTTP to `config.api_url`.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport), store))
    }

    /// Create a client over any [`Transport`].
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                session: SessionState::new(store),
                coordinator: TokenRefreshCoordinator::new(),
                default_token: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Session credentials held by this client's store.
    pub fn session(&self) -> &SessionState {
        &self.inner.session
    }

    /// Returns true while a token refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.coordinator.is_refreshing()
    }

    /// Number of refresh cycles this client has started.
    pub fn refresh_cycles(&self) -> u64 {
        self.inner.coordinator.cycles_started()
    }

    /// Token attached when the credential store cannot be read.
    pub fn default_token(&self) -> Option<AccessToken> {
        self.inner
            .default_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_default_token(&self, token: Option<AccessToken>) {
        *self
            .inner
            .default_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Forget the session locally without calling the server.
    pub fn clear_session(&self) -> Result<(), ApiError> {
        self.set_default_token(None);
        self.inner.session.clear()?;
        Ok(())
    }

    /// Send a request and return the raw successful response.
    ///
    /// A 401 on a request that carried a token triggers one shared refresh
    /// and one resend. Non-2xx outcomes come back as [`ApiError`].
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self.decorate(request);
        self.intercept(request).await
    }

    /// Send a request and parse the whole body as `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    /// Send a request and unwrap the `data` field of the response envelope.
    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        self.send_json::<Envelope<T>>(request).await?.into_data()
    }

    /// Send a request whose response carries only a message.
    pub async fn send_message(&self, request: ApiRequest) -> Result<Option<String>, ApiError> {
        self.send_json::<Envelope<serde_json::Value>>(request)
            .await?
            .into_message()
    }

    /// Obtain a new access token, joining a refresh already in flight.
    ///
    /// On failure the stored credentials are gone and the error is
    /// [`ApiError::AuthExpired`].
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<AccessToken, ApiError> {
        self.inner
            .coordinator
            .refresh(|| self.run_refresh_cycle())
            .await
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn blogs(&self) -> BlogService {
        BlogService::new(self.clone())
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.clone())
    }

    pub fn likes(&self) -> LikeService {
        LikeService::new(self.clone())
    }

    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(self.clone())
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.clone())
    }

    fn decorate(&self, mut request: ApiRequest) -> ApiRequest {
        match self.current_token() {
            Some(token) => request.set_header(AUTHORIZATION, token.bearer()),
            None => request.remove_header(AUTHORIZATION),
        }
        request
    }

    fn current_token(&self) -> Option<AccessToken> {
        match self.inner.session.access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Credential store unreadable, using default token");
                self.default_token()
            }
        }
    }

    async fn intercept(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        loop {
            let response = self.dispatch(&request).await?;

            if response.is_success() {
                return Ok(response);
            }

            let error = NormalizedError::from_response(response.status(), response.body());
            if !response.is_unauthorized() {
                debug!(status = response.status(), "Request failed");
                return Err(ApiError::Server(error));
            }
            if request.is_retried() {
                warn!("Request rejected again after token refresh");
                return Err(ApiError::AuthRetryExhausted(error));
            }
            if !request.is_refreshable() {
                debug!("Unauthorized on a credential exchange, not refreshing");
                return Err(ApiError::Server(error));
            }

            let sent = request.authorization().map(str::to_owned);
            request.mark_retried();

            let token = match self.current_token() {
                // The token this request carried was already replaced by a
                // cycle that finished while it was in flight.
                Some(stored) if sent.as_deref() != Some(stored.bearer().as_str()) => {
                    debug!("Retrying with token refreshed meanwhile");
                    stored
                }
                _ => self.refresh().await?,
            };

            request.set_header(AUTHORIZATION, token.bearer());
        }
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!(retried = request.is_retried(), "Sending request");
        self.inner.transport.send(request).await.map_err(|e| {
            debug!(error = %e, "No response");
            ApiError::Transport(e)
        })
    }

    async fn run_refresh_cycle(&self) -> Result<AccessToken, ApiError> {
        info!("Refreshing access token");

        match self.request_new_tokens().await {
            Ok(token) => {
                info!("Access token refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed, clearing session");
                if let Err(e) = self.clear_session() {
                    warn!(error = %e, "Failed to clear stored credentials");
                }
                Err(ApiError::AuthExpired(err.normalized()))
            }
        }
    }

    async fn request_new_tokens(&self) -> Result<AccessToken, ApiError> {
        let refresh_token = self
            .inner
            .session
            .refresh_token()?
            .ok_or_else(|| ApiError::AuthExpired(NormalizedError::new(None, NO_REFRESH_TOKEN_MESSAGE)))?;

        let config = &self.inner.config;
        let request = ApiRequest::post(config.refresh_path.as_str()).json(&RefreshRequest {
            refresh_token: refresh_token.as_str(),
        })?;

        let response = tokio::time::timeout(config.refresh_timeout, self.inner.transport.send(&request))
            .await
            .map_err(|_| TransportError::Timeout {
                duration_ms: u64::try_from(config.refresh_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            })??;

        if !response.is_success() {
            return Err(ApiError::Server(NormalizedError::from_response(
                response.status(),
                response.body(),
            )));
        }

        let tokens = response.json::<RefreshResponse>()?.into_tokens();
        if tokens.access_token.is_empty() {
            return Err(ApiError::decode("refresh response has an empty access token"));
        }

        let access_token = AccessToken::new(tokens.access_token);
        let rotated = tokens
            .refresh_token
            .filter(|t| !t.is_empty())
            .map(RefreshToken::new);

        self.inner
            .session
            .store_refreshed(&access_token, rotated.as_ref())?;
        self.set_default_token(Some(access_token.clone()));

        Ok(access_token)
    }
}

impl fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("api_url", &self.inner.config.api_url)
            .field("refreshing", &self.is_refreshing())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
