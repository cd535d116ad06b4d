//! Session credential lifecycle on top of a [`CredentialStore`].
//!
//! Credentials are created on a successful OTP login, replaced in place on
//! refresh, and deleted on logout or when a refresh fails.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::StorageKey;
use crate::tokens::{AccessToken, RefreshToken};
use crate::traits::CredentialStore;

/// Typed access to the session keys of a credential store.
#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn CredentialStore>,
}

impl SessionState {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Persist a freshly issued session, replacing every key of the previous
    /// one. A refresh token or user record the server did not send is removed.
    pub fn store_login(
        &self,
        access_token: &AccessToken,
        refresh_token: Option<&RefreshToken>,
        user: Option<&serde_json::Value>,
    ) -> Result<(), StoreError> {
        self.store
            .set(StorageKey::AccessToken, access_token.as_str())?;
        match refresh_token {
            Some(refresh_token) => self
                .store
                .set(StorageKey::RefreshToken, refresh_token.as_str())?,
            None => self.store.remove(StorageKey::RefreshToken)?,
        }
        match user {
            Some(user) => self.set_user(user)?,
            None => self.store.remove(StorageKey::UserData)?,
        }
        debug!("Session credentials stored");
        Ok(())
    }

    /// Replace tokens after a refresh. The refresh token is only replaced when
    /// the server rotated it.
    pub fn store_refreshed(
        &self,
        access_token: &AccessToken,
        refresh_token: Option<&RefreshToken>,
    ) -> Result<(), StoreError> {
        self.store
            .set(StorageKey::AccessToken, access_token.as_str())?;
        if let Some(refresh_token) = refresh_token {
            self.store
                .set(StorageKey::RefreshToken, refresh_token.as_str())?;
        }
        Ok(())
    }

    pub fn access_token(&self) -> Result<Option<AccessToken>, StoreError> {
        Ok(self
            .store
            .get(StorageKey::AccessToken)?
            .filter(|t| !t.is_empty())
            .map(AccessToken::new))
    }

    pub fn refresh_token(&self) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self
            .store
            .get(StorageKey::RefreshToken)?
            .filter(|t| !t.is_empty())
            .map(RefreshToken::new))
    }

    /// Returns true when an access token is stored.
    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.access_token()?.is_some())
    }

    /// Returns the cached user record.
    ///
    /// A record that is not valid JSON is removed and reported as absent.
    pub fn user(&self) -> Result<Option<serde_json::Value>, StoreError> {
        let Some(raw) = self.store.get(StorageKey::UserData)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Discarding unparseable user record");
                self.store.remove(StorageKey::UserData)?;
                Ok(None)
            }
        }
    }

    /// Cache the user record.
    pub fn set_user(&self, user: &serde_json::Value) -> Result<(), StoreError> {
        let json = serde_json::to_string(user).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;
        self.store.set(StorageKey::UserData, &json)
    }

    /// Delete every session key.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        debug!("Session credentials cleared");
        Ok(())
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
