//! The backend's `{ success, message, data }` response wrapper.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, NormalizedError};

/// Standard response body of the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Returns the payload.
    ///
    /// A 2xx body flagged `success: false` is reported as a server error with
    /// the body's message.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.check()?;
        self.data.ok_or_else(|| ApiError::decode("response envelope has no data"))
    }

    /// Returns the server message for calls without a payload.
    pub fn into_message(self) -> Result<Option<String>, ApiError> {
        self.check()?;
        Ok(self.message)
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Server(NormalizedError::new(
                None,
                self.message.clone().unwrap_or_default(),
            )))
        }
    }
}
