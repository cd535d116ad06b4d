//! Error types for folio operations.
//!
//! Every failure a caller can observe is an [`ApiError`]. Each variant can be
//! reduced to a [`NormalizedError`], the uniform `{ statusCode?, message,
//! fieldErrors? }` shape that UI callers display. Raw transport exceptions
//! never cross this boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when neither the server nor the transport supplied one.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// The unified error type for folio operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A 401 triggered a token refresh and the refresh itself failed.
    ///
    /// Terminal for the session: stored credentials have been wiped.
    #[error("session expired: {0}")]
    AuthExpired(NormalizedError),

    /// A request that was already retried with a fresh token got 401 again.
    #[error("still unauthorized after token refresh: {0}")]
    AuthRetryExhausted(NormalizedError),

    /// Any other non-2xx response.
    #[error("server error: {0}")]
    Server(NormalizedError),

    /// Local validation failed before anything was sent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The credential store could not be read or written.
    #[error("credential store error: {0}")]
    Storage(#[from] StoreError),

    /// A successful response body did not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Reduce this error to the uniform shape shown to callers.
    pub fn normalized(&self) -> NormalizedError {
        match self {
            ApiError::Transport(err) => NormalizedError::from_transport(err),
            ApiError::AuthExpired(err)
            | ApiError::AuthRetryExhausted(err)
            | ApiError::Server(err) => err.clone(),
            ApiError::InvalidInput(err) => NormalizedError::new(None, err.to_string()),
            ApiError::Storage(err) => NormalizedError::new(None, err.to_string()),
            ApiError::Decode { message } => NormalizedError::new(None, message.clone()),
        }
    }

    /// HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::AuthExpired(err)
            | ApiError::AuthRetryExhausted(err)
            | ApiError::Server(err) => err.status_code,
            _ => None,
        }
    }

    /// The caller-facing message.
    pub fn message(&self) -> String {
        self.normalized().message
    }

    /// Returns true if the session is gone and the user must log in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired(_))
    }

    /// Wrap a body parsing failure.
    pub fn decode(err: impl fmt::Display) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

/// Errors for requests that produced no HTTP response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Any other HTTP client failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// The uniform error shape handed to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    /// HTTP status code, absent for transport failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Human-readable message.
    pub message: String,
    /// Per-field validation errors reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<serde_json::Value>,
}

impl NormalizedError {
    /// Create a normalized error without field errors.
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status_code,
            message: if message.trim().is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            field_errors: None,
        }
    }

    /// Build from a non-2xx response.
    ///
    /// The message is taken from the body's `message` (or `error`) string when
    /// present, otherwise from the status line, as the HTTP layer reports it.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();

        let server_message = parsed.as_ref().and_then(|value| {
            ["message", "error"]
                .iter()
                .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
                .map(str::trim)
                .find(|m| !m.is_empty())
                .map(str::to_string)
        });

        let field_errors = parsed.as_ref().and_then(|value| {
            ["fieldErrors", "errors"]
                .iter()
                .filter_map(|key| value.get(*key))
                .find(|v| v.is_object() || v.is_array())
                .cloned()
        });

        let message = server_message
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self {
            status_code: Some(status),
            message,
            field_errors,
        }
    }

    /// Build from a transport failure.
    pub fn from_transport(err: &TransportError) -> Self {
        Self::new(None, err.to_string())
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status_code {
            write!(f, "HTTP {}: ", status)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Credential store failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored data could not be parsed or serialized.
    #[error("corrupt credential data: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A token contained characters not allowed in an HTTP header.
    #[error("token is not a valid header value")]
    Token,

    /// A request field failed validation.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
