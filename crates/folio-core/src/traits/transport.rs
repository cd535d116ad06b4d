//! Transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{ApiRequest, ApiResponse};

/// The base "send" primitive the authenticated client is built around.
///
/// Implementations must return `Ok` for every HTTP status, including 4xx and
/// 5xx. `Err` means no response was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request as-is.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}
