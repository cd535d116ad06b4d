//! Likes on posts and comments.

use serde_json::json;
use tracing::instrument;

use folio_core::blog::LikeTarget;
use folio_core::{ApiError, ApiRequest};

use crate::client::AuthenticatedClient;
use crate::endpoints;

#[derive(Debug, Clone)]
pub struct LikeService {
    client: AuthenticatedClient,
}

impl LikeService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Like or unlike a post or comment. Returns the server's payload.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        target: LikeTarget,
        target_id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let request = ApiRequest::post(endpoints::LIKES_TOGGLE).json(&json!({
            "target": target_id,
            "targetType": target,
        }))?;
        self.client.send_json(request).await
    }

    #[instrument(skip(self))]
    pub async fn for_target(
        &self,
        target: LikeTarget,
        target_id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.client
            .send_json(ApiRequest::get(endpoints::likes(target.as_str(), target_id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.client
            .send_json(ApiRequest::get(endpoints::user_likes(user_id)))
            .await
    }
}
