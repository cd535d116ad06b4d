//! Reader comments.

use serde_json::json;
use tracing::instrument;

use folio_core::blog::Comment;
use folio_core::error::InvalidInputError;
use folio_core::{ApiError, ApiRequest};

use crate::client::AuthenticatedClient;
use crate::endpoints;

#[derive(Debug, Clone)]
pub struct CommentService {
    client: AuthenticatedClient,
}

impl CommentService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, content))]
    pub async fn create(&self, blog_id: &str, content: &str) -> Result<Comment, ApiError> {
        let content = non_empty_content(content)?;
        let request = ApiRequest::post(endpoints::COMMENTS)
            .json(&json!({ "blog": blog_id, "content": content }))?;
        self.client.send_envelope(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_for_blog(&self, blog_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.client
            .send_envelope(ApiRequest::get(endpoints::blog_comments(blog_id)))
            .await
    }

    #[instrument(skip(self, content))]
    pub async fn update(&self, id: &str, content: &str) -> Result<Comment, ApiError> {
        let content = non_empty_content(content)?;
        let request = ApiRequest::put(endpoints::comment(id)).json(&json!({ "content": content }))?;
        self.client.send_envelope(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.client
            .send_message(ApiRequest::delete(endpoints::comment(id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn like(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.client
            .send_message(ApiRequest::post(endpoints::comment_like(id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn report(&self, id: &str, reason: &str) -> Result<Option<String>, ApiError> {
        let request =
            ApiRequest::post(endpoints::comment_report(id)).json(&json!({ "reason": reason }))?;
        self.client.send_message(request).await
    }

    #[instrument(skip(self))]
    pub async fn replies(&self, id: &str) -> Result<Vec<Comment>, ApiError> {
        self.client
            .send_envelope(ApiRequest::get(endpoints::comment_replies(id)))
            .await
    }
}

fn non_empty_content(content: &str) -> Result<&str, ApiError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(InvalidInputError::Field {
            field: "content",
            reason: "is required".to_string(),
        }
        .into());
    }
    Ok(content)
}
