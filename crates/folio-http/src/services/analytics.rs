//! Dashboard and per-post analytics.

use tracing::instrument;

use folio_core::blog::{BlogAnalytics, DashboardStats};
use folio_core::{ApiError, ApiRequest};

use crate::client::AuthenticatedClient;
use crate::endpoints;

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    client: AuthenticatedClient,
}

impl AnalyticsService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.client
            .send_envelope(ApiRequest::get(endpoints::BLOG_STATS))
            .await
    }

    #[instrument(skip(self))]
    pub async fn for_blog(&self, blog_id: &str) -> Result<BlogAnalytics, ApiError> {
        self.client
            .send_envelope(ApiRequest::get(endpoints::blog_analytics(blog_id)))
            .await
    }
}
