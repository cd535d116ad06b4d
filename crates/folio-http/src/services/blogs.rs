//! Blog post administration.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use folio_core::blog::{Blog, BlogDraft, BlogStatus, PublishedQuery};
use folio_core::upload::{FileUpload, UploadKind};
use folio_core::{ApiError, ApiRequest, Envelope, NormalizedError};

use crate::client::AuthenticatedClient;
use crate::endpoints;

/// Post listings arrive enveloped, as a bare array, or keyed by `blogs`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlogList {
    Bare(Vec<Blog>),
    Keyed { blogs: Vec<Blog> },
    Enveloped { data: Box<BlogList> },
}

impl BlogList {
    fn into_blogs(self) -> Vec<Blog> {
        match self {
            BlogList::Bare(blogs) | BlogList::Keyed { blogs } => blogs,
            BlogList::Enveloped { data } => data.into_blogs(),
        }
    }
}

/// A single post, either as `data` itself or as `data.blog`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlogPayload {
    Wrapped { blog: Blog },
    Plain(Blog),
}

impl From<BlogPayload> for Blog {
    fn from(payload: BlogPayload) -> Self {
        match payload {
            BlogPayload::Wrapped { blog } | BlogPayload::Plain(blog) => blog,
        }
    }
}

/// Create, read, update and delete posts.
#[derive(Debug, Clone)]
pub struct BlogService {
    client: AuthenticatedClient,
}

impl BlogService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn create(&self, draft: &BlogDraft) -> Result<Blog, ApiError> {
        draft.validate_for_create()?;
        let request = ApiRequest::post(endpoints::BLOGS).json(draft)?;
        self.fetch_one(request).await
    }

    /// Save an incomplete post as a draft. No fields are required.
    #[instrument(skip_all)]
    pub async fn create_draft(&self, draft: &BlogDraft) -> Result<Blog, ApiError> {
        let request = ApiRequest::post(endpoints::BLOG_DRAFT).json(draft)?;
        self.fetch_one(request).await
    }

    #[instrument(skip(self, draft))]
    pub async fn auto_save(&self, id: &str, draft: &BlogDraft) -> Result<Option<String>, ApiError> {
        let request = ApiRequest::post(endpoints::blog_auto_save(id)).json(draft)?;
        self.client.send_message(request).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Blog>, ApiError> {
        self.fetch_list(ApiRequest::get(endpoints::BLOGS)).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: BlogStatus) -> Result<Vec<Blog>, ApiError> {
        self.fetch_list(ApiRequest::get(endpoints::blogs_by_status(status.as_str())))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_published(&self, query: &PublishedQuery) -> Result<Vec<Blog>, ApiError> {
        let request = ApiRequest::get(endpoints::BLOGS_PUBLISHED)
            .query_opt("page", query.page)
            .query_opt("limit", query.limit)
            .query_opt("topic", query.topic.as_deref())
            .query_opt("search", query.search.as_deref());
        self.fetch_list(request).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Blog, ApiError> {
        self.fetch_one(ApiRequest::get(endpoints::blog(id))).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Blog, ApiError> {
        self.fetch_one(ApiRequest::get(endpoints::blog_by_slug(slug)))
            .await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: &str, changes: &BlogDraft) -> Result<Blog, ApiError> {
        let request = ApiRequest::put(endpoints::blog(id)).json(changes)?;
        self.fetch_one(request).await
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: &str, status: BlogStatus) -> Result<Blog, ApiError> {
        let request =
            ApiRequest::patch(endpoints::blog_status(id)).json(&json!({ "status": status }))?;
        self.fetch_one(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<String>, ApiError> {
        self.client
            .send_message(ApiRequest::delete(endpoints::blog(id)))
            .await
    }

    /// Upload an image for a cover or inline use. Returns its public URL.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let upload = FileUpload::new("image", file_name, content_type, bytes, UploadKind::Image)?;
        let request = ApiRequest::post(endpoints::BLOG_UPLOAD_IMAGE).multipart(upload);
        let body: serde_json::Value = self.client.send_json(request).await?;
        uploaded_image_url(&body)
    }

    async fn fetch_one(&self, request: ApiRequest) -> Result<Blog, ApiError> {
        let payload: BlogPayload = self.client.send_envelope(request).await?;
        Ok(payload.into())
    }

    async fn fetch_list(&self, request: ApiRequest) -> Result<Vec<Blog>, ApiError> {
        let body: serde_json::Value = self.client.send_json(request).await?;
        parse_blog_list(body)
    }
}

fn parse_blog_list(body: serde_json::Value) -> Result<Vec<Blog>, ApiError> {
    if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_value(body).map_err(ApiError::decode)?;
        return Err(ApiError::Server(NormalizedError::new(
            None,
            envelope.message.unwrap_or_default(),
        )));
    }

    let blogs = serde_json::from_value::<BlogList>(body)
        .map_err(ApiError::decode)?
        .into_blogs();
    debug!(count = blogs.len(), "Fetched posts");
    Ok(blogs)
}

/// The upload response names the URL `imageUrl` or `url`, at the top level
/// or inside `data`.
fn uploaded_image_url(body: &serde_json::Value) -> Result<String, ApiError> {
    if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = body.get("message").and_then(serde_json::Value::as_str);
        return Err(ApiError::Server(NormalizedError::new(
            None,
            message.unwrap_or_default(),
        )));
    }

    [body.get("data"), Some(body)]
        .into_iter()
        .flatten()
        .flat_map(|scope| [scope.get("imageUrl"), scope.get("url")])
        .flatten()
        .find_map(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::decode("upload response has no image URL"))
}
