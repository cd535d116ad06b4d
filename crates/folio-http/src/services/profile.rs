//! Profile sections.
//!
//! Each list section is replaced wholesale: callers send the complete new
//! list, not a delta. A successful update is merged into the cached user
//! record.

use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use folio_core::error::InvalidInputError;
use folio_core::profile::{self, ReadingResource, SocialLinks};
use folio_core::upload::{FileUpload, UploadKind};
use folio_core::{ApiError, ApiRequest};

use crate::client::AuthenticatedClient;
use crate::endpoints;

/// A file-backed profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAsset {
    Banner,
    Image,
    Resume,
}

impl ProfileAsset {
    /// Form field name, also the key in the user record.
    pub fn field(&self) -> &'static str {
        match self {
            ProfileAsset::Banner => "banner_image",
            ProfileAsset::Image => "profile_image",
            ProfileAsset::Resume => "resume",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            ProfileAsset::Banner => endpoints::PROFILE_BANNER,
            ProfileAsset::Image => endpoints::PROFILE_IMAGE,
            ProfileAsset::Resume => endpoints::PROFILE_RESUME,
        }
    }

    pub fn kind(&self) -> UploadKind {
        match self {
            ProfileAsset::Resume => UploadKind::Document,
            ProfileAsset::Banner | ProfileAsset::Image => UploadKind::Image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileService {
    client: AuthenticatedClient,
}

impl ProfileService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn update_quote(&self, quote: &str) -> Result<Option<String>, ApiError> {
        let quote = profile::validate_quote(quote)?;
        self.patch(endpoints::PROFILE_QUOTE, "quote", json!(quote))
            .await
    }

    #[instrument(skip_all, fields(count = hobbies.len()))]
    pub async fn set_hobbies(&self, hobbies: &[String]) -> Result<Option<String>, ApiError> {
        let mut cleaned = Vec::with_capacity(hobbies.len());
        for hobby in hobbies {
            let hobby = hobby.trim();
            if hobby.is_empty() {
                return Err(InvalidInputError::Field {
                    field: "hobbies",
                    reason: "entries cannot be blank".to_string(),
                }
                .into());
            }
            cleaned.push(hobby);
        }
        self.patch(endpoints::PROFILE_HOBBIES, "hobbies", json!(cleaned))
            .await
    }

    /// Replace the social links. URLs get an `https://` scheme when missing.
    #[instrument(skip_all, fields(count = links.len()))]
    pub async fn set_social_media(&self, links: &SocialLinks) -> Result<Option<String>, ApiError> {
        let normalized = links
            .iter()
            .map(|(platform, url)| {
                profile::normalize_link(url).map(|url| (platform.clone(), url))
            })
            .collect::<Result<SocialLinks, ApiError>>()?;
        self.patch(endpoints::PROFILE_SOCIAL_MEDIA, "socialMedia", json!(normalized))
            .await
    }

    #[instrument(skip_all, fields(count = resources.len()))]
    pub async fn set_reading_resources(
        &self,
        resources: &[ReadingResource],
    ) -> Result<Option<String>, ApiError> {
        let normalized = resources
            .iter()
            .map(|r| ReadingResource::new(&r.title, &r.url))
            .collect::<Result<Vec<_>, _>>()?;
        self.patch(
            endpoints::PROFILE_READING_RESOURCES,
            "readingResources",
            json!(normalized),
        )
        .await
    }

    /// Replace the banner, profile image or resume. Returns the stored URL.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload(
        &self,
        asset: ProfileAsset,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let upload = FileUpload::new(asset.field(), file_name, content_type, bytes, asset.kind())?;
        let request = ApiRequest::patch(asset.path()).multipart(upload);
        let body: Value = self.client.send_json(request).await?;
        let url = uploaded_asset_url(&body, asset.field())?;
        self.merge_cached_user(asset.field(), json!(url));
        Ok(url)
    }

    async fn patch(&self, path: &str, field: &str, value: Value) -> Result<Option<String>, ApiError> {
        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), value.clone());
        let request = ApiRequest::patch(path).json(&body)?;
        let message = self.client.send_message(request).await?;
        self.merge_cached_user(cached_field(field), value);
        Ok(message)
    }

    /// Fold an accepted update into the stored user record, if one is cached.
    fn merge_cached_user(&self, field: &str, value: Value) {
        let session = self.client.session();
        let result = session.user().and_then(|user| match user {
            Some(Value::Object(mut user)) => {
                user.insert(field.to_string(), value);
                session.set_user(&Value::Object(user))
            }
            _ => Ok(()),
        });
        match result {
            Ok(()) => debug!(field, "Cached user record updated"),
            Err(e) => warn!(error = %e, "Failed to update cached user record"),
        }
    }
}

/// Key of a profile section in the cached user record.
fn cached_field(request_field: &str) -> &str {
    match request_field {
        "socialMedia" => "social_media",
        "readingResources" => "reading_resources",
        other => other,
    }
}

/// `user[field]` is either the URL or an object carrying it under `url`.
fn uploaded_asset_url(body: &Value, field: &str) -> Result<String, ApiError> {
    let stored = body
        .get("user")
        .and_then(|user| user.get(field))
        .ok_or_else(|| ApiError::decode("upload response has no user record"))?;
    stored
        .get("url")
        .unwrap_or(stored)
        .as_str()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::decode(format!("upload response has no {} URL", field)))
}
