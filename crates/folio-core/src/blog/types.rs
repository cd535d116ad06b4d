//! Blog post types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, InvalidInputError};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Scheduled => "scheduled",
            BlogStatus::Published => "published",
            BlogStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(BlogStatus::Draft),
            "scheduled" => Ok(BlogStatus::Scheduled),
            "published" => Ok(BlogStatus::Published),
            "archived" => Ok(BlogStatus::Archived),
            _ => Err(InvalidInputError::Field {
                field: "status",
                reason: format!(
                    "'{}' is not one of draft, scheduled, published, archived",
                    s
                ),
            }
            .into()),
        }
    }
}

/// Cover image metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub url: String,
    #[serde(default)]
    pub cloudinary_id: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

/// An inline image placed in the post body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogImage {
    pub url: String,
    #[serde(default)]
    pub cloudinary_id: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A code snippet embedded in the post body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub id: String,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub line_count: u32,
    #[serde(default)]
    pub show_line_numbers: bool,
    #[serde(default)]
    pub position: u32,
}

/// A blog post as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub author: serde_json::Value,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub images: Vec<BlogImage>,
    #[serde(default)]
    pub code_blocks: Vec<CodeBlock>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: BlogStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a post.
///
/// Every field is optional so the same type serves partial updates and
/// auto-saves; [`BlogDraft::validate_for_create`] checks what creation needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl BlogDraft {
    /// Check the fields a new post must carry.
    ///
    /// A scheduled post also needs a `scheduled_for` time.
    pub fn validate_for_create(&self) -> Result<(), ApiError> {
        fn required(field: &'static str, value: &Option<String>) -> Result<(), ApiError> {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(()),
                _ => Err(InvalidInputError::Field {
                    field,
                    reason: "is required".to_string(),
                }
                .into()),
            }
        }

        required("title", &self.title)?;
        required("content", &self.content)?;
        required("topic", &self.topic)?;

        if self.status == Some(BlogStatus::Scheduled) && self.scheduled_for.is_none() {
            return Err(InvalidInputError::Field {
                field: "scheduledFor",
                reason: "is required for scheduled posts".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Query for the published-posts listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub topic: Option<String>,
    pub search: Option<String>,
}

/// A reader comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub blog: serde_json::Value,
    pub content: String,
    #[serde(default)]
    pub author: serde_json::Value,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Target of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget {
    Blog,
    Comment,
}

impl LikeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeTarget::Blog => "blog",
            LikeTarget::Comment => "comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_admin_blog_payload() {
        let blog: Blog = serde_json::from_value(json!({
            "_id": "66a1",
            "title": "Borrowing without tears",
            "slug": "borrowing-without-tears",
            "content": "<p>hi</p>",
            "excerpt": "hi",
            "author": "u1",
            "images": [],
            "codeBlocks": [],
            "readTime": "3 min read",
            "wordCount": 640,
            "topic": "rust",
            "tags": ["ownership"],
            "status": "published",
            "publishedAt": "2024-05-01T10:00:00.000Z",
            "scheduledFor": null,
            "likes": [],
            "metaTitle": "",
            "metaDescription": "",
            "canonicalUrl": "",
            "version": 3,
            "lastEditedBy": "u1",
            "createdAt": "2024-04-30T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(blog.id, "66a1");
        assert_eq!(blog.status, BlogStatus::Published);
        assert!(blog.cover_image.is_none());
        assert_eq!(blog.views, 0);
        assert!(blog.published_at.is_some());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Draft".parse::<BlogStatus>().unwrap(), BlogStatus::Draft);
        assert!("deleted".parse::<BlogStatus>().is_err());
    }

    #[test]
    fn draft_serializes_only_set_fields() {
        let draft = BlogDraft {
            title: Some("Hello".to_string()),
            status: Some(BlogStatus::Draft),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"title": "Hello", "status": "draft"})
        );
    }

    #[test]
    fn create_requires_title_content_topic() {
        let draft = BlogDraft {
            title: Some("Hello".to_string()),
            content: Some("  ".to_string()),
            topic: Some("rust".to_string()),
            ..Default::default()
        };
        let err = draft.validate_for_create().unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn scheduled_post_needs_a_time() {
        let draft = BlogDraft {
            title: Some("t".to_string()),
            content: Some("c".to_string()),
            topic: Some("rust".to_string()),
            status: Some(BlogStatus::Scheduled),
            ..Default::default()
        };
        assert!(draft.validate_for_create().is_err());
    }
}
