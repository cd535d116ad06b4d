//! Profile section types and their validation rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, InvalidInputError};

/// Longest quote the profile accepts, in characters.
pub const MAX_QUOTE_CHARS: usize = 200;

/// A link in the profile's reading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingResource {
    pub title: String,
    pub url: String,
}

impl ReadingResource {
    /// Build a validated resource. The title is trimmed and the URL gets an
    /// `https://` scheme when none was given.
    pub fn new(title: &str, url: &str) -> Result<Self, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(InvalidInputError::Field {
                field: "title",
                reason: "is required".to_string(),
            }
            .into());
        }
        Ok(Self {
            title: title.to_string(),
            url: normalize_link(url)?,
        })
    }
}

/// Social platform name to profile URL.
pub type SocialLinks = BTreeMap<String, String>;

/// Validate a profile quote.
pub fn validate_quote(quote: &str) -> Result<&str, ApiError> {
    let quote = quote.trim();
    if quote.is_empty() {
        return Err(InvalidInputError::Field {
            field: "quote",
            reason: "is required".to_string(),
        }
        .into());
    }
    if quote.chars().count() > MAX_QUOTE_CHARS {
        return Err(InvalidInputError::Field {
            field: "quote",
            reason: format!("cannot exceed {} characters", MAX_QUOTE_CHARS),
        }
        .into());
    }
    Ok(quote)
}

/// Normalize a user-entered link to an absolute http(s) URL.
pub fn normalize_link(raw: &str) -> Result<String, ApiError> {
    let raw = raw.trim();
    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let invalid = |reason: &str| -> ApiError {
        InvalidInputError::Field {
            field: "url",
            reason: format!("'{}' {}", raw, reason),
        }
        .into()
    };

    let url = Url::parse(&candidate).map_err(|_| invalid("is not a valid URL"))?;
    match url.host_str() {
        Some(host) if host.contains('.') || host == "localhost" => Ok(candidate),
        _ => Err(invalid("has no valid host")),
    }
}
