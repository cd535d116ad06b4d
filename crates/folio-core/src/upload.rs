//! Files sent as multipart form data.

use std::fmt;
use std::path::Path;

use crate::error::{ApiError, InvalidInputError};

/// Largest file the backend accepts.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

pub const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// What a form field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => IMAGE_TYPES,
            UploadKind::Document => DOCUMENT_TYPES,
        }
    }
}

/// A validated file bound to a form field name.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    field: String,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Checks the content type against `kind` and the size limit.
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: &str,
        bytes: Vec<u8>,
        kind: UploadKind,
    ) -> Result<Self, ApiError> {
        let content_type = content_type.trim().to_ascii_lowercase();
        if !kind.allowed_types().contains(&content_type.as_str()) {
            return Err(InvalidInputError::Field {
                field: "file",
                reason: format!("type '{}' is not accepted", content_type),
            }
            .into());
        }
        if bytes.is_empty() || bytes.len() > MAX_UPLOAD_BYTES {
            return Err(InvalidInputError::Field {
                field: "file",
                reason: format!("size must be between 1 byte and {} bytes", MAX_UPLOAD_BYTES),
            }
            .into());
        }

        Ok(Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Guess a content type from a file extension.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}
