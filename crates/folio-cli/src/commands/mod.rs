//! Subcommand implementations.

pub mod auth;
pub mod blog;
pub mod profile;

use std::path::Path;

use anyhow::{Context as _, Result};

use folio_core::upload::content_type_for;

/// A local file ready to be sent as a form part.
pub struct LocalFile {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Read a file and guess its content type from the extension.
pub async fn read_local_file(path: &Path) -> Result<LocalFile> {
    let content_type = content_type_for(path).with_context(|| {
        format!("Unsupported file type: {}", path.display())
    })?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(LocalFile {
        name,
        content_type,
        bytes,
    })
}
