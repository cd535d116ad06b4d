//! Location of the credential file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use folio_file::FileStore;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Default credential file under the platform data directory.
fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "folio").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(CREDENTIALS_FILE))
}

/// Open the credential store at `path`, or at the default location.
pub fn open(path: Option<&Path>) -> Result<FileStore> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };
    Ok(FileStore::new(path))
}
