//! JSON file credential store.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};

use folio_core::error::StoreError;
use folio_core::{CredentialStore, StorageKey};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Suffix of the sibling file used for advisory locking.
pub const LOCK_SUFFIX: &str = ".lock";

type Entries = BTreeMap<String, String>;

/// Credential store persisted as a single JSON object.
///
/// Writes replace the file atomically (temp file and rename) while holding
/// an exclusive lock on a sibling `.lock` file; reads take a shared lock. A
/// missing file reads as an empty store. On Unix the file is created with
/// mode `0o600`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        sibling(&self.path, LOCK_SUFFIX)
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.path, ".tmp")
    }

    fn io_error(&self, err: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn open_lock(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if json.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.sync_data().map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.io_error(e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(|e| self.io_error(e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        trace!(entries = entries.len(), "Credential file written");
        Ok(())
    }

    /// Apply `update` to the stored entries under the exclusive lock.
    fn modify(&self, update: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(|e| self.io_error(e))?;

        let result = self.read_entries().and_then(|mut entries| {
            update(&mut entries);
            self.write_entries(&entries)
        });

        lock.unlock().map_err(|e| self.io_error(e))?;
        result
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let lock = self.open_lock()?;
        lock.lock_shared().map_err(|e| self.io_error(e))?;
        let entries = self.read_entries();
        lock.unlock().map_err(|e| self.io_error(e))?;

        Ok(entries?.get(key.as_str()).cloned())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.modify(|entries| {
            entries.insert(key.as_str().to_string(), value.to_string());
        })?;
        debug!(%key, "Stored credential");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|entries| {
            entries.remove(key.as_str());
        })?;
        debug!(%key, "Removed credential");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|entries| {
            for key in StorageKey::ALL {
                entries.remove(key.as_str());
            }
        })?;
        debug!("Cleared credentials");
        Ok(())
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{AccessToken, RefreshToken, SessionState};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("credentials.json"))
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
        store.remove(StorageKey::AccessToken).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set(StorageKey::AccessToken, "A1").unwrap();
        store.set(StorageKey::RefreshToken, "R1").unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap().as_deref(), Some("A1"));

        store.set(StorageKey::AccessToken, "A2").unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap().as_deref(), Some("A2"));

        store.remove(StorageKey::AccessToken).unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
        assert_eq!(store.get(StorageKey::RefreshToken).unwrap().as_deref(), Some("R1"));
    }

    #[test]
    fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set(StorageKey::RefreshToken, "R1").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get(StorageKey::RefreshToken).unwrap().as_deref(),
            Some("R1")
        );
    }

    #[test]
    fn file_uses_storage_key_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(StorageKey::UserData, r#"{"name":"Ada"}"#).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["userData"], r#"{"name":"Ada"}"#);
    }

    #[test]
    fn clear_removes_session_keys_only() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"accessToken":"A1","theme":"dark"}"#).unwrap();

        store.clear().unwrap();

        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();

        let err = store.get(StorageKey::AccessToken).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/credentials.json"));
        store.set(StorageKey::AccessToken, "A1").unwrap();
        assert!(store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(StorageKey::AccessToken, "A1").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn backs_a_session() {
        let dir = TempDir::new().unwrap();
        let session = SessionState::new(Arc::new(store_in(&dir)));

        session
            .store_login(&AccessToken::new("A1"), Some(&RefreshToken::new("R1")), None)
            .unwrap();
        assert!(session.is_authenticated().unwrap());

        session.clear().unwrap();
        assert!(!session.is_authenticated().unwrap());
        assert_eq!(session.refresh_token().unwrap(), None);
    }
}
