//! Credential store trait.

use crate::error::StoreError;
use crate::store::StorageKey;

/// Durable key-value storage for session credentials.
///
/// Calls are synchronous and expected to be fast; they are made between
/// network awaits, never across them.
pub trait CredentialStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;

    /// Delete every session key.
    fn clear(&self) -> Result<(), StoreError> {
        for key in StorageKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}
