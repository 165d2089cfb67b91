//! Persistent key-value storage for the session fields.
//!
//! The three entries are independent: each `set`/`remove` is atomic for its
//! own key and nothing spans keys.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Keychain service name for the keyring backend
const SERVICE_NAME: &str = "zenfamy";

/// Subdirectory of the data dir holding one file per key
const SESSION_DIR: &str = "session";

/// Fixed storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    RefreshToken,
    Identity,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::AccessToken,
        StorageKey::RefreshToken,
        StorageKey::Identity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AccessToken => "userToken",
            StorageKey::RefreshToken => "refreshToken",
            StorageKey::Identity => "userEmail",
        }
    }
}

/// Key-value storage for the session fields.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;
    /// Removing a missing key is not an error
    fn remove(&self, key: StorageKey) -> Result<()>;
}

/// Which `TokenStore` backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
}

impl StorageBackend {
    /// Build the selected store. `data_dir` is only used by the file backend.
    pub fn open(self, data_dir: &Path) -> Box<dyn TokenStore> {
        match self {
            StorageBackend::File => Box::new(FileTokenStore::new(data_dir.join(SESSION_DIR))),
            StorageBackend::Keyring => Box::new(KeyringTokenStore),
        }
    }
}

// ============================================================================
// File backend
// ============================================================================

/// Stores each key as its own file under a directory
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", key.as_str())),
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create session directory")?;

        // Write beside the target then rename so readers never see a partial value
        let path = self.key_path(key);
        let tmp = self.dir.join(format!(".{}.tmp", key.as_str()));
        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", key.as_str()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Failed to store {}", key.as_str()))?;
        debug!(key = key.as_str(), "Stored session entry");
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", key.as_str())),
        }
    }
}

// ============================================================================
// Keyring backend
// ============================================================================

/// Stores each key as an OS keychain entry under the `zenfamy` service
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry(key: StorageKey) -> Result<Entry> {
        Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve entry from keychain"),
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        Self::entry(key)?
            .set_password(value)
            .context("Failed to store entry in keychain")
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete entry from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_keys() {
        assert_eq!(StorageKey::AccessToken.as_str(), "userToken");
        assert_eq!(StorageKey::RefreshToken.as_str(), "refreshToken");
        assert_eq!(StorageKey::Identity.as_str(), "userEmail");
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp.path().join("session"));

        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);

        store.set(StorageKey::AccessToken, "T1").unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap().as_deref(), Some("T1"));

        store.set(StorageKey::AccessToken, "T2").unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap().as_deref(), Some("T2"));

        store.remove(StorageKey::AccessToken).unwrap();
        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let temp = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp.path().to_path_buf());

        store.set(StorageKey::AccessToken, "T1").unwrap();
        store.set(StorageKey::Identity, "a@b.com").unwrap();
        store.remove(StorageKey::AccessToken).unwrap();

        assert_eq!(store.get(StorageKey::AccessToken).unwrap(), None);
        assert_eq!(store.get(StorageKey::Identity).unwrap().as_deref(), Some("a@b.com"));
        assert_eq!(store.get(StorageKey::RefreshToken).unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp.path().join("never-created"));
        assert!(store.remove(StorageKey::RefreshToken).is_ok());
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp.path().to_path_buf());
        store.set(StorageKey::RefreshToken, "R1").unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["refreshToken".to_string()]);
    }

    #[test]
    fn test_storage_backend_serde() {
        assert_eq!(serde_json::to_string(&StorageBackend::File).unwrap(), "\"file\"");
        let parsed: StorageBackend = serde_json::from_str("\"keyring\"").unwrap();
        assert_eq!(parsed, StorageBackend::Keyring);
        assert_eq!(StorageBackend::default(), StorageBackend::File);
    }
}
