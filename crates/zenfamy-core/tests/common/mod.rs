//! Shared helpers for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;
use zenfamy_core::auth::{FileTokenStore, StorageKey, TokenStore};
use zenfamy_core::{ApiClient, SessionManager};

/// Session manager against `server`, storing entries under `dir`
pub fn session_manager(server: &MockServer, dir: &TempDir) -> SessionManager {
    let api = ApiClient::new(&server.uri(), None).unwrap();
    SessionManager::new(api, Box::new(FileTokenStore::new(dir.path().to_path_buf())))
}

/// Pre-populate the store as a previous login would have
pub fn seed_session(dir: &TempDir, token: &str, email: &str) {
    let store = FileTokenStore::new(dir.path().to_path_buf());
    store.set(StorageKey::AccessToken, token).unwrap();
    store.set(StorageKey::RefreshToken, "R0").unwrap();
    store.set(StorageKey::Identity, email).unwrap();
}

pub fn stored(dir: &TempDir, key: StorageKey) -> Option<String> {
    FileTokenStore::new(dir.path().to_path_buf()).get(key).unwrap()
}

pub fn user_json() -> Value {
    json!({
        "user_id": 17,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "a@b.com",
        "role": "parent",
        "country": "GB",
        "preferred_language": "en",
        "family_id": 4
    })
}
