use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::ApiClient;

use super::store::{StorageKey, TokenStore};
use super::AuthError;

/// Client-side record of an authenticated identity.
///
/// Only the access token decides whether a session exists. The other two
/// entries are stored independently and may be missing when read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub identity: Option<String>,
}

/// Owns the session lifecycle: read at start, written on login, cleared on
/// logout. Nothing else writes the stored entries.
pub struct SessionManager {
    api: ApiClient,
    store: Box<dyn TokenStore>,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            current: None,
        }
    }

    /// Read the persisted entries. Call once at process start.
    pub fn init(&mut self) -> Result<Option<&Session>> {
        self.current = Self::read_session(self.store.as_ref())?;
        debug!(has_session = self.current.is_some(), "Session loaded");
        Ok(self.current.as_ref())
    }

    fn read_session(store: &dyn TokenStore) -> Result<Option<Session>> {
        let access_token = match store.get(StorageKey::AccessToken)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let refresh_token = store.get(StorageKey::RefreshToken)?;
        let identity = store.get(StorageKey::Identity)?;

        Ok(Some(Session {
            access_token,
            refresh_token,
            identity,
        }))
    }

    /// Current session, if any. Pure read: no I/O and no navigation.
    pub fn check_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn identity(&self) -> Option<&str> {
        self.current.as_ref().and_then(|s| s.identity.as_deref())
    }

    /// Unauthenticated client for the configured API
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Client carrying the current access token, if a session exists
    pub fn authorized_api(&self) -> Option<ApiClient> {
        self.access_token()
            .map(|token| self.api.with_token(token.to_string()))
    }

    /// Authenticate and persist the new session.
    ///
    /// On any failure the in-memory session is left as it was. A rejected
    /// login never touches storage.
    pub async fn login(&mut self, identity: &str, secret: &str) -> Result<&Session, AuthError> {
        let identity = identity.trim();
        if identity.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let response = self.api.login(identity, secret).await.map_err(|e| {
            warn!(error = %e, "Login request failed");
            AuthError::from(e)
        })?;

        let access_token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))?;

        let session = Session {
            access_token,
            refresh_token: response.refresh_token,
            identity: Some(identity.to_string()),
        };

        self.persist(&session).map_err(AuthError::Storage)?;

        info!(identity, "Login successful");
        Ok(self.current.insert(session))
    }

    /// Write the three entries, access token last so a stored token always
    /// comes with its own refresh token and identity. If any write fails the
    /// previous entries are put back.
    fn persist(&self, session: &Session) -> Result<()> {
        let previous = StorageKey::ALL.map(|key| (key, self.store.get(key).ok().flatten()));

        let result = self.write_entries(session);
        if result.is_err() {
            for (key, value) in previous {
                let restored = match value {
                    Some(ref value) => self.store.set(key, value),
                    None => self.store.remove(key),
                };
                if let Err(e) = restored {
                    warn!(key = key.as_str(), error = %e, "Failed to restore session entry");
                }
            }
        }
        result
    }

    fn write_entries(&self, session: &Session) -> Result<()> {
        match session.refresh_token {
            Some(ref token) => self.store.set(StorageKey::RefreshToken, token)?,
            None => self.store.remove(StorageKey::RefreshToken)?,
        }
        match session.identity {
            Some(ref identity) => self.store.set(StorageKey::Identity, identity)?,
            None => self.store.remove(StorageKey::Identity)?,
        }
        self.store.set(StorageKey::AccessToken, &session.access_token)
    }

    /// Clear the session. Storage failures are logged, never returned; the
    /// in-memory session is always dropped.
    pub fn logout(&mut self) {
        self.current = None;
        for key in StorageKey::ALL {
            if let Err(e) = self.store.remove(key) {
                warn!(key = key.as_str(), error = %e, "Failed to clear session entry");
            }
        }
        info!("Logged out");
    }
}
