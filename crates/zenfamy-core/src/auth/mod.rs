//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: login, logout and the session presence check
//! - `TokenStore`: persistent storage for the three session entries, backed
//!   by files or the OS keychain
//!
//! There is no expiry or refresh handling; a stored access token counts as a
//! session until logout.

pub mod error;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use session::{Session, SessionManager};
pub use store::{FileTokenStore, KeyringTokenStore, StorageBackend, StorageKey, TokenStore};
