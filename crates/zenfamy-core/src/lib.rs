//! Core library for zenfamy.
//!
//! Talks to the Zenfamy account API, keeps the session (access token,
//! refresh token, email) in local storage, and drives the profile view's
//! load/edit/save flow. Front-ends own a single `SessionManager` and pass it
//! to the profile functions.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod profile;
pub mod routing;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, Session, SessionManager, StorageBackend, TokenStore};
pub use config::Config;
pub use models::UserProfile;
pub use profile::{FetchError, ProfileView, SaveError, UpdateMode};
pub use routing::Route;
