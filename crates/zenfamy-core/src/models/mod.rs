//! Wire types for the account API.
//!
//! - `LoginRequest`, `LoginResponse`: the `/auth/login` exchange
//! - `UserProfile`: the `/users/me` resource

pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use user::UserProfile;
