//! REST API client module for the Zenfamy account service.
//!
//! This module provides the `ApiClient` for the login exchange and the
//! current-user resource, plus the transport-level `ApiError`.
//!
//! Authenticated requests carry the access token as a bearer header.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_API_BASE_URL};
pub use error::ApiError;
