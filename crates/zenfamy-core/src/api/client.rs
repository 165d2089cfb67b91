//! API client for the Zenfamy account service.
//!
//! This module provides the `ApiClient` struct for the login exchange and the
//! authenticated `/users/me` resource.

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{LoginRequest, LoginResponse, UserProfile};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Production API root, used when neither config nor env override it
pub const DEFAULT_API_BASE_URL: &str = "https://api.zenfamy.ai/api/v1";

const LOGIN_PATH: &str = "/auth/login";
const CURRENT_USER_PATH: &str = "/users/me";

/// API client for the account service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `timeout` of `None` leaves requests without a deadline.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidResponse("token is not a valid header value".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                %status,
                body = %ApiError::truncate_body(&body),
                "Request rejected"
            );
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Read the body and parse it as JSON. An empty body parses as `null`.
    async fn parse_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        let source = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(source).map_err(|e| {
            debug!(url, body = %ApiError::truncate_body(&text), "Unparseable response");
            ApiError::InvalidResponse(format!("{} from {}", e, url))
        })
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(self.auth_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, url, "Sending request");
        let response = request.send().await?;
        let response = Self::check_response(response).await?;
        Self::parse_json(response, url).await
    }

    // ===== Endpoints =====

    /// Exchange credentials for a token pair
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url(LOGIN_PATH);
        let body = LoginRequest { email, password };
        self.send_json(reqwest::Method::POST, &url, Some(&body)).await
    }

    /// Fetch the signed-in user
    pub async fn fetch_current_user(&self) -> Result<UserProfile, ApiError> {
        let url = self.url(CURRENT_USER_PATH);
        self.send_json::<_, ()>(reqwest::Method::GET, &url, None).await
    }

    /// Replace the signed-in user with `body`, returning the server's copy
    pub async fn update_current_user(
        &self,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.url(CURRENT_USER_PATH);
        self.send_json(reqwest::Method::PUT, &url, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url(LOGIN_PATH), "http://localhost:8000/api/v1/auth/login");
    }

    #[test]
    fn test_with_token_shares_base_url() {
        let client = ApiClient::new(DEFAULT_API_BASE_URL, None).unwrap();
        assert!(!client.has_token());
        let authed = client.with_token("T1".to_string());
        assert!(authed.has_token());
        assert_eq!(authed.base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_auth_headers() {
        let client = ApiClient::new(DEFAULT_API_BASE_URL, None).unwrap();
        let headers = client.auth_headers().unwrap();
        assert!(headers.get(header::AUTHORIZATION).is_none());
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "application/json");

        let headers = client.with_token("T1".to_string()).auth_headers().unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer T1");
    }

    #[test]
    fn test_invalid_token_header() {
        let client = ApiClient::new(DEFAULT_API_BASE_URL, None)
            .unwrap()
            .with_token("bad\ntoken".to_string());
        assert!(matches!(
            client.auth_headers(),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
