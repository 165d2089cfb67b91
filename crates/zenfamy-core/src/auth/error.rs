use thiserror::Error;

use crate::api::ApiError;

/// Fallback when the server rejects a login without a readable message
const LOGIN_FAILED: &str = "Login failed";

/// Login failure. `Display` is the text shown under the login form.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please enter both email and password")]
    MissingCredentials,

    /// Credentials rejected; carries the server's message or the fallback
    #[error("{0}")]
    Rejected(String),

    #[error("Unable to connect to server. Check your internet connection.")]
    Network(#[source] ApiError),

    #[error("Connection timed out. Please try again.")]
    Timeout(#[source] ApiError),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    #[error("Failed to save session: {0:#}")]
    Storage(#[source] anyhow::Error),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { .. } => AuthError::Rejected(
                err.server_message().unwrap_or(LOGIN_FAILED).to_string(),
            ),
            ApiError::NetworkError(_) if err.is_timeout() => AuthError::Timeout(err),
            ApiError::NetworkError(_) => AuthError::Network(err),
            ApiError::InvalidResponse(msg) => AuthError::InvalidResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_rejected_uses_server_message() {
        let api = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Invalid credentials"}"#,
        );
        let err = AuthError::from(api);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_rejected_falls_back_to_detail() {
        let api = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail":"Inactive user"}"#);
        assert_eq!(AuthError::from(api).to_string(), "Inactive user");
    }

    #[test]
    fn test_rejected_generic_fallback() {
        let api = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(AuthError::from(api).to_string(), "Login failed");
    }

    #[test]
    fn test_missing_credentials_message() {
        assert_eq!(
            AuthError::MissingCredentials.to_string(),
            "Please enter both email and password"
        );
    }

    #[test]
    fn test_storage_message_includes_cause() {
        let err = AuthError::Storage(anyhow::anyhow!("disk full").context("Failed to write userToken"));
        assert_eq!(
            err.to_string(),
            "Failed to save session: Failed to write userToken: disk full"
        );
    }
}
