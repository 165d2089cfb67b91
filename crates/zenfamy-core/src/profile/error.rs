use thiserror::Error;

use crate::api::ApiError;

const FETCH_FAILED: &str = "Failed to fetch user data";
const UPDATE_FAILED: &str = "Failed to update user data";

/// Profile read failure. `Display` is the inline message on the profile view.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No auth token found")]
    MissingToken,

    #[error("{0}")]
    Rejected(String),

    #[error("Unable to connect to server. Check your internet connection.")]
    Network(#[source] ApiError),

    #[error("Connection timed out. Please try again.")]
    Timeout(#[source] ApiError),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { .. } => FetchError::Rejected(
                err.server_message().unwrap_or(FETCH_FAILED).to_string(),
            ),
            ApiError::NetworkError(_) if err.is_timeout() => FetchError::Timeout(err),
            ApiError::NetworkError(_) => FetchError::Network(err),
            ApiError::InvalidResponse(msg) => FetchError::InvalidResponse(msg),
        }
    }
}

/// Profile write failure. The caller keeps the draft when this is returned.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("No auth token found")]
    MissingToken,

    #[error("Nothing to save - profile not loaded")]
    NotLoaded,

    #[error("{0}")]
    Rejected(String),

    #[error("Unable to connect to server. Check your internet connection.")]
    Network(#[source] ApiError),

    #[error("Connection timed out. Please try again.")]
    Timeout(#[source] ApiError),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The update went through but re-fetching the profile failed
    #[error("{0}")]
    Reload(#[source] FetchError),
}

impl From<ApiError> for SaveError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { .. } => SaveError::Rejected(
                err.server_detail().unwrap_or(UPDATE_FAILED).to_string(),
            ),
            ApiError::NetworkError(_) if err.is_timeout() => SaveError::Timeout(err),
            ApiError::NetworkError(_) => SaveError::Network(err),
            ApiError::InvalidResponse(msg) => SaveError::InvalidResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_fetch_generic_fallback() {
        let err = FetchError::from(ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, ""));
        assert_eq!(err.to_string(), "Failed to fetch user data");
    }

    #[test]
    fn test_fetch_server_message() {
        let err = FetchError::from(ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Could not validate credentials"}"#,
        ));
        assert_eq!(err.to_string(), "Could not validate credentials");
    }

    #[test]
    fn test_save_prefers_detail() {
        let err = SaveError::from(ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Bad request","detail":"Unsupported language"}"#,
        ));
        assert_eq!(err.to_string(), "Unsupported language");
    }

    #[test]
    fn test_save_generic_fallback() {
        let err = SaveError::from(ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down"));
        assert_eq!(err.to_string(), "Failed to update user data");
    }

    #[test]
    fn test_missing_token_messages() {
        assert_eq!(FetchError::MissingToken.to_string(), "No auth token found");
        assert_eq!(SaveError::MissingToken.to_string(), "No auth token found");
    }

    #[test]
    fn test_reload_shows_fetch_message() {
        let err = SaveError::Reload(FetchError::Rejected("Failed to fetch user data".into()));
        assert_eq!(err.to_string(), "Failed to fetch user data");
    }
}
