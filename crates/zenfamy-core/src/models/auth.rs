use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login response. Other fields the server returns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            email: "a@b.com",
            password: "secret",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "password": "secret"}));
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token":"T1","refresh_token":"R1","token_type":"bearer","expires_in":3600}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token.as_deref(), Some("T1"));
        assert_eq!(resp.refresh_token.as_deref(), Some("R1"));
    }

    #[test]
    fn test_login_response_missing_tokens() {
        let resp: LoginResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(resp.access_token.is_none());
        assert!(resp.refresh_token.is_none());
    }
}
