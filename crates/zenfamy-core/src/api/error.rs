use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        /// `message` field of the error body, if any
        message: Option<String>,
        /// `detail` field of the error body, if any
        detail: Option<String>,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Build an error from a non-2xx status and its raw body.
    ///
    /// The body is expected to be JSON carrying `message` and/or `detail`.
    /// Anything else leaves both fields empty and callers fall back to
    /// their own generic text.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(text_of);
        let detail = parsed
            .as_ref()
            .and_then(|v| v.get("detail"))
            .and_then(text_of);

        ApiError::Rejected {
            status,
            message,
            detail,
        }
    }

    /// Server text preferring `message` over `detail`
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message, detail, ..
            } => message.as_deref().or(detail.as_deref()),
            _ => None,
        }
    }

    /// Server text preferring `detail` over `message`
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message, detail, ..
            } => detail.as_deref().or(message.as_deref()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::NetworkError(e) => e.status(),
            ApiError::InvalidResponse(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::NetworkError(e) if e.is_timeout())
    }
}

/// Extract display text from a `message`/`detail` value.
///
/// Validation failures arrive as `detail: [{"msg": ...}, ...]`; those are
/// joined into one line.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
