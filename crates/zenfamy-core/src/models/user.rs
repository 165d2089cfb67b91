use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{capitalize_first, or_not_set};

/// User account as returned by `GET /users/me`.
///
/// Fields the server sends beyond the ones modelled here are kept in
/// `extra` so a full-replace update can send them back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "user_id", alias = "id", default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_id(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "Unknown".to_string(),
        }
    }

    pub fn display_first_name(&self) -> String {
        or_not_set(self.first_name.as_deref())
    }

    pub fn display_last_name(&self) -> String {
        or_not_set(self.last_name.as_deref())
    }

    pub fn display_email(&self) -> String {
        or_not_set(self.email.as_deref())
    }

    /// Role with its first letter upper-cased ("admin" -> "Admin")
    pub fn display_role(&self) -> String {
        match self.role.as_deref() {
            Some(role) if !role.is_empty() => capitalize_first(role),
            _ => or_not_set(None),
        }
    }

    pub fn display_country(&self) -> String {
        or_not_set(self.country.as_deref())
    }

    /// Language code upper-cased ("en" -> "EN")
    pub fn display_language(&self) -> String {
        match self.preferred_language.as_deref() {
            Some(lang) if !lang.is_empty() => lang.to_uppercase(),
            _ => or_not_set(None),
        }
    }

    /// Full name for the status bar, falling back to the email
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => self.display_email(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "user_id": 42,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "role": "parent",
            "country": "GB",
            "preferred_language": "en",
            "family_id": 7,
            "created_at": "2024-01-01T00:00:00Z"
        }"#
    }

    #[test]
    fn test_deserialize_full_profile() {
        let profile: UserProfile = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(profile.id, Some(42));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.preferred_language.as_deref(), Some("en"));
        assert_eq!(profile.extra.get("family_id"), Some(&Value::from(7)));
        assert!(profile.extra.contains_key("created_at"));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let profile: UserProfile = serde_json::from_str(sample_json()).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["user_id"], 42);
        assert_eq!(value["family_id"], 7);
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_id_alias() {
        let profile: UserProfile = serde_json::from_str(r#"{"id": 5, "email": "x@y.z"}"#).unwrap();
        assert_eq!(profile.id, Some(5));
    }

    #[test]
    fn test_null_and_missing_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id": 1, "first_name": null, "email": "x@y.z"}"#)
                .unwrap();
        assert_eq!(profile.first_name, None);
        assert_eq!(profile.country, None);
        assert_eq!(profile.display_first_name(), "Not set");
        assert_eq!(profile.display_country(), "Not set");
    }

    #[test]
    fn test_display_helpers() {
        let profile: UserProfile = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(profile.display_role(), "Parent");
        assert_eq!(profile.display_language(), "EN");
        assert_eq!(profile.display_id(), "42");
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"first_name": "", "email": "x@y.z"}"#).unwrap();
        assert_eq!(profile.display_name(), "x@y.z");
    }
}
