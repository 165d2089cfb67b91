//! Editable profile fields and the body of `PUT /users/me`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::UserProfile;

/// How much of the profile a save sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// The whole last-fetched payload with the edits applied
    #[default]
    Replace,
    /// Only the editable fields
    Partial,
}

/// Fields a user may change on the profile view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Country,
    Language,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Country,
        ProfileField::Language,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "First Name",
            ProfileField::LastName => "Last Name",
            ProfileField::Country => "Country",
            ProfileField::Language => "Language",
        }
    }

    /// Wire name of the field
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "first_name",
            ProfileField::LastName => "last_name",
            ProfileField::Country => "country",
            ProfileField::Language => "preferred_language",
        }
    }

    /// Get the next field (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            ProfileField::FirstName => ProfileField::LastName,
            ProfileField::LastName => ProfileField::Country,
            ProfileField::Country => ProfileField::Language,
            ProfileField::Language => ProfileField::FirstName,
        }
    }

    /// Get the previous field (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            ProfileField::FirstName => ProfileField::Language,
            ProfileField::LastName => ProfileField::FirstName,
            ProfileField::Country => ProfileField::LastName,
            ProfileField::Language => ProfileField::Country,
        }
    }
}

/// In-progress edits, one text buffer per editable field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub preferred_language: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            country: profile.country.clone().unwrap_or_default(),
            preferred_language: profile.preferred_language.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Country => &self.country,
            ProfileField::Language => &self.preferred_language,
        }
    }

    pub fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Country => &mut self.country,
            ProfileField::Language => &mut self.preferred_language,
        }
    }

    /// Copy of `profile` with the draft's fields applied.
    /// Untouched buffers keep the fetched value as is; a buffer cleared by
    /// the user becomes `None`. Email, role, id and unknown fields are taken
    /// from `profile` unchanged.
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            first_name: edited_value(&self.first_name, &profile.first_name),
            last_name: edited_value(&self.last_name, &profile.last_name),
            country: edited_value(&self.country, &profile.country),
            preferred_language: edited_value(
                &self.preferred_language,
                &profile.preferred_language,
            ),
            ..profile.clone()
        }
    }
}

fn edited_value(buffer: &str, fetched: &Option<String>) -> Option<String> {
    if buffer == fetched.as_deref().unwrap_or_default() {
        fetched.clone()
    } else if buffer.trim().is_empty() {
        None
    } else {
        Some(buffer.to_string())
    }
}

/// JSON body for saving `edited`
pub fn build_update_body(edited: &UserProfile, mode: UpdateMode) -> Value {
    match mode {
        UpdateMode::Replace => {
            serde_json::to_value(edited).unwrap_or_else(|_| Value::Object(Map::new()))
        }
        UpdateMode::Partial => {
            let mut body = Map::new();
            for field in ProfileField::ALL {
                let value = match field {
                    ProfileField::FirstName => &edited.first_name,
                    ProfileField::LastName => &edited.last_name,
                    ProfileField::Country => &edited.country,
                    ProfileField::Language => &edited.preferred_language,
                };
                body.insert(
                    field.key().to_string(),
                    value.clone().map(Value::String).unwrap_or(Value::Null),
                );
            }
            Value::Object(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetched() -> UserProfile {
        serde_json::from_value(json!({
            "user_id": 9,
            "first_name": "Ada",
            "last_name": null,
            "email": "ada@example.com",
            "role": "admin",
            "country": "GB",
            "preferred_language": "en",
            "family_id": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(ProfileField::FirstName.next(), ProfileField::LastName);
        assert_eq!(ProfileField::Language.next(), ProfileField::FirstName); // Wraps around
        assert_eq!(ProfileField::FirstName.prev(), ProfileField::Language); // Wraps around
        assert_eq!(ProfileField::Country.prev(), ProfileField::LastName);
    }

    #[test]
    fn test_draft_from_profile() {
        let draft = ProfileDraft::from_profile(&fetched());
        assert_eq!(draft.get(ProfileField::FirstName), "Ada");
        assert_eq!(draft.get(ProfileField::LastName), "");
        assert_eq!(draft.get(ProfileField::Language), "en");
    }

    #[test]
    fn test_unchanged_draft_round_trips() {
        let profile = fetched();
        let edited = ProfileDraft::from_profile(&profile).apply_to(&profile);
        assert_eq!(edited, profile);
    }

    #[test]
    fn test_unchanged_empty_strings_are_not_nulled() {
        let profile: UserProfile = serde_json::from_value(json!({
            "user_id": 9,
            "first_name": "Ada",
            "last_name": "",
            "country": null,
            "preferred_language": "en"
        }))
        .unwrap();
        let edited = ProfileDraft::from_profile(&profile).apply_to(&profile);
        assert_eq!(edited.last_name.as_deref(), Some(""));
        assert_eq!(edited.country, None);
        assert_eq!(edited, profile);

        let body = build_update_body(&edited, UpdateMode::Partial);
        assert_eq!(body["last_name"], json!(""));
        assert_eq!(body["country"], Value::Null);
    }

    #[test]
    fn test_apply_keeps_read_only_fields() {
        let profile = fetched();
        let mut draft = ProfileDraft::from_profile(&profile);
        draft.get_mut(ProfileField::Country).push_str("R");
        draft.first_name = "  ".to_string();

        let edited = draft.apply_to(&profile);
        assert_eq!(edited.country.as_deref(), Some("GBR"));
        assert_eq!(edited.first_name, None);
        assert_eq!(edited.email, profile.email);
        assert_eq!(edited.role, profile.role);
        assert_eq!(edited.id, profile.id);
    }

    #[test]
    fn test_replace_body_carries_whole_payload() {
        let profile = fetched();
        let mut draft = ProfileDraft::from_profile(&profile);
        draft.preferred_language = "fr".to_string();

        let body = build_update_body(&draft.apply_to(&profile), UpdateMode::Replace);
        assert_eq!(body["preferred_language"], "fr");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["role"], "admin");
        assert_eq!(body["user_id"], 9);
        assert_eq!(body["family_id"], 3);
    }

    #[test]
    fn test_partial_body_only_editable_fields() {
        let profile = fetched();
        let body = build_update_body(&profile, UpdateMode::Partial);
        assert_eq!(
            body,
            json!({
                "first_name": "Ada",
                "last_name": null,
                "country": "GB",
                "preferred_language": "en"
            })
        );
    }

    #[test]
    fn test_update_mode_serde() {
        assert_eq!(serde_json::to_string(&UpdateMode::Replace).unwrap(), "\"replace\"");
        let parsed: UpdateMode = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(parsed, UpdateMode::Partial);
    }
}
