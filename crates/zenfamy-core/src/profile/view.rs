use tracing::{debug, info, warn};

use crate::auth::SessionManager;
use crate::models::UserProfile;

use super::update::{build_update_body, ProfileDraft, ProfileField, UpdateMode};
use super::{FetchError, SaveError};

/// Fetch the signed-in user.
///
/// Fails with `FetchError::MissingToken` before any request when there is no
/// session.
pub async fn load_profile(session: &SessionManager) -> Result<UserProfile, FetchError> {
    let api = session.authorized_api().ok_or(FetchError::MissingToken)?;
    let profile = api.fetch_current_user().await?;
    debug!(user_id = ?profile.id, "Profile fetched");
    Ok(profile)
}

/// Send `edited` as the new profile, then re-fetch it so server-side
/// normalization shows up in the result.
pub async fn save_profile(
    session: &SessionManager,
    edited: &UserProfile,
    mode: UpdateMode,
) -> Result<UserProfile, SaveError> {
    let api = session.authorized_api().ok_or(SaveError::MissingToken)?;
    let body = build_update_body(edited, mode);
    api.update_current_user(&body).await?;
    info!(user_id = ?edited.id, ?mode, "Profile updated");

    load_profile(session).await.map_err(SaveError::Reload)
}

/// Read-only or editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ReadOnly,
    Editing,
}

/// State of the profile view for one visit: the last fetched profile, the
/// draft while editing, and the inline error line.
#[derive(Debug, Default)]
pub struct ProfileView {
    profile: Option<UserProfile>,
    draft: Option<ProfileDraft>,
    pub focus: Option<ProfileField>,
    error: Option<String>,
    loading: bool,
}

impl ProfileView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.draft.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> ViewMode {
        if self.draft.is_some() {
            ViewMode::Editing
        } else {
            ViewMode::ReadOnly
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == ViewMode::Editing
    }

    /// Switch to editing. Needs a loaded profile; returns whether it switched.
    pub fn begin_edit(&mut self) -> bool {
        match self.profile {
            Some(ref profile) => {
                self.draft = Some(ProfileDraft::from_profile(profile));
                self.focus = Some(ProfileField::FirstName);
                self.error = None;
                true
            }
            None => false,
        }
    }

    /// Drop the draft and go back to read-only
    pub fn cancel_edit(&mut self) {
        self.draft = None;
        self.focus = None;
        self.error = None;
    }

    /// Text buffer of the focused field while editing
    pub fn focused_buffer_mut(&mut self) -> Option<&mut String> {
        let field = self.focus?;
        self.draft.as_mut().map(|d| d.get_mut(field))
    }

    pub fn focus_next(&mut self) {
        if let Some(field) = self.focus {
            self.focus = Some(field.next());
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(field) = self.focus {
            self.focus = Some(field.prev());
        }
    }

    /// Forget everything, e.g. after logout
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fetch and replace the profile wholesale. On failure the previous
    /// profile stays and the error is shown inline.
    pub async fn load(&mut self, session: &SessionManager) -> Result<(), FetchError> {
        self.loading = true;
        let result = load_profile(session).await;
        self.loading = false;

        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load profile");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Save the draft. On success the reconciled profile replaces the old
    /// one and the view goes back to read-only. On a rejected update the
    /// draft is kept and the error is shown inline.
    pub async fn save(&mut self, session: &SessionManager, mode: UpdateMode) -> Result<(), SaveError> {
        let (profile, draft) = match (&self.profile, &self.draft) {
            (Some(profile), Some(draft)) => (profile, draft),
            _ => return Err(SaveError::NotLoaded),
        };
        let edited = draft.apply_to(profile);

        match save_profile(session, &edited, mode).await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.cancel_edit();
                Ok(())
            }
            Err(SaveError::Reload(e)) => {
                // Update already accepted; nothing left to retry in the draft
                warn!(error = %e, "Profile saved but reload failed");
                self.cancel_edit();
                self.error = Some(e.to_string());
                Err(SaveError::Reload(e))
            }
            Err(e) => {
                warn!(error = %e, "Failed to save profile");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
