//! Application state management for zenfamy.
//!
//! This module contains the `App` struct that owns the session manager, the
//! current route, the login form and the profile view.

use std::io::{self, Write};

use anyhow::Result;
use tracing::{debug, error, info, warn};

use zenfamy_core::auth::SessionManager;
use zenfamy_core::profile::ViewMode;
use zenfamy_core::{ApiClient, AuthError, Config, ProfileView, Route};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for an editable profile field
const MAX_FIELD_LENGTH: usize = 64;

/// Env var pre-filling the login email
const EMAIL_ENV: &str = "ZENFAMY_EMAIL";

/// Env var pre-filling the login password
const PASSWORD_ENV: &str = "ZENFAMY_PASSWORD";

// ============================================================================
// UI State Types
// ============================================================================

/// Overlay state on top of the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Button,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
        }
    }
}

/// How a status bar message is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
}

/// Transient message on the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: SessionManager,

    // Navigation
    pub route: Route,
    pub state: AppState,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Profile view state
    pub profile: ProfileView,

    // Status message
    pub status_message: Option<StatusMessage>,
}

impl App {
    /// Create a new application instance and read the stored session
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(storage = ?config.storage, update_mode = ?config.update_mode, "Config loaded");

        let data_dir = config.data_dir()?;
        let store = config.storage.open(&data_dir);
        let api = ApiClient::new(&config.api_base_url(), config.request_timeout())?;

        let mut session = SessionManager::new(api, store);
        debug!(base_url = session.api().base_url(), "API client configured");
        if let Err(e) = session.init() {
            warn!(error = %e, "Failed to read stored session");
        }

        // Get credentials from env vars or config
        let login_email = std::env::var(EMAIL_ENV)
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        let login_password = std::env::var(PASSWORD_ENV).unwrap_or_default();

        let route = Route::for_session(session.check_session());

        Ok(Self {
            config,
            session,
            route,
            state: AppState::Normal,
            login_email,
            login_password,
            login_focus: LoginFocus::Email,
            login_error: None,
            profile: ProfileView::new(),
            status_message: None,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch route and run its on-mount work
    pub async fn navigate(&mut self, route: Route) {
        debug!(?route, "Navigating");
        self.route = route;
        match route {
            Route::Login => self.start_login(),
            Route::Profile => {
                self.profile.reset();
                self.load_profile().await;
            }
        }
    }

    /// Re-check the session and go wherever it points
    pub async fn route_from_session(&mut self) {
        let route = Route::for_session(self.session.check_session());
        self.navigate(route).await;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Interactive login on the plain terminal (`--login`)
    pub async fn login_interactive(&mut self) -> Result<()> {
        println!("\n=== Zenfamy Login ===\n");

        let email = match self.config.last_email.clone() {
            Some(last) => {
                print!("Email [{}]: ", last);
                io::stdout().flush()?;
                let input = Self::read_line()?;
                if input.is_empty() {
                    last
                } else {
                    input
                }
            }
            None => {
                print!("Email: ");
                io::stdout().flush()?;
                Self::read_line()?
            }
        };

        let password = rpassword::prompt_password("Password: ")?;

        println!("\nAuthenticating...");
        self.session.login(&email, &password).await?;
        self.remember_email(&email);

        println!("Login successful!\n");
        Ok(())
    }

    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn remember_email(&mut self, email: &str) {
        self.config.last_email = Some(email.trim().to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<(), AuthError> {
        let email = self.login_email.clone();
        let password = self.login_password.clone();
        self.login_error = None;

        let result = self.session.login(&email, &password).await.map(|_| ());
        match result {
            Ok(()) => {
                self.remember_email(&email);
                self.login_password.clear();
                info!("Login successful");
                self.navigate(Route::Profile).await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Show the login form
    pub fn start_login(&mut self) {
        self.route = Route::Login;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// End the session and return to the login form
    pub async fn logout(&mut self) {
        self.session.logout();
        self.profile.reset();
        self.status_message = Some(StatusMessage::info("Logged out"));
        self.route_from_session().await;
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Fetch the profile; failures end up in the view's inline error
    pub async fn load_profile(&mut self) {
        let _ = self.profile.load(&self.session).await;
        self.status_message = None;
    }

    pub fn begin_edit(&mut self) {
        if !self.profile.begin_edit() {
            self.status_message = Some(StatusMessage::info("Profile not loaded yet"));
        }
    }

    /// Drop the edits and re-fetch the server's copy
    pub async fn cancel_edit(&mut self) {
        self.profile.cancel_edit();
        self.load_profile().await;
    }

    /// Save the draft; on failure the draft stays and the error shows inline
    pub async fn save_profile(&mut self) {
        let mode = self.config.update_mode;
        if self.profile.save(&self.session, mode).await.is_ok() {
            self.status_message = Some(StatusMessage::success("Profile saved"));
        }
    }

    pub fn is_editing(&self) -> bool {
        self.profile.mode() == ViewMode::Editing
    }

    /// Identity for the status bar
    pub fn signed_in_as(&self) -> Option<String> {
        self.session
            .is_authenticated()
            .then(|| self.session.identity().unwrap_or("unknown user").to_string())
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a profile field character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_focus_next() {
        assert_eq!(LoginFocus::Email.next(), LoginFocus::Password);
        assert_eq!(LoginFocus::Password.next(), LoginFocus::Button);
        assert_eq!(LoginFocus::Button.next(), LoginFocus::Email); // Wraps around
    }

    #[test]
    fn test_login_focus_prev() {
        assert_eq!(LoginFocus::Email.prev(), LoginFocus::Button); // Wraps around
        assert_eq!(LoginFocus::Button.prev(), LoginFocus::Password);
        assert_eq!(LoginFocus::Password.prev(), LoginFocus::Email);
    }

    #[test]
    fn test_status_message_kind() {
        let saved = StatusMessage::success("Saved!");
        assert_eq!(saved.kind, StatusKind::Success);
        assert_eq!(saved.text, "Saved!");
        assert_eq!(StatusMessage::info("Profile saved").kind, StatusKind::Info);
    }

    #[test]
    fn test_can_add_email_char() {
        assert!(can_add_email_char(0, 'a'));
        assert!(can_add_email_char(0, '@'));
        assert!(can_add_email_char(253, 'z'));
        // Exceeds max length
        assert!(!can_add_email_char(254, 'a'));
        // Control characters and spaces rejected
        assert!(!can_add_email_char(0, '\x00'));
        assert!(!can_add_email_char(0, '\n'));
        assert!(!can_add_email_char(0, ' '));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(0, ' '));
        assert!(can_add_password_char(127, '!'));
        // Exceeds max length
        assert!(!can_add_password_char(128, 'a'));
        // Control characters rejected
        assert!(!can_add_password_char(0, '\x00'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(0, 'é'));
        assert!(can_add_field_char(63, 'x'));
        assert!(!can_add_field_char(64, 'x'));
        assert!(!can_add_field_char(0, '\t'));
    }
}
