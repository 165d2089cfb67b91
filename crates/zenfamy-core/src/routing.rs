//! Route selection from session presence.

use crate::auth::Session;

/// The two top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Unauthenticated: the login form
    Login,
    /// Authenticated: the profile view
    Profile,
}

impl Route {
    /// A session means the profile view, no session means login
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            Some(_) => Route::Profile,
            None => Route::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Profile => "User Profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_for_session() {
        assert_eq!(Route::for_session(None), Route::Login);

        let session = Session {
            access_token: "T1".to_string(),
            refresh_token: None,
            identity: None,
        };
        assert_eq!(Route::for_session(Some(&session)), Route::Profile);
    }
}
