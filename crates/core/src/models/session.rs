use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity service. Only the id is
/// load-bearing (it scopes remote rows); the e-mail is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session issued by the identity service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Where the tracker stands with respect to the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity service configured: local data is the user's own.
    LocalOnly,
    /// Identity service configured, session not checked yet.
    Unknown,
    SignedIn(Session),
    /// The user confirmed a sign-out (or the service reported one).
    SignedOut,
    /// The session check failed; cached data is kept but not shown.
    Unavailable(String),
}

impl SessionState {
    /// Whether transactions may be shown and edited.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::LocalOnly | SessionState::SignedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(s) => Some(s),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }
}

/// Session-change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
    /// Refreshing or checking the session failed; not a sign-out.
    CheckFailed(String),
}
