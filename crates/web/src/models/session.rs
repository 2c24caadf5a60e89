//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use complaintdesk_core::{Email, Role, User, UserId};

/// Session-stored user identity.
///
/// The profile returned by the backend at login, refreshed once per session
/// from `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub department: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            department: user.department_or_default().to_owned(),
        }
    }
}

impl SessionUser {
    /// Name for greetings; the email when the backend sent no name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.as_str()
        } else {
            &self.name
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the logged-in user's profile.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the backend bearer token.
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Key set once the stored profile has been checked against `/auth/me`.
    pub const VERIFIED: &str = "profile_verified";
}
