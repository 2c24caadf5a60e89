//! User accounts and the auth payloads exchanged with the backend.

use serde::{Deserialize, Serialize};

use super::complaint::non_blank;
use super::email::Email;
use super::id::UserId;
use super::status::{Role, UserStatus};
use super::timestamp::Timestamp;

/// Department shown when a user has none.
pub const DEFAULT_DEPARTMENT: &str = "N/A";

/// A user as returned by `/auth/*` and `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub department: Option<String>,
    pub status: UserStatus,
    pub created_at: Option<Timestamp>,
    pub last_login: Option<Timestamp>,
    pub tickets_submitted: Option<u32>,
    pub tickets_resolved: Option<u32>,
}

/// Wire shape: the auth endpoints send `id`, the admin listing sends both
/// `id` and `_id`.
#[derive(Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default, rename = "_id")]
    object_id: Option<UserId>,
    #[serde(default)]
    name: String,
    email: Email,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    status: UserStatus,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    last_login: Option<Timestamp>,
    #[serde(default)]
    tickets_submitted: Option<u32>,
    #[serde(default)]
    tickets_resolved: Option<u32>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire.id.or(wire.object_id).unwrap_or_default(),
            name: wire.name,
            email: wire.email,
            role: wire.role,
            department: wire.department,
            status: wire.status,
            created_at: wire.created_at,
            last_login: wire.last_login,
            tickets_submitted: wire.tickets_submitted,
            tickets_resolved: wire.tickets_resolved,
        }
    }
}

impl User {
    /// Department, or `"N/A"`.
    #[must_use]
    pub fn department_or_default(&self) -> &str {
        non_blank(self.department.as_deref()).unwrap_or(DEFAULT_DEPARTMENT)
    }

    /// Last login date, or `"Never"`.
    #[must_use]
    pub fn last_login_display(&self) -> String {
        self.last_login
            .as_ref()
            .map_or_else(|| "Never".to_string(), Timestamp::display_date)
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
    pub department: String,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /admin/users`.
#[derive(Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
    pub department: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .field("message", &self.message)
            .finish()
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("department", &self.department)
            .finish()
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("department", &self.department)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_auth_user() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "user"
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.department_or_default(), "N/A");
        assert_eq!(user.last_login_display(), "Never");
    }

    #[test]
    fn test_deserialize_admin_listing_with_both_ids() {
        let user: User = serde_json::from_value(json!({
            "_id": "u2",
            "id": "u2",
            "name": "Sam",
            "email": "sam@example.com",
            "role": "staff",
            "department": "Support",
            "status": "suspended",
            "last_login": null,
            "tickets_submitted": 3,
            "tickets_resolved": 7
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "u2");
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.status, UserStatus::Suspended);
        assert_eq!(user.tickets_resolved, Some(7));
    }

    #[test]
    fn test_deserialize_underscore_id_only() {
        let user: User =
            serde_json::from_value(json!({"_id": "u3", "email": "x@example.com"})).unwrap();
        assert_eq!(user.id.as_str(), "u3");
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let request = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "hunter2-but-longer".to_string(),
        };
        let debug_output = format!("{request:?}");
        assert!(debug_output.contains("ada@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-but-longer"));
    }

    #[test]
    fn test_register_request_shape() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            password: "Sup3r$ecret".to_string(),
            role: Role::Admin,
            department: Role::Admin.registration_department().to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "Sup3r$ecret",
                "role": "admin",
                "department": "Administration"
            })
        );
    }
}
