//! Role, priority and status enums shared by tickets, feedback and users.
//!
//! Every enum serializes to the exact lowercase string the backend uses and
//! parses back from it via `FromStr`, so the same values round-trip through
//! JSON bodies, form posts and query strings.

use serde::{Deserialize, Serialize};

/// Implements `Display`, `FromStr` and `as_str` for a unit enum from a table
/// of `Variant => "wire"` pairs.
macro_rules! wire_enum {
    ($name:ident, $what:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire value as sent to and received from the backend.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", $what, ": {}"), s)),
                }
            }
        }
    };
}

/// Account role.
///
/// The backend stores customers as `"user"`; that value is accepted as an
/// alias and always written back as `"customer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End customer filing complaints and feedback.
    #[default]
    #[serde(alias = "user")]
    Customer,
    /// Support staff member tickets get assigned to.
    Staff,
    /// Administrator with access to the admin panel.
    Admin,
}

wire_enum!(Role, "role", {
    Customer => "customer",
    Staff => "staff",
    Admin => "admin",
});

impl Role {
    /// Whether this role uses the admin panel rather than the user portal.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Capitalized label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Staff => "Staff",
            Self::Admin => "Admin",
        }
    }

    /// Department sent on self-registration.
    #[must_use]
    pub const fn registration_department(self) -> &'static str {
        match self {
            Self::Admin => "Administration",
            Self::Customer | Self::Staff => "N/A",
        }
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

wire_enum!(UserStatus, "user status", {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
});

impl UserStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
        }
    }
}

/// Ticket priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

wire_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Priority {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Ticket lifecycle status: open, then in-progress, then resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

wire_enum!(TicketStatus, "ticket status", {
    Open => "open",
    InProgress => "in-progress",
    Resolved => "resolved",
});

impl TicketStatus {
    /// Human label, e.g. "In Progress".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

/// Feedback lifecycle status: pending, then addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Addressed,
}

wire_enum!(FeedbackStatus, "feedback status", {
    Pending => "pending",
    Addressed => "addressed",
});
