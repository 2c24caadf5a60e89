//! Complaint (ticket) records and the payloads that create and update them.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{ComplaintId, UserId};
use super::status::{Priority, TicketStatus};
use super::timestamp::Timestamp;

/// Category shown when a record has none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Lowest valid progress value.
pub const MIN_PROGRESS: i64 = 0;

/// Highest valid progress value; a resolved ticket reads this.
pub const MAX_PROGRESS: i64 = 100;

/// Clamp a requested progress value into `[0, 100]`.
#[must_use]
pub fn clamp_progress(value: i64) -> u8 {
    // Clamped to 0..=100, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.clamp(MIN_PROGRESS, MAX_PROGRESS) as u8;
    clamped
}

/// A complaint as returned by `GET /complaints`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "_id")]
    pub id: ComplaintId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default)]
    pub estimated_resolution: Option<String>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Complaint {
    /// Category, or [`DEFAULT_CATEGORY`] when unset or blank.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        non_blank(self.category.as_deref()).unwrap_or(DEFAULT_CATEGORY)
    }

    /// Assignee name, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        non_blank(self.assigned_to.as_deref())
    }

    /// Department, if any.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        non_blank(self.department.as_deref())
    }

    /// Progress as the UI should show it.
    ///
    /// Resolved tickets always read 100, whatever the stored value.
    #[must_use]
    pub fn display_progress(&self) -> u8 {
        if self.status == TicketStatus::Resolved {
            100
        } else {
            self.progress.min(100)
        }
    }
}

/// Accepts integers, floats and null, clamping into `[0, 100]`.
fn deserialize_progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    // Float-to-int casts saturate and map NaN to zero.
    #[allow(clippy::cast_possible_truncation)]
    let value = value.round() as i64;
    Ok(clamp_progress(value))
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Body of `POST /complaints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub anonymous: bool,
}

/// Body of `PUT /complaints/{id}`. Only set fields are sent.
///
/// Build it with the constructors so that the ticket invariants hold:
/// progress is always clamped, and a resolved status always carries
/// progress 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution: Option<String>,
}

impl ComplaintUpdate {
    /// Change status. Resolving also sets progress to 100.
    #[must_use]
    pub fn status(status: TicketStatus) -> Self {
        let progress = (status == TicketStatus::Resolved).then(|| clamp_progress(MAX_PROGRESS));
        Self {
            status: Some(status),
            progress,
            ..Self::default()
        }
    }

    /// Log progress, clamped into `[0, 100]`.
    #[must_use]
    pub fn progress(value: i64) -> Self {
        Self {
            progress: Some(clamp_progress(value)),
            ..Self::default()
        }
    }

    /// Change priority.
    #[must_use]
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Assign to a person and department.
    #[must_use]
    pub fn assign(assigned_to: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            assigned_to: Some(assigned_to.into()),
            department: Some(department.into()),
            ..Self::default()
        }
    }

    /// Whether nothing would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Actions that apply to every selected ticket at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Assign all to one person and department.
    Assign {
        assigned_to: String,
        department: String,
    },
    /// Move all to in-progress, leaving progress unchanged.
    MarkInProgress,
    /// Resolve all, setting progress to 100.
    MarkResolved,
    /// Raise all to high priority.
    PriorityHigh,
}

impl BulkAction {
    /// Parse the action key posted by the bulk action bar.
    ///
    /// `assign` needs the assignee and department fields.
    ///
    /// # Errors
    ///
    /// Returns a message naming the unknown key or the missing field.
    pub fn from_form(
        key: &str,
        assigned_to: Option<&str>,
        department: Option<&str>,
    ) -> Result<Self, String> {
        match key {
            "assign" => {
                let assigned_to = non_blank(assigned_to).ok_or("Select a staff member to assign")?;
                let department = non_blank(department).ok_or("Select a department to assign")?;
                Ok(Self::Assign {
                    assigned_to: assigned_to.to_owned(),
                    department: department.to_owned(),
                })
            }
            "status-progress" => Ok(Self::MarkInProgress),
            "status-resolved" => Ok(Self::MarkResolved),
            "priority-high" => Ok(Self::PriorityHigh),
            other => Err(format!("Unknown bulk action: {other}")),
        }
    }

    /// The update sent for each selected ticket.
    #[must_use]
    pub fn to_update(&self) -> ComplaintUpdate {
        match self {
            Self::Assign {
                assigned_to,
                department,
            } => ComplaintUpdate::assign(assigned_to.as_str(), department.as_str()),
            Self::MarkInProgress => ComplaintUpdate::status(TicketStatus::InProgress),
            Self::MarkResolved => ComplaintUpdate::status(TicketStatus::Resolved),
            Self::PriorityHigh => ComplaintUpdate::priority(Priority::High),
        }
    }

    /// Past-tense summary for the flash message.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "Assigned",
            Self::MarkInProgress => "Moved to in progress",
            Self::MarkResolved => "Resolved",
            Self::PriorityHigh => "Raised to high priority",
        }
    }
}
