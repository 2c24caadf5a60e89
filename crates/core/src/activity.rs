//! One list of a customer's complaints and feedback.
//!
//! The user portal shows both record kinds side by side (ticket list, recent
//! activity). [`ActivityItem`] is the common projection both are mapped into.

use serde::Serialize;

use crate::types::{Complaint, Feedback, Priority, Timestamp};

/// Which record an [`ActivityItem`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Complaint,
    Feedback,
}

impl ActivityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Feedback => "feedback",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complaint => "Complaint",
            Self::Feedback => "Feedback",
        }
    }
}

/// A complaint or feedback record, flattened for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub category: String,
    /// Wire status, e.g. `in-progress` or `addressed`.
    pub status: String,
    /// Human status, e.g. `In Progress`.
    pub status_label: String,
    pub priority: Option<Priority>,
    pub rating: Option<u8>,
    pub progress: Option<u8>,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActivityItem {
    /// Project a complaint.
    #[must_use]
    pub fn from_complaint(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id.to_string(),
            kind: ActivityKind::Complaint,
            title: complaint.title.clone(),
            category: complaint.category_or_default().to_owned(),
            status: complaint.status.as_str().to_owned(),
            status_label: complaint.status.label().to_owned(),
            priority: Some(complaint.priority),
            rating: None,
            progress: Some(complaint.display_progress()),
            description: complaint.description.clone().unwrap_or_default(),
            created_at: complaint.created_at.clone(),
            updated_at: complaint.updated_at.clone(),
        }
    }

    /// Project a feedback record; its title is the comments cut to
    /// `title_chars` characters.
    #[must_use]
    pub fn from_feedback(feedback: &Feedback, title_chars: usize) -> Self {
        let status = feedback.status.as_str();
        let mut status_label = status.to_owned();
        if let Some(first) = status_label.get_mut(..1) {
            first.make_ascii_uppercase();
        }

        Self {
            id: feedback.id.to_string(),
            kind: ActivityKind::Feedback,
            title: feedback.title(title_chars),
            category: feedback.category_or("General").to_owned(),
            status: status.to_owned(),
            status_label,
            priority: None,
            rating: feedback.rating,
            progress: None,
            description: feedback.comments.clone().unwrap_or_default(),
            created_at: feedback.created_at.clone(),
            updated_at: feedback.updated_at.clone(),
        }
    }
}

/// Complaints first, then feedback, in backend order.
#[must_use]
pub fn merge(
    complaints: &[Complaint],
    feedback: &[Feedback],
    feedback_title_chars: usize,
) -> Vec<ActivityItem> {
    complaints
        .iter()
        .map(ActivityItem::from_complaint)
        .chain(
            feedback
                .iter()
                .map(|f| ActivityItem::from_feedback(f, feedback_title_chars)),
        )
        .collect()
}

/// The `limit` most recent items across both kinds, newest first.
#[must_use]
pub fn recent(
    complaints: &[Complaint],
    feedback: &[Feedback],
    feedback_title_chars: usize,
    limit: usize,
) -> Vec<ActivityItem> {
    let mut items = merge(complaints, feedback, feedback_title_chars);
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}
