//! Dashboard counters and breakdowns computed from fetched collections.

use std::collections::HashMap;

use crate::activity::ActivityItem;
use crate::types::{
    Complaint, DEFAULT_CATEGORY, Feedback, FeedbackStatus, Role, TicketStatus, User, UserStatus,
};

/// Complaint counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl TicketCounts {
    #[must_use]
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        complaints.iter().fold(Self::default(), |mut acc, c| {
            acc.total += 1;
            match c.status {
                TicketStatus::Open => acc.open += 1,
                TicketStatus::InProgress => acc.in_progress += 1,
                TicketStatus::Resolved => acc.resolved += 1,
            }
            acc
        })
    }
}

/// Feedback counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackCounts {
    pub total: usize,
    pub pending: usize,
    pub addressed: usize,
}

impl FeedbackCounts {
    #[must_use]
    pub fn from_feedback(feedback: &[Feedback]) -> Self {
        feedback.iter().fold(Self::default(), |mut acc, f| {
            acc.total += 1;
            match f.status {
                FeedbackStatus::Pending => acc.pending += 1,
                FeedbackStatus::Addressed => acc.addressed += 1,
            }
            acc
        })
    }
}

/// Complaints and feedback filed under one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub complaints: usize,
    pub feedback: usize,
}

impl CategoryBreakdown {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.complaints + self.feedback
    }
}

/// Per-category counts across both kinds, largest first, ties by name.
/// Records without a category count as "Other".
#[must_use]
pub fn category_breakdown(complaints: &[Complaint], feedback: &[Feedback]) -> Vec<CategoryBreakdown> {
    let mut map: HashMap<&str, (usize, usize)> = HashMap::new();
    for complaint in complaints {
        map.entry(complaint.category_or_default()).or_default().0 += 1;
    }
    for item in feedback {
        map.entry(item.category_or(DEFAULT_CATEGORY)).or_default().1 += 1;
    }

    let mut rows: Vec<CategoryBreakdown> = map
        .into_iter()
        .map(|(category, (complaints, feedback))| CategoryBreakdown {
            category: category.to_owned(),
            complaints,
            feedback,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total()
            .cmp(&a.total())
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// Complaints shown in the admin activity feed.
pub const ADMIN_RECENT_COMPLAINTS: usize = 3;

/// Feedback records shown in the admin activity feed.
pub const ADMIN_RECENT_FEEDBACK: usize = 1;

/// Admin activity feed: the first few complaints then the first feedback,
/// in backend order.
#[must_use]
pub fn admin_recent(complaints: &[Complaint], feedback: &[Feedback]) -> Vec<ActivityItem> {
    complaints
        .iter()
        .take(ADMIN_RECENT_COMPLAINTS)
        .map(ActivityItem::from_complaint)
        .chain(
            feedback
                .iter()
                .take(ADMIN_RECENT_FEEDBACK)
                .map(|f| ActivityItem::from_feedback(f, 50)),
        )
        .collect()
}

/// User counts by role and status for the user management header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub total: usize,
    pub customers: usize,
    pub staff: usize,
    pub admins: usize,
    pub active: usize,
    pub inactive: usize,
    pub suspended: usize,
}

impl UserCounts {
    #[must_use]
    pub fn from_users(users: &[User]) -> Self {
        users.iter().fold(Self::default(), |mut acc, u| {
            acc.total += 1;
            match u.role {
                Role::Customer => acc.customers += 1,
                Role::Staff => acc.staff += 1,
                Role::Admin => acc.admins += 1,
            }
            match u.status {
                UserStatus::Active => acc.active += 1,
                UserStatus::Inactive => acc.inactive += 1,
                UserStatus::Suspended => acc.suspended += 1,
            }
            acc
        })
    }
}

/// Names of staff members, for the assignee dropdown.
#[must_use]
pub fn staff_names(users: &[User]) -> Vec<String> {
    let mut names: Vec<String> = users
        .iter()
        .filter(|u| u.role == Role::Staff && u.status == UserStatus::Active)
        .map(|u| u.name.clone())
        .filter(|n| !n.trim().is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn complaints(values: Vec<Value>) -> Vec<Complaint> {
        serde_json::from_value(Value::Array(values)).unwrap()
    }

    fn feedback(values: Vec<Value>) -> Vec<Feedback> {
        serde_json::from_value(Value::Array(values)).unwrap()
    }

    #[test]
    fn test_ticket_counts() {
        let list = complaints(vec![
            json!({"_id": "1", "status": "open"}),
            json!({"_id": "2", "status": "open"}),
            json!({"_id": "3", "status": "in-progress"}),
            json!({"_id": "4", "status": "resolved"}),
        ]);
        let counts = TicketCounts::from_complaints(&list);
        assert_eq!(
            counts,
            TicketCounts {
                total: 4,
                open: 2,
                in_progress: 1,
                resolved: 1
            }
        );
    }

    #[test]
    fn test_feedback_counts() {
        let list = feedback(vec![
            json!({"_id": "1", "status": "pending"}),
            json!({"_id": "2", "status": "addressed"}),
        ]);
        let counts = FeedbackCounts::from_feedback(&list);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.addressed, 1);
    }

    #[test]
    fn test_category_breakdown_defaults_to_other() {
        let c = complaints(vec![
            json!({"_id": "1", "category": "Billing"}),
            json!({"_id": "2", "category": null}),
            json!({"_id": "3", "category": "Billing"}),
        ]);
        let f = feedback(vec![
            json!({"_id": "f1", "category": "Billing"}),
            json!({"_id": "f2"}),
        ]);

        let rows = category_breakdown(&c, &f);
        assert_eq!(
            rows,
            vec![
                CategoryBreakdown {
                    category: "Billing".to_string(),
                    complaints: 2,
                    feedback: 1
                },
                CategoryBreakdown {
                    category: "Other".to_string(),
                    complaints: 1,
                    feedback: 1
                },
            ]
        );
    }

    #[test]
    fn test_admin_recent_takes_three_and_one() {
        let c = complaints(
            (0..5)
                .map(|i| json!({"_id": format!("c{i}"), "title": "t"}))
                .collect(),
        );
        let f = feedback(vec![
            json!({"_id": "f1", "comments": "first"}),
            json!({"_id": "f2", "comments": "second"}),
        ]);

        let items = admin_recent(&c, &f);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2", "f1"]);
    }

    #[test]
    fn test_user_counts_and_staff_names() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": "1", "name": "Ann", "email": "a@x.io", "role": "user"},
            {"id": "2", "name": "Bo", "email": "b@x.io", "role": "staff"},
            {"id": "3", "name": "Cy", "email": "c@x.io", "role": "staff", "status": "suspended"},
            {"id": "4", "name": "Di", "email": "d@x.io", "role": "admin"}
        ]))
        .unwrap();

        let counts = UserCounts::from_users(&users);
        assert_eq!(counts.customers, 1);
        assert_eq!(counts.staff, 2);
        assert_eq!(counts.suspended, 1);
        assert_eq!(staff_names(&users), vec!["Bo"]);
    }
}
