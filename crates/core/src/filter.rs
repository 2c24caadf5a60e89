//! Search, filter and sort over fetched collections.
//!
//! Text search is a case-insensitive substring match; categorical filters are
//! equality matches where `None` stands for the "all" option. Filtering never
//! reorders or invents records: the result is always a subsequence of the input.

use std::str::FromStr;

use crate::activity::{ActivityItem, ActivityKind};
use crate::types::{Complaint, Priority, Role, TicketStatus, User, UserStatus};

/// Value of the "all" option in filter dropdowns.
pub const ALL: &str = "all";

/// Parse a dropdown value, mapping empty, `"all"` and unknown values to `None`.
#[must_use]
pub fn choice<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != ALL)
        .and_then(|s| s.parse().ok())
}

/// Like [`choice`] for free-form values such as department names.
#[must_use]
pub fn choice_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != ALL)
        .map(str::to_owned)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Admin ticket filter: search over title or id, plus status, priority and
/// department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: String,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
}

impl TicketFilter {
    /// Whether a complaint passes every active criterion.
    #[must_use]
    pub fn matches(&self, complaint: &Complaint) -> bool {
        let needle = self.search.to_lowercase();
        let search_ok = needle.is_empty()
            || contains_ci(&complaint.title, &needle)
            || contains_ci(complaint.id.as_str(), &needle);

        search_ok
            && self.status.is_none_or(|s| complaint.status == s)
            && self.priority.is_none_or(|p| complaint.priority == p)
            && self
                .department
                .as_deref()
                .is_none_or(|d| complaint.department.as_deref() == Some(d))
    }

    /// Matching complaints, in input order.
    #[must_use]
    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        complaints.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Column a ticket list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Created,
    Priority,
    Progress,
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::Created),
            "priority" => Ok(Self::Priority),
            "progress" => Ok(Self::Progress),
            "title" => Ok(Self::Title),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created_at",
            Self::Priority => "priority",
            Self::Progress => "progress",
            Self::Title => "title",
        }
    }
}

/// Sort order. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSort {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for TicketSort {
    fn default() -> Self {
        Self {
            key: SortKey::Created,
            descending: true,
        }
    }
}

impl TicketSort {
    /// From `sort` and `dir` query values; unknown values fall back to the default.
    #[must_use]
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let Some(key) = sort.and_then(|s| s.parse().ok()) else {
            return Self::default();
        };
        Self {
            key,
            descending: dir != Some("asc"),
        }
    }

    /// Stable sort in place.
    pub fn sort(&self, complaints: &mut [&Complaint]) {
        complaints.sort_by(|a, b| {
            let ordering = match self.key {
                SortKey::Created => a.created_at.cmp(&b.created_at),
                SortKey::Priority => a.priority.cmp(&b.priority),
                SortKey::Progress => a.display_progress().cmp(&b.display_progress()),
                SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            };
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

/// Which record kinds the customer ticket list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Complaints,
    Feedback,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "complaints" => Ok(Self::Complaints),
            "feedback" => Ok(Self::Feedback),
            _ => Err(format!("invalid tab: {s}")),
        }
    }
}

impl Tab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Complaints => "complaints",
            Self::Feedback => "feedback",
        }
    }
}

/// Customer ticket filter: search over title or category, a status that may
/// be a ticket or a feedback status, and a tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub search: String,
    pub status: Option<String>,
    pub tab: Tab,
}

impl ActivityFilter {
    #[must_use]
    pub fn matches(&self, item: &ActivityItem) -> bool {
        let needle = self.search.to_lowercase();
        let search_ok = needle.is_empty()
            || contains_ci(&item.title, &needle)
            || contains_ci(&item.category, &needle);

        let tab_ok = match self.tab {
            Tab::All => true,
            Tab::Complaints => item.kind == ActivityKind::Complaint,
            Tab::Feedback => item.kind == ActivityKind::Feedback,
        };

        search_ok && tab_ok && self.status.as_deref().is_none_or(|s| item.status == s)
    }

    #[must_use]
    pub fn apply<'a>(&self, items: &'a [ActivityItem]) -> Vec<&'a ActivityItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Admin user filter: search over name, email or id, plus role and status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.to_lowercase();
        let search_ok = needle.is_empty()
            || contains_ci(&user.name, &needle)
            || contains_ci(user.email.as_str(), &needle)
            || contains_ci(user.id.as_str(), &needle);

        search_ok
            && self.role.is_none_or(|r| user.role == r)
            && self.status.is_none_or(|s| user.status == s)
    }

    #[must_use]
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Timeline filter: department and priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    pub department: Option<String>,
    pub priority: Option<Priority>,
}

impl TimelineFilter {
    #[must_use]
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.priority.is_none_or(|p| complaint.priority == p)
            && self
                .department
                .as_deref()
                .is_none_or(|d| complaint.department.as_deref() == Some(d))
    }

    #[must_use]
    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        complaints.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct non-empty departments across complaints, sorted.
#[must_use]
pub fn departments(complaints: &[Complaint]) -> Vec<String> {
    let mut departments: Vec<String> = complaints
        .iter()
        .filter_map(Complaint::department)
        .map(str::to_owned)
        .collect();
    departments.sort();
    departments.dedup();
    departments
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Feedback;

    fn ticket(id: &str, title: &str, status: &str, priority: &str, dept: Option<&str>) -> Complaint {
        serde_json::from_value(json!({
            "_id": id,
            "title": title,
            "status": status,
            "priority": priority,
            "department": dept,
            "created_at": format!("2025-10-{:02}T10:00:00Z", id.len() + 10)
        }))
        .unwrap()
    }

    fn sample() -> Vec<Complaint> {
        vec![
            ticket("a1", "Refund missing", "open", "high", Some("Billing")),
            ticket("b22", "Late parcel", "in-progress", "medium", Some("Logistics")),
            ticket("c333", "Rude agent", "resolved", "low", None),
            ticket("d4444", "Refund partial", "resolved", "high", Some("Billing")),
        ]
    }

    fn is_subsequence(result: &[&Complaint], all: &[Complaint]) -> bool {
        let mut iter = all.iter();
        result.iter().all(|r| iter.any(|c| c == *r))
    }

    #[test]
    fn test_choice_maps_all_to_none() {
        assert_eq!(choice::<TicketStatus>(Some("all")), None);
        assert_eq!(choice::<TicketStatus>(Some("")), None);
        assert_eq!(choice::<TicketStatus>(None), None);
        assert_eq!(choice::<TicketStatus>(Some("bogus")), None);
        assert_eq!(
            choice::<TicketStatus>(Some("in-progress")),
            Some(TicketStatus::InProgress)
        );
    }

    #[test]
    fn test_status_filter_only_keeps_matching_status() {
        let tickets = sample();
        for status in TicketStatus::ALL {
            let filter = TicketFilter {
                status: Some(*status),
                ..TicketFilter::default()
            };
            let result = filter.apply(&tickets);
            assert!(result.iter().all(|t| t.status == *status));
            assert!(is_subsequence(&result, &tickets));
        }
    }

    #[test]
    fn test_search_matches_title_or_id_case_insensitively() {
        let tickets = sample();
        for query in ["REFUND", "b22", "agent", "zzz", "A"] {
            let filter = TicketFilter {
                search: query.to_string(),
                ..TicketFilter::default()
            };
            let result = filter.apply(&tickets);
            let needle = query.to_lowercase();
            assert!(is_subsequence(&result, &tickets));
            assert!(result.iter().all(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.id.as_str().to_lowercase().contains(&needle)
            }));
        }

        let filter = TicketFilter {
            search: "REFUND".to_string(),
            ..TicketFilter::default()
        };
        assert_eq!(filter.apply(&tickets).len(), 2);
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let tickets = vec![
            ticket("a1", "box", "open", "low", None),
            ticket("b22", "fix now", "open", "low", None),
            ticket("c333", " late", "open", "low", None),
        ];
        for query in ["x ", " l", "X N", "  "] {
            let filter = TicketFilter {
                search: query.to_string(),
                ..TicketFilter::default()
            };
            let result = filter.apply(&tickets);
            let needle = query.to_lowercase();
            assert!(is_subsequence(&result, &tickets));
            assert!(result.iter().all(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.id.as_str().to_lowercase().contains(&needle)
            }));
        }

        let filter = TicketFilter {
            search: "x ".to_string(),
            ..TicketFilter::default()
        };
        let ids: Vec<&str> = filter.apply(&tickets).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b22"]);
    }

    #[test]
    fn test_user_and_activity_search_keep_whitespace() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": "u1", "name": "Sam Lee", "email": "sam@example.com", "role": "staff"},
            {"id": "u2", "name": "Samantha", "email": "sa@example.com", "role": "customer"}
        ]))
        .unwrap();
        let filter = UserFilter {
            search: "sam ".to_string(),
            ..UserFilter::default()
        };
        let names: Vec<&str> = filter.apply(&users).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Sam Lee"]);

        let items = crate::activity::merge(&sample(), &[], 100);
        let filter = ActivityFilter {
            search: "refund ".to_string(),
            ..ActivityFilter::default()
        };
        assert_eq!(filter.apply(&items).len(), 2);
        let filter = ActivityFilter {
            search: " refund".to_string(),
            ..ActivityFilter::default()
        };
        assert!(filter.apply(&items).is_empty());
    }

    #[test]
    fn test_combined_filters() {
        let tickets = sample();
        let filter = TicketFilter {
            search: "refund".to_string(),
            status: Some(TicketStatus::Resolved),
            priority: Some(Priority::High),
            department: Some("Billing".to_string()),
        };
        let result = filter.apply(&tickets);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "d4444");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let tickets = sample();
        assert_eq!(TicketFilter::default().apply(&tickets).len(), tickets.len());
    }

    #[test]
    fn test_sort_default_newest_first() {
        let tickets = sample();
        let mut refs: Vec<&Complaint> = tickets.iter().collect();
        TicketSort::default().sort(&mut refs);
        assert_eq!(refs[0].id.as_str(), "d4444");
        assert_eq!(refs[3].id.as_str(), "a1");
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let tickets = sample();
        let mut refs: Vec<&Complaint> = tickets.iter().collect();
        TicketSort::from_params(Some("title"), Some("asc")).sort(&mut refs);
        let titles: Vec<&str> = refs.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Late parcel", "Refund missing", "Refund partial", "Rude agent"]
        );
    }

    #[test]
    fn test_sort_unknown_key_falls_back() {
        assert_eq!(
            TicketSort::from_params(Some("nope"), Some("asc")),
            TicketSort::default()
        );
    }

    #[test]
    fn test_activity_filter_tab_and_status() {
        let feedback: Feedback = serde_json::from_value(json!({
            "_id": "f1", "category": "Refunds", "comments": "ok", "status": "pending"
        }))
        .unwrap();
        let items = crate::activity::merge(&sample(), &[feedback], 100);

        let filter = ActivityFilter {
            tab: Tab::Feedback,
            ..ActivityFilter::default()
        };
        assert_eq!(filter.apply(&items).len(), 1);

        let filter = ActivityFilter {
            status: Some("resolved".to_string()),
            ..ActivityFilter::default()
        };
        assert_eq!(filter.apply(&items).len(), 2);

        let filter = ActivityFilter {
            search: "refund".to_string(),
            ..ActivityFilter::default()
        };
        // Two complaint titles plus the feedback category.
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn test_timeline_filter() {
        let tickets = sample();
        let filter = TimelineFilter {
            department: Some("Billing".to_string()),
            priority: Some(Priority::High),
        };
        assert_eq!(filter.apply(&tickets).len(), 2);
    }

    #[test]
    fn test_departments_are_distinct_and_sorted() {
        assert_eq!(departments(&sample()), vec!["Billing", "Logistics"]);
    }
}
