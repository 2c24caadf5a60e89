//! Query parameters and view types for the ticket pages.

use complaintdesk_core::filter::{
    self, ActivityFilter, Tab, TicketFilter, TicketSort, choice, choice_text,
};
use complaintdesk_core::{Complaint, Page, Priority, TicketStatus};
use serde::Deserialize;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters of `/tickets` and `/tickets/export.csv`.
#[derive(Debug, Default, Deserialize)]
pub struct TicketsQuery {
    /// Free-text search.
    pub search: Option<String>,
    /// Status filter (`all` or a status).
    pub status: Option<String>,
    /// Priority filter (admin).
    pub priority: Option<String>,
    /// Department filter (admin).
    pub department: Option<String>,
    /// Sort column key (admin).
    pub sort: Option<String>,
    /// Sort direction (asc/desc).
    pub dir: Option<String>,
    /// Record kind tab (customer).
    pub tab: Option<String>,
}

impl TicketsQuery {
    fn search_text(&self) -> String {
        self.search.clone().unwrap_or_default()
    }

    /// Admin ticket filter.
    #[must_use]
    pub fn ticket_filter(&self) -> TicketFilter {
        TicketFilter {
            search: self.search_text(),
            status: choice(self.status.as_deref()),
            priority: choice(self.priority.as_deref()),
            department: choice_text(self.department.as_deref()),
        }
    }

    /// Admin sort order.
    #[must_use]
    pub fn sort(&self) -> TicketSort {
        TicketSort::from_params(self.sort.as_deref(), self.dir.as_deref())
    }

    /// Customer list filter.
    #[must_use]
    pub fn activity_filter(&self) -> ActivityFilter {
        ActivityFilter {
            search: self.search_text(),
            status: choice_text(self.status.as_deref()),
            tab: choice(self.tab.as_deref()).unwrap_or_default(),
        }
    }

    /// Encoded filter parameters to carry over into sort and export links.
    ///
    /// Sort and direction are left out; links set them explicitly.
    #[must_use]
    pub fn preserve_params(&self) -> String {
        let mut params = url::form_urlencoded::Serializer::new(String::new());
        let filter = self.ticket_filter();
        if !filter.search.is_empty() {
            params.append_pair("search", &filter.search);
        }
        if let Some(status) = filter.status {
            params.append_pair("status", status.as_str());
        }
        if let Some(priority) = filter.priority {
            params.append_pair("priority", priority.as_str());
        }
        if let Some(department) = &filter.department {
            params.append_pair("department", department);
        }
        params.finish()
    }

    /// Query string (with leading `?`) that reproduces the current
    /// Complaint Center view, or empty for the default view.
    #[must_use]
    pub fn view_query(&self) -> String {
        let mut params = url::form_urlencoded::Serializer::new(self.preserve_params());
        if self.sort.is_some() {
            let sort = self.sort();
            params
                .append_pair("sort", sort.key.as_str())
                .append_pair("dir", if sort.descending { "desc" } else { "asc" });
        }
        let query = params.finish();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    /// The Complaint Center with the current filters and sort.
    #[must_use]
    pub fn list_href(&self) -> String {
        format!("{}{}", Page::Tickets.path(), self.view_query())
    }

    /// Link to the CSV export of exactly what is on screen.
    #[must_use]
    pub fn export_href(&self) -> String {
        let sort = self.sort();
        let preserve = self.preserve_params();
        let separator = if preserve.is_empty() { "" } else { "&" };
        format!(
            "/tickets/export.csv?{preserve}{separator}sort={}&dir={}",
            sort.key.as_str(),
            if sort.descending { "desc" } else { "asc" }
        )
    }
}

/// Departments a ticket can be assigned to.
pub const ASSIGN_DEPARTMENTS: [&str; 4] = ["Technical", "Operations", "Customer Service", "Finance"];

/// Assignable departments plus any others already present on tickets.
#[must_use]
pub fn department_options(complaints: &[Complaint]) -> Vec<String> {
    let mut departments: Vec<String> = ASSIGN_DEPARTMENTS.iter().map(|d| (*d).to_owned()).collect();
    departments.extend(filter::departments(complaints));
    departments.sort();
    departments.dedup();
    departments
}

/// Customer status dropdown: ticket statuses then feedback statuses.
pub const CUSTOMER_STATUS_OPTIONS: [(&str, &str); 6] = [
    ("all", "All statuses"),
    ("open", "Open"),
    ("in-progress", "In Progress"),
    ("resolved", "Resolved"),
    ("pending", "Pending"),
    ("addressed", "Addressed"),
];

/// Customer tab with its item count.
#[derive(Debug, Clone)]
pub struct TabView {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
    /// Link to the tab, keeping the search and status filter.
    pub href: String,
}

impl TabView {
    #[must_use]
    pub fn new(tab: Tab, count: usize, filter: &ActivityFilter) -> Self {
        let label = match tab {
            Tab::All => "All",
            Tab::Complaints => "Complaints",
            Tab::Feedback => "Feedback",
        };
        let mut params = url::form_urlencoded::Serializer::new(String::new());
        params.append_pair("tab", tab.as_str());
        if !filter.search.is_empty() {
            params.append_pair("search", &filter.search);
        }
        if let Some(status) = &filter.status {
            params.append_pair("status", status);
        }
        Self {
            key: tab.as_str(),
            label,
            count,
            active: tab == filter.tab,
            href: format!("{}?{}", Page::Tickets.path(), params.finish()),
        }
    }
}

// =============================================================================
// Row Views
// =============================================================================

/// Ticket row for the Complaint Center table and the detail page.
#[derive(Debug, Clone)]
pub struct TicketRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub assignee: String,
    pub department: String,
    pub progress: u8,
    pub anonymous: bool,
    pub estimated_resolution: Option<String>,
    pub created: String,
    pub updated: String,
}

impl From<&Complaint> for TicketRow {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id.to_string(),
            title: complaint.title.clone(),
            description: complaint.description.clone().unwrap_or_default(),
            category: complaint.category_or_default().to_owned(),
            priority: complaint.priority,
            status: complaint.status,
            assignee: complaint.assignee().unwrap_or("Unassigned").to_owned(),
            department: complaint.department().unwrap_or("N/A").to_owned(),
            progress: complaint.display_progress(),
            anonymous: complaint.anonymous,
            estimated_resolution: complaint.estimated_resolution.clone(),
            created: complaint.created_at.display_date(),
            updated: complaint.updated_at.display_datetime(),
        }
    }
}

impl TicketRow {
    /// Whether the ticket can still be moved forward.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == TicketStatus::Resolved
    }

    /// Template helper for preselecting the assignee dropdown.
    #[must_use]
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assignee == name
    }

    /// Template helper for preselecting the department dropdown.
    #[must_use]
    pub fn is_department(&self, name: &str) -> bool {
        self.department == name
    }
}
