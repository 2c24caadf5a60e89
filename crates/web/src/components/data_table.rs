//! Data table component types.
//!
//! These types describe the columns, filters and bulk actions of the list
//! views. Templates render them generically.

use complaintdesk_core::filter::{ALL, SortKey, TicketSort};
use complaintdesk_core::{Priority, Role, TicketStatus, UserStatus};

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Unique key for the column; the sort parameter for sortable columns.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Header link that sorts by this column.
    pub sort_href: Option<String>,
    /// Arrow shown on the active sort column.
    pub sort_indicator: &'static str,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            sortable: true,
            ..Self::new(key, label)
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            sort_href: None,
            sort_indicator: "",
        }
    }
}

/// Option for select filters.
#[derive(Debug, Clone)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// The leading "all" option.
    #[must_use]
    pub fn all(label: &str) -> Self {
        Self::new(ALL, label)
    }
}

/// Select filter definition for a data table.
#[derive(Debug, Clone)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Available options, "all" first.
    pub options: Vec<FilterOption>,
    /// Currently selected value.
    pub selected: String,
}

impl TableFilter {
    /// Create a select filter with "all" selected.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options,
            selected: ALL.to_string(),
        }
    }
}

/// Bulk action definition for data tables.
#[derive(Debug, Clone)]
pub struct BulkAction {
    /// Action key, posted as `action`.
    pub key: String,
    /// Display label.
    pub label: String,
}

impl BulkAction {
    /// Create a new bulk action.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Bulk action definitions.
    pub bulk_actions: Vec<BulkAction>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            bulk_actions: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state text.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Mark the selected value of each filter from `(key, value)` pairs.
    /// Values not among a filter's options are ignored.
    #[must_use]
    pub fn selected(mut self, values: &[(&str, Option<&str>)]) -> Self {
        for filter in &mut self.filters {
            let chosen = values
                .iter()
                .find(|(key, _)| *key == filter.key)
                .and_then(|(_, value)| *value)
                .filter(|value| filter.options.iter().any(|o| o.value == *value));
            if let Some(value) = chosen {
                filter.selected = value.to_string();
            }
        }
        self
    }

    /// Fill in header sort links. `preserve` is the already-encoded query of
    /// the current filters.
    #[must_use]
    pub fn sort_links(mut self, current: TicketSort, preserve: &str) -> Self {
        for column in self.columns.iter_mut().filter(|c| c.sortable) {
            let is_current = column.key == current.key.as_str();
            let next_dir = if is_current && current.descending {
                "asc"
            } else {
                "desc"
            };
            let separator = if preserve.is_empty() { "" } else { "&" };
            column.sort_href = Some(format!(
                "?{preserve}{separator}sort={}&dir={next_dir}",
                column.key
            ));
            column.sort_indicator = match (is_current, current.descending) {
                (false, _) => "",
                (true, true) => "\u{2193}",
                (true, false) => "\u{2191}",
            };
        }
        self
    }
}

fn ticket_status_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All statuses"))
        .chain(
            TicketStatus::ALL
                .iter()
                .map(|s| FilterOption::new(s.as_str(), s.label())),
        )
        .collect()
}

fn priority_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All priorities"))
        .chain(Priority::ALL.iter().map(|p| FilterOption::new(p.as_str(), p.label())))
        .collect()
}

/// Build the Complaint Center table configuration.
#[must_use]
pub fn tickets_table_config(departments: &[String]) -> DataTableConfig {
    let department_options = std::iter::once(FilterOption::all("All departments"))
        .chain(departments.iter().map(|d| FilterOption::new(d, d)))
        .collect();

    DataTableConfig::new("tickets")
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::sortable(SortKey::Title.as_str(), "Title"))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::sortable(SortKey::Priority.as_str(), "Priority"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("assigned_to", "Assigned To"))
        .column(TableColumn::sortable(SortKey::Progress.as_str(), "Progress"))
        .column(TableColumn::sortable(SortKey::Created.as_str(), "Created"))
        .filter(TableFilter::select("status", "Status", ticket_status_options()))
        .filter(TableFilter::select("priority", "Priority", priority_options()))
        .filter(TableFilter::select(
            "department",
            "Department",
            department_options,
        ))
        .bulk_action(BulkAction::new("assign", "Assign"))
        .bulk_action(BulkAction::new("status-progress", "Mark In Progress"))
        .bulk_action(BulkAction::new("status-resolved", "Mark Resolved"))
        .bulk_action(BulkAction::new("priority-high", "Set High Priority"))
        .search_placeholder("Search by title or ticket ID...")
        .empty_state(
            "No tickets found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the user management table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    let role_options = std::iter::once(FilterOption::all("All roles"))
        .chain(Role::ALL.iter().map(|r| FilterOption::new(r.as_str(), r.label())))
        .collect();
    let status_options = std::iter::once(FilterOption::all("All statuses"))
        .chain(
            UserStatus::ALL
                .iter()
                .map(|s| FilterOption::new(s.as_str(), s.label())),
        )
        .collect();

    DataTableConfig::new("users")
        .column(TableColumn::new("name", "User"))
        .column(TableColumn::new("role", "Role"))
        .column(TableColumn::new("department", "Department"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("tickets", "Tickets"))
        .column(TableColumn::new("last_login", "Last Login"))
        .filter(TableFilter::select("role", "Role", role_options))
        .filter(TableFilter::select("status", "Status", status_options))
        .search_placeholder("Search by name, email or ID...")
        .empty_state("No users found", Some("Try adjusting your search or filters"))
}
