//! Timeline planner: tickets bucketed by the day they were filed.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use complaintdesk_core::filter::{ALL, TimelineFilter, choice, choice_text, departments};
use complaintdesk_core::timeline::group_by_date;
use complaintdesk_core::{Page, Priority};
use serde::Deserialize;
use tracing::instrument;

use crate::components::Shell;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::or_default;
use crate::routes::tickets::TicketRow;
use crate::state::AppState;

/// Query parameters of `/timeline`.
#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub department: Option<String>,
    pub priority: Option<String>,
}

impl TimelineQuery {
    fn filter(&self) -> TimelineFilter {
        TimelineFilter {
            department: choice_text(self.department.as_deref()),
            priority: choice(self.priority.as_deref()),
        }
    }
}

/// One day on the timeline.
#[derive(Debug, Clone)]
pub struct DayView {
    pub date: String,
    pub count_label: String,
    pub tickets: Vec<TicketRow>,
}

/// Timeline template.
#[derive(Template, WebTemplate)]
#[template(path = "timeline/index.html")]
pub struct TimelineTemplate {
    pub shell: Shell,
    pub days: Vec<DayView>,
    pub departments: Vec<String>,
    pub priorities: &'static [Priority],
    pub department: String,
    pub priority: String,
}

impl TimelineTemplate {
    #[must_use]
    pub fn is_department(&self, value: &str) -> bool {
        self.department == value
    }

    #[must_use]
    pub fn is_priority(&self, value: &str) -> bool {
        self.priority == value
    }
}

/// Timeline planner.
///
/// GET /timeline
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn index(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> TimelineTemplate {
    let complaints = or_default("complaints", state.api().list_complaints(&ctx.token)).await;
    let filter = query.filter();
    let shown = filter.apply(&complaints);

    let days = group_by_date(&shown)
        .into_iter()
        .map(|group| DayView {
            count_label: group.count_label(),
            tickets: group.tickets.iter().copied().map(TicketRow::from).collect(),
            date: group.date,
        })
        .collect();

    TimelineTemplate {
        shell: Shell::new(&ctx.user, Page::Timeline),
        days,
        departments: departments(&complaints),
        priorities: Priority::ALL,
        department: filter.department.unwrap_or_else(|| ALL.to_string()),
        priority: filter
            .priority
            .map_or(ALL, Priority::as_str)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_filter() {
        let query = TimelineQuery {
            department: Some("Finance".to_string()),
            priority: Some("all".to_string()),
        };
        let filter = query.filter();
        assert_eq!(filter.department.as_deref(), Some("Finance"));
        assert_eq!(filter.priority, None);
    }
}
