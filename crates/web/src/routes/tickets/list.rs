//! Ticket list handler: "My Tickets" for the user portal, the Complaint
//! Center for administrators.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use complaintdesk_core::activity::{self, ActivityItem};
use complaintdesk_core::aggregate;
use complaintdesk_core::filter::Tab;
use complaintdesk_core::{Complaint, Page};
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, tickets_table_config};
use crate::components::{Flash, Shell};
use crate::filters;
use crate::middleware::{RequireAuth, SessionContext};
use crate::routes::or_default;
use crate::state::AppState;

use super::types::{
    ASSIGN_DEPARTMENTS, CUSTOMER_STATUS_OPTIONS, TabView, TicketRow, TicketsQuery,
    department_options,
};

/// Feedback comments are cut to this many characters for list titles.
const FEEDBACK_TITLE_CHARS: usize = 100;

/// Customer ticket list template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/customer.html")]
pub struct CustomerTicketsTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub items: Vec<ActivityItem>,
    pub tabs: Vec<TabView>,
    pub tab: &'static str,
    pub search: String,
    pub status: String,
    pub status_options: &'static [(&'static str, &'static str)],
}

impl CustomerTicketsTemplate {
    /// Template helper for preselecting the status dropdown.
    #[must_use]
    pub fn is_status(&self, value: &str) -> bool {
        self.status == value
    }
}

/// Complaint Center template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/admin.html")]
pub struct AdminTicketsTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub table: DataTableConfig,
    pub rows: Vec<TicketRow>,
    pub search: String,
    pub total: usize,
    pub staff: Vec<String>,
    pub assign_departments: &'static [&'static str],
    pub export_href: String,
    /// Current filters and sort, carried through bulk actions.
    pub view_query: String,
}

/// Ticket list page handler.
///
/// GET /tickets
#[instrument(skip(ctx, state, flash), fields(user_id = %ctx.user.id, role = %ctx.user.role))]
pub async fn index(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<TicketsQuery>,
    Query(flash): Query<Flash>,
) -> Response {
    if ctx.user.role.is_admin() {
        admin(&ctx, &state, &query, flash).await.into_response()
    } else {
        customer(&ctx, &state, &query, flash).await.into_response()
    }
}

async fn customer(
    ctx: &SessionContext,
    state: &AppState,
    query: &TicketsQuery,
    flash: Flash,
) -> CustomerTicketsTemplate {
    let api = state.api();
    let (complaints, feedback) = tokio::join!(
        or_default("complaints", api.list_complaints(&ctx.token)),
        or_default("feedback", api.list_feedback(&ctx.token)),
    );

    let all = activity::merge(&complaints, &feedback, FEEDBACK_TITLE_CHARS);
    let filter = query.activity_filter();
    let items: Vec<ActivityItem> = filter.apply(&all).into_iter().cloned().collect();

    let tabs = vec![
        TabView::new(Tab::All, all.len(), &filter),
        TabView::new(Tab::Complaints, complaints.len(), &filter),
        TabView::new(Tab::Feedback, feedback.len(), &filter),
    ];

    CustomerTicketsTemplate {
        shell: Shell::new(&ctx.user, Page::Tickets),
        flash,
        items,
        tabs,
        tab: filter.tab.as_str(),
        search: filter.search,
        status: filter.status.unwrap_or_else(|| "all".to_string()),
        status_options: &CUSTOMER_STATUS_OPTIONS,
    }
}

/// Filtered and sorted complaints, as shown and as exported.
pub(super) fn visible<'a>(complaints: &'a [Complaint], query: &TicketsQuery) -> Vec<&'a Complaint> {
    let mut visible = query.ticket_filter().apply(complaints);
    query.sort().sort(&mut visible);
    visible
}

async fn admin(
    ctx: &SessionContext,
    state: &AppState,
    query: &TicketsQuery,
    flash: Flash,
) -> AdminTicketsTemplate {
    let api = state.api();
    let (complaints, users) = tokio::join!(
        or_default("complaints", api.list_complaints(&ctx.token)),
        or_default("users", api.list_users(&ctx.token)),
    );

    let rows: Vec<TicketRow> = visible(&complaints, query)
        .into_iter()
        .map(TicketRow::from)
        .collect();

    let table = tickets_table_config(&department_options(&complaints))
        .selected(&[
            ("status", query.status.as_deref()),
            ("priority", query.priority.as_deref()),
            ("department", query.department.as_deref()),
        ])
        .sort_links(query.sort(), &query.preserve_params());

    tracing::debug!(total = complaints.len(), shown = rows.len(), "Complaint Center rendered");

    AdminTicketsTemplate {
        shell: Shell::new(&ctx.user, Page::Tickets),
        flash,
        table,
        rows,
        search: query.ticket_filter().search,
        total: complaints.len(),
        staff: aggregate::staff_names(&users),
        assign_departments: &ASSIGN_DEPARTMENTS,
        export_href: query.export_href(),
        view_query: query.view_query(),
    }
}
