//! Ticket detail page with the per-ticket admin actions.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use complaintdesk_core::{Page, Priority, TicketStatus, aggregate};
use tracing::instrument;

use crate::components::{Flash, Shell};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::or_default;
use crate::state::AppState;

use super::types::{ASSIGN_DEPARTMENTS, TicketRow};

/// Ticket detail template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/detail.html")]
pub struct TicketDetailTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub ticket: TicketRow,
    pub staff: Vec<String>,
    pub assign_departments: &'static [&'static str],
    pub statuses: &'static [TicketStatus],
    pub priorities: &'static [Priority],
}

/// Ticket detail page.
///
/// GET /tickets/{id}
///
/// # Errors
///
/// Returns 404 when the backend does not know the ticket.
#[instrument(skip(ctx, state, flash), fields(user_id = %ctx.user.id))]
pub async fn show(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<Flash>,
) -> Result<TicketDetailTemplate> {
    let api = state.api();
    let (complaint, users) = tokio::join!(
        api.get_complaint(&ctx.token, &id),
        or_default("users", api.list_users(&ctx.token)),
    );
    let complaint = complaint?;

    Ok(TicketDetailTemplate {
        shell: Shell::new(&ctx.user, Page::Tickets),
        flash,
        ticket: TicketRow::from(&complaint),
        staff: aggregate::staff_names(&users),
        assign_departments: &ASSIGN_DEPARTMENTS,
        statuses: TicketStatus::ALL,
        priorities: Priority::ALL,
    })
}
