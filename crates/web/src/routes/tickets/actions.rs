//! Single ticket action handlers.
//!
//! Each action sends one `PUT /complaints/{id}` and redirects back to the
//! ticket with a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use complaintdesk_core::validation::parse_progress;
use complaintdesk_core::{BulkAction, ComplaintUpdate, Page, Priority, TicketStatus};
use serde::Deserialize;
use tracing::instrument;

use crate::components::Shell;
use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, SessionContext};
use crate::routes::{redirect_error, redirect_success};
use crate::state::AppState;

use super::types::TicketRow;

const UPDATE_FAILED: &str = "Failed to update ticket. Please try again.";
const DELETE_FAILED: &str = "Failed to delete ticket. Please try again.";

// =============================================================================
// Input Types
// =============================================================================

/// Input for logging progress.
#[derive(Debug, Deserialize)]
pub struct ProgressInput {
    /// Percentage; clamped into 0-100.
    pub progress: String,
}

/// Input for assigning a ticket.
#[derive(Debug, Deserialize)]
pub struct AssignInput {
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub department: String,
}

/// Input for changing status.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: TicketStatus,
}

/// Input for changing priority.
#[derive(Debug, Deserialize)]
pub struct PriorityInput {
    pub priority: Priority,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/delete.html")]
pub struct TicketDeleteTemplate {
    pub shell: Shell,
    pub ticket: TicketRow,
}

/// Path of a ticket's detail page.
pub(super) fn detail_path(id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{}/{encoded}", Page::Tickets.path())
}

async fn apply(
    state: &AppState,
    ctx: &SessionContext,
    id: &str,
    update: &ComplaintUpdate,
    done: &str,
) -> Redirect {
    let back = detail_path(id);
    match state.api().update_complaint(&ctx.token, id, update).await {
        Ok(_) => {
            tracing::info!(complaint_id = %id, ?update, "Ticket updated");
            redirect_success(&back, done)
        }
        Err(e) => {
            tracing::warn!(complaint_id = %id, error = %e, "Ticket update failed");
            redirect_error(&back, &e.user_message(UPDATE_FAILED))
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Log progress on a ticket.
///
/// POST /tickets/{id}/progress
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn progress(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ProgressInput>,
) -> Redirect {
    let value = match parse_progress(&input.progress) {
        Ok(value) => value,
        Err(e) => return redirect_error(&detail_path(&id), &e.to_string()),
    };

    let update = ComplaintUpdate::progress(i64::from(value));
    apply(&state, &ctx, &id, &update, &format!("Progress updated to {value}%")).await
}

/// Assign a ticket to a staff member and department.
///
/// POST /tickets/{id}/assign
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn assign(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<AssignInput>,
) -> Redirect {
    let action = match BulkAction::from_form(
        "assign",
        Some(input.assigned_to.as_str()),
        Some(input.department.as_str()),
    ) {
        Ok(action) => action,
        Err(message) => return redirect_error(&detail_path(&id), &message),
    };

    let done = format!("Assigned to {}", input.assigned_to.trim());
    apply(&state, &ctx, &id, &action.to_update(), &done).await
}

/// Change a ticket's status. Resolving also sets progress to 100.
///
/// POST /tickets/{id}/status
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn status(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<StatusInput>,
) -> Redirect {
    let update = ComplaintUpdate::status(input.status);
    let done = format!("Status changed to {}", input.status.label());
    apply(&state, &ctx, &id, &update, &done).await
}

/// Change a ticket's priority.
///
/// POST /tickets/{id}/priority
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn priority(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<PriorityInput>,
) -> Redirect {
    let update = ComplaintUpdate::priority(input.priority);
    let done = format!("Priority changed to {}", input.priority.label());
    apply(&state, &ctx, &id, &update, &done).await
}

/// Ask before deleting.
///
/// GET /tickets/{id}/delete
///
/// # Errors
///
/// Returns 404 when the backend does not know the ticket.
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn confirm_delete(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<TicketDeleteTemplate> {
    let complaint = state.api().get_complaint(&ctx.token, &id).await?;
    Ok(TicketDeleteTemplate {
        shell: Shell::new(&ctx.user, Page::Tickets),
        ticket: TicketRow::from(&complaint),
    })
}

/// Delete a ticket.
///
/// POST /tickets/{id}/delete
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn delete(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match state.api().delete_complaint(&ctx.token, &id).await {
        Ok(()) => {
            tracing::info!(complaint_id = %id, "Ticket deleted");
            redirect_success(Page::Tickets.path(), "Complaint deleted")
        }
        Err(e) => {
            tracing::warn!(complaint_id = %id, error = %e, "Ticket delete failed");
            redirect_error(&detail_path(&id), &e.user_message(DELETE_FAILED))
        }
    }
}
