//! Feedback status handler.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use complaintdesk_core::{FeedbackStatus, FeedbackUpdate, Page};
use tracing::instrument;

use crate::middleware::RequireAuth;
use crate::routes::{redirect_error, redirect_success};
use crate::state::AppState;

/// Mark a feedback record as addressed.
///
/// POST /feedback/{id}/status
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn update_status(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let update = FeedbackUpdate {
        status: FeedbackStatus::Addressed,
    };
    let back = Page::Dashboard.path();

    match state.api().update_feedback(&ctx.token, &id, &update).await {
        Ok(_) => {
            tracing::info!(feedback_id = %id, "Feedback marked addressed");
            redirect_success(back, "Feedback marked as addressed")
        }
        Err(e) => {
            tracing::warn!(feedback_id = %id, error = %e, "Feedback update failed");
            redirect_error(
                back,
                &e.user_message("Failed to update feedback. Please try again."),
            )
        }
    }
}
