//! CSV export of the Complaint Center view.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use complaintdesk_core::export;
use tracing::instrument;

use crate::middleware::RequireAuth;
use crate::routes::csv_download;
use crate::state::AppState;

use super::list::visible;
use super::types::TicketsQuery;

/// Download the filtered, sorted complaints.
///
/// Takes the same query as the list page, so the file holds exactly the
/// rows on screen.
///
/// GET /tickets/export.csv
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn export(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<TicketsQuery>,
) -> Response {
    match state.api().list_complaints(&ctx.token).await {
        Ok(complaints) => {
            let rows = visible(&complaints, &query);
            tracing::info!(rows = rows.len(), "Exporting complaints");
            csv_download("complaints.csv", export::complaints_csv(&rows))
        }
        Err(e) => {
            tracing::error!("Failed to export complaints: {e}");
            (StatusCode::BAD_GATEWAY, "Failed to export complaints").into_response()
        }
    }
}
