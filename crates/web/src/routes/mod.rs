//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Redirect to dashboard or login
//!
//! # Auth
//! GET  /auth/login                    - Login page
//! POST /auth/login                    - Sign in
//! GET  /auth/register                 - Registration page
//! POST /auth/register                 - Create account and sign in
//! POST /auth/logout                   - Sign out
//!
//! Every group below is gated by its row in `PAGE_ACCESS`.
//!
//! # Any role
//! GET  /dashboard                     - Dashboard (customer or admin variant)
//! GET  /tickets                       - My Tickets / Complaint Center
//!
//! # User portal
//! GET  /submit                        - Complaint and feedback forms
//! POST /submit/complaint              - File a complaint
//! POST /submit/feedback               - Leave feedback
//!
//! # Admin
//! GET  /tickets/export.csv            - Filtered complaints as CSV
//! POST /tickets/bulk                  - Bulk action on selected tickets
//! GET  /tickets/{id}                  - Ticket detail with actions
//! POST /tickets/{id}/progress         - Log progress
//! POST /tickets/{id}/assign           - Assign
//! POST /tickets/{id}/status           - Change status
//! POST /tickets/{id}/priority         - Change priority
//! GET  /tickets/{id}/delete           - Delete confirmation
//! POST /tickets/{id}/delete           - Delete
//! POST /feedback/{id}/status          - Mark feedback addressed
//! GET  /insights                      - Feedback insights
//! GET  /insights/export.csv           - Insights summary as CSV
//! GET  /insights/print                - Print-ready report
//! GET  /users                         - User management
//! POST /users                         - Create user
//! GET  /timeline                      - Timeline planner
//! ```

use std::future::Future;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use complaintdesk_core::Page;

use crate::api::ApiError;
use crate::middleware::{OptionalAuth, require_page};
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod insights;
pub mod submit;
pub mod tickets;
pub mod timeline;
pub mod users;

/// Build the page router.
///
/// Each group is wrapped in [`require_page`] for the page it belongs to, so
/// who may reach a route is decided by `PAGE_ACCESS` alone.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(auth::router())
        .merge(gated(
            Page::Dashboard,
            Router::new().route("/dashboard", get(dashboard::index)),
        ))
        .merge(gated(
            Page::Tickets,
            Router::new().route("/tickets", get(tickets::index)),
        ))
        .merge(gated(
            Page::Submit,
            Router::new()
                .route("/submit", get(submit::index))
                .route("/submit/complaint", post(submit::complaint))
                .route("/submit/feedback", post(submit::feedback)),
        ))
        .merge(gated(
            Page::TicketManagement,
            Router::new()
                .route("/tickets/export.csv", get(tickets::export))
                .route("/tickets/bulk", post(tickets::bulk))
                .route("/tickets/{id}", get(tickets::show))
                .route("/tickets/{id}/progress", post(tickets::progress))
                .route("/tickets/{id}/assign", post(tickets::assign))
                .route("/tickets/{id}/status", post(tickets::status))
                .route("/tickets/{id}/priority", post(tickets::priority))
                .route(
                    "/tickets/{id}/delete",
                    get(tickets::confirm_delete).post(tickets::delete),
                ),
        ))
        .merge(gated(
            Page::FeedbackReview,
            Router::new().route("/feedback/{id}/status", post(feedback::update_status)),
        ))
        .merge(gated(
            Page::Insights,
            Router::new()
                .route("/insights", get(insights::index))
                .route("/insights/export.csv", get(insights::export))
                .route("/insights/print", get(insights::print)),
        ))
        .merge(gated(
            Page::Users,
            Router::new().route("/users", get(users::index).post(users::create)),
        ))
        .merge(gated(
            Page::Timeline,
            Router::new().route("/timeline", get(timeline::index)),
        ))
}

/// Gate every route in `router` on the access rule for `page`.
fn gated(page: Page, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(axum::middleware::from_fn(move |request: Request, next: Next| {
        require_page(page, request, next)
    }))
}

/// Send signed-in users to their dashboard and everyone else to login.
///
/// GET /
async fn index(OptionalAuth(user): OptionalAuth) -> Redirect {
    match user {
        Some(_) => Redirect::to(Page::Dashboard.path()),
        None => Redirect::to(Page::Login.path()),
    }
}

/// Await a backend read; on failure log it and use the empty value.
pub(crate) async fn or_default<T, F>(what: &'static str, read: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, ApiError>>,
{
    match read.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch {what}, showing empty");
            T::default()
        }
    }
}

/// Redirect to `path` with a flash message in the query string.
fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!("{path}{separator}{query}"))
}

/// Post/redirect/get with a success flash.
pub(crate) fn redirect_success(path: &str, message: &str) -> Redirect {
    redirect_with(path, "success", message)
}

/// Post/redirect/get with an error flash.
pub(crate) fn redirect_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

/// CSV file download.
pub(crate) fn csv_download(filename: &str, csv: String) -> Response {
    (
        StatusCode::OK,
        [
            ("Content-Type", "text/csv; charset=utf-8"),
            (
                "Content-Disposition",
                &format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}
