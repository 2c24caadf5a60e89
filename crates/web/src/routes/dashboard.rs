//! Dashboard route handler.
//!
//! Customers see counts of their own complaints and feedback; administrators
//! see backend KPIs, a category breakdown and the latest tickets.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use complaintdesk_core::activity::{self, ActivityItem, ActivityKind};
use complaintdesk_core::aggregate::{self, CategoryBreakdown, FeedbackCounts, TicketCounts};
use complaintdesk_core::{Page, Relative, Stats};
use tracing::instrument;

use crate::components::{Flash, Shell};
use crate::filters;
use crate::middleware::{RequireAuth, SessionContext};
use crate::routes::or_default;
use crate::state::AppState;

/// Items in the customer recent activity list.
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Feedback comments are cut to this many characters for titles.
const FEEDBACK_TITLE_CHARS: usize = 50;

/// Activity row for templates.
#[derive(Debug, Clone)]
pub struct RecentView {
    pub item: ActivityItem,
    pub when: String,
    /// Whether to offer "mark addressed".
    pub pending_feedback: bool,
}

impl RecentView {
    fn new(item: ActivityItem, granularity: Relative) -> Self {
        let when = item.created_at.relative_to(Utc::now(), granularity);
        let pending_feedback = item.kind == ActivityKind::Feedback && item.status == "pending";
        Self {
            item,
            when,
            pending_feedback,
        }
    }

    /// Whether the row is a complaint (links to its detail page).
    #[must_use]
    pub fn is_complaint(&self) -> bool {
        self.item.kind == ActivityKind::Complaint
    }
}

/// Customer dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/customer.html")]
pub struct CustomerDashboardTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub greeting: String,
    pub tickets: TicketCounts,
    pub feedback: FeedbackCounts,
    pub recent: Vec<RecentView>,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/admin.html")]
pub struct AdminDashboardTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub greeting: String,
    pub stats: Stats,
    /// Satisfaction score with one decimal.
    pub satisfaction: String,
    pub categories: Vec<CategoryBreakdown>,
    pub recent: Vec<RecentView>,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip(ctx, state, flash), fields(user_id = %ctx.user.id, role = %ctx.user.role))]
pub async fn index(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> Response {
    if ctx.user.role.is_admin() {
        admin(&ctx, &state, flash).await.into_response()
    } else {
        customer(&ctx, &state, flash).await.into_response()
    }
}

fn greeting(ctx: &SessionContext) -> String {
    format!("Welcome back, {}!", ctx.user.display_name())
}

async fn customer(
    ctx: &SessionContext,
    state: &AppState,
    flash: Flash,
) -> CustomerDashboardTemplate {
    let api = state.api();
    let (complaints, feedback) = tokio::join!(
        or_default("complaints", api.list_complaints(&ctx.token)),
        or_default("feedback", api.list_feedback(&ctx.token)),
    );

    let recent = activity::recent(
        &complaints,
        &feedback,
        FEEDBACK_TITLE_CHARS,
        RECENT_ACTIVITY_LIMIT,
    )
    .into_iter()
    .map(|item| RecentView::new(item, Relative::Days))
    .collect();

    CustomerDashboardTemplate {
        shell: Shell::new(&ctx.user, Page::Dashboard),
        flash,
        greeting: greeting(ctx),
        tickets: TicketCounts::from_complaints(&complaints),
        feedback: FeedbackCounts::from_feedback(&feedback),
        recent,
    }
}

async fn admin(ctx: &SessionContext, state: &AppState, flash: Flash) -> AdminDashboardTemplate {
    let api = state.api();
    let (stats, complaints, feedback) = tokio::join!(
        or_default("stats", api.stats(&ctx.token)),
        or_default("complaints", api.list_complaints(&ctx.token)),
        or_default("feedback", api.list_feedback(&ctx.token)),
    );

    let recent = aggregate::admin_recent(&complaints, &feedback)
        .into_iter()
        .map(|item| RecentView::new(item, Relative::Hours))
        .collect();

    AdminDashboardTemplate {
        shell: Shell::new(&ctx.user, Page::Dashboard),
        flash,
        greeting: greeting(ctx),
        satisfaction: format!("{:.1}", stats.customer_satisfaction),
        stats,
        categories: aggregate::category_breakdown(&complaints, &feedback),
        recent,
    }
}
