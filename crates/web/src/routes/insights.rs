//! Feedback insights: category distributions, sentiment, exports.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use complaintdesk_core::{CategoryCount, Insights, Page, export};
use tracing::instrument;

use crate::components::Shell;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{csv_download, or_default};
use crate::state::AppState;

/// Complaint categories listed under "Top Complaint Issues".
const TOP_ISSUES: usize = 5;

/// One row of a category chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBar {
    pub name: String,
    pub count: u64,
    /// Width of the bar relative to the largest bucket, 0-100.
    pub width: u64,
}

impl CategoryBar {
    fn from_counts(counts: &[CategoryCount]) -> Vec<Self> {
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
        counts
            .iter()
            .map(|c| Self {
                name: c.name().to_owned(),
                count: c.count,
                width: if max == 0 { 0 } else { c.count * 100 / max },
            })
            .collect()
    }
}

/// One sentiment bucket with its share of all rated feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentRow {
    pub key: &'static str,
    pub label: &'static str,
    pub count: u64,
    pub percent: u64,
}

/// View model shared by the page and the print report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsView {
    pub total_feedback: u64,
    pub sentiment: Vec<SentimentRow>,
    pub feedback_categories: Vec<CategoryBar>,
    pub top_issues: Vec<CategoryBar>,
}

impl From<&Insights> for InsightsView {
    fn from(insights: &Insights) -> Self {
        let s = insights.sentiment;
        let row = |key, label, count| SentimentRow {
            key,
            label,
            count,
            percent: s.percent(count),
        };

        let mut complaints = insights.category_distribution.complaints.clone();
        complaints.sort_by(|a, b| b.count.cmp(&a.count));
        complaints.truncate(TOP_ISSUES);

        Self {
            total_feedback: insights.total_feedback,
            sentiment: vec![
                row("positive", "Positive", s.positive),
                row("neutral", "Neutral", s.neutral),
                row("negative", "Negative", s.negative),
            ],
            feedback_categories: CategoryBar::from_counts(
                &insights.category_distribution.feedback,
            ),
            top_issues: CategoryBar::from_counts(&complaints),
        }
    }
}

/// Insights page template.
#[derive(Template, WebTemplate)]
#[template(path = "insights/index.html")]
pub struct InsightsTemplate {
    pub shell: Shell,
    pub insights: InsightsView,
}

/// Print-ready report template.
#[derive(Template, WebTemplate)]
#[template(path = "insights/print.html")]
pub struct InsightsPrintTemplate {
    pub insights: InsightsView,
    pub generated: String,
}

/// Feedback insights page.
///
/// GET /insights
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn index(RequireAuth(ctx): RequireAuth, State(state): State<AppState>) -> InsightsTemplate {
    let insights = or_default("insights", state.api().insights(&ctx.token)).await;
    InsightsTemplate {
        shell: Shell::new(&ctx.user, Page::Insights),
        insights: InsightsView::from(&insights),
    }
}

/// Insights summary as CSV.
///
/// GET /insights/export.csv
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn export(RequireAuth(ctx): RequireAuth, State(state): State<AppState>) -> Response {
    match state.api().insights(&ctx.token).await {
        Ok(insights) => csv_download("insights.csv", export::insights_csv(&insights)),
        Err(e) => {
            tracing::error!("Failed to export insights: {e}");
            (StatusCode::BAD_GATEWAY, "Failed to export insights").into_response()
        }
    }
}

/// "Insights Report" page that opens the print dialog on load.
///
/// GET /insights/print
#[instrument(skip(ctx, state), fields(user_id = %ctx.user.id))]
pub async fn print(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
) -> InsightsPrintTemplate {
    let insights = or_default("insights", state.api().insights(&ctx.token)).await;
    InsightsPrintTemplate {
        insights: InsightsView::from(&insights),
        generated: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}
