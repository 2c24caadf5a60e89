//! Complaint and feedback submission (user portal only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use complaintdesk_core::validation::{ComplaintInput, FeedbackInput};
use complaintdesk_core::{Page, Priority, rating_label};
use serde::Deserialize;
use tracing::instrument;

use crate::components::{Flash, Shell};
use crate::filters;
use crate::middleware::{RequireAuth, SessionContext};
use crate::state::AppState;

const COMPLAINT_FAILED: &str = "Failed to submit complaint. Please try again.";
const FEEDBACK_FAILED: &str = "Failed to submit feedback. Please try again.";

/// Complaint categories as `(value, label)`.
pub const COMPLAINT_CATEGORIES: [(&str, &str); 6] = [
    ("billing", "Billing & Payment"),
    ("service", "Service Quality"),
    ("delivery", "Delivery Issues"),
    ("technical", "Technical Problems"),
    ("staff", "Staff Behavior"),
    ("other", "Other"),
];

/// Feedback categories as `(value, label)`.
pub const FEEDBACK_CATEGORIES: [(&str, &str); 6] = [
    ("service", "Service Quality"),
    ("product", "Product Quality"),
    ("website", "Website/App Experience"),
    ("staff", "Staff Performance"),
    ("delivery", "Delivery Experience"),
    ("general", "General Experience"),
];

/// Which form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    #[default]
    Complaint,
    Feedback,
}

impl SubmitKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Feedback => "feedback",
        }
    }

    /// Label next to the id of a new record.
    #[must_use]
    pub const fn id_label(self) -> &'static str {
        match self {
            Self::Complaint => "Ticket ID:",
            Self::Feedback => "Feedback ID:",
        }
    }
}

/// Query string of the submit page.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuery {
    #[serde(default)]
    pub kind: SubmitKind,
    /// Id of the record just created.
    pub submitted: Option<String>,
}

/// Rating choice for the feedback form.
#[derive(Debug, Clone)]
pub struct RatingOption {
    pub value: u8,
    pub label: &'static str,
}

/// Values echoed back into the forms after a failed post.
#[derive(Debug, Clone, Default)]
pub struct SubmitForms {
    pub complaint: ComplaintInput,
    pub feedback: FeedbackInput,
}

/// Submit page template.
#[derive(Template, WebTemplate)]
#[template(path = "submit/index.html")]
pub struct SubmitTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub kind: SubmitKind,
    pub submitted: Option<String>,
    pub forms: SubmitForms,
    pub complaint_categories: &'static [(&'static str, &'static str)],
    pub feedback_categories: &'static [(&'static str, &'static str)],
    pub priorities: &'static [Priority],
    pub ratings: Vec<RatingOption>,
}

impl SubmitTemplate {
    fn new(ctx: &SessionContext, kind: SubmitKind, flash: Flash, forms: SubmitForms) -> Self {
        Self {
            shell: Shell::new(&ctx.user, Page::Submit),
            flash,
            kind,
            submitted: None,
            forms,
            complaint_categories: &COMPLAINT_CATEGORIES,
            feedback_categories: &FEEDBACK_CATEGORIES,
            priorities: Priority::ALL,
            ratings: (1..=5)
                .rev()
                .map(|value| RatingOption {
                    value,
                    label: rating_label(value),
                })
                .collect(),
        }
    }

    /// Whether `value` is the currently selected option of `field`.
    #[must_use]
    pub fn is_selected(&self, field: &str, value: &str) -> bool {
        let current = match field {
            "complaint_category" => self.forms.complaint.category.as_str(),
            "priority" => self.forms.complaint.priority.as_str(),
            "feedback_category" => self.forms.feedback.category.as_str(),
            "rating" => self.forms.feedback.rating.as_str(),
            _ => "",
        };
        current == value
    }
}

/// Submit page.
///
/// GET /submit
#[instrument(skip(ctx), fields(user_id = %ctx.user.id))]
pub async fn index(RequireAuth(ctx): RequireAuth, Query(query): Query<SubmitQuery>) -> Response {
    let mut template = SubmitTemplate::new(&ctx, query.kind, Flash::default(), SubmitForms::default());
    template.submitted = query.submitted.filter(|id| !id.is_empty());
    template.into_response()
}

fn submitted(kind: SubmitKind, id: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("kind", kind.as_str())
        .append_pair("submitted", id)
        .finish();
    Redirect::to(&format!("{}?{query}", Page::Submit.path()))
}

/// File a complaint.
///
/// POST /submit/complaint
#[instrument(skip(ctx, state, input), fields(user_id = %ctx.user.id))]
pub async fn complaint(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Form(input): Form<ComplaintInput>,
) -> Response {
    let failed = |message: String, input: ComplaintInput| {
        let forms = SubmitForms {
            complaint: input,
            ..SubmitForms::default()
        };
        SubmitTemplate::new(&ctx, SubmitKind::Complaint, Flash::error(message), forms)
            .into_response()
    };

    let request = match input.validate() {
        Ok(request) => request,
        Err(e) => return failed(e.to_string(), input),
    };

    match state.api().create_complaint(&ctx.token, &request).await {
        Ok(created) => {
            tracing::info!(complaint_id = %created.id, "Complaint submitted");
            submitted(SubmitKind::Complaint, created.id.as_str()).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Complaint submission failed");
            failed(COMPLAINT_FAILED.to_string(), input)
        }
    }
}

/// Leave feedback.
///
/// POST /submit/feedback
#[instrument(skip(ctx, state, input), fields(user_id = %ctx.user.id))]
pub async fn feedback(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Form(input): Form<FeedbackInput>,
) -> Response {
    let failed = |message: String, input: FeedbackInput| {
        let forms = SubmitForms {
            feedback: input,
            ..SubmitForms::default()
        };
        SubmitTemplate::new(&ctx, SubmitKind::Feedback, Flash::error(message), forms)
            .into_response()
    };

    let request = match input.validate() {
        Ok(request) => request,
        Err(e) => return failed(e.to_string(), input),
    };

    match state.api().create_feedback(&ctx.token, &request).await {
        Ok(created) => {
            tracing::info!(feedback_id = %created.id, rating = request.rating, "Feedback submitted");
            submitted(SubmitKind::Feedback, created.id.as_str()).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Feedback submission failed");
            failed(FEEDBACK_FAILED.to_string(), input)
        }
    }
}
