//! Bulk action handler for the Complaint Center.

use std::collections::HashSet;

use axum::{
    extract::{Query, RawForm, State},
    response::Redirect,
};
use complaintdesk_core::BulkAction;
use tracing::instrument;

use crate::middleware::RequireAuth;
use crate::routes::{redirect_error, redirect_success};
use crate::state::AppState;

use super::types::TicketsQuery;

/// Posted bulk form.
///
/// Row checkboxes post one `ids` pair each; a comma-separated value is
/// accepted too. Repeated ids are kept once, in first-seen order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkForm {
    pub ids: Vec<String>,
    pub action: String,
    pub assigned_to: Option<String>,
    pub department: Option<String>,
}

impl BulkForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "ids" => form.ids.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_owned),
                ),
                "action" => form.action = value.into_owned(),
                "assigned_to" => form.assigned_to = Some(value.into_owned()),
                "department" => form.department = Some(value.into_owned()),
                _ => {}
            }
        }
        let mut seen = HashSet::new();
        form.ids.retain(|id| seen.insert(id.clone()));
        form
    }
}

fn tickets(n: usize) -> &'static str {
    if n == 1 { "ticket" } else { "tickets" }
}

/// Apply one action to every selected ticket.
///
/// Updates are sent one at a time; failures are collected and reported
/// together. The redirect keeps the filters and sort of the list the form
/// was posted from.
///
/// POST /tickets/bulk
#[instrument(skip(ctx, state, query, body), fields(user_id = %ctx.user.id))]
pub async fn bulk(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<TicketsQuery>,
    RawForm(body): RawForm,
) -> Redirect {
    let form = BulkForm::parse(&body);
    let list = query.list_href();
    let back = list.as_str();

    if form.ids.is_empty() {
        return redirect_error(back, "No tickets selected");
    }

    let action = match BulkAction::from_form(
        &form.action,
        form.assigned_to.as_deref(),
        form.department.as_deref(),
    ) {
        Ok(action) => action,
        Err(message) => return redirect_error(back, &message),
    };
    let update = action.to_update();

    let mut success_count = 0;
    let mut error_messages = Vec::new();

    for id in &form.ids {
        match state.api().update_complaint(&ctx.token, id, &update).await {
            Ok(_) => success_count += 1,
            Err(e) => error_messages.push(format!("{id}: {e}")),
        }
    }

    let summary = format!(
        "{} {success_count} {}",
        action.verb(),
        tickets(success_count)
    );

    if error_messages.is_empty() {
        tracing::info!(count = success_count, action = %form.action, "Bulk update completed");
        redirect_success(back, &summary)
    } else {
        tracing::warn!(
            success = success_count,
            errors = ?error_messages,
            action = %form.action,
            "Bulk update completed with errors"
        );
        redirect_error(
            back,
            &format!("{summary}. Errors: {}", error_messages.join("; ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_and_comma_ids() {
        let form = BulkForm::parse(b"ids=a1&ids=b2%2Cc3&action=status-resolved&ids=");
        assert_eq!(form.ids, vec!["a1", "b2", "c3"]);
        assert_eq!(form.action, "status-resolved");
        assert_eq!(form.assigned_to, None);
    }

    #[test]
    fn test_parse_drops_repeated_ids_keeping_order() {
        let form = BulkForm::parse(b"ids=a&ids=b&ids=a&ids=c%2Cb&action=status-resolved");
        assert_eq!(form.ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_assign_fields() {
        let form = BulkForm::parse(
            b"ids=a1&action=assign&assigned_to=Sam+Lee&department=Customer+Service",
        );
        assert_eq!(form.assigned_to.as_deref(), Some("Sam Lee"));
        assert_eq!(form.department.as_deref(), Some("Customer Service"));
    }

    #[test]
    fn test_tickets_plural() {
        assert_eq!(tickets(1), "ticket");
        assert_eq!(tickets(3), "tickets");
    }
}
