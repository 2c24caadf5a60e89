//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// First eight characters of an id.
///
/// Usage in templates: `{{ ticket.id|short_id }}`
#[askama::filter_fn]
pub fn short_id(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.to_string().chars().take(8).collect())
}

/// CSS modifier for a status or priority badge.
///
/// Usage in templates: `<span class="badge badge-{{ ticket.status|badge }}">`
#[askama::filter_fn]
pub fn badge(value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(match value.to_string().as_str() {
        "open" | "pending" => "warning",
        "in-progress" => "info",
        "resolved" | "addressed" | "active" => "success",
        "high" | "suspended" => "danger",
        "medium" => "accent",
        "admin" => "primary",
        _ => "muted",
    })
}
