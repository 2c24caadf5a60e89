//! CSV serialization for the complaint and insights downloads.
//!
//! The complaint export quotes every text value as a JSON string, writes
//! numbers bare and renders missing values as `""`.

use serde_json::Value;

use crate::types::{Complaint, Insights};

/// Column order of the complaint export.
pub const COMPLAINT_COLUMNS: [&str; 10] = [
    "id",
    "title",
    "category",
    "priority",
    "status",
    "assigned_to",
    "department",
    "created_at",
    "updated_at",
    "progress",
];

/// Column order of the insights export.
pub const INSIGHTS_COLUMNS: [&str; 4] = ["total_feedback", "positive", "neutral", "negative"];

fn cell(value: Value) -> String {
    match value {
        Value::Null => "\"\"".to_string(),
        other => other.to_string(),
    }
}

fn text(value: &str) -> String {
    cell(Value::String(value.to_owned()))
}

fn optional(value: Option<&str>) -> String {
    value.map_or_else(|| cell(Value::Null), text)
}

fn complaint_row(complaint: &Complaint) -> String {
    [
        text(complaint.id.as_str()),
        text(&complaint.title),
        optional(complaint.category.as_deref()),
        text(complaint.priority.as_str()),
        text(complaint.status.as_str()),
        optional(complaint.assigned_to.as_deref()),
        optional(complaint.department.as_deref()),
        text(complaint.created_at.raw()),
        text(complaint.updated_at.raw()),
        cell(Value::from(complaint.display_progress())),
    ]
    .join(",")
}

/// Header line plus one line per complaint, newline separated.
#[must_use]
pub fn complaints_csv(complaints: &[&Complaint]) -> String {
    std::iter::once(COMPLAINT_COLUMNS.join(","))
        .chain(complaints.iter().map(|c| complaint_row(c)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line plus the single summary row.
#[must_use]
pub fn insights_csv(insights: &Insights) -> String {
    let sentiment = &insights.sentiment;
    format!(
        "{}\n{},{},{},{}",
        INSIGHTS_COLUMNS.join(","),
        insights.total_feedback,
        sentiment.positive,
        sentiment.neutral,
        sentiment.negative
    )
}
