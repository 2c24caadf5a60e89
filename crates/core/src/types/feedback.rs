//! Feedback records: a 1-5 rating plus comments.

use serde::{Deserialize, Serialize};

use super::complaint::non_blank;
use super::id::{FeedbackId, UserId};
use super::status::FeedbackStatus;
use super::timestamp::Timestamp;

/// Lowest rating.
pub const MIN_RATING: u8 = 1;

/// Highest rating.
pub const MAX_RATING: u8 = 5;

/// Label for a rating, e.g. 5 is "Excellent".
#[must_use]
pub const fn rating_label(rating: u8) -> &'static str {
    match rating {
        5 => "Excellent",
        4 => "Good",
        3 => "Average",
        2 => "Poor",
        1 => "Very Poor",
        _ => "Unrated",
    }
}

/// Feedback as returned by `GET /feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "_id")]
    pub id: FeedbackId,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Feedback {
    /// Category, or `fallback` when unset or blank.
    #[must_use]
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.category.as_deref()).unwrap_or(fallback)
    }

    /// Comments cut to `max_chars`, with `...` appended when cut.
    #[must_use]
    pub fn title(&self, max_chars: usize) -> String {
        let comments = self.comments.as_deref().unwrap_or("");
        truncate_with_ellipsis(comments, max_chars)
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when anything was cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub rating: u8,
    pub category: String,
    pub comments: String,
}

/// Body of `PUT /feedback/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackUpdate {
    pub status: FeedbackStatus,
}
