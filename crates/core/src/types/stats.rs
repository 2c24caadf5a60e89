//! Admin aggregates: `GET /admin/stats` and `GET /admin/insights`.

use serde::{Deserialize, Serialize};

/// Dashboard KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default = "default_resolution_time")]
    pub avg_resolution_time: String,
    #[serde(default)]
    pub high_priority_alerts: u64,
    #[serde(default)]
    pub customer_satisfaction: f64,
    #[serde(default)]
    pub total_feedback: u64,
    #[serde(default)]
    pub open_complaints: u64,
    #[serde(default)]
    pub resolved_complaints: u64,
}

fn default_resolution_time() -> String {
    "0 hours".to_string()
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_tickets: 0,
            avg_resolution_time: default_resolution_time(),
            high_priority_alerts: 0,
            customer_satisfaction: 0.0,
            total_feedback: 0,
            open_complaints: 0,
            resolved_complaints: 0,
        }
    }
}

/// One bucket of a category distribution. `_id` is the category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "_id", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl CategoryCount {
    /// Category name, or `"Uncategorized"`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.category
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Uncategorized")
    }
}

/// Category distributions for complaints and feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    #[serde(default)]
    pub complaints: Vec<CategoryCount>,
    #[serde(default)]
    pub feedback: Vec<CategoryCount>,
}

/// Feedback sentiment split by rating: 4-5 positive, 3 neutral, 1-2 negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
}

impl Sentiment {
    /// Sum of all three buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Whole-number percentage of `part` in the total, 0 when empty.
    #[must_use]
    pub fn percent(&self, part: u64) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (part * 100 + total / 2) / total
    }
}

/// Insights report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub category_distribution: CategoryDistribution,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub total_feedback: u64,
}
