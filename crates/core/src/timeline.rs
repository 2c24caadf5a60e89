//! Tickets grouped by creation date for the timeline planner.

use std::collections::BTreeMap;

use crate::types::Complaint;

/// Tickets created on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub tickets: Vec<&'a Complaint>,
}

impl DateGroup<'_> {
    /// "1 ticket" or "N tickets".
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.tickets.len() {
            1 => "1 ticket".to_string(),
            n => format!("{n} tickets"),
        }
    }
}

/// Bucket by the date part of `created_at`, newest day first.
///
/// Tickets keep their input order within a day.
#[must_use]
pub fn group_by_date<'a>(complaints: &[&'a Complaint]) -> Vec<DateGroup<'a>> {
    let mut buckets: BTreeMap<String, Vec<&'a Complaint>> = BTreeMap::new();
    for &complaint in complaints {
        buckets
            .entry(complaint.created_at.date_key())
            .or_default()
            .push(complaint);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, tickets)| DateGroup { date, tickets })
        .collect()
}
