//! Backend timestamps.
//!
//! The backend serializes datetimes in HTTP-date form
//! (`Thu, 16 Oct 2025 10:00:00 GMT`); some deployments emit RFC 3339. Both
//! are accepted. Unparseable text is kept verbatim so it can still be shown.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A timestamp as received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timestamp {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

/// Granularity for [`Timestamp::relative_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relative {
    /// Minutes and hours, then the date.
    Hours,
    /// Minutes, hours and days under a week, then the date.
    Days,
}

impl Timestamp {
    /// Parse backend text leniently.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let parsed = DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            });

        Self {
            raw: raw.to_owned(),
            parsed,
        }
    }

    /// Build from a known instant.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            raw: dt.to_rfc2822(),
            parsed: Some(dt),
        }
    }

    /// The text exactly as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed instant, if the text was understood.
    #[must_use]
    pub const fn datetime(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    /// `YYYY-MM-DD` bucket key.
    ///
    /// Falls back to the first ten characters of the raw text, which is the
    /// date for ISO-like strings.
    #[must_use]
    pub fn date_key(&self) -> String {
        self.parsed.map_or_else(
            || self.raw.chars().take(10).collect(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        )
    }

    /// Short date such as `Oct 16, 2025`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.parsed
            .map_or_else(|| self.raw.clone(), |dt| dt.format("%b %-d, %Y").to_string())
    }

    /// Date and time such as `Oct 16, 2025 10:00`.
    #[must_use]
    pub fn display_datetime(&self) -> String {
        self.parsed.map_or_else(
            || self.raw.clone(),
            |dt| dt.format("%b %-d, %Y %H:%M").to_string(),
        )
    }

    /// "Just now", "5 minutes ago", "1 hour ago", "3 days ago", or the date.
    #[must_use]
    pub fn relative_to(&self, now: DateTime<Utc>, granularity: Relative) -> String {
        let Some(dt) = self.parsed else {
            return self.raw.clone();
        };

        let minutes = (now - dt).num_minutes();
        if minutes < 1 {
            return "Just now".to_string();
        }
        if minutes < 60 {
            return plural(minutes, "minute");
        }

        let hours = minutes / 60;
        if hours < 24 {
            return plural(hours, "hour");
        }

        let days = hours / 24;
        if granularity == Relative::Days && days < 7 {
            return plural(days, "day");
        }

        self.display_date()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Parsed instants order chronologically; unparsed values sort first, by text.
impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.parsed
            .cmp(&other.parsed)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
