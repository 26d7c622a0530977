//! Elapsed-time helpers for dated medical events.
//!
//! Every malformed input collapses to zero elapsed time: under-restricting
//! risks injury, over-restricting costs a lighter session.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Days in a mean Gregorian month, scaled by 16 so month math stays integral.
const MONTH_DAYS_X16: i64 = 487;

/// Date exactly as the profile store recorded it. Parsed on demand so that an
/// unparsable value can be treated conservatively instead of failing intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventDate(pub String);

/// Any JSON value is accepted; non-strings keep their JSON text and never parse.
impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(value) => value,
            other => other.to_string(),
        };
        Ok(Self(raw))
    }
}

impl EventDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (UTC calendar date).
    pub fn parse(&self) -> Option<NaiveDate> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(date);
        }

        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| dt.naive_utc().date())
    }

    /// The date to compare against `now`; missing, unparsable and future
    /// dates resolve to `now` itself.
    pub fn effective(date: Option<&EventDate>, now: NaiveDate) -> NaiveDate {
        date.and_then(EventDate::parse)
            .filter(|parsed| *parsed <= now)
            .unwrap_or(now)
    }
}

impl From<NaiveDate> for EventDate {
    fn from(value: NaiveDate) -> Self {
        Self(value.format("%Y-%m-%d").to_string())
    }
}

fn elapsed_days(date: Option<&EventDate>, now: NaiveDate) -> i64 {
    let effective = EventDate::effective(date, now);
    (now - effective).num_days().max(0)
}

/// Whole weeks since the event, rounded up.
pub fn weeks_since(date: Option<&EventDate>, now: NaiveDate) -> u32 {
    let days = elapsed_days(date, now);
    clamp_u32((days + 6) / 7)
}

/// Whole months since the event, rounded up, using a 30.4375-day month.
pub fn months_since(date: Option<&EventDate>, now: NaiveDate) -> u32 {
    let days = elapsed_days(date, now);
    clamp_u32((days * 16 + MONTH_DAYS_X16 - 1) / MONTH_DAYS_X16)
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
