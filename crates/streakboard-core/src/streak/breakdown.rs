//! Elapsed-time breakdown since a streak's reference instant.
//!
//! The computation here is pure: callers pass both the reference instant and
//! "now". Days are a fixed 86 400 seconds; no calendar, timezone or DST
//! adjustment is applied once the reference has been normalized to UTC.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_DAY: u64 = 86_400;

/// Naive layouts accepted when the text carries no offset. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The instant a streak is measured from, as supplied by the backend or user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceInstant {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// ISO-8601 / RFC 3339 text.
    Text(String),
}

impl ReferenceInstant {
    /// Resolve to an absolute UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] when the text matches
    /// none of the accepted layouts, or [`ValidationError::EpochOutOfRange`]
    /// for epoch values chrono cannot represent.
    pub fn parse(&self) -> Result<DateTime<Utc>, ValidationError> {
        match self {
            ReferenceInstant::EpochMillis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or(ValidationError::EpochOutOfRange(*ms)),
            ReferenceInstant::Text(raw) => parse_text(raw),
        }
    }
}

fn parse_text(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::InvalidTimestamp(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(ValidationError::InvalidTimestamp(raw.to_string()))
}

impl From<&str> for ReferenceInstant {
    fn from(s: &str) -> Self {
        ReferenceInstant::Text(s.to_string())
    }
}

impl From<String> for ReferenceInstant {
    fn from(s: String) -> Self {
        ReferenceInstant::Text(s)
    }
}

impl From<i64> for ReferenceInstant {
    fn from(ms: i64) -> Self {
        ReferenceInstant::EpochMillis(ms)
    }
}

impl From<DateTime<Utc>> for ReferenceInstant {
    fn from(dt: DateTime<Utc>) -> Self {
        ReferenceInstant::Text(dt.to_rfc3339())
    }
}

impl fmt::Display for ReferenceInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceInstant::EpochMillis(ms) => write!(f, "{ms}"),
            ReferenceInstant::Text(s) => f.write_str(s),
        }
    }
}

/// Days/hours/minutes/seconds decomposition of whole elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ElapsedBreakdown {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ElapsedBreakdown {
    pub const ZERO: ElapsedBreakdown = ElapsedBreakdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn from_seconds(total: u64) -> Self {
        // Each remainder is bounded (< 24, < 60, < 60), so the narrowing is lossless.
        Self {
            days: total / SECS_PER_DAY,
            hours: ((total % SECS_PER_DAY) / SECS_PER_HOUR) as u8,
            minutes: ((total % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
            seconds: (total % SECS_PER_MINUTE) as u8,
        }
    }

    /// Breakdown of `now - reference`, floored to whole seconds.
    ///
    /// Returns `None` when `reference` lies after `now`.
    pub fn between(reference: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let diff_ms = (now - reference).num_milliseconds();
        let diff_secs = diff_ms.div_euclid(1000);
        u64::try_from(diff_secs).ok().map(Self::from_seconds)
    }

    /// Saturates at `u64::MAX` for hand-built values with huge `days`.
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(SECS_PER_DAY)
            .saturating_add(u64::from(self.hours) * SECS_PER_HOUR)
            .saturating_add(u64::from(self.minutes) * SECS_PER_MINUTE)
            .saturating_add(u64::from(self.seconds))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for ElapsedBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// How a [`Reading`] was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    /// Nothing computed yet: no reference, or the tracker has not ticked.
    Pending,
    /// Reference is valid and not in the future.
    Counting,
    /// Reference lies after the evaluating clock; clamped to zero.
    Future,
    /// Reference could not be parsed; zero is shown instead.
    InvalidReference,
}

/// A published tracker value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub status: ReadingStatus,
    pub breakdown: ElapsedBreakdown,
}

impl Reading {
    pub const PENDING: Reading = Reading {
        status: ReadingStatus::Pending,
        breakdown: ElapsedBreakdown::ZERO,
    };

    pub fn is_pending(&self) -> bool {
        self.status == ReadingStatus::Pending
    }

    fn zero(status: ReadingStatus) -> Self {
        Self {
            status,
            breakdown: ElapsedBreakdown::ZERO,
        }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::PENDING
    }
}

/// One tick's computation. Never fails: bad input degrades to zero.
pub fn evaluate(reference: &ReferenceInstant, now: DateTime<Utc>) -> Reading {
    let Ok(instant) = reference.parse() else {
        return Reading::zero(ReadingStatus::InvalidReference);
    };
    match ElapsedBreakdown::between(instant, now) {
        Some(breakdown) => Reading {
            status: ReadingStatus::Counting,
            breakdown,
        },
        None => Reading::zero(ReadingStatus::Future),
    }
}
