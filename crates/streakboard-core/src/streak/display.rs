//! Four-segment streak display: `Days : Hrs : Min : Sec`.

use std::fmt;

use serde::Serialize;

use super::breakdown::Reading;

pub const PLACEHOLDER: &str = "--";
pub const UNIT_LABELS: [&str; 4] = ["Days", "Hrs", "Min", "Sec"];

/// One rendered field and its unit label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub value: String,
    pub label: &'static str,
}

/// Display-ready strings for a [`Reading`].
///
/// Hours, minutes and seconds are zero-padded to two digits; days are not.
/// A pending reading shows [`PLACEHOLDER`] in every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl StreakDisplay {
    pub fn from_reading(reading: &Reading) -> Self {
        if reading.is_pending() {
            return Self::placeholder();
        }
        let b = reading.breakdown;
        Self {
            days: b.days.to_string(),
            hours: format!("{:02}", b.hours),
            minutes: format!("{:02}", b.minutes),
            seconds: format!("{:02}", b.seconds),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            days: PLACEHOLDER.into(),
            hours: PLACEHOLDER.into(),
            minutes: PLACEHOLDER.into(),
            seconds: PLACEHOLDER.into(),
        }
    }

    pub fn segments(&self) -> [Segment; 4] {
        let [days, hrs, min, sec] = UNIT_LABELS;
        [
            Segment {
                value: self.days.clone(),
                label: days,
            },
            Segment {
                value: self.hours.clone(),
                label: hrs,
            },
            Segment {
                value: self.minutes.clone(),
                label: min,
            },
            Segment {
                value: self.seconds.clone(),
                label: sec,
            },
        ]
    }
}

impl fmt::Display for StreakDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .segments()
            .iter()
            .map(|s| format!("{} {}", s.value, s.label))
            .collect();
        f.write_str(&rendered.join(" : "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::breakdown::{ElapsedBreakdown, ReadingStatus};

    fn counting(days: u64, hours: u8, minutes: u8, seconds: u8) -> Reading {
        Reading {
            status: ReadingStatus::Counting,
            breakdown: ElapsedBreakdown {
                days,
                hours,
                minutes,
                seconds,
            },
        }
    }

    #[test]
    fn hours_padded_days_not() {
        let d = StreakDisplay::from_reading(&counting(5, 5, 0, 9));
        assert_eq!(d.days, "5");
        assert_eq!(d.hours, "05");
        assert_eq!(d.minutes, "00");
        assert_eq!(d.seconds, "09");
    }

    #[test]
    fn large_day_counts_are_verbatim() {
        let d = StreakDisplay::from_reading(&counting(1234, 23, 59, 59));
        assert_eq!(d.to_string(), "1234 Days : 23 Hrs : 59 Min : 59 Sec");
    }

    #[test]
    fn pending_shows_placeholder_but_zero_does_not() {
        assert_eq!(
            StreakDisplay::from_reading(&Reading::PENDING),
            StreakDisplay::placeholder()
        );
        let invalid = Reading {
            status: ReadingStatus::InvalidReference,
            breakdown: ElapsedBreakdown::ZERO,
        };
        assert_eq!(
            StreakDisplay::from_reading(&invalid).to_string(),
            "0 Days : 00 Hrs : 00 Min : 00 Sec"
        );
    }

    #[test]
    fn segments_carry_unit_labels() {
        let labels: Vec<_> = StreakDisplay::placeholder()
            .segments()
            .iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, UNIT_LABELS);
    }
}
