//! Streak badge tiers.
//!
//! Badges are awarded purely from the current streak length. Thresholds are
//! whole days measured as `streak_seconds / 86400` without rounding, so a
//! streak of 2 days 23 hours is still `Beginner`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::streak::{ElapsedBreakdown, SECS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Badge {
    #[default]
    Beginner,
    Apprentice,
    Disciplined,
    Warrior,
    Elite,
    Master,
    Legend,
    Grandmaster,
}

impl Badge {
    /// Every tier, lowest first.
    pub const ALL: [Badge; 8] = [
        Badge::Beginner,
        Badge::Apprentice,
        Badge::Disciplined,
        Badge::Warrior,
        Badge::Elite,
        Badge::Master,
        Badge::Legend,
        Badge::Grandmaster,
    ];

    /// Days of streak required to hold this badge.
    pub fn min_days(&self) -> u64 {
        match self {
            Badge::Beginner => 0,
            Badge::Apprentice => 3,
            Badge::Disciplined => 7,
            Badge::Warrior => 14,
            Badge::Elite => 30,
            Badge::Master => 90,
            Badge::Legend => 180,
            Badge::Grandmaster => 365,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::Beginner => "Beginner",
            Badge::Apprentice => "Apprentice",
            Badge::Disciplined => "Disciplined",
            Badge::Warrior => "Warrior",
            Badge::Elite => "Elite",
            Badge::Master => "Master",
            Badge::Legend => "Legend",
            Badge::Grandmaster => "Grandmaster",
        }
    }

    /// Highest tier whose threshold `streak_seconds` reaches.
    ///
    /// Negative streaks (reference in the future) rank as `Beginner`.
    pub fn for_streak_seconds(streak_seconds: i64) -> Badge {
        let secs = u64::try_from(streak_seconds).unwrap_or(0);
        Badge::ALL
            .iter()
            .rev()
            .copied()
            .find(|b| secs >= b.min_days() * SECS_PER_DAY)
            .unwrap_or(Badge::Beginner)
    }

    pub fn for_breakdown(breakdown: &ElapsedBreakdown) -> Badge {
        Badge::for_streak_seconds(i64::try_from(breakdown.total_seconds()).unwrap_or(i64::MAX))
    }

    /// Parse a backend badge name; unknown names fall back to `Beginner`.
    pub fn from_name(name: &str) -> Badge {
        Badge::ALL
            .iter()
            .copied()
            .find(|b| b.name() == name)
            .unwrap_or(Badge::Beginner)
    }

    /// The tier after this one, if any.
    pub fn next(&self) -> Option<Badge> {
        let idx = Badge::ALL.iter().position(|b| b == self)?;
        Badge::ALL.get(idx + 1).copied()
    }

    /// Seconds left until the next tier, or `None` at the top.
    pub fn seconds_until_next(streak_seconds: i64) -> Option<u64> {
        let next = Badge::for_streak_seconds(streak_seconds).next()?;
        let secs = u64::try_from(streak_seconds).unwrap_or(0);
        Some(next.min_days() * SECS_PER_DAY - secs)
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Badge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Badge::from_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Badge::for_streak_seconds(0), Badge::Beginner);
        assert_eq!(Badge::for_streak_seconds(3 * DAY - 1), Badge::Beginner);
        assert_eq!(Badge::for_streak_seconds(3 * DAY), Badge::Apprentice);
        assert_eq!(Badge::for_streak_seconds(7 * DAY), Badge::Disciplined);
        assert_eq!(Badge::for_streak_seconds(14 * DAY), Badge::Warrior);
        assert_eq!(Badge::for_streak_seconds(30 * DAY), Badge::Elite);
        assert_eq!(Badge::for_streak_seconds(90 * DAY), Badge::Master);
        assert_eq!(Badge::for_streak_seconds(180 * DAY), Badge::Legend);
        assert_eq!(Badge::for_streak_seconds(365 * DAY), Badge::Grandmaster);
        assert_eq!(Badge::for_streak_seconds(5000 * DAY), Badge::Grandmaster);
    }

    #[test]
    fn negative_streak_is_beginner() {
        assert_eq!(Badge::for_streak_seconds(-3600), Badge::Beginner);
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(Badge::from_name("Legend"), Badge::Legend);
        assert_eq!(Badge::from_name("Overlord"), Badge::Beginner);
    }

    #[test]
    fn next_walks_the_ladder() {
        assert_eq!(Badge::Beginner.next(), Some(Badge::Apprentice));
        assert_eq!(Badge::Legend.next(), Some(Badge::Grandmaster));
        assert_eq!(Badge::Grandmaster.next(), None);
    }

    #[test]
    fn seconds_until_next_tier() {
        assert_eq!(Badge::seconds_until_next(3 * DAY - 10), Some(10));
        assert_eq!(Badge::seconds_until_next(7 * DAY), Some(7 * DAY as u64));
        assert_eq!(Badge::seconds_until_next(400 * DAY), None);
    }

    #[test]
    fn serde_uses_display_name() {
        assert_eq!(serde_json::to_string(&Badge::Elite).unwrap(), "\"Elite\"");
        let parsed: Badge = serde_json::from_str("\"Warrior\"").unwrap();
        assert_eq!(parsed, Badge::Warrior);
    }

    #[test]
    fn breakdown_maps_to_badge() {
        let b = ElapsedBreakdown::from_seconds(30 * SECS_PER_DAY + 1);
        assert_eq!(Badge::for_breakdown(&b), Badge::Elite);

        let huge = ElapsedBreakdown {
            days: u64::MAX,
            ..ElapsedBreakdown::ZERO
        };
        assert_eq!(Badge::for_breakdown(&huge), Badge::Grandmaster);
    }
}
