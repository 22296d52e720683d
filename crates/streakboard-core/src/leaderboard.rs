//! Leaderboard ranking.
//!
//! The backend already ranks rows, but a client holding a stale list (or
//! merging a freshly reset streak) re-ranks locally the same way: longest
//! streak first, ties keep their incoming order.

use serde::{Deserialize, Serialize};

use crate::badge::Badge;
use crate::streak::ReferenceInstant;

/// One `/api/leaderboard` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub sharing_code: Option<String>,
    pub streak_seconds: i64,
    #[serde(default)]
    pub badge: Badge,
    pub created_at: String,
    pub last_relapse_datetime: ReferenceInstant,
    #[serde(default)]
    pub rank: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Sort by streak (descending, stable) and assign ranks `1..=n`.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.streak_seconds.cmp(&a.streak_seconds));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = u32::try_from(i + 1).unwrap_or(u32::MAX);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter()
    }

    pub fn entry(&self, username: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.username == username)
    }

    pub fn rank_of(&self, username: &str) -> Option<u32> {
        self.entry(username).map(|e| e.rank)
    }

    /// Top three in podium order: second, first, third.
    pub fn podium(&self) -> Vec<&LeaderboardEntry> {
        [1usize, 0, 2]
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .collect()
    }

    /// Everyone below the podium.
    pub fn rest(&self) -> &[LeaderboardEntry] {
        self.entries.get(3..).unwrap_or(&[])
    }
}

impl IntoIterator for Leaderboard {
    type Item = LeaderboardEntry;
    type IntoIter = std::vec::IntoIter<LeaderboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, streak_seconds: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.into(),
            avatar_url: None,
            sharing_code: None,
            streak_seconds,
            badge: Badge::for_streak_seconds(streak_seconds),
            created_at: "2025-01-01T00:00:00+00:00".into(),
            last_relapse_datetime: "2025-01-01T00:00:00+00:00".into(),
            rank: 0,
        }
    }

    #[test]
    fn ranks_by_streak_descending() {
        let board = Leaderboard::from_entries(vec![
            entry("ana", 100),
            entry("bo", 5_000),
            entry("cy", 2_000),
        ]);
        let names: Vec<_> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bo", "cy", "ana"]);
        assert_eq!(board.rank_of("bo"), Some(1));
        assert_eq!(board.rank_of("ana"), Some(3));
        assert_eq!(board.rank_of("nobody"), None);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let board = Leaderboard::from_entries(vec![entry("first", 10), entry("second", 10)]);
        assert_eq!(board.rank_of("first"), Some(1));
        assert_eq!(board.rank_of("second"), Some(2));
    }

    #[test]
    fn podium_order_and_rest() {
        let board = Leaderboard::from_entries(vec![
            entry("a", 4),
            entry("b", 3),
            entry("c", 2),
            entry("d", 1),
        ]);
        let podium: Vec<_> = board.podium().iter().map(|e| e.rank).collect();
        assert_eq!(podium, [2, 1, 3]);
        assert_eq!(board.rest().len(), 1);
        assert_eq!(board.rest()[0].username, "d");
    }

    #[test]
    fn short_board_podium() {
        let board = Leaderboard::from_entries(vec![entry("solo", 1)]);
        assert_eq!(board.podium().len(), 1);
        assert!(board.rest().is_empty());
        assert!(Leaderboard::default().podium().is_empty());
    }

    #[test]
    fn deserializes_backend_rows() {
        let json = r#"[
            {"username": "neo", "avatar_url": "/api/uploads/x.png", "sharing_code": null,
             "streak_seconds": 864000, "badge": "Disciplined",
             "created_at": "2025-01-01T00:00:00+00:00",
             "last_relapse_datetime": "2025-01-01T00:00:00+00:00", "rank": 1}
        ]"#;
        let rows: Vec<LeaderboardEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].badge, Badge::Disciplined);
        assert_eq!(rows[0].avatar_url.as_deref(), Some("/api/uploads/x.png"));
    }
}
