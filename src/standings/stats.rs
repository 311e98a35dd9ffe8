// Team identity and the per-team counters backing a league-table row.

use serde::{Deserialize, Serialize};

/// A team in the league. Identity and display name only; statistics live
/// in [`TeamRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// One team's accumulated season statistics.
///
/// The win/loss buckets and `points` are only ever written by the
/// accumulator. Goal difference is derived from the goal counters, never
/// stored, so it cannot drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub games_played: u32,
    /// Regulation wins (3 points).
    pub wins: u32,
    /// Wins after overtime or a shootout (2 points).
    pub overtime_wins: u32,
    /// Regulation losses (0 points).
    pub losses: u32,
    /// Losses after overtime or a shootout (1 point).
    pub overtime_losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamRecord {
    /// Goals scored minus goals conceded.
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}
