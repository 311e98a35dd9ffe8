// Outcome classification: who won, and how the points split.

use serde::{Deserialize, Serialize};

use super::StandingsError;

/// How a match was decided.
///
/// The backing store spells regulation time as `"regular"`; the serde
/// alias keeps older exports loadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    #[serde(alias = "regular")]
    Regulation,
    Overtime,
    Shootout,
}

impl OutcomeKind {
    /// Whether the match went past regulation time. Overtime and shootout
    /// results share the same 2-1 point split.
    pub fn is_extra_time(self) -> bool {
        matches!(self, OutcomeKind::Overtime | OutcomeKind::Shootout)
    }
}

/// Which side of a match won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// A match result, real or hypothetical. Either score unset means the
/// match is unplayed and contributes nothing to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub kind: OutcomeKind,
}

impl MatchOutcome {
    /// Both scores present?
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// The points and buckets awarded by a decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSplit {
    pub winner: Side,
    pub winner_points: u32,
    pub loser_points: u32,
    /// `true` moves the result into the `overtime_wins` /
    /// `overtime_losses` buckets instead of `wins` / `losses`.
    pub overtime: bool,
}

/// Classify a decided match under the league's 3-2-1-0 scheme.
///
/// Regulation: winner 3 points, loser 0. Overtime or shootout: winner 2,
/// loser 1. Tied scores are rejected with
/// [`StandingsError::InvalidResult`]; callers must resolve every match.
pub fn classify(
    home_score: u32,
    away_score: u32,
    kind: OutcomeKind,
) -> Result<PointSplit, StandingsError> {
    if home_score == away_score {
        return Err(StandingsError::InvalidResult {
            home: home_score,
            away: away_score,
        });
    }

    let winner = if home_score > away_score {
        Side::Home
    } else {
        Side::Away
    };

    let split = if kind.is_extra_time() {
        PointSplit {
            winner,
            winner_points: 2,
            loser_points: 1,
            overtime: true,
        }
    } else {
        PointSplit {
            winner,
            winner_points: 3,
            loser_points: 0,
            overtime: false,
        }
    };

    Ok(split)
}
