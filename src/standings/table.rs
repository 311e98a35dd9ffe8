// Table recomputation: fold outcomes onto a baseline, then rank.

use std::collections::HashMap;

use serde::Serialize;

use super::outcome::{classify, MatchOutcome, Side};
use super::stats::{Team, TeamRecord};
use super::StandingsError;

/// One ranked row of the rendered league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// 1-based table position.
    pub position: usize,
    pub team_id: String,
    pub team_name: String,
    pub record: TeamRecord,
    /// Computed at ranking time from the record's goal counters.
    pub goal_difference: i64,
}

/// Fold `outcomes` onto `baseline`, returning a fresh statistics map.
///
/// The baseline is cloned, never mutated, so it stays valid as the reset
/// target. Outcomes with a missing score are skipped. The fold is
/// commutative: every update is an additive counter on the two
/// participating teams only, so outcome order cannot affect the result.
///
/// Fails with [`StandingsError::UnknownTeam`] when an outcome references
/// a team absent from the baseline, and with
/// [`StandingsError::InvalidResult`] on tied scores.
pub fn accumulate<'a, I>(
    baseline: &HashMap<String, TeamRecord>,
    outcomes: I,
) -> Result<HashMap<String, TeamRecord>, StandingsError>
where
    I: IntoIterator<Item = &'a MatchOutcome>,
{
    let mut records = baseline.clone();

    for outcome in outcomes {
        let (Some(home_score), Some(away_score)) = (outcome.home_score, outcome.away_score)
        else {
            continue;
        };

        if !records.contains_key(&outcome.away_team) {
            return Err(StandingsError::UnknownTeam(outcome.away_team.clone()));
        }
        let split = classify(home_score, away_score, outcome.kind)?;
        let (home_points, away_points) = match split.winner {
            Side::Home => (split.winner_points, split.loser_points),
            Side::Away => (split.loser_points, split.winner_points),
        };

        let home = records
            .get_mut(&outcome.home_team)
            .ok_or_else(|| StandingsError::UnknownTeam(outcome.home_team.clone()))?;
        home.games_played += 1;
        home.goals_for += home_score;
        home.goals_against += away_score;
        home.points += home_points;
        match (split.winner, split.overtime) {
            (Side::Home, false) => home.wins += 1,
            (Side::Home, true) => home.overtime_wins += 1,
            (Side::Away, false) => home.losses += 1,
            (Side::Away, true) => home.overtime_losses += 1,
        }

        let away = records
            .get_mut(&outcome.away_team)
            .ok_or_else(|| StandingsError::UnknownTeam(outcome.away_team.clone()))?;
        away.games_played += 1;
        away.goals_for += away_score;
        away.goals_against += home_score;
        away.points += away_points;
        match (split.winner, split.overtime) {
            (Side::Away, false) => away.wins += 1,
            (Side::Away, true) => away.overtime_wins += 1,
            (Side::Home, false) => away.losses += 1,
            (Side::Home, true) => away.overtime_losses += 1,
        }
    }

    Ok(records)
}

/// Produce the ranked table for a statistics map.
///
/// Sort order: points, goal difference, goals scored (all descending),
/// then team name ascending. A final comparison on team id keeps the
/// order total even for identical names. Teams without a record rank
/// with a zeroed one.
pub fn rank(teams: &[Team], records: &HashMap<String, TeamRecord>) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = teams
        .iter()
        .map(|team| {
            let record = records.get(&team.id).copied().unwrap_or_default();
            TableRow {
                position: 0,
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                goal_difference: record.goal_difference(),
                record,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.record
            .points
            .cmp(&a.record.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.record.goals_for.cmp(&a.record.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = idx + 1;
    }

    rows
}
