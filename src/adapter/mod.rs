// Data access adapter: reads the store's JSON exports (teams, team
// statistics, season schedule) and normalizes them into the canonical
// shapes the engine consumes. All field-name guessing stays here.

pub mod records;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::standings::session::{LeagueData, ScheduledMatch};
use crate::standings::stats::{Team, TeamRecord};
use records::{MatchRow, RecordEnvelope, StatsRow, TeamRow};

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load and normalize the three record collections.
///
/// Rows the store exported in a broken state (a stats row with no
/// resolvable team, a match with a dangling team link, a negative score)
/// are skipped with a warning rather than failing the whole load; the
/// engine's own validation stays strict.
pub fn load_league(paths: &DataPaths) -> Result<LeagueData, AdapterError> {
    let team_rows: Vec<TeamRow> = read_envelope(Path::new(&paths.teams))?;
    let stats_rows: Vec<StatsRow> = read_envelope(Path::new(&paths.team_stats))?;
    let match_rows: Vec<MatchRow> = read_envelope(Path::new(&paths.matches))?;

    let teams: Vec<Team> = team_rows
        .into_iter()
        .map(|row| Team {
            id: row.id,
            name: row.fields.name,
        })
        .collect();

    // Every team starts from a zeroed record; stats rows overwrite it.
    let mut baseline: HashMap<String, TeamRecord> = teams
        .iter()
        .map(|t| (t.id.clone(), TeamRecord::default()))
        .collect();

    for row in stats_rows {
        let Some(team_id) = resolve_stats_team(&row, &teams) else {
            warn!("skipping stats row {}: no resolvable team", row.id);
            continue;
        };
        let f = &row.fields;
        baseline.insert(
            team_id,
            TeamRecord {
                games_played: f.games_played,
                wins: f.wins,
                overtime_wins: f.overtime_wins,
                losses: f.losses,
                overtime_losses: f.overtime_losses,
                goals_for: f.goals_for,
                goals_against: f.goals_against,
                points: f.points,
            },
        );
    }

    let mut schedule = Vec::new();
    for row in match_rows {
        let (Some(home_team), Some(away_team)) =
            (row.fields.home_team.id(), row.fields.away_team.id())
        else {
            warn!("skipping match {}: missing team reference", row.id);
            continue;
        };
        if !baseline.contains_key(home_team) || !baseline.contains_key(away_team) {
            warn!("skipping match {}: unknown team reference", row.id);
            continue;
        }

        let id = row.fields.match_id.clone().unwrap_or_else(|| row.id.clone());
        schedule.push(ScheduledMatch {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: sanitize_score(&row.id, row.fields.home_score),
            away_score: sanitize_score(&row.id, row.fields.away_score),
            kind: row.fields.kind,
            round: row.fields.round,
            date: row.fields.match_date,
            id,
        });
    }

    // The store returns matches ordered by round and date; exports don't
    // always preserve that, so restore it here.
    schedule.sort_by(|a, b| {
        a.round
            .cmp(&b.round)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.id.cmp(&b.id))
    });

    info!(
        "loaded {} teams, {} scheduled matches",
        teams.len(),
        schedule.len()
    );

    Ok(LeagueData {
        teams,
        baseline,
        schedule,
    })
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AdapterError> {
    let text = std::fs::read_to_string(path).map_err(|e| AdapterError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let envelope: RecordEnvelope<T> =
        serde_json::from_str(&text).map_err(|e| AdapterError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(envelope.records)
}

/// Resolve the team a stats row belongs to: the linked record id when
/// present, otherwise a display-name match against the Teams table.
fn resolve_stats_team(row: &StatsRow, teams: &[Team]) -> Option<String> {
    if let Some(id) = row.fields.team_id.first() {
        if teams.iter().any(|t| &t.id == id) {
            return Some(id.clone());
        }
    }
    if let Some(name) = &row.fields.name {
        if let Some(team) = teams.iter().find(|t| &t.name == name) {
            return Some(team.id.clone());
        }
    }
    None
}

/// Negative scores in an export are store corruption; degrade the match
/// to unplayed rather than letting them near the accumulator.
fn sanitize_score(record_id: &str, score: Option<i64>) -> Option<u32> {
    let score = score?;
    match u32::try_from(score) {
        Ok(s) => Some(s),
        Err(_) => {
            warn!("match {}: dropping invalid score {}", record_id, score);
            None
        }
    }
}
