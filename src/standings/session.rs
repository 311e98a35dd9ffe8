// The what-if session: an immutable baseline snapshot, a set of simulated
// results keyed by match id, and a full recompute on every change.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::outcome::{classify, MatchOutcome, OutcomeKind};
use super::stats::{Team, TeamRecord};
use super::table::{accumulate, rank, TableRow};
use super::StandingsError;

/// A fixture in the season schedule.
///
/// A match with both real scores set is played: its result is already part
/// of the baseline statistics, so it is excluded from replay and cannot be
/// simulated over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// How the real result was decided, when known.
    pub kind: Option<OutcomeKind>,
    pub round: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl ScheduledMatch {
    /// Whether the real result is already in the books.
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// Everything the adapter hands the engine in one shot.
#[derive(Debug, Clone)]
pub struct LeagueData {
    pub teams: Vec<Team>,
    /// Statistics snapshot with all played matches already netted out.
    pub baseline: HashMap<String, TeamRecord>,
    pub schedule: Vec<ScheduledMatch>,
}

/// A live what-if session over one league's data.
///
/// The baseline is captured once at construction and never mutated; the
/// current table is always derived from baseline plus the full set of
/// simulated outcomes. There is no incremental patching, so no sequence
/// of operations can desynchronize the table from its inputs.
#[derive(Debug, Clone)]
pub struct SimulationSession {
    teams: Vec<Team>,
    /// The reset target. Never written after `new`.
    baseline: HashMap<String, TeamRecord>,
    schedule: Vec<ScheduledMatch>,
    /// Simulated results keyed by match id. A BTreeMap keeps iteration
    /// deterministic; the fold itself is order-independent.
    simulated: BTreeMap<String, MatchOutcome>,
    /// Current ranked table, derived from baseline + simulated.
    table: Vec<TableRow>,
}

impl SimulationSession {
    /// Build a session from loaded league data.
    ///
    /// Teams are sorted by id for deterministic ordering, and any team
    /// missing a baseline record gets a zeroed one. Every scheduled match
    /// must reference known teams; the first dangling reference fails the
    /// whole construction with [`StandingsError::UnknownTeam`].
    pub fn new(data: LeagueData) -> Result<Self, StandingsError> {
        let LeagueData {
            mut teams,
            mut baseline,
            schedule,
        } = data;

        teams.sort_by(|a, b| a.id.cmp(&b.id));
        for team in &teams {
            baseline.entry(team.id.clone()).or_default();
        }

        for m in &schedule {
            if !baseline.contains_key(&m.home_team) {
                return Err(StandingsError::UnknownTeam(m.home_team.clone()));
            }
            if !baseline.contains_key(&m.away_team) {
                return Err(StandingsError::UnknownTeam(m.away_team.clone()));
            }
        }

        let table = rank(&teams, &baseline);
        Ok(SimulationSession {
            teams,
            baseline,
            schedule,
            simulated: BTreeMap::new(),
            table,
        })
    }

    /// Enter (or replace) a simulated result for an unplayed match.
    ///
    /// Scores arrive as raw integers from the caller's input layer and are
    /// validated here: negative values never reach the accumulator. Tied
    /// scores, unknown match ids, and matches whose real result is already
    /// in the baseline are all rejected before any state changes.
    pub fn set_result(
        &mut self,
        match_id: &str,
        home_score: i64,
        away_score: i64,
        kind: OutcomeKind,
    ) -> Result<(), StandingsError> {
        let home_score = validate_score(home_score)?;
        let away_score = validate_score(away_score)?;

        let m = self
            .schedule
            .iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| StandingsError::UnknownMatch(match_id.to_string()))?;
        if m.is_played() {
            return Err(StandingsError::AlreadyPlayed(match_id.to_string()));
        }
        // Reject ties before touching the outcome map.
        classify(home_score, away_score, kind)?;

        let outcome = MatchOutcome {
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            home_score: Some(home_score),
            away_score: Some(away_score),
            kind,
        };
        debug!(
            "simulating {}: {} {}-{} {}",
            match_id, outcome.home_team, home_score, away_score, outcome.away_team
        );
        self.simulated.insert(match_id.to_string(), outcome);
        self.recompute()
    }

    /// Remove a simulated result. Clearing a match that has no simulated
    /// result is a no-op; clearing an unknown match id is an error.
    pub fn clear_result(&mut self, match_id: &str) -> Result<(), StandingsError> {
        if !self.schedule.iter().any(|m| m.id == match_id) {
            return Err(StandingsError::UnknownMatch(match_id.to_string()));
        }
        if self.simulated.remove(match_id).is_some() {
            debug!("cleared simulated result for {}", match_id);
            self.recompute()?;
        }
        Ok(())
    }

    /// Drop every simulated result, returning the table to the baseline.
    pub fn reset(&mut self) {
        self.simulated.clear();
        self.table = rank(&self.teams, &self.baseline);
        info!("simulation reset to baseline");
    }

    /// Fill every remaining match that has no simulated result with a
    /// random score (goals 0-5 per side). A rolled tie is resolved by
    /// bumping a random side and marking the match overtime or shootout
    /// at random. Returns the number of matches filled.
    pub fn simulate_remaining<R: Rng>(&mut self, rng: &mut R) -> Result<usize, StandingsError> {
        let pending: Vec<(String, String, String)> = self
            .schedule
            .iter()
            .filter(|m| !m.is_played() && !self.simulated.contains_key(&m.id))
            .map(|m| (m.id.clone(), m.home_team.clone(), m.away_team.clone()))
            .collect();
        let filled = pending.len();

        for (id, home_team, away_team) in pending {
            let mut home: u32 = rng.random_range(0..=5);
            let mut away: u32 = rng.random_range(0..=5);
            let kind = if home == away {
                if rng.random_bool(0.5) {
                    home += 1;
                } else {
                    away += 1;
                }
                if rng.random_bool(0.5) {
                    OutcomeKind::Overtime
                } else {
                    OutcomeKind::Shootout
                }
            } else {
                OutcomeKind::Regulation
            };
            self.simulated.insert(
                id,
                MatchOutcome {
                    home_team,
                    away_team,
                    home_score: Some(home),
                    away_score: Some(away),
                    kind,
                },
            );
        }

        self.recompute()?;
        info!("simulated random results for {} remaining matches", filled);
        Ok(filled)
    }

    /// The current ranked table (baseline + all simulated results).
    pub fn table(&self) -> &[TableRow] {
        &self.table
    }

    /// The ranked table with every simulation ignored.
    pub fn baseline_table(&self) -> Vec<TableRow> {
        rank(&self.teams, &self.baseline)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn schedule(&self) -> &[ScheduledMatch] {
        &self.schedule
    }

    /// The simulated result for a match, if one is active.
    pub fn simulated_result(&self, match_id: &str) -> Option<&MatchOutcome> {
        self.simulated.get(match_id)
    }

    /// Number of currently active simulated results.
    pub fn simulated_count(&self) -> usize {
        self.simulated.len()
    }

    /// Scheduled matches whose real result is not yet in the books.
    pub fn remaining_matches(&self) -> impl Iterator<Item = &ScheduledMatch> {
        self.schedule.iter().filter(|m| !m.is_played())
    }

    /// Scheduled matches in a given round.
    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &ScheduledMatch> {
        self.schedule
            .iter()
            .filter(move |m| m.round == Some(round))
    }

    /// Scheduled matches on a given date.
    pub fn matches_on(&self, date: NaiveDate) -> impl Iterator<Item = &ScheduledMatch> {
        self.schedule.iter().filter(move |m| m.date == Some(date))
    }

    /// Rebuild the table from the baseline plus the full simulated set.
    ///
    /// Construction validated every schedule reference against the
    /// baseline, and `set_result` rejects ties up front, so this cannot
    /// fail for outcomes that entered through the public API.
    fn recompute(&mut self) -> Result<(), StandingsError> {
        let records = accumulate(&self.baseline, self.simulated.values())?;
        self.table = rank(&self.teams, &records);
        Ok(())
    }
}

fn validate_score(score: i64) -> Result<u32, StandingsError> {
    u32::try_from(score).map_err(|_| StandingsError::NegativeScore(score))
}
