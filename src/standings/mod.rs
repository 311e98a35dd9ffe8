// Standings engine: outcome classification, accumulation, ranking, and the
// what-if simulation session.

pub mod outcome;
pub mod session;
pub mod stats;
pub mod table;

use thiserror::Error;

/// Errors surfaced by the standings engine.
///
/// All of these are input-validation failures, detected synchronously and
/// never retried. A failed call leaves the session state exactly as it was
/// (no partial application).
#[derive(Debug, Error)]
pub enum StandingsError {
    /// Tied scores. This league decides every match, so a draw is a domain
    /// violation, not a result.
    #[error("a {home}-{away} tie is not a result this league can produce")]
    InvalidResult { home: u32, away: u32 },

    /// An outcome references a team id absent from the baseline.
    #[error("unknown team id `{0}`")]
    UnknownTeam(String),

    /// A score below zero (or otherwise not a valid goal count) was
    /// supplied at the session boundary.
    #[error("score {0} is not a valid goal count")]
    NegativeScore(i64),

    /// No scheduled match with the given id.
    #[error("no scheduled match with id `{0}`")]
    UnknownMatch(String),

    /// The match's real result is already reflected in the baseline and
    /// cannot be simulated over.
    #[error("match `{0}` already has a final result")]
    AlreadyPlayed(String),
}
