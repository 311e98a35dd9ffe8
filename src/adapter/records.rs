// Raw record payloads as exported from the backing store.
//
// The store's field names drifted across seasons: team names appear as
// `name`, `team_name`, or `Lag`; team references are sometimes
// linked-record arrays and sometimes plain ids; extra-time buckets were
// renamed from `ot_wins`/`ot_losses`. All of that guessing is absorbed
// here with serde aliases so the engine only ever sees the canonical
// shapes in `standings`.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::standings::outcome::OutcomeKind;

/// Export envelope: `{ "records": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct RecordEnvelope<T> {
    pub records: Vec<T>,
}

// ---------------------------------------------------------------------------
// Teams table
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TeamRow {
    pub id: String,
    pub fields: TeamFields,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct TeamFields {
    #[serde(alias = "team_name", alias = "Lag")]
    pub name: String,
    /// Absorb whatever else the export carries (city, short_name, ...).
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Team_Stats table
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StatsRow {
    pub id: String,
    pub fields: StatsFields,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct StatsFields {
    /// Linked record to the Teams table (an array of record ids).
    #[serde(default)]
    pub team_id: Vec<String>,
    /// Older exports put the display name straight on the stats row.
    #[serde(default, alias = "team_name", alias = "Lag")]
    pub name: Option<String>,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default, alias = "ot_wins")]
    pub overtime_wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, alias = "ot_losses")]
    pub overtime_losses: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Matches table
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MatchRow {
    pub id: String,
    pub fields: MatchFields,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MatchFields {
    /// The store's own match key, when present; falls back to the record id.
    #[serde(default)]
    pub match_id: Option<String>,
    pub home_team: TeamLink,
    pub away_team: TeamLink,
    /// Raw scores straight from the export; validated during
    /// normalization, so bad rows degrade to unplayed instead of
    /// poisoning the engine.
    #[serde(default, alias = "home_goals")]
    pub home_score: Option<i64>,
    #[serde(default, alias = "away_goals")]
    pub away_score: Option<i64>,
    #[serde(default, alias = "match_type")]
    pub kind: Option<OutcomeKind>,
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub match_date: Option<NaiveDate>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

/// A team reference: a linked-record array in newer exports, a plain id
/// string in older ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TeamLink {
    Linked(Vec<String>),
    Plain(String),
}

impl TeamLink {
    pub fn id(&self) -> Option<&str> {
        match self {
            TeamLink::Linked(ids) => ids.first().map(String::as_str),
            TeamLink::Plain(id) => Some(id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_row_accepts_all_name_spellings() {
        for key in ["name", "team_name", "Lag"] {
            let json = format!(
                r#"{{ "id": "rec1", "fields": {{ "{key}": "Frölunda HC" }} }}"#
            );
            let row: TeamRow = serde_json::from_str(&json).unwrap();
            assert_eq!(row.fields.name, "Frölunda HC");
        }
    }

    #[test]
    fn team_row_absorbs_extra_fields() {
        let json = r#"{ "id": "rec1", "fields": { "name": "Luleå HF", "city": "Luleå", "founded": 1977 } }"#;
        let row: TeamRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.fields.name, "Luleå HF");
    }

    #[test]
    fn stats_row_accepts_ot_aliases() {
        let json = r#"{
            "id": "rec2",
            "fields": {
                "team_id": ["rec1"],
                "games_played": 3,
                "wins": 1,
                "ot_wins": 1,
                "ot_losses": 1,
                "losses": 0,
                "goals_for": 9,
                "goals_against": 7,
                "points": 6
            }
        }"#;
        let row: StatsRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.fields.overtime_wins, 1);
        assert_eq!(row.fields.overtime_losses, 1);
        assert_eq!(row.fields.team_id, vec!["rec1".to_string()]);
    }

    #[test]
    fn stats_row_with_missing_counters_defaults_to_zero() {
        let json = r#"{ "id": "rec2", "fields": { "team_id": ["rec1"] } }"#;
        let row: StatsRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.fields.games_played, 0);
        assert_eq!(row.fields.points, 0);
    }

    #[test]
    fn match_row_with_linked_team_arrays() {
        let json = r#"{
            "id": "recM",
            "fields": {
                "match_id": "2026-01-17-FBK-FHC",
                "home_team": ["recFBK"],
                "away_team": ["recFHC"],
                "home_score": 4,
                "away_score": 2,
                "match_type": "regular",
                "round": 32,
                "match_date": "2026-01-17"
            }
        }"#;
        let row: MatchRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.fields.home_team.id(), Some("recFBK"));
        assert_eq!(row.fields.away_team.id(), Some("recFHC"));
        assert_eq!(row.fields.kind, Some(OutcomeKind::Regulation));
        assert_eq!(
            row.fields.match_date,
            NaiveDate::from_ymd_opt(2026, 1, 17)
        );
    }

    #[test]
    fn match_row_with_plain_id_strings() {
        let json = r#"{
            "id": "recM",
            "fields": { "home_team": "recFBK", "away_team": "recFHC" }
        }"#;
        let row: MatchRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.fields.home_team.id(), Some("recFBK"));
        assert_eq!(row.fields.home_score, None);
        assert_eq!(row.fields.kind, None);
    }

    #[test]
    fn empty_team_link_resolves_to_none() {
        let link: TeamLink = serde_json::from_str("[]").unwrap();
        assert_eq!(link.id(), None);
    }
}
