//! Column Schema Module
//! Maps the header spellings found in different dataset revisions onto
//! canonical columns, once, right after loading.

use crate::data::loader::{LoadedTable, LoaderError};
use serde::Serialize;
use tracing::debug;

const YEAR: &[&str] = &["Year"];
const GOALS_SCORED: &[&str] = &["GoalsScored", "Goals Scored"];
const ATTENDANCE: &[&str] = &["Attendance"];
const WINNER: &[&str] = &["Winner"];
const RUNNERS_UP: &[&str] = &["Runners-Up", "Runner-Up", "RunnersUp"];
const THIRD: &[&str] = &["Third"];
const FOURTH: &[&str] = &["Fourth"];

const MATCH_ID: &[&str] = &["MatchID", "Match ID"];
const PLAYER_NAME: &[&str] = &["Player Name", "Player"];
const COACH_NAME: &[&str] = &["Coach Name", "Coach"];
const EVENT: &[&str] = &["Event", "Events"];
const LINEUP: &[&str] = &[
    "Line_Up",
    "Line Up",
    "Line-Up",
    "LineUp",
    "IsStarter",
    "Starter",
    "Starting",
];

/// Comparison key: lowercase with spaces, `_` and `-` removed.
fn header_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the first spelling (in priority order) present among `columns`.
///
/// An exact header match is preferred over a normalized one.
pub fn resolve_column(columns: &[String], spellings: &[&str]) -> Option<String> {
    for spelling in spellings {
        if let Some(found) = columns.iter().find(|c| c.as_str() == *spelling) {
            return Some(found.clone());
        }
    }
    for spelling in spellings {
        let key = header_key(spelling);
        if let Some(found) = columns.iter().find(|c| header_key(c) == key) {
            return Some(found.clone());
        }
    }
    None
}

/// Resolved header names of the tournaments table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentSchema {
    pub year: String,
    pub goals_scored: Option<String>,
    pub attendance: Option<String>,
    pub winner: Option<String>,
    pub runners_up: Option<String>,
    pub third: Option<String>,
    pub fourth: Option<String>,
}

impl TournamentSchema {
    /// Year is the key of every per-edition view, so it is required.
    pub fn resolve(table: &LoadedTable) -> Result<Self, LoaderError> {
        let columns = table.get_columns();
        let year = resolve_column(&columns, YEAR).ok_or_else(|| LoaderError::MissingColumn {
            column: YEAR[0].to_string(),
            file: table.file_name(),
            available: columns.clone(),
        })?;

        let schema = Self {
            year,
            goals_scored: resolve_column(&columns, GOALS_SCORED),
            attendance: resolve_column(&columns, ATTENDANCE),
            winner: resolve_column(&columns, WINNER),
            runners_up: resolve_column(&columns, RUNNERS_UP),
            third: resolve_column(&columns, THIRD),
            fourth: resolve_column(&columns, FOURTH),
        };
        debug!(?schema, "resolved tournaments schema");
        Ok(schema)
    }
}

/// Resolved header names of the player appearances table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayersSchema {
    pub match_id: Option<String>,
    pub player_name: Option<String>,
    pub coach_name: Option<String>,
    pub event: Option<String>,
    pub lineup: Option<String>,
}

impl PlayersSchema {
    pub fn resolve(table: &LoadedTable) -> Self {
        let columns = table.get_columns();
        let schema = Self {
            match_id: resolve_column(&columns, MATCH_ID),
            player_name: resolve_column(&columns, PLAYER_NAME),
            coach_name: resolve_column(&columns, COACH_NAME),
            event: resolve_column(&columns, EVENT),
            lineup: resolve_column(&columns, LINEUP),
        };
        debug!(?schema, "resolved players schema");
        schema
    }
}
