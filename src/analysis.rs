//! Analysis Pipeline
//! Locates the CSV files, loads them and computes every report section.

use crate::config::Settings;
use crate::data::dataset::{self, PLAYERS_FILE, TOURNAMENTS_FILE};
use crate::data::{
    DataProcessor, DatasetSource, LoadedTable, LoaderError, PlayersSchema, ProcessorError,
    TournamentSchema,
};
use crate::report::{GoalMinutesReport, PlayersReport, PlayersSection, Report};
use crate::stats::{FrequencyTable, Histogram, StatsCalculator, StatsError};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Failed to process tournaments: {0}")]
    Processor(#[from] ProcessorError),
    #[error("Failed to compute statistics: {0}")]
    Stats(#[from] StatsError),
}

/// Resolve both files through `source` and analyze them.
///
/// A missing tournaments file is fatal; a missing players file only
/// empties the players section.
pub fn analyze(settings: &Settings, source: &dyn DatasetSource) -> Result<Report, AnalysisError> {
    let root = dataset::dataset_root(source, &settings.dataset);
    info!(dataset = %settings.dataset, root = %root.display(), "dataset folder");
    for entry in dataset::list_dir(&root) {
        info!(path = %entry.display(), "dataset file");
    }

    let tournament_candidates = dataset::candidates_for(TOURNAMENTS_FILE, &root);
    let tournaments_path =
        dataset::locate(&tournament_candidates).ok_or_else(|| LoaderError::MissingFile {
            file: TOURNAMENTS_FILE.to_string(),
            candidates: tournament_candidates.clone(),
            cwd: env::current_dir().unwrap_or_default(),
            dataset_root: root.clone(),
        })?;

    let player_candidates = dataset::candidates_for(PLAYERS_FILE, &root);
    let players_path = dataset::locate(&player_candidates);
    if players_path.is_none() {
        warn!(candidates = ?player_candidates, "could not find {PLAYERS_FILE}");
    }

    let mut report = analyze_files(settings, &tournaments_path, players_path.as_deref())?;
    if let PlayersSection::Missing { candidates } = &mut report.players {
        *candidates = player_candidates;
    }
    Ok(report)
}

/// Analyze already-located files.
pub fn analyze_files(
    settings: &Settings,
    tournaments_path: &Path,
    players_path: Option<&Path>,
) -> Result<Report, AnalysisError> {
    let tournaments = LoadedTable::load_csv(tournaments_path)?;
    let schema = TournamentSchema::resolve(&tournaments)?;
    let records = DataProcessor::tournaments(&tournaments, &schema)?;

    if schema.goals_scored.is_none() {
        warn!(file = %tournaments.file_name(), "no GoalsScored column; goals chart skipped");
    }
    if schema.attendance.is_none() {
        warn!(file = %tournaments.file_name(), "no Attendance column; attendance chart skipped");
    }

    let finishers = [
        (&schema.winner, "Winner"),
        (&schema.runners_up, "Runners-Up"),
        (&schema.third, "Third"),
        (&schema.fourth, "Fourth"),
    ]
    .into_iter()
    .filter_map(|(column, canonical)| match column {
        Some(column) => Some(finisher_table(&tournaments, column)),
        None => {
            warn!(file = %tournaments.file_name(), column = canonical, "column not found; table skipped");
            None
        }
    })
    .collect::<Result<Vec<_>, _>>()?;

    let players = match players_path {
        Some(path) => PlayersSection::Loaded(analyze_players(settings, path)?),
        None => PlayersSection::Missing {
            candidates: Vec::new(),
        },
    };

    Ok(Report {
        tournaments_path: tournaments_path.to_path_buf(),
        goals_per_year: DataProcessor::goals_per_year(&records),
        attendance_per_year: DataProcessor::attendance_per_year(&records),
        finishers,
        players,
    })
}

fn finisher_table(table: &LoadedTable, column: &str) -> Result<FrequencyTable, LoaderError> {
    Ok(FrequencyTable::from_values(column, table.text_column(column)?))
}

fn analyze_players(settings: &Settings, path: &Path) -> Result<PlayersReport, AnalysisError> {
    let table = LoadedTable::load_csv(path)?;
    let schema = PlayersSchema::resolve(&table);

    let appearances = StatsCalculator::count_appearances(&table, &schema)?;
    info!(total = appearances.total, method = ?appearances.method, "counted player appearances");

    let lineup = optional_table(&table, schema.lineup.as_deref(), "lineup")?;
    if let Some(lineup) = &lineup {
        info!(column = %lineup.column, "using lineup column");
    }

    let goal_minutes = match schema.event.as_deref() {
        Some(column) => {
            let extraction = StatsCalculator::extract_goal_minutes(table.text_column(column)?);
            if extraction.dropped > 0 {
                warn!(dropped = extraction.dropped, "goal markers without a usable minute");
            }
            let minutes: Vec<f64> = extraction.minutes.iter().map(|&m| f64::from(m)).collect();
            Some(GoalMinutesReport {
                histogram: Histogram::new(&minutes, settings.histogram_bins),
                summary: StatsCalculator::compute_descriptive_stats(&minutes),
                extraction,
            })
        }
        None => {
            warn!(file = %table.file_name(), "no Event column; goal minutes skipped");
            None
        }
    };

    let top_coaches = optional_table(&table, schema.coach_name.as_deref(), "coach")?
        .map(|t| t.top(settings.top_coaches));
    let top_players = optional_table(&table, schema.player_name.as_deref(), "player name")?
        .map(|t| t.top(settings.top_players));

    Ok(PlayersReport {
        path: path.to_path_buf(),
        columns: table.get_columns(),
        appearances,
        lineup,
        goal_minutes,
        top_coaches,
        top_players,
    })
}

/// Frequency table of `column`, or `None` with a diagnostic when unresolved.
fn optional_table(
    table: &LoadedTable,
    column: Option<&str>,
    what: &str,
) -> Result<Option<FrequencyTable>, LoaderError> {
    match column {
        Some(column) => Ok(Some(FrequencyTable::from_values(
            column,
            table.text_column(column)?,
        ))),
        None => {
            warn!(
                file = %table.file_name(),
                available = ?table.get_columns(),
                "no {what} column found"
            );
            Ok(None)
        }
    }
}
