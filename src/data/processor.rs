//! Data Processor Module
//! Turns the raw tournaments table into typed records.

use crate::data::loader::{LoadedTable, LoaderError};
use crate::data::schema::TournamentSchema;
use polars::prelude::StringChunked;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Thousands separator used by the Attendance column.
pub const THOUSANDS_SEPARATOR: char = '.';

#[derive(Error, Debug, PartialEq, Eq)]
#[error("attendance value {value:?} is not an integer after removing thousands separators")]
pub struct AttendanceError {
    pub value: String,
}

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("row {row}: {source}")]
    Attendance {
        row: usize,
        #[source]
        source: AttendanceError,
    },
    #[error("row {row}: column '{column}' holds {value:?}, expected an integer")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: Year is empty")]
    MissingYear { row: usize },
    #[error("year {0} appears more than once")]
    DuplicateYear(i64),
}

/// One World Cup edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    pub year: i64,
    pub goals_scored: Option<i64>,
    pub attendance: Option<u64>,
    pub winner: Option<String>,
    pub runners_up: Option<String>,
    pub third: Option<String>,
    pub fourth: Option<String>,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// `"1.314.711"` -> `1314711`.
    pub fn normalize_attendance(raw: &str) -> Result<u64, AttendanceError> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| *c != THOUSANDS_SEPARATOR)
            .collect();
        digits.parse::<u64>().map_err(|_| AttendanceError {
            value: raw.to_string(),
        })
    }

    /// Build one record per row, normalizing Attendance on the way.
    ///
    /// Rows are 1-based in errors, counting the header as row 0.
    pub fn tournaments(
        table: &LoadedTable,
        schema: &TournamentSchema,
    ) -> Result<Vec<Tournament>, ProcessorError> {
        let years = table.text_column(&schema.year)?;
        let goals = Self::optional_column(table, schema.goals_scored.as_deref())?;
        let attendance = Self::optional_column(table, schema.attendance.as_deref())?;
        let winner = Self::optional_column(table, schema.winner.as_deref())?;
        let runners_up = Self::optional_column(table, schema.runners_up.as_deref())?;
        let third = Self::optional_column(table, schema.third.as_deref())?;
        let fourth = Self::optional_column(table, schema.fourth.as_deref())?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(table.get_row_count());

        for i in 0..table.get_row_count() {
            let row = i + 1;

            let year_text = years.get(i).ok_or(ProcessorError::MissingYear { row })?;
            let year = Self::parse_int(year_text, row, &schema.year)?;
            if !seen.insert(year) {
                return Err(ProcessorError::DuplicateYear(year));
            }

            let goals_scored = match (Self::cell(goals, i), schema.goals_scored.as_deref()) {
                (Some(text), Some(column)) => Some(Self::parse_int(text, row, column)?),
                _ => None,
            };

            let attendance = Self::cell(attendance, i)
                .map(Self::normalize_attendance)
                .transpose()
                .map_err(|source| ProcessorError::Attendance { row, source })?;

            records.push(Tournament {
                year,
                goals_scored,
                attendance,
                winner: Self::cell(winner, i).map(str::to_string),
                runners_up: Self::cell(runners_up, i).map(str::to_string),
                third: Self::cell(third, i).map(str::to_string),
                fourth: Self::cell(fourth, i).map(str::to_string),
            });
        }

        Ok(records)
    }

    /// (Year, GoalsScored) pairs ascending by year.
    pub fn goals_per_year(tournaments: &[Tournament]) -> Vec<(i64, i64)> {
        let mut points: Vec<(i64, i64)> = tournaments
            .iter()
            .filter_map(|t| Some((t.year, t.goals_scored?)))
            .collect();
        points.sort_by_key(|(year, _)| *year);
        points
    }

    /// (Year, Attendance) pairs ascending by year.
    pub fn attendance_per_year(tournaments: &[Tournament]) -> Vec<(i64, u64)> {
        let mut points: Vec<(i64, u64)> = tournaments
            .iter()
            .filter_map(|t| Some((t.year, t.attendance?)))
            .collect();
        points.sort_by_key(|(year, _)| *year);
        points
    }

    fn optional_column<'a>(
        table: &'a LoadedTable,
        column: Option<&str>,
    ) -> Result<Option<&'a StringChunked>, LoaderError> {
        column.map(|name| table.text_column(name)).transpose()
    }

    fn cell(column: Option<&StringChunked>, i: usize) -> Option<&str> {
        column.and_then(|ca| ca.get(i))
    }

    fn parse_int(text: &str, row: usize, column: &str) -> Result<i64, ProcessorError> {
        text.trim()
            .parse::<i64>()
            .map_err(|_| ProcessorError::InvalidNumber {
                row,
                column: column.to_string(),
                value: text.to_string(),
            })
    }
}
