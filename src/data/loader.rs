//! CSV Data Loader Module
//! Handles CSV file loading and column access using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(
        "Could not find {file}. Checked these locations:\n{}\n\nCurrent working directory: {}\nDataset folder was: {}",
        list_paths(.candidates),
        .cwd.display(),
        .dataset_root.display()
    )]
    MissingFile {
        file: String,
        candidates: Vec<PathBuf>,
        cwd: PathBuf,
        dataset_root: PathBuf,
    },
    #[error("Column '{column}' not found in {file} (available: {available:?})")]
    MissingColumn {
        column: String,
        file: String,
        available: Vec<String>,
    },
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A CSV file loaded into memory. Every column is read as text.
pub struct LoadedTable {
    df: DataFrame,
    file_path: PathBuf,
}

impl LoadedTable {
    /// Load a CSV file using Polars.
    ///
    /// Schema inference is disabled so that values such as `943.000` stay
    /// text; numeric parsing is left to the callers that know the format.
    pub fn load_csv(file_path: &Path) -> Result<Self, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        info!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded CSV"
        );

        Ok(Self {
            df,
            file_path: file_path.to_path_buf(),
        })
    }

    /// Wrap an existing DataFrame.
    pub fn from_dataframe(df: DataFrame, file_path: impl Into<PathBuf>) -> Self {
        Self {
            df,
            file_path: file_path.into(),
        }
    }

    /// Get list of column names.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows.
    pub fn get_row_count(&self) -> usize {
        self.df.height()
    }

    pub fn get_dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// File name used in diagnostics.
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    /// Text values of a column, in row order.
    pub fn text_column(&self, column: &str) -> Result<&StringChunked, LoaderError> {
        let col = self
            .df
            .column(column)
            .map_err(|_| LoaderError::MissingColumn {
                column: column.to_string(),
                file: self.file_name(),
                available: self.get_columns(),
            })?;
        Ok(col.str()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_every_column_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("WorldCups.csv");
        fs::write(
            &path,
            "Year,GoalsScored,Attendance\n1954,140,943.000\n1958,126,868.000\n",
        )
        .unwrap();

        let table = LoadedTable::load_csv(&path).unwrap();
        assert_eq!(table.get_row_count(), 2);
        assert_eq!(
            table.get_columns(),
            vec!["Year", "GoalsScored", "Attendance"]
        );

        let attendance: Vec<Option<&str>> =
            table.text_column("Attendance").unwrap().into_iter().collect();
        assert_eq!(attendance, vec![Some("943.000"), Some("868.000")]);
    }

    #[test]
    fn empty_fields_load_as_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("WorldCupPlayers.csv");
        fs::write(&path, "Player Name,Event\nPELE,G23'\nGARRINCHA,\n").unwrap();

        let table = LoadedTable::load_csv(&path).unwrap();
        let events: Vec<Option<&str>> = table.text_column("Event").unwrap().into_iter().collect();
        assert_eq!(events, vec![Some("G23'"), None]);
    }

    #[test]
    fn missing_column_lists_available_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("WorldCupPlayers.csv");
        fs::write(&path, "Player Name\nPELE\n").unwrap();

        let table = LoadedTable::load_csv(&path).unwrap();
        match table.text_column("Event") {
            Err(LoaderError::MissingColumn {
                column,
                file,
                available,
            }) => {
                assert_eq!(column, "Event");
                assert_eq!(file, "WorldCupPlayers.csv");
                assert_eq!(available, vec!["Player Name"]);
            }
            other => panic!("expected MissingColumn, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_file_message_lists_candidates() {
        let err = LoaderError::MissingFile {
            file: "WorldCups.csv".to_string(),
            candidates: vec![PathBuf::from("a/WorldCups.csv"), PathBuf::from("b/WorldCups.csv")],
            cwd: PathBuf::from("/work"),
            dataset_root: PathBuf::from("/data"),
        };
        let message = err.to_string();
        assert!(message.contains("a/WorldCups.csv"));
        assert!(message.contains("b/WorldCups.csv"));
        assert!(message.contains("/work"));
    }
}
