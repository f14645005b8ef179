//! Run settings.

use crate::data::dataset::DEFAULT_DATASET;
use crate::data::{DatasetSource, FixedDir, KaggleHubCache};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOP_COACHES: usize = 20;
pub const DEFAULT_TOP_PLAYERS: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 9;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid settings file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Kaggle dataset identifier (`owner/name`)
    pub dataset: String,
    /// Directory holding the CSV files; bypasses the kagglehub cache
    pub data_dir: Option<PathBuf>,
    pub top_coaches: usize,
    pub top_players: usize,
    pub histogram_bins: usize,
    /// Open the interactive chart window
    pub show_charts: bool,
    /// Write PNG charts here
    pub export_dir: Option<PathBuf>,
    /// Print the report as JSON instead of text tables
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            data_dir: None,
            top_coaches: DEFAULT_TOP_COACHES,
            top_players: DEFAULT_TOP_PLAYERS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            show_charts: true,
            export_dir: None,
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings that read the CSV files from `dir` and produce no charts.
    pub fn for_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: Some(dir.as_ref().to_path_buf()),
            show_charts: false,
            ..Self::default()
        }
    }

    /// Where the dataset directory comes from.
    pub fn dataset_source(&self) -> Box<dyn DatasetSource> {
        match (&self.data_dir, KaggleHubCache::from_env()) {
            (Some(dir), _) => Box::new(FixedDir(dir.clone())),
            (None, Some(cache)) => Box::new(cache),
            (None, None) => Box::new(NoSource),
        }
    }
}

struct NoSource;

impl DatasetSource for NoSource {
    fn dataset_dir(&self, _id: &str) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_layout() {
        let settings = Settings::default();
        assert_eq!(settings.dataset, "abecklas/fifa-world-cup");
        assert_eq!(settings.top_coaches, 20);
        assert_eq!(settings.top_players, 10);
        assert_eq!(settings.histogram_bins, 9);
        assert!(settings.show_charts);
        assert!(settings.export_dir.is_none());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"top_players": 5, "json": true}"#).unwrap();
        assert_eq!(settings.top_players, 5);
        assert!(settings.json);
        assert_eq!(settings.top_coaches, DEFAULT_TOP_COACHES);
    }

    #[test]
    fn settings_file_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Settings::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains("settings.json"));

        let missing = Settings::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn data_dir_takes_precedence() {
        let dir = std::env::temp_dir();
        let settings = Settings::for_data_dir(&dir);
        assert_eq!(
            settings.dataset_source().dataset_dir(DEFAULT_DATASET),
            Some(dir)
        );
    }
}
