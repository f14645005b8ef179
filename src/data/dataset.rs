//! Dataset Location Module
//! Resolves where the World Cup CSV files live on disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Kaggle identifier of the FIFA World Cup dataset.
pub const DEFAULT_DATASET: &str = "abecklas/fifa-world-cup";

pub const TOURNAMENTS_FILE: &str = "WorldCups.csv";
pub const PLAYERS_FILE: &str = "WorldCupPlayers.csv";

/// Local folder searched next to the executable and under the working directory.
const INPUT_DIR: &str = "input";

/// Resolves a dataset identifier to a directory that holds its files.
pub trait DatasetSource {
    fn dataset_dir(&self, id: &str) -> Option<PathBuf>;
}

/// A directory given explicitly on the command line.
///
/// Always returned, even when it does not exist, so it stays the first
/// candidate and shows up in missing-file diagnostics.
pub struct FixedDir(pub PathBuf);

impl DatasetSource for FixedDir {
    fn dataset_dir(&self, _id: &str) -> Option<PathBuf> {
        if !self.0.is_dir() {
            warn!(dir = %self.0.display(), "data directory does not exist");
        }
        Some(self.0.clone())
    }
}

/// Datasets previously downloaded by kagglehub.
///
/// Layout: `<root>/datasets/<owner>/<name>/versions/<N>/`. The highest
/// numeric version wins.
pub struct KaggleHubCache {
    root: PathBuf,
}

impl KaggleHubCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root from `$KAGGLEHUB_CACHE`, else `$HOME/.cache/kagglehub`.
    pub fn from_env() -> Option<Self> {
        if let Some(root) = env::var_os("KAGGLEHUB_CACHE") {
            return Some(Self::new(root));
        }
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(|home| Self::new(PathBuf::from(home).join(".cache").join("kagglehub")))
    }

    fn latest_version(versions_dir: &Path) -> Option<PathBuf> {
        fs::read_dir(versions_dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let version = entry.file_name().to_str()?.parse::<u32>().ok()?;
                Some((version, entry.path()))
            })
            .max_by_key(|(version, _)| *version)
            .map(|(_, path)| path)
    }
}

impl DatasetSource for KaggleHubCache {
    fn dataset_dir(&self, id: &str) -> Option<PathBuf> {
        let (owner, name) = id.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        let versions = self
            .root
            .join("datasets")
            .join(owner)
            .join(name)
            .join("versions");
        let found = Self::latest_version(&versions);
        debug!(cache = %versions.display(), found = ?found, "kagglehub cache lookup");
        found
    }
}

/// Directory of the running executable's `input/` folder.
pub fn executable_input_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(INPUT_DIR)))
}

/// Directory searched first: the dataset source result, or `input/` next to the executable.
pub fn dataset_root(source: &dyn DatasetSource, id: &str) -> PathBuf {
    source
        .dataset_dir(id)
        .or_else(executable_input_dir)
        .unwrap_or_else(|| PathBuf::from(INPUT_DIR))
}

/// Ordered candidate paths for `file_name`, without repeats.
pub fn candidates_for(file_name: &str, dataset_root: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![dataset_root.join(file_name)];
    let others = executable_input_dir()
        .into_iter()
        .chain(Some(PathBuf::from(INPUT_DIR)))
        .map(|dir| dir.join(file_name));
    for path in others {
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    }
    candidates
}

/// Sorted entries of the dataset folder, empty when it cannot be read.
pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map(|rd| rd.filter_map(|entry| entry.ok()).map(|entry| entry.path()).collect())
        .unwrap_or_default();
    entries.sort();
    entries
}

/// Return the first candidate that exists.
pub fn locate(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.exists()).cloned()
}
