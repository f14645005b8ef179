//! Statistics Calculator Module
//! Grouped counts, goal-minute extraction and descriptive statistics.

use crate::data::{LoadedTable, LoaderError, PlayersSchema};
use polars::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Goal marker inside an Event cell: `G` followed by the minute.
static GOAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"G(\d+)").expect("goal marker pattern is valid"));

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// How the player total was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountMethod {
    /// Player Name entries counted per MatchID, then summed
    PerMatch,
    /// Distinct non-null Player Name values
    DistinctNames,
    /// Plain row count
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerCount {
    pub total: u64,
    pub method: CountMethod,
}

/// Goal minutes pulled out of the Event column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalMinutes {
    pub minutes: Vec<u32>,
    /// Non-null Event cells examined
    pub events_scanned: usize,
    /// Cells carrying a goal marker whose minute could not be parsed
    pub dropped: usize,
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` buckets spanning their observed range.
    ///
    /// The last bucket includes its upper edge. A single distinct value
    /// spans `[v - 0.5, v + 0.5]`; no values spans `[0, 1]`.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = match values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + i as f64 * width })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// `(lower, upper, count)` per bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (self.edges[i], self.edges[i + 1], count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Descriptive statistics for a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p95: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Handles the aggregate computations over the loaded tables.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Total player appearances.
    ///
    /// With MatchID and Player Name: per-match non-null name counts, summed.
    /// With only Player Name: distinct non-null names. Otherwise: row count.
    pub fn count_appearances(
        table: &LoadedTable,
        schema: &PlayersSchema,
    ) -> Result<PlayerCount, StatsError> {
        match (&schema.match_id, &schema.player_name) {
            (Some(match_id), Some(player)) => {
                let per_match = table
                    .get_dataframe()
                    .clone()
                    .lazy()
                    .group_by([col(match_id.as_str())])
                    .agg([col(player.as_str()).count().alias("players")])
                    .select([col("players").sum()])
                    .collect()?;

                let total = per_match
                    .column("players")?
                    .cast(&DataType::Int64)?
                    .i64()?
                    .get(0)
                    .unwrap_or(0);

                Ok(PlayerCount {
                    total: total.max(0) as u64,
                    method: CountMethod::PerMatch,
                })
            }
            (None, Some(player)) => {
                let names: HashSet<&str> = table.text_column(player)?.into_iter().flatten().collect();
                Ok(PlayerCount {
                    total: names.len() as u64,
                    method: CountMethod::DistinctNames,
                })
            }
            _ => Ok(PlayerCount {
                total: table.get_row_count() as u64,
                method: CountMethod::Rows,
            }),
        }
    }

    /// Minute of the first goal marker in each Event cell.
    ///
    /// `G90+1'` yields 90: stoppage-time offsets are ignored. Cells without a
    /// marker are skipped; markers whose digits do not fit are dropped and counted.
    pub fn extract_goal_minutes<'a, I>(events: I) -> GoalMinutes
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut result = GoalMinutes::default();

        for event in events.into_iter().flatten() {
            result.events_scanned += 1;

            let Some(caps) = GOAL_MARKER.captures(event) else {
                continue;
            };
            match caps[1].parse::<u32>() {
                Ok(minute) => result.minutes.push(minute),
                Err(_) => result.dropped += 1,
            }
        }

        result
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> Summary {
        let n = values.len();
        if n == 0 {
            return Summary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Summary {
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            p05: Self::percentile(&sorted, 5.0),
            p95: Self::percentile(&sorted, 95.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}
