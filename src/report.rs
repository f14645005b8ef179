//! Report Module
//! Results of one analysis run and their text rendering.

use crate::stats::{CountMethod, FrequencyTable, GoalMinutes, Histogram, PlayerCount, Summary};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Everything computed from the two CSV files.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tournaments_path: PathBuf,
    pub goals_per_year: Vec<(i64, i64)>,
    pub attendance_per_year: Vec<(i64, u64)>,
    /// Winner, Runners-Up, Third and Fourth tables, for the columns present
    pub finishers: Vec<FrequencyTable>,
    pub players: PlayersSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayersSection {
    Missing { candidates: Vec<PathBuf> },
    Loaded(PlayersReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayersReport {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub appearances: PlayerCount,
    pub lineup: Option<FrequencyTable>,
    pub goal_minutes: Option<GoalMinutesReport>,
    pub top_coaches: Option<FrequencyTable>,
    pub top_players: Option<FrequencyTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalMinutesReport {
    pub extraction: GoalMinutes,
    pub histogram: Histogram,
    pub summary: Summary,
}

impl Report {
    /// Total players, zero when the players file is absent.
    pub fn total_players(&self) -> u64 {
        match &self.players {
            PlayersSection::Loaded(players) => players.appearances.total,
            PlayersSection::Missing { .. } => 0,
        }
    }

    pub fn players_report(&self) -> Option<&PlayersReport> {
        match &self.players {
            PlayersSection::Loaded(players) => Some(players),
            PlayersSection::Missing { .. } => None,
        }
    }

    /// Print every table in run order.
    pub fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Tournaments loaded from: {}", self.tournaments_path.display())?;
        writeln!(out)?;

        writeln!(out, "Goals scored per year")?;
        for (year, goals) in &self.goals_per_year {
            writeln!(out, "{year}    {goals:>5}")?;
        }
        writeln!(out)?;

        writeln!(out, "Total attendance per year")?;
        for (year, attendance) in &self.attendance_per_year {
            writeln!(out, "{year}    {attendance:>9}")?;
        }
        writeln!(out)?;

        for table in &self.finishers {
            writeln!(out, "{table}")?;
            writeln!(out)?;
        }

        match &self.players {
            PlayersSection::Missing { candidates } => {
                writeln!(out, "Could not find WorldCupPlayers.csv. Checked:")?;
                for path in candidates {
                    writeln!(out, " - {}", path.display())?;
                }
                writeln!(out, "Number of total players : 0")?;
            }
            PlayersSection::Loaded(players) => players.write_text(out)?,
        }

        Ok(())
    }
}

impl PlayersReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Players loaded from: {}", self.path.display())?;
        let method = match self.appearances.method {
            CountMethod::PerMatch => "player entries per match, summed",
            CountMethod::DistinctNames => "distinct player names",
            CountMethod::Rows => "rows",
        };
        writeln!(
            out,
            "Number of total players : {} ({method})",
            self.appearances.total
        )?;
        writeln!(out)?;

        match &self.lineup {
            Some(table) => {
                writeln!(out, "Using lineup column: '{}'", table.column)?;
                writeln!(out, "{table}")?;
            }
            None => {
                writeln!(out, "No lineup-like column found in players CSV. Available columns:")?;
                writeln!(out, "{:?}", self.columns)?;
            }
        }
        writeln!(out)?;

        match &self.goal_minutes {
            Some(goals) => {
                let s = &goals.summary;
                writeln!(out, "Goal minutes")?;
                writeln!(
                    out,
                    "goals: {}  scanned events: {}  dropped: {}",
                    s.count, goals.extraction.events_scanned, goals.extraction.dropped
                )?;
                if s.count > 0 {
                    writeln!(
                        out,
                        "mean: {:.1}  median: {:.1}  std: {:.1}  min: {}  max: {}  p05: {:.1}  p95: {:.1}",
                        s.mean, s.median, s.std, s.min, s.max, s.p05, s.p95
                    )?;
                }
                let last = goals.histogram.counts.len().saturating_sub(1);
                for (i, (lo, hi, count)) in goals.histogram.buckets().enumerate() {
                    let close = if i == last { ']' } else { ')' };
                    writeln!(out, "[{lo:>5.1}, {hi:>5.1}{close}  {count}")?;
                }
            }
            None => writeln!(out, "No Event column found; goal minutes skipped")?,
        }
        writeln!(out)?;

        if let Some(coaches) = &self.top_coaches {
            writeln!(out, "{coaches}")?;
            writeln!(out)?;
        }
        if let Some(players) = &self.top_players {
            writeln!(out, "{players}")?;
        }

        Ok(())
    }
}
