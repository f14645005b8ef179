//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

use crate::report::Report;
use crate::stats::Histogram;

/// RGB colors shared by the interactive and static renderers
pub const GREEN: [u8; 3] = [46, 139, 87];
pub const ORANGE: [u8; 3] = [243, 156, 18];
pub const BLUE: [u8; 3] = [52, 152, 219];
pub const PURPLE: [u8; 3] = [155, 89, 182];

/// Width of a per-year bar; editions are four years apart.
const YEAR_BAR_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Connected points with markers
    Line(Vec<(f64, f64)>),
    /// Bars centred on numeric x positions
    Bars { points: Vec<(f64, f64)>, width: f64 },
    /// One bar per category label
    Categories(Vec<(String, f64)>),
    Histogram(Histogram),
}

/// One chart: data plus presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// File stem used for exports
    pub id: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: [u8; 3],
    pub kind: ChartKind,
}

impl ChartData {
    /// Charts in display order. Sections without data produce no chart.
    pub fn from_report(report: &Report) -> Vec<ChartData> {
        let mut charts = Vec::new();

        if !report.goals_per_year.is_empty() {
            charts.push(ChartData {
                id: "goals_per_year",
                title: "Change in numbers of goals scored".to_string(),
                x_label: "Year".to_string(),
                y_label: "Goals Scored".to_string(),
                color: GREEN,
                kind: ChartKind::Line(
                    report
                        .goals_per_year
                        .iter()
                        .map(|&(year, goals)| (year as f64, goals as f64))
                        .collect(),
                ),
            });
        }

        if !report.attendance_per_year.is_empty() {
            charts.push(ChartData {
                id: "attendance_per_year",
                title: "Total attendance per Year".to_string(),
                x_label: "Year".to_string(),
                y_label: "Spectators".to_string(),
                color: ORANGE,
                kind: ChartKind::Bars {
                    points: report
                        .attendance_per_year
                        .iter()
                        .map(|&(year, attendance)| (year as f64, attendance as f64))
                        .collect(),
                    width: YEAR_BAR_WIDTH,
                },
            });
        }

        let Some(players) = report.players_report() else {
            return charts;
        };

        if let Some(lineup) = players.lineup.as_ref().filter(|t| !t.is_empty()) {
            charts.push(ChartData {
                id: "lineup",
                title: "Players in Lineup vs Substitutes".to_string(),
                x_label: "Starters vs Substitutes".to_string(),
                y_label: "Number of Players".to_string(),
                color: BLUE,
                kind: ChartKind::Categories(
                    lineup
                        .entries
                        .iter()
                        .map(|e| (e.value.clone(), e.count as f64))
                        .collect(),
                ),
            });
        }

        if let Some(goals) = players.goal_minutes.as_ref().filter(|g| g.histogram.total() > 0) {
            charts.push(ChartData {
                id: "goal_minutes",
                title: "Goal Minutes Distribution".to_string(),
                x_label: "Minutes".to_string(),
                y_label: "Number of Goals".to_string(),
                color: PURPLE,
                kind: ChartKind::Histogram(goals.histogram.clone()),
            });
        }

        charts
    }

    /// Smallest rectangle holding every bar or point: `(x_min, x_max, y_max)`.
    pub fn extent(&self) -> (f64, f64, f64) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = match &self.kind {
            ChartKind::Line(points) => points.iter().copied().unzip(),
            ChartKind::Bars { points, width } => points
                .iter()
                .flat_map(|&(x, y)| [(x - width / 2.0, y), (x + width / 2.0, y)])
                .unzip(),
            ChartKind::Categories(bars) => bars
                .iter()
                .enumerate()
                .map(|(i, (_, y))| (i as f64, *y))
                .chain(std::iter::once((-0.5, 0.0)))
                .chain(std::iter::once((bars.len() as f64 - 0.5, 0.0)))
                .unzip(),
            ChartKind::Histogram(hist) => (
                vec![
                    hist.edges.first().copied().unwrap_or(0.0),
                    hist.edges.last().copied().unwrap_or(1.0),
                ],
                hist.counts.iter().map(|&c| c as f64).collect(),
            ),
        };

        let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let y_max = ys.iter().copied().fold(0.0, f64::max);
        if x_min.is_finite() && x_max.is_finite() {
            (x_min, x_max, y_max)
        } else {
            (0.0, 1.0, y_max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PlayersSection;
    use crate::stats::FrequencyTable;
    use std::path::PathBuf;

    fn report() -> Report {
        Report {
            tournaments_path: PathBuf::from("WorldCups.csv"),
            goals_per_year: vec![(1930, 70), (1934, 70)],
            attendance_per_year: vec![(1930, 590_549), (1934, 363_000)],
            finishers: vec![FrequencyTable::from_values("Winner", [Some("Uruguay")])],
            players: PlayersSection::Missing { candidates: vec![] },
        }
    }

    #[test]
    fn tournament_charts_without_players() {
        let charts = ChartData::from_report(&report());
        let ids: Vec<&str> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["goals_per_year", "attendance_per_year"]);
        assert_eq!(
            charts[0].kind,
            ChartKind::Line(vec![(1930.0, 70.0), (1934.0, 70.0)])
        );
    }

    #[test]
    fn bar_extent_includes_bar_width() {
        let charts = ChartData::from_report(&report());
        let (x_min, x_max, y_max) = charts[1].extent();
        assert_eq!(x_min, 1929.0);
        assert_eq!(x_max, 1935.0);
        assert_eq!(y_max, 590_549.0);
    }

    #[test]
    fn histogram_extent_follows_edges() {
        let chart = ChartData {
            id: "goal_minutes",
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            color: PURPLE,
            kind: ChartKind::Histogram(Histogram::new(&[1.0, 90.0, 45.0], 9)),
        };
        assert_eq!(chart.extent(), (1.0, 90.0, 1.0));
    }
}
