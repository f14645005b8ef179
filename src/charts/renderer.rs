//! Static Chart Renderer
//! Writes the report charts as PNG files with plotters.

use crate::charts::{ChartData, ChartKind};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to draw chart '{chart}': {message}")]
    Plot { chart: String, message: String },
    #[error("Chart viewer failed: {0}")]
    Viewer(String),
}

/// Output image size in pixels
pub const IMAGE_SIZE: (u32, u32) = (1000, 600);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `dir` as `<id>.png`, creating `dir` if needed.
    pub fn export_all(charts: &[ChartData], dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(charts.len());
        for chart in charts {
            let path = dir.join(format!("{}.png", chart.id));
            Self::render_png(chart, &path, IMAGE_SIZE)?;
            info!(path = %path.display(), "chart exported");
            written.push(path);
        }
        Ok(written)
    }

    /// Render one chart to a PNG file.
    pub fn render_png(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        Self::draw(chart, path, size).map_err(|e| RenderError::Plot {
            chart: chart.id.to_string(),
            message: e.to_string(),
        })
    }

    fn draw(
        chart: &ChartData,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let color = RGBColor(chart.color[0], chart.color[1], chart.color[2]);
        let (x_min, x_max, y_max) = chart.extent();
        let x_pad = ((x_max - x_min) * 0.03).max(0.5);
        let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((x_min - x_pad)..(x_max + x_pad), 0f64..y_top)?;

        let labels: Vec<String> = match &chart.kind {
            ChartKind::Categories(bars) => bars.iter().map(|(label, _)| label.clone()).collect(),
            _ => Vec::new(),
        };
        let categorical = !labels.is_empty();
        let x_formatter = |x: &f64| {
            if categorical {
                let idx = x.round();
                if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            } else {
                format!("{:.0}", x)
            }
        };

        let y_formatter = |y: &f64| format!("{:.0}", y);

        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        if categorical {
            mesh.x_labels(labels.len() * 2 + 1);
        }
        mesh.draw()?;

        match &chart.kind {
            ChartKind::Line(points) => {
                ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
                ctx.draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )?;
            }
            ChartKind::Bars { points, width } => {
                ctx.draw_series(points.iter().map(|&(x, y)| {
                    Rectangle::new([(x - width / 2.0, 0.0), (x + width / 2.0, y)], color.filled())
                }))?;
            }
            ChartKind::Categories(bars) => {
                ctx.draw_series(bars.iter().enumerate().map(|(i, (_, y))| {
                    let x = i as f64;
                    Rectangle::new([(x - 0.3, 0.0), (x + 0.3, *y)], color.filled())
                }))?;
            }
            ChartKind::Histogram(hist) => {
                ctx.draw_series(hist.buckets().map(|(lo, hi, count)| {
                    Rectangle::new([(lo, 0.0), (hi, count as f64)], color.filled())
                }))?;
                ctx.draw_series(hist.buckets().map(|(lo, hi, count)| {
                    Rectangle::new([(lo, 0.0), (hi, count as f64)], BLACK.stroke_width(1))
                }))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{GoalMinutesReport, PlayersReport, PlayersSection, Report};
    use crate::stats::{CountMethod, FrequencyTable, Histogram, PlayerCount, StatsCalculator};
    use tempfile::tempdir;

    fn full_report() -> Report {
        let extraction =
            StatsCalculator::extract_goal_minutes([Some("G19'"), Some("G40' G87'"), Some("G90+1'")]);
        let minutes: Vec<f64> = extraction.minutes.iter().map(|&m| m as f64).collect();
        Report {
            tournaments_path: PathBuf::from("WorldCups.csv"),
            goals_per_year: vec![(1950, 88), (1954, 140)],
            attendance_per_year: vec![(1950, 1_337_000), (1954, 943_000)],
            finishers: vec![FrequencyTable::from_values("Winner", [Some("Uruguay")])],
            players: PlayersSection::Loaded(PlayersReport {
                path: PathBuf::from("WorldCupPlayers.csv"),
                columns: vec!["Line-up".to_string(), "Event".to_string()],
                appearances: PlayerCount {
                    total: 3,
                    method: CountMethod::Rows,
                },
                lineup: Some(FrequencyTable::from_values(
                    "Line-up",
                    [Some("S"), Some("S"), Some("N")],
                )),
                goal_minutes: Some(GoalMinutesReport {
                    histogram: Histogram::new(&minutes, 9),
                    summary: StatsCalculator::compute_descriptive_stats(&minutes),
                    extraction,
                }),
                top_coaches: None,
                top_players: None,
            }),
        }
    }

    #[test]
    fn export_writes_one_png_per_chart() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("charts");
        let charts = ChartData::from_report(&full_report());
        assert_eq!(charts.len(), 4);

        let written = StaticChartRenderer::export_all(&charts, &out).unwrap();

        let expected: Vec<PathBuf> = ["goals_per_year", "attendance_per_year", "lineup", "goal_minutes"]
            .iter()
            .map(|id| out.join(format!("{id}.png")))
            .collect();
        assert_eq!(written, expected);
        for path in &expected {
            let size = fs::metadata(path).unwrap().len();
            assert!(size > 0, "{} is empty", path.display());
        }
    }

    #[test]
    fn export_with_no_charts_only_creates_the_folder() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("empty");
        let written = StaticChartRenderer::export_all(&[], &out).unwrap();
        assert!(written.is_empty());
        assert!(out.is_dir());
    }
}
