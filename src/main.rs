//! World Cup Stats - FIFA World Cup results analysis & chart viewer
//!
//! Prints the report tables and opens an interactive chart window.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use worldcup_stats::charts::{ChartData, StaticChartRenderer};
use worldcup_stats::gui::WorldCupApp;
use worldcup_stats::{analyze, Settings};

#[derive(Parser)]
#[command(name = "worldcup_stats")]
#[command(about = "Descriptive statistics and charts for the FIFA World Cup dataset", long_about = None)]
struct Cli {
    /// JSON settings file; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing WorldCups.csv and WorldCupPlayers.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Kaggle dataset identifier looked up in the kagglehub cache
    #[arg(long)]
    dataset: Option<String>,

    /// Number of coaches in the top-coaches table
    #[arg(long)]
    top_coaches: Option<usize>,

    /// Number of players in the top-players table
    #[arg(long)]
    top_players: Option<usize>,

    /// Goal-minute histogram buckets
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    bins: Option<u16>,

    /// Do not open the chart window
    #[arg(long)]
    no_charts: bool,

    /// Write the charts as PNG files into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)?,
            None => Settings::default(),
        };

        if let Some(dir) = &self.data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if let Some(dataset) = &self.dataset {
            settings.dataset = dataset.clone();
        }
        if let Some(n) = self.top_coaches {
            settings.top_coaches = n;
        }
        if let Some(n) = self.top_players {
            settings.top_players = n;
        }
        if let Some(bins) = self.bins {
            settings.histogram_bins = usize::from(bins);
        }
        if self.no_charts {
            settings.show_charts = false;
        }
        if let Some(dir) = &self.export_dir {
            settings.export_dir = Some(dir.clone());
        }
        if self.json {
            settings.json = true;
        }
        Ok(settings)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    debug!(?settings, "effective settings");

    let source = settings.dataset_source();
    let report = analyze(&settings, source.as_ref()).context("analysis failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if settings.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;
    drop(out);

    let charts = ChartData::from_report(&report);

    if let Some(dir) = &settings.export_dir {
        let written = StaticChartRenderer::export_all(&charts, dir)?;
        info!(count = written.len(), dir = %dir.display(), "charts written");
    }

    if settings.show_charts && !charts.is_empty() {
        WorldCupApp::run(charts)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
