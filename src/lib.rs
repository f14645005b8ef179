//! World Cup Stats - FIFA World Cup results analysis & chart viewer
//!
//! Loads `WorldCups.csv` and `WorldCupPlayers.csv`, computes per-year
//! series and frequency tables, and shows the results as text and charts.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;

pub use analysis::{analyze, analyze_files, AnalysisError};
pub use config::Settings;
pub use report::Report;
