//! GUI module - Interactive chart window

mod app;
mod chart_viewer;

pub use app::WorldCupApp;
pub use chart_viewer::ChartViewer;
