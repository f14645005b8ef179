//! World Cup Stats Chart Window
//! Shows the report charts until the window is closed.

use crate::charts::{ChartData, RenderError};
use crate::gui::ChartViewer;
use eframe::egui;
use tracing::info;

const WINDOW_TITLE: &str = "World Cup Stats";

/// Main application window.
pub struct WorldCupApp {
    chart_viewer: ChartViewer,
}

impl WorldCupApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, charts: Vec<ChartData>) -> Self {
        Self {
            chart_viewer: ChartViewer::new(charts),
        }
    }

    /// Open the chart window. Blocks until it is closed.
    pub fn run(charts: Vec<ChartData>) -> Result<(), RenderError> {
        info!(charts = charts.len(), "opening chart window");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1340.0, 900.0])
                .with_min_inner_size([700.0, 500.0])
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(move |cc| Ok(Box::new(WorldCupApp::new(cc, charts)))),
        )
        .map_err(|e| RenderError::Viewer(e.to_string()))
    }
}

impl eframe::App for WorldCupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
