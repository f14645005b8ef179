//! Chart Viewer Widget
//! Scrollable panel showing every report chart as a card.
//! Supports responsive multi-column layout based on available width.

use crate::charts::{ChartData, ChartPlotter};
use egui::{RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 420.0;
const CHART_WIDTH: f32 = 640.0;
const PLOT_HEIGHT: f32 = 340.0;

/// Scrollable chart display area.
/// Automatically arranges charts into columns based on available width.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Vec<ChartData>,
}

impl ChartViewer {
    pub fn new(charts: Vec<ChartData>) -> Self {
        Self { charts }
    }

    /// Number of card columns that fit in `avail_width`.
    pub fn columns_for_width(avail_width: f32) -> usize {
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        ((avail_width / card_total_width).floor() as usize).max(1)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let num_columns = Self::columns_for_width(ui.available_width());
        let total_rows = self.charts.len().div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;
        let charts = &self.charts;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for chart in charts.iter().skip(row * num_columns).take(num_columns) {
                            Self::draw_chart_card(ui, chart);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    /// Draw a single chart card with fixed width
    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData) {
        let accent = ChartPlotter::color(chart.color);

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, accent))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CHART_WIDTH - 20.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(&chart.title)
                            .size(18.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw_chart(ui, chart, PLOT_HEIGHT);
                });
            });
    }
}
