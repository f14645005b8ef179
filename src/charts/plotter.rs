//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{ChartData, ChartKind};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Draw one chart at the given height.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        let color = Self::color(chart.color);

        let mut plot = Plot::new(format!("chart_{}", chart.id))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .include_y(0.0);

        if let ChartKind::Categories(bars) = &chart.kind {
            // Category labels on integer positions only
            let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
            plot = plot.x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            });
        }

        plot.show(ui, |plot_ui| match &chart.kind {
            ChartKind::Line(points) => {
                let series: Vec<[f64; 2]> = points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name(&chart.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(4.0)
                        .color(color),
                );
            }
            ChartKind::Bars { points, width } => {
                let bars: Vec<Bar> = points
                    .iter()
                    .map(|&(x, y)| Bar::new(x, y).width(*width).fill(color))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&chart.y_label));
            }
            ChartKind::Categories(categories) => {
                let bars: Vec<Bar> = categories
                    .iter()
                    .enumerate()
                    .map(|(i, (label, y))| Bar::new(i as f64, *y).width(0.6).name(label).fill(color))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&chart.y_label));
            }
            ChartKind::Histogram(hist) => {
                let width = hist.bin_width();
                let bars: Vec<Bar> = hist
                    .buckets()
                    .map(|(lo, hi, count)| {
                        Bar::new((lo + hi) / 2.0, count as f64)
                            .width(width)
                            .fill(color)
                            .stroke(egui::Stroke::new(1.0, Color32::BLACK))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&chart.y_label));
            }
        });
    }
}
