//! Chart Plotter Module
//! Draws the interactive dashboard charts using egui_plot.

use crate::charts::{ChartData, ChartKind};
use crate::fmt;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

pub const REVENUE_COLOR: Color32 = Color32::from_rgb(34, 197, 94);
pub const EXPENSE_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
pub const PROFIT_COLOR: Color32 = Color32::from_rgb(59, 130, 246);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(59, 130, 246),  // Blue
    Color32::from_rgb(239, 68, 68),   // Red
    Color32::from_rgb(16, 185, 129),  // Green
    Color32::from_rgb(245, 158, 11),  // Amber
    Color32::from_rgb(139, 92, 246),  // Violet
    Color32::from_rgb(236, 72, 153),  // Pink
    Color32::from_rgb(6, 182, 212),   // Cyan
    Color32::from_rgb(132, 204, 22),  // Lime
    Color32::from_rgb(249, 115, 22),  // Orange
    Color32::from_rgb(99, 102, 241),  // Indigo
];

/// Creates the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color_for(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw the chart matching the dataset's kind.
    pub fn draw(ui: &mut egui::Ui, data: &ChartData, symbol: &str, height: f32) {
        if data.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data for the current filters");
            });
            return;
        }

        match data.kind {
            ChartKind::MonthlyOverview => Self::draw_monthly_overview(ui, data, symbol, height),
            ChartKind::RevenueTrend => Self::draw_revenue_trend(ui, data, symbol, height),
            ChartKind::CustomerPerformance
            | ChartKind::PaymentStatus
            | ChartKind::ExpenseCategories => Self::draw_ranked_bars(ui, data, symbol, height),
        }
    }

    /// Grouped revenue/expense bars per month with a net-profit line overlay.
    fn draw_monthly_overview(ui: &mut egui::Ui, data: &ChartData, symbol: &str, height: f32) {
        let labels: Vec<String> = data.months.iter().map(|m| m.label()).collect();

        let revenue_bars: Vec<Bar> = data
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| Bar::new(i as f64 - 0.2, m.revenue).width(0.35))
            .collect();
        let expense_bars: Vec<Bar> = data
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| Bar::new(i as f64 + 0.2, m.expenses).width(0.35))
            .collect();
        let profit_points: PlotPoints = data
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| [i as f64, m.profit()])
            .collect();

        Self::plot(data.kind, labels, symbol, height)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(revenue_bars)
                        .color(REVENUE_COLOR)
                        .name("Revenue"),
                );
                plot_ui.bar_chart(
                    BarChart::new(expense_bars)
                        .color(EXPENSE_COLOR)
                        .name("Expenses"),
                );
                plot_ui.line(
                    Line::new(profit_points)
                        .color(PROFIT_COLOR)
                        .width(2.0)
                        .name("Net Profit"),
                );
            });
    }

    /// Monthly revenue as a filled line.
    fn draw_revenue_trend(ui: &mut egui::Ui, data: &ChartData, symbol: &str, height: f32) {
        let labels: Vec<String> = data.months.iter().map(|m| m.label()).collect();
        let points: PlotPoints = data
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| [i as f64, m.revenue])
            .collect();

        Self::plot(data.kind, labels, symbol, height).show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .color(PROFIT_COLOR)
                    .width(2.0)
                    .fill(0.0)
                    .name("Monthly Revenue"),
            );
        });
    }

    /// One bar per ranked label (customers, statuses, categories).
    fn draw_ranked_bars(ui: &mut egui::Ui, data: &ChartData, symbol: &str, height: f32) {
        let labels: Vec<String> = data.entries.iter().map(|e| e.label.clone()).collect();
        let bars: Vec<Bar> = data
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                Bar::new(i as f64, e.total)
                    .width(0.6)
                    .fill(Self::color_for(i))
                    .name(&e.label)
            })
            .collect();

        Self::plot(data.kind, labels, symbol, height).show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
    }

    /// Shared plot scaffolding: category x-axis labels, currency y-axis.
    fn plot(kind: ChartKind, labels: Vec<String>, symbol: &str, height: f32) -> Plot {
        let symbol = symbol.to_string();
        Plot::new(format!("chart_{}", kind.export_name()))
            .height(height)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (idx - mark.value).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .y_axis_formatter(move |mark, _range| fmt::currency(&symbol, mark.value))
    }
}
