//! Chart View Widget
//! Responsive grid of chart cards, one per dashboard chart.

use crate::charts::{ChartData, ChartKind, ChartPlotter};
use egui::RichText;
use std::collections::HashMap;

const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 560.0;
const CHART_HEIGHT: f32 = 280.0;

/// Chart card grid. Cards have a fixed width and wrap to the available
/// columns. `show` returns the chart whose save button was clicked, if any.
#[derive(Default)]
pub struct ChartView {
    charts: HashMap<ChartKind, ChartData>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_charts(&mut self, charts: HashMap<ChartKind, ChartData>) {
        self.charts = charts;
    }

    pub fn charts(&self) -> &HashMap<ChartKind, ChartData> {
        &self.charts
    }

    pub fn has_charts(&self) -> bool {
        !self.charts.is_empty()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, symbol: &str) -> Option<ChartKind> {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Load both CSV files to see charts").size(16.0));
            });
            return None;
        }

        let avail_width = ui.available_width();
        let per_row = ((avail_width / (CARD_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        let mut export_request = None;
        for row in ChartKind::ALL.chunks(per_row) {
            ui.horizontal(|ui| {
                for kind in row {
                    if let Some(data) = self.charts.get(kind) {
                        if Self::draw_card(ui, data, symbol) {
                            export_request = Some(*kind);
                        }
                        ui.add_space(CHART_SPACING);
                    }
                }
            });
            ui.add_space(CHART_SPACING);
        }
        export_request
    }

    /// One chart card. Returns true when its save button was clicked.
    fn draw_card(ui: &mut egui::Ui, data: &ChartData, symbol: &str) -> bool {
        let mut save_clicked = false;
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 24.0);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(data.kind.title()).size(15.0).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            save_clicked = ui
                                .add_enabled(!data.is_empty(), egui::Button::new("💾 PNG"))
                                .clicked();
                        });
                    });
                    ui.add_space(6.0);
                    ChartPlotter::draw(ui, data, symbol, CHART_HEIGHT);
                });
            });
        save_clicked
    }
}
