//! Summary View Widget
//! Executive summary cards: revenue, expenses, net profit, margin.

use crate::data::processor::Summary;
use crate::fmt;
use egui::{Color32, RichText};

const POSITIVE: Color32 = Color32::from_rgb(40, 167, 69);
const NEGATIVE: Color32 = Color32::from_rgb(220, 53, 69);

/// Draws the four summary cards with period-over-period deltas.
pub struct SummaryView;

impl SummaryView {
    pub fn show(ui: &mut egui::Ui, summary: &Summary, symbol: &str) {
        ui.horizontal_wrapped(|ui| {
            Self::card(
                ui,
                "Total Revenue",
                &fmt::currency(symbol, summary.total_revenue),
                None,
                Some(summary.revenue_change),
                symbol,
            );
            Self::card(
                ui,
                "Total Expenses",
                &fmt::currency(symbol, summary.total_expenses),
                None,
                Some(summary.expenses_change),
                symbol,
            );
            Self::card(
                ui,
                "Net Profit",
                &fmt::currency(symbol, summary.net_profit),
                Some(if summary.net_profit >= 0.0 { POSITIVE } else { NEGATIVE }),
                Some(summary.profit_change),
                symbol,
            );
            Self::card(
                ui,
                "Profit Margin",
                &format!("{:.1}%", summary.profit_margin),
                None,
                None,
                symbol,
            );
        });
    }

    fn card(
        ui: &mut egui::Ui,
        title: &str,
        value: &str,
        value_color: Option<Color32>,
        change: Option<f64>,
        symbol: &str,
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(170.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                    let text = RichText::new(value).size(20.0).strong();
                    ui.label(match value_color {
                        Some(color) => text.color(color),
                        None => text,
                    });
                    match change {
                        Some(delta) => {
                            let color = if delta >= 0.0 { POSITIVE } else { NEGATIVE };
                            ui.label(
                                RichText::new(fmt::signed_currency(symbol, delta))
                                    .size(11.0)
                                    .color(color),
                            );
                        }
                        None => {
                            ui.label(
                                RichText::new("vs previous period")
                                    .size(11.0)
                                    .color(Color32::GRAY),
                            );
                        }
                    }
                });
            });
        ui.add_space(10.0);
    }
}
