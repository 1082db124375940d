//! Control Panel Widget
//! Left side panel: file intake, filters, export actions and progress.

use crate::data::processor::FilterSet;
use chrono::NaiveDate;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Raw filter inputs as typed by the user.
#[derive(Default, Clone)]
pub struct FilterInputs {
    pub customer: String,
    pub start_date: String,
    pub end_date: String,
    pub payment_status: String,
    pub payment_method: String,
}

impl FilterInputs {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Parse into a validated filter set.
    pub fn to_filter_set(&self) -> Result<FilterSet, &'static str> {
        let filters = FilterSet {
            customer: self.customer.trim().to_string(),
            start_date: parse_date_input(&self.start_date)?,
            end_date: parse_date_input(&self.end_date)?,
            payment_status: self.payment_status.clone(),
            payment_method: self.payment_method.clone(),
        };
        filters.validate()?;
        Ok(filters)
    }
}

fn parse_date_input(raw: &str) -> Result<Option<NaiveDate>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| "Dates must use the YYYY-MM-DD format")
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseSales,
    BrowseTransactions,
    ApplyFilters,
    ResetFilters,
    ExportReport,
    ExportAllCharts,
    Logout,
}

/// Left side control panel.
pub struct ControlPanel {
    pub filters: FilterInputs,
    pub sales_path: Option<PathBuf>,
    pub transactions_path: Option<PathBuf>,
    pub sales_count: Option<usize>,
    pub transactions_count: Option<usize>,
    pub status_options: Vec<String>,
    pub method_options: Vec<String>,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            filters: FilterInputs::default(),
            sales_path: None,
            transactions_path: None,
            sales_count: None,
            transactions_count: None,
            status_options: Vec::new(),
            method_options: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both files cleaned and stored.
    pub fn data_ready(&self) -> bool {
        self.sales_count.is_some() && self.transactions_count.is_some()
    }

    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    /// Refresh the dropdown choices after a load.
    pub fn update_filter_options(&mut self, statuses: Vec<String>, methods: Vec<String>) {
        self.status_options = statuses;
        self.method_options = methods;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, show_logout: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 FinBoard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Sales & Expense Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Sources").size(14.0).strong());
        ui.add_space(5.0);

        if self.file_row(ui, "Sales CSV", &self.sales_path.clone(), self.sales_count) {
            action = ControlPanelAction::BrowseSales;
        }
        ui.add_space(4.0);
        if self.file_row(
            ui,
            "Expenses CSV",
            &self.transactions_path.clone(),
            self.transactions_count,
        ) {
            action = ControlPanelAction::BrowseTransactions;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let field_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Customer:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.filters.customer).hint_text("any"),
            );
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Start Date:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.filters.start_date).hint_text("YYYY-MM-DD"),
            );
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("End Date:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.filters.end_date).hint_text("YYYY-MM-DD"),
            );
        });
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Status:"));
            Self::option_combo(
                ui,
                "status_filter",
                field_width,
                &mut self.filters.payment_status,
                &self.status_options,
            );
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Method:"));
            Self::option_combo(
                ui,
                "method_filter",
                field_width,
                &mut self.filters.payment_method,
                &self.method_options,
            );
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(self.data_ready(), |ui| {
                if ui.button("Apply Filters").clicked() {
                    action = ControlPanelAction::ApplyFilters;
                }
                if ui.button("Reset").clicked() {
                    action = ControlPanelAction::ResetFilters;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("📤 Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(self.data_ready(), |ui| {
            ui.horizontal(|ui| {
                if ui.button("Export Report (CSV)").clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Export All Charts (PNG)").clicked() {
                    action = ControlPanelAction::ExportAllCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") || self.status.contains("exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if show_logout {
            ui.add_space(15.0);
            ui.separator();
            ui.add_space(5.0);
            if ui.button("🔒 Logout").clicked() {
                action = ControlPanelAction::Logout;
            }
        }

        action
    }

    /// One file intake row. Returns true when Browse was clicked.
    fn file_row(
        &self,
        ui: &mut egui::Ui,
        label: &str,
        path: &Option<PathBuf>,
        count: Option<usize>,
    ) -> bool {
        let mut clicked = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(label).size(12.0).strong());
                        let file_text = path
                            .as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| "No file selected".to_string());
                        ui.label(RichText::new(file_text).size(11.0).color(
                            if path.is_some() {
                                Color32::WHITE
                            } else {
                                Color32::GRAY
                            },
                        ));
                        if let Some(count) = count {
                            ui.label(
                                RichText::new(format!("✅ {count} records"))
                                    .size(11.0)
                                    .color(Color32::from_rgb(40, 167, 69)),
                            );
                        }
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            clicked = true;
                        }
                    });
                });
            });
        clicked
    }

    /// Dropdown where the empty string means "All".
    fn option_combo(
        ui: &mut egui::Ui,
        id: &str,
        width: f32,
        selected: &mut String,
        options: &[String],
    ) {
        let display = if selected.is_empty() {
            "All"
        } else {
            selected.as_str()
        };
        ComboBox::from_id_salt(id)
            .width(width)
            .selected_text(display)
            .show_ui(ui, |ui| {
                if ui.selectable_label(selected.is_empty(), "All").clicked() {
                    selected.clear();
                }
                for option in options {
                    if ui.selectable_label(selected == option, option).clicked() {
                        *selected = option.clone();
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_parse_to_empty_filter() {
        let filters = FilterInputs::default().to_filter_set().unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn dates_parse_iso() {
        let inputs = FilterInputs {
            start_date: "2025-01-01".to_string(),
            end_date: " 2025-02-28 ".to_string(),
            ..Default::default()
        };
        let filters = inputs.to_filter_set().unwrap();
        assert_eq!(
            filters.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn bad_date_text_is_rejected() {
        let inputs = FilterInputs {
            start_date: "01/02/2025".to_string(),
            ..Default::default()
        };
        assert!(inputs.to_filter_set().is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let inputs = FilterInputs {
            start_date: "2025-03-01".to_string(),
            end_date: "2025-01-01".to_string(),
            ..Default::default()
        };
        assert!(inputs.to_filter_set().is_err());
    }
}
