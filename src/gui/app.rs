//! FinBoard Main Application
//! Main window: login gate, control panel, summary cards, charts, tables.

use crate::auth::AuthGate;
use crate::charts::{build_chart_data, ChartData, ChartKind};
use crate::config::AppConfig;
use crate::data::records::{DataSetKind, SaleRecord, TransactionRecord};
use crate::data::{load_csv, DataProcessor, FilterSet, Summary};
use crate::export::ExportManager;
use crate::gui::{ChartView, ControlPanel, ControlPanelAction, LoginView, SummaryView, TableView};
use egui::SidePanel;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// CSV loading result from the background thread.
enum LoadResult {
    Progress(String),
    Sales(Vec<SaleRecord>),
    Transactions(Vec<TransactionRecord>),
    Error(String),
}

/// Filter/summary/chart recalculation result from the background thread.
enum CalcResult {
    Progress(f32, String),
    Complete {
        sales: Vec<SaleRecord>,
        transactions: Vec<TransactionRecord>,
        summary: Summary,
        charts: HashMap<ChartKind, ChartData>,
    },
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    gate: AuthGate,
    login: LoginView,

    processor: DataProcessor,
    control_panel: ControlPanel,
    chart_view: ChartView,
    table_view: TableView,

    current_filters: FilterSet,
    filtered_sales: Vec<SaleRecord>,
    filtered_transactions: Vec<TransactionRecord>,
    summary: Option<Summary>,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let gate = AuthGate::new(config.password_sha256.clone(), config.session_timeout());
        let table_view = TableView::new(config.rows_per_page);
        Self {
            config,
            gate,
            login: LoginView::new(),
            processor: DataProcessor::new(),
            control_panel: ControlPanel::new(),
            chart_view: ChartView::new(),
            table_view,
            current_filters: FilterSet::default(),
            filtered_sales: Vec::new(),
            filtered_transactions: Vec::new(),
            summary: None,
            load_rx: None,
            is_loading: false,
            calc_rx: None,
            is_calculating: false,
        }
    }

    /// Pick a CSV file and clean it in a background thread.
    fn handle_browse(&mut self, kind: DataSetKind) {
        if self.is_loading {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match kind {
            DataSetKind::Sales => self.control_panel.sales_path = Some(path.clone()),
            DataSetKind::Transactions => {
                self.control_panel.transactions_path = Some(path.clone())
            }
        }
        self.control_panel
            .set_progress(0.0, &format!("Loading {} file...", kind.label()));
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || Self::run_load(tx, path, kind));
    }

    /// Load and clean one CSV (called from the background thread).
    fn run_load(tx: Sender<LoadResult>, path: PathBuf, kind: DataSetKind) {
        let _ = tx.send(LoadResult::Progress(format!(
            "Reading {}...",
            path.display()
        )));

        let df = match load_csv(&path) {
            Ok(df) => df,
            Err(e) => {
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let result = match kind {
            DataSetKind::Sales => {
                DataProcessor::clean_sales(&df).map(LoadResult::Sales)
            }
            DataSetKind::Transactions => {
                DataProcessor::clean_transactions(&df).map(LoadResult::Transactions)
            }
        };

        match result {
            Ok(loaded) => {
                let _ = tx.send(loaded);
            }
            Err(e) => {
                let _ = tx.send(LoadResult::Error(e.to_string()));
            }
        }
    }

    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        let mut keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                LoadResult::Progress(status) => {
                    self.control_panel.set_progress(0.0, &status);
                }
                LoadResult::Sales(records) => {
                    tracing::info!(records = records.len(), "sales loaded");
                    self.control_panel.sales_count = Some(records.len());
                    self.control_panel.set_progress(
                        0.0,
                        &format!("Loaded {} sales records", records.len()),
                    );
                    self.processor.set_sales(records);
                    self.finish_load();
                    keep_receiver = false;
                }
                LoadResult::Transactions(records) => {
                    tracing::info!(records = records.len(), "transactions loaded");
                    self.control_panel.transactions_count = Some(records.len());
                    self.control_panel.set_progress(
                        0.0,
                        &format!("Loaded {} transaction records", records.len()),
                    );
                    self.processor.set_transactions(records);
                    self.finish_load();
                    keep_receiver = false;
                }
                LoadResult::Error(error) => {
                    tracing::error!(%error, "CSV load failed");
                    self.control_panel
                        .set_progress(0.0, &format!("Error: {error}"));
                    self.is_loading = false;
                    keep_receiver = false;
                }
            }
        }

        if keep_receiver {
            self.load_rx = Some(rx);
        }
    }

    /// Post-load bookkeeping; kicks off the first recalculation once both
    /// files are in.
    fn finish_load(&mut self) {
        self.is_loading = false;
        self.control_panel.update_filter_options(
            self.processor.payment_statuses(),
            self.processor.payment_methods(),
        );
        if self.control_panel.data_ready() {
            self.processor
                .refresh_period_comparison(chrono::Local::now().date_naive());
            self.start_apply();
        }
    }

    /// Re-filter and recompute everything in a background thread.
    fn start_apply(&mut self) {
        if self.is_calculating {
            return;
        }

        let filters = match self.control_panel.filters.to_filter_set() {
            Ok(filters) => filters,
            Err(msg) => {
                self.control_panel.set_progress(0.0, &format!("Error: {msg}"));
                return;
            }
        };
        tracing::debug!(filters = %filters.describe(), "applying filters");
        self.current_filters = filters.clone();

        let processor = self.processor.clone();
        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.control_panel.set_progress(5.0, "Filtering data...");

        thread::spawn(move || Self::run_calculation(tx, processor, filters));
    }

    /// Run filtering, summary and chart derivation (background thread).
    fn run_calculation(tx: Sender<CalcResult>, processor: DataProcessor, filters: FilterSet) {
        let _ = tx.send(CalcResult::Progress(20.0, "Filtering data...".to_string()));
        let (sales, transactions) = processor.filter(&filters);

        let _ = tx.send(CalcResult::Progress(
            50.0,
            "Computing summary...".to_string(),
        ));
        let summary = processor.summary(&sales, &transactions);

        let _ = tx.send(CalcResult::Progress(
            70.0,
            "Generating charts...".to_string(),
        ));
        let charts = build_chart_data(&sales, &transactions);

        let _ = tx.send(CalcResult::Complete {
            sales,
            transactions,
            summary,
            charts,
        });
    }

    fn check_calc_results(&mut self) {
        let Some(rx) = self.calc_rx.take() else {
            return;
        };
        let mut keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                CalcResult::Progress(progress, status) => {
                    self.control_panel.set_progress(progress, &status);
                }
                CalcResult::Complete {
                    sales,
                    transactions,
                    summary,
                    charts,
                } => {
                    self.control_panel.set_progress(
                        100.0,
                        &format!(
                            "Complete! {} sales, {} transactions",
                            sales.len(),
                            transactions.len()
                        ),
                    );
                    self.filtered_sales = sales;
                    self.filtered_transactions = transactions;
                    self.summary = Some(summary);
                    self.chart_view.set_charts(charts);
                    self.table_view.reset_pagination();
                    self.is_calculating = false;
                    keep_receiver = false;
                }
            }
        }

        if keep_receiver {
            self.calc_rx = Some(rx);
        }
    }

    fn handle_reset_filters(&mut self) {
        self.control_panel.filters.clear();
        self.start_apply();
    }

    fn handle_export_report(&mut self) {
        let Some(summary) = self.summary else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        let today = chrono::Local::now().date_naive();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(ExportManager::report_filename(today))
            .save_file()
        else {
            return;
        };

        let report = ExportManager::build_report(
            &self.current_filters,
            &self.filtered_sales,
            &self.filtered_transactions,
            &summary,
            today,
        );

        match ExportManager::write_report(&path, &report) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Report exported to {}", path.display()));
                let _ = open::that_detached(&path);
            }
            Err(e) => {
                tracing::error!(error = %e, "report export failed");
                self.control_panel.set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }

    fn handle_export_chart(&mut self, kind: ChartKind) {
        let Some(data) = self.chart_view.charts().get(&kind).cloned() else {
            return;
        };

        let today = chrono::Local::now().date_naive();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(ExportManager::chart_filename(kind, today))
            .save_file()
        else {
            return;
        };

        match ExportManager::export_chart(&path, &data, &self.config.currency_symbol) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Chart exported to {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, chart = kind.title(), "chart export failed");
                self.control_panel.set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }

    fn handle_export_all_charts(&mut self) {
        if !self.chart_view.has_charts() {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        }

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let today = chrono::Local::now().date_naive();
        let failures = ExportManager::export_all_charts(
            &dir,
            self.chart_view.charts(),
            &self.config.currency_symbol,
            today,
        );

        let total = self.chart_view.charts().len();
        if failures.is_empty() {
            self.control_panel
                .set_progress(100.0, &format!("{total} charts exported"));
        } else {
            self.control_panel.set_progress(
                100.0,
                &format!("{} charts exported, {} skipped", total - failures.len(), failures.len()),
            );
        }
    }

    fn show_dashboard(&mut self, ctx: &egui::Context) {
        let show_logout = self.gate.required();

        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, show_logout);
                    match action {
                        ControlPanelAction::BrowseSales => {
                            self.handle_browse(DataSetKind::Sales)
                        }
                        ControlPanelAction::BrowseTransactions => {
                            self.handle_browse(DataSetKind::Transactions)
                        }
                        ControlPanelAction::ApplyFilters => self.start_apply(),
                        ControlPanelAction::ResetFilters => self.handle_reset_filters(),
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::ExportAllCharts => self.handle_export_all_charts(),
                        ControlPanelAction::Logout => self.gate.logout(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(summary) = &self.summary {
                    SummaryView::show(ui, summary, &self.config.currency_symbol);
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);
                }

                if let Some(kind) = self.chart_view.show(ui, &self.config.currency_symbol) {
                    self.handle_export_chart(kind);
                }

                if self.summary.is_some() {
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);
                    self.table_view.show(
                        ui,
                        &self.filtered_sales,
                        &self.filtered_transactions,
                        &self.config.currency_symbol,
                    );
                }
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Session gate first; everything else stays hidden until it opens.
        if self.gate.required() && !self.gate.check() {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(password) = self.login.show(ui) {
                    if self.gate.login(&password) {
                        self.login.error = None;
                    } else {
                        self.login.error = Some("Invalid password");
                    }
                }
            });
            return;
        }

        self.check_load_results();
        self.check_calc_results();

        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        self.show_dashboard(ctx);
    }
}
