//! Table View Widget
//! Tabbed sales/expenses tables with column sorting and pagination.

use crate::data::records::{SaleRecord, TransactionRecord};
use crate::fmt;
use egui::{Color32, ComboBox, RichText};
use std::cmp::Ordering;

/// Selectable page sizes; `None` shows everything.
pub const PAGE_SIZES: [Option<usize>; 5] = [Some(10), Some(25), Some(50), Some(100), None];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTab {
    Sales,
    Expenses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesColumn {
    Date,
    Customer,
    Amount,
    Status,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxColumn {
    Date,
    Name,
    Amount,
    Category,
    Method,
}

#[derive(Debug, Clone, Copy)]
pub struct SortState<C> {
    pub key: C,
    pub ascending: bool,
}

impl<C: PartialEq + Copy> SortState<C> {
    /// Clicking the active column flips direction; a new column sorts
    /// ascending.
    pub fn toggle(&mut self, key: C) {
        if self.key == key {
            self.ascending = !self.ascending;
        } else {
            self.key = key;
            self.ascending = true;
        }
    }
}

struct TableState<C> {
    page: usize,
    per_page: Option<usize>,
    sort: SortState<C>,
}

impl<C> TableState<C> {
    fn new(key: C, per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: Some(per_page),
            // Newest rows first by default.
            sort: SortState {
                key,
                ascending: false,
            },
        }
    }
}

/// Index range `[start, end)` of the current page.
pub fn page_bounds(total: usize, page: usize, per_page: Option<usize>) -> (usize, usize) {
    match per_page {
        None => (0, total),
        Some(per_page) => {
            let start = (page.saturating_sub(1) * per_page).min(total);
            let end = (start + per_page).min(total);
            (start, end)
        }
    }
}

pub fn page_count(total: usize, per_page: Option<usize>) -> usize {
    match per_page {
        None => 1,
        Some(per_page) => total.div_ceil(per_page).max(1),
    }
}

/// Page info label, e.g. `26-50 of 120`, or `0` for an empty table.
pub fn page_info(total: usize, start: usize, end: usize) -> String {
    if total == 0 {
        "0".to_string()
    } else {
        format!("{}-{} of {}", start + 1, end, total)
    }
}

pub fn sort_sales(rows: &mut [SaleRecord], sort: SortState<SalesColumn>) {
    rows.sort_by(|a, b| {
        let ord = match sort.key {
            SalesColumn::Date => a.date.cmp(&b.date),
            SalesColumn::Customer => cmp_str(&a.customer, &b.customer),
            SalesColumn::Amount => cmp_f64(a.total_amount, b.total_amount),
            SalesColumn::Status => cmp_str(&a.payment_status, &b.payment_status),
            SalesColumn::Method => cmp_str(&a.payment_method, &b.payment_method),
        };
        if sort.ascending { ord } else { ord.reverse() }
    });
}

pub fn sort_transactions(rows: &mut [TransactionRecord], sort: SortState<TxColumn>) {
    rows.sort_by(|a, b| {
        let ord = match sort.key {
            TxColumn::Date => a.date.cmp(&b.date),
            TxColumn::Name => cmp_str(&a.name, &b.name),
            TxColumn::Amount => cmp_f64(a.amount, b.amount),
            TxColumn::Category => cmp_str(&a.category, &b.category),
            TxColumn::Method => cmp_str(&a.payment_method, &b.payment_method),
        };
        if sort.ascending { ord } else { ord.reverse() }
    });
}

fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Tabbed data tables under the charts.
pub struct TableView {
    tab: TableTab,
    sales: TableState<SalesColumn>,
    transactions: TableState<TxColumn>,
}

impl TableView {
    pub fn new(default_per_page: usize) -> Self {
        Self {
            tab: TableTab::Sales,
            sales: TableState::new(SalesColumn::Date, default_per_page),
            transactions: TableState::new(TxColumn::Date, default_per_page),
        }
    }

    /// Jump both tables back to the first page (after new data or filters).
    pub fn reset_pagination(&mut self) {
        self.sales.page = 1;
        self.transactions.page = 1;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        sales: &[SaleRecord],
        transactions: &[TransactionRecord],
        symbol: &str,
    ) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, TableTab::Sales, "Sales");
            ui.selectable_value(&mut self.tab, TableTab::Expenses, "Expenses");
        });
        ui.separator();

        match self.tab {
            TableTab::Sales => self.show_sales(ui, sales, symbol),
            TableTab::Expenses => self.show_transactions(ui, transactions, symbol),
        }
    }

    fn show_sales(&mut self, ui: &mut egui::Ui, sales: &[SaleRecord], symbol: &str) {
        let mut rows = sales.to_vec();
        sort_sales(&mut rows, self.sales.sort);

        let (start, end) = page_bounds(rows.len(), self.sales.page, self.sales.per_page);

        egui::Grid::new("sales_table")
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let sort = &mut self.sales.sort;
                let mut clicked = None;
                for (label, key) in [
                    ("Date", SalesColumn::Date),
                    ("Customer", SalesColumn::Customer),
                    ("Total Amount", SalesColumn::Amount),
                    ("Payment Status", SalesColumn::Status),
                    ("Payment Method", SalesColumn::Method),
                ] {
                    if header_button(ui, label, sort.key == key, sort.ascending) {
                        clicked = Some(key);
                    }
                }
                ui.end_row();
                if let Some(key) = clicked {
                    sort.toggle(key);
                    self.sales.page = 1;
                }

                for sale in &rows[start..end] {
                    ui.label(sale.date.to_string());
                    ui.label(&sale.customer);
                    ui.label(fmt::currency(symbol, sale.total_amount));
                    ui.label(status_text(&sale.payment_status));
                    ui.label(&sale.payment_method);
                    ui.end_row();
                }
            });

        self.sales.page = pagination_controls(
            ui,
            "sales",
            rows.len(),
            self.sales.page,
            &mut self.sales.per_page,
        );
    }

    fn show_transactions(
        &mut self,
        ui: &mut egui::Ui,
        transactions: &[TransactionRecord],
        symbol: &str,
    ) {
        let mut rows = transactions.to_vec();
        sort_transactions(&mut rows, self.transactions.sort);

        let (start, end) = page_bounds(rows.len(), self.transactions.page, self.transactions.per_page);

        egui::Grid::new("transactions_table")
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let sort = &mut self.transactions.sort;
                let mut clicked = None;
                for (label, key) in [
                    ("Date", TxColumn::Date),
                    ("Name", TxColumn::Name),
                    ("Amount", TxColumn::Amount),
                    ("Category", TxColumn::Category),
                    ("Payment Method", TxColumn::Method),
                ] {
                    if header_button(ui, label, sort.key == key, sort.ascending) {
                        clicked = Some(key);
                    }
                }
                ui.end_row();
                if let Some(key) = clicked {
                    sort.toggle(key);
                    self.transactions.page = 1;
                }

                for tx in &rows[start..end] {
                    ui.label(tx.date.to_string());
                    ui.label(&tx.name);
                    ui.label(fmt::currency(symbol, tx.amount));
                    ui.label(&tx.category);
                    ui.label(&tx.payment_method);
                    ui.end_row();
                }
            });

        self.transactions.page = pagination_controls(
            ui,
            "transactions",
            rows.len(),
            self.transactions.page,
            &mut self.transactions.per_page,
        );
    }
}

fn header_button(ui: &mut egui::Ui, label: &str, active: bool, ascending: bool) -> bool {
    let text = if active {
        format!("{label} {}", if ascending { "▲" } else { "▼" })
    } else {
        label.to_string()
    };
    ui.button(RichText::new(text).strong().size(12.0)).clicked()
}

fn status_text(status: &str) -> RichText {
    let color = match status.to_lowercase().as_str() {
        "paid" => Color32::from_rgb(40, 167, 69),
        "pending" => Color32::from_rgb(245, 158, 11),
        "overdue" => Color32::from_rgb(220, 53, 69),
        _ => Color32::GRAY,
    };
    RichText::new(status).color(color)
}

/// Draw the per-page selector, prev/next buttons and page info.
/// Returns the (possibly clamped) new page number.
fn pagination_controls(
    ui: &mut egui::Ui,
    id: &str,
    total: usize,
    mut page: usize,
    per_page: &mut Option<usize>,
) -> usize {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        let selected = per_page.map_or("All".to_string(), |n| n.to_string());
        ComboBox::from_id_salt(format!("{id}_per_page"))
            .width(70.0)
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    let label = size.map_or("All".to_string(), |n| n.to_string());
                    if ui.selectable_label(*per_page == size, label).clicked() {
                        *per_page = size;
                        page = 1;
                    }
                }
            });

        let pages = page_count(total, *per_page);
        page = page.min(pages);

        ui.separator();
        if ui.add_enabled(page > 1, egui::Button::new("◀ Prev")).clicked() {
            page -= 1;
        }
        if ui
            .add_enabled(page < pages, egui::Button::new("Next ▶"))
            .clicked()
        {
            page += 1;
        }

        let (start, end) = page_bounds(total, page, *per_page);
        ui.label(page_info(total, start, end));
    });
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn sale(d: u32, customer: &str, amount: f64) -> SaleRecord {
        SaleRecord {
            date: date(d),
            customer: customer.to_string(),
            total_amount: amount,
            payment_status: "Paid".to_string(),
            payment_method: "Cash".to_string(),
            total_trays: 0,
        }
    }

    #[test]
    fn page_bounds_clamp_to_total() {
        assert_eq!(page_bounds(120, 1, Some(25)), (0, 25));
        assert_eq!(page_bounds(120, 5, Some(25)), (100, 120));
        assert_eq!(page_bounds(120, 99, Some(25)), (120, 120));
        assert_eq!(page_bounds(120, 3, None), (0, 120));
        assert_eq!(page_bounds(0, 1, Some(25)), (0, 0));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, Some(25)), 1);
        assert_eq!(page_count(25, Some(25)), 1);
        assert_eq!(page_count(26, Some(25)), 2);
        assert_eq!(page_count(1000, None), 1);
    }

    #[test]
    fn page_info_is_one_based() {
        assert_eq!(page_info(120, 25, 50), "26-50 of 120");
        assert_eq!(page_info(0, 0, 0), "0");
    }

    #[test]
    fn toggle_flips_direction_then_switches_key() {
        let mut sort = SortState {
            key: SalesColumn::Date,
            ascending: false,
        };
        sort.toggle(SalesColumn::Date);
        assert!(sort.ascending);
        sort.toggle(SalesColumn::Customer);
        assert_eq!(sort.key, SalesColumn::Customer);
        assert!(sort.ascending);
    }

    #[test]
    fn sales_sort_by_amount_descending() {
        let mut rows = vec![sale(1, "A", 50.0), sale(2, "B", 150.0), sale(3, "C", 100.0)];
        sort_sales(
            &mut rows,
            SortState {
                key: SalesColumn::Amount,
                ascending: false,
            },
        );
        assert_eq!(rows[0].customer, "B");
        assert_eq!(rows[2].customer, "A");
    }

    #[test]
    fn string_sort_ignores_case() {
        let mut rows = vec![sale(1, "banana", 1.0), sale(2, "Apple", 1.0)];
        sort_sales(
            &mut rows,
            SortState {
                key: SalesColumn::Customer,
                ascending: true,
            },
        );
        assert_eq!(rows[0].customer, "Apple");
    }
}
