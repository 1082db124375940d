//! Data Processor Module
//! Cleans raw CSV rows into typed records, filters them, and derives
//! summary statistics with period-over-period deltas.

use crate::data::loader::column_as_strings;
use crate::data::records::{SaleRecord, TransactionRecord};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Required column not found: {0}")]
    MissingColumn(&'static str),
    #[error("No valid rows after cleaning")]
    NoValidRows,
}

/// Filter criteria applied to the cleaned datasets.
/// Empty string / `None` components match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Case-insensitive substring match on the customer name (sales only).
    pub customer: String,
    /// Inclusive lower bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound (whole day).
    pub end_date: Option<NaiveDate>,
    /// Exact payment-status match.
    pub payment_status: String,
    /// Exact payment-method match.
    pub payment_method: String,
}

impl FilterSet {
    /// Reject inverted date ranges before they reach the pipeline.
    pub fn validate(&self) -> Result<(), &'static str> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err("Start date cannot be after end date")
            }
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customer.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.payment_status.is_empty()
            && self.payment_method.is_empty()
    }

    /// Human-readable description for the export header and status line.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.customer.is_empty() {
            parts.push(format!("Customer: {}", self.customer));
        }
        if let Some(start) = self.start_date {
            parts.push(format!("From: {start}"));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("To: {end}"));
        }
        if !self.payment_status.is_empty() {
            parts.push(format!("Status: {}", self.payment_status));
        }
        if !self.payment_method.is_empty() {
            parts.push(format!("Method: {}", self.payment_method));
        }
        if parts.is_empty() {
            "No filters applied".to_string()
        } else {
            parts.join(", ")
        }
    }

    fn date_in_range(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Aggregate metrics over a filtered view of the data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percent of revenue; 0 when there is no revenue.
    pub profit_margin: f64,
    pub revenue_change: f64,
    pub expenses_change: f64,
    pub profit_change: f64,
}

/// Current vs previous calendar month totals over the unfiltered data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodComparison {
    pub current_revenue: f64,
    pub current_expenses: f64,
    pub previous_revenue: f64,
    pub previous_expenses: f64,
}

/// Owns the cleaned datasets and every derivation over them.
#[derive(Default, Clone)]
pub struct DataProcessor {
    pub sales: Vec<SaleRecord>,
    pub transactions: Vec<TransactionRecord>,
    period: PeriodComparison,
}

impl DataProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean and validate sales rows from a loaded DataFrame.
    ///
    /// Rows without a parseable date or with a non-positive total amount
    /// are dropped.
    pub fn clean_sales(df: &DataFrame) -> Result<Vec<SaleRecord>, ProcessorError> {
        let dates = column_as_strings(df, &["Date"])
            .ok_or(ProcessorError::MissingColumn("Date"))?;
        let amounts = column_as_strings(df, &["Total Amount", "Amount"])
            .ok_or(ProcessorError::MissingColumn("Total Amount"))?;
        let customers = column_as_strings(df, &["Customer"]);
        let statuses = column_as_strings(df, &["Payment Status"]);
        let methods = column_as_strings(df, &["Payment Method"]);
        let trays = column_as_strings(df, &["Total Trays"]);

        let mut records = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let date = dates[i].as_deref().and_then(parse_date);
            let amount = amounts[i].as_deref().and_then(parse_amount);

            let (Some(date), Some(amount)) = (date, amount) else {
                dropped += 1;
                continue;
            };
            if amount <= 0.0 {
                dropped += 1;
                continue;
            }

            records.push(SaleRecord {
                date,
                customer: cell(&customers, i)
                    .map(customer_display_name)
                    .unwrap_or_else(|| "N/A".to_string()),
                total_amount: amount,
                payment_status: cell_or(&statuses, i, "N/A"),
                payment_method: cell_or(&methods, i, "N/A"),
                total_trays: cell(&trays, i)
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(0),
            });
        }

        tracing::debug!(kept = records.len(), dropped, "cleaned sales rows");
        if records.is_empty() {
            return Err(ProcessorError::NoValidRows);
        }
        Ok(records)
    }

    /// Clean and validate expense transaction rows.
    pub fn clean_transactions(
        df: &DataFrame,
    ) -> Result<Vec<TransactionRecord>, ProcessorError> {
        let dates = column_as_strings(df, &["Date"])
            .ok_or(ProcessorError::MissingColumn("Date"))?;
        let amounts = column_as_strings(df, &["Expense Amount", "Amount"])
            .ok_or(ProcessorError::MissingColumn("Expense Amount"))?;
        let names = column_as_strings(df, &["Name"]);
        let kinds = column_as_strings(df, &["Type"]);
        let categories = column_as_strings(df, &["Category"]);
        let methods = column_as_strings(df, &["Payment Method"]);
        let statuses = column_as_strings(df, &["Status"]);

        let mut records = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let date = dates[i].as_deref().and_then(parse_date);
            let amount = amounts[i].as_deref().and_then(parse_amount);

            let (Some(date), Some(amount)) = (date, amount) else {
                dropped += 1;
                continue;
            };
            if amount <= 0.0 {
                dropped += 1;
                continue;
            }

            records.push(TransactionRecord {
                date,
                name: cell_or(&names, i, "N/A"),
                amount,
                kind: cell_or(&kinds, i, "N/A"),
                category: cell_or(&categories, i, "Uncategorized"),
                payment_method: cell_or(&methods, i, "N/A"),
                status: cell_or(&statuses, i, "N/A"),
            });
        }

        tracing::debug!(kept = records.len(), dropped, "cleaned transaction rows");
        if records.is_empty() {
            return Err(ProcessorError::NoValidRows);
        }
        Ok(records)
    }

    pub fn set_sales(&mut self, sales: Vec<SaleRecord>) {
        self.sales = sales;
    }

    pub fn set_transactions(&mut self, transactions: Vec<TransactionRecord>) {
        self.transactions = transactions;
    }

    /// Recompute current/previous calendar-month totals over the unfiltered
    /// data, relative to `today`.
    pub fn refresh_period_comparison(&mut self, today: NaiveDate) {
        let current = (today.year(), today.month());
        let previous = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };

        let revenue_in = |period: (i32, u32)| -> f64 {
            self.sales
                .iter()
                .filter(|s| (s.date.year(), s.date.month()) == period)
                .map(|s| s.total_amount)
                .sum()
        };
        let expenses_in = |period: (i32, u32)| -> f64 {
            self.transactions
                .iter()
                .filter(|t| (t.date.year(), t.date.month()) == period)
                .map(|t| t.amount)
                .sum()
        };

        self.period = PeriodComparison {
            current_revenue: revenue_in(current),
            current_expenses: expenses_in(current),
            previous_revenue: revenue_in(previous),
            previous_expenses: expenses_in(previous),
        };
    }

    /// Apply a filter set, returning owned filtered views.
    pub fn filter(&self, filters: &FilterSet) -> (Vec<SaleRecord>, Vec<TransactionRecord>) {
        let needle = filters.customer.to_lowercase();

        let sales = self
            .sales
            .iter()
            .filter(|s| {
                s.customer.to_lowercase().contains(&needle)
                    && filters.date_in_range(s.date)
                    && (filters.payment_status.is_empty()
                        || s.payment_status == filters.payment_status)
                    && (filters.payment_method.is_empty()
                        || s.payment_method == filters.payment_method)
            })
            .cloned()
            .collect();

        let transactions = self
            .transactions
            .iter()
            .filter(|t| {
                filters.date_in_range(t.date)
                    && (filters.payment_status.is_empty()
                        || t.status == filters.payment_status)
                    && (filters.payment_method.is_empty()
                        || t.payment_method == filters.payment_method)
            })
            .cloned()
            .collect();

        (sales, transactions)
    }

    /// Summary statistics over a filtered view, with deltas against the
    /// stored period comparison.
    pub fn summary(&self, sales: &[SaleRecord], transactions: &[TransactionRecord]) -> Summary {
        let total_revenue: f64 = sales.iter().map(|s| s.total_amount).sum();
        let total_expenses: f64 = transactions.iter().map(|t| t.amount).sum();
        let net_profit = total_revenue - total_expenses;
        let profit_margin = if total_revenue > 0.0 {
            net_profit / total_revenue * 100.0
        } else {
            0.0
        };

        let p = &self.period;
        Summary {
            total_revenue,
            total_expenses,
            net_profit,
            profit_margin,
            revenue_change: p.current_revenue - p.previous_revenue,
            expenses_change: p.current_expenses - p.previous_expenses,
            profit_change: (p.current_revenue - p.current_expenses)
                - (p.previous_revenue - p.previous_expenses),
        }
    }

    /// Distinct payment statuses present in either dataset, for the filter
    /// dropdown.
    pub fn payment_statuses(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        set.extend(self.sales.iter().map(|s| s.payment_status.clone()));
        set.extend(self.transactions.iter().map(|t| t.status.clone()));
        set.into_iter().collect()
    }

    /// Distinct payment methods present in either dataset.
    pub fn payment_methods(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        set.extend(self.sales.iter().map(|s| s.payment_method.clone()));
        set.extend(self.transactions.iter().map(|t| t.payment_method.clone()));
        set.into_iter().collect()
    }
}

fn cell<'a>(col: &'a Option<Vec<Option<String>>>, idx: usize) -> Option<&'a str> {
    col.as_ref()?.get(idx)?.as_deref()
}

fn cell_or(col: &Option<Vec<Option<String>>>, idx: usize, default: &str) -> String {
    cell(col, idx).unwrap_or(default).to_string()
}

/// Customer cells often carry a location suffix in parentheses:
/// `"Ama Serwaa (Kumasi)"`. The display name is the text before the first
/// opening parenthesis.
fn customer_display_name(raw: &str) -> String {
    match raw.find('(') {
        Some(pos) => {
            let name = raw[..pos].trim();
            if name.is_empty() {
                raw.trim().to_string()
            } else {
                name.to_string()
            }
        }
        None => raw.trim().to_string(),
    }
}

/// Parse a date cell, accepting the formats the source spreadsheets use.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d %b %Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse an amount cell, stripping thousands separators.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let parsed: f64 = cleaned.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(d: NaiveDate, customer: &str, amount: f64, status: &str, method: &str) -> SaleRecord {
        SaleRecord {
            date: d,
            customer: customer.to_string(),
            total_amount: amount,
            payment_status: status.to_string(),
            payment_method: method.to_string(),
            total_trays: 0,
        }
    }

    fn tx(d: NaiveDate, category: &str, amount: f64, status: &str, method: &str) -> TransactionRecord {
        TransactionRecord {
            date: d,
            name: "Feed".to_string(),
            amount,
            kind: "Operating".to_string(),
            category: category.to_string(),
            payment_method: method.to_string(),
            status: status.to_string(),
        }
    }

    fn sample_processor() -> DataProcessor {
        let mut proc = DataProcessor::new();
        proc.set_sales(vec![
            sale(date(2025, 1, 10), "Ama Serwaa", 1000.0, "Paid", "Cash"),
            sale(date(2025, 2, 5), "Kojo Mensah", 2500.0, "Pending", "Momo"),
            sale(date(2025, 2, 20), "Ama Serwaa", 500.0, "Paid", "Bank"),
        ]);
        proc.set_transactions(vec![
            tx(date(2025, 1, 15), "Feed", 400.0, "Paid", "Cash"),
            tx(date(2025, 2, 8), "Transport", 300.0, "Paid", "Momo"),
        ]);
        proc
    }

    #[test]
    fn parses_amounts_with_thousands_separators() {
        assert_eq!(parse_amount("1,234.50"), Some(1234.5));
        assert_eq!(parse_amount(" 850 "), Some(850.0));
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn parses_common_date_formats() {
        assert_eq!(parse_date("2025-02-08"), Some(date(2025, 2, 8)));
        assert_eq!(parse_date("2/8/2025"), Some(date(2025, 2, 8)));
        assert_eq!(parse_date("8 Feb 2025"), Some(date(2025, 2, 8)));
        assert_eq!(parse_date("2025-02-08 00:00:00"), Some(date(2025, 2, 8)));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn customer_location_suffix_is_stripped() {
        assert_eq!(customer_display_name("Ama Serwaa (Kumasi)"), "Ama Serwaa");
        assert_eq!(customer_display_name("Kojo Mensah"), "Kojo Mensah");
        assert_eq!(customer_display_name("(Accra)"), "(Accra)");
    }

    #[test]
    fn cleaning_drops_invalid_sales_rows() {
        let df = polars::df![
            "Date" => ["2025-01-10", "", "2025-01-12", "2025-01-13"],
            "Customer" => ["Ama Serwaa (Kumasi)", "Kojo", "Yaw", "Esi"],
            "Total Amount" => ["1,200", "500", "0", "abc"],
            "Payment Status" => ["Paid", "Paid", "Paid", "Paid"],
        ]
        .unwrap();

        let records = DataProcessor::clean_sales(&df).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer, "Ama Serwaa");
        assert_eq!(records[0].total_amount, 1200.0);
        assert_eq!(records[0].payment_method, "N/A");
        assert_eq!(records[0].total_trays, 0);
    }

    #[test]
    fn cleaning_defaults_transaction_fields() {
        let df = polars::df![
            "Date" => ["2025-01-10"],
            "Expense Amount" => ["2,000.25"],
        ]
        .unwrap();

        let records = DataProcessor::clean_transactions(&df).unwrap();
        assert_eq!(records[0].amount, 2000.25);
        assert_eq!(records[0].name, "N/A");
        assert_eq!(records[0].category, "Uncategorized");
        assert_eq!(records[0].status, "N/A");
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let df = polars::df!["Total Amount" => ["100"]].unwrap();
        assert!(matches!(
            DataProcessor::clean_sales(&df),
            Err(ProcessorError::MissingColumn("Date"))
        ));
    }

    #[test]
    fn filter_matches_customer_substring_case_insensitive() {
        let proc = sample_processor();
        let (sales, _) = proc.filter(&FilterSet {
            customer: "ama".to_string(),
            ..Default::default()
        });
        assert_eq!(sales.len(), 2);
        assert!(sales.iter().all(|s| s.customer == "Ama Serwaa"));
    }

    #[test]
    fn filter_date_range_is_inclusive() {
        let proc = sample_processor();
        let (sales, transactions) = proc.filter(&FilterSet {
            start_date: Some(date(2025, 2, 5)),
            end_date: Some(date(2025, 2, 8)),
            ..Default::default()
        });
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].date, date(2025, 2, 5));
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, date(2025, 2, 8));
    }

    #[test]
    fn filter_status_and_method_are_exact() {
        let proc = sample_processor();
        let (sales, transactions) = proc.filter(&FilterSet {
            payment_status: "Paid".to_string(),
            payment_method: "Cash".to_string(),
            ..Default::default()
        });
        assert_eq!(sales.len(), 1);
        assert_eq!(transactions.len(), 1);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filters = FilterSet {
            start_date: Some(date(2025, 3, 1)),
            end_date: Some(date(2025, 2, 1)),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
    }

    #[test]
    fn summary_totals_and_margin() {
        let proc = sample_processor();
        let summary = proc.summary(&proc.sales, &proc.transactions);
        assert_eq!(summary.total_revenue, 4000.0);
        assert_eq!(summary.total_expenses, 700.0);
        assert_eq!(summary.net_profit, 3300.0);
        assert!((summary.profit_margin - 82.5).abs() < 1e-9);
    }

    #[test]
    fn summary_margin_is_zero_without_revenue() {
        let proc = DataProcessor::new();
        let summary = proc.summary(&[], &[]);
        assert_eq!(summary.profit_margin, 0.0);
    }

    #[test]
    fn period_comparison_tracks_month_over_month() {
        let mut proc = sample_processor();
        proc.refresh_period_comparison(date(2025, 2, 25));
        let summary = proc.summary(&proc.sales, &proc.transactions);

        // Feb: revenue 3000, expenses 300. Jan: revenue 1000, expenses 400.
        assert_eq!(summary.revenue_change, 2000.0);
        assert_eq!(summary.expenses_change, -100.0);
        assert_eq!(summary.profit_change, 2100.0);
    }

    #[test]
    fn period_comparison_wraps_year_boundary() {
        let mut proc = DataProcessor::new();
        proc.set_sales(vec![
            sale(date(2024, 12, 20), "A", 800.0, "Paid", "Cash"),
            sale(date(2025, 1, 5), "B", 1200.0, "Paid", "Cash"),
        ]);
        proc.refresh_period_comparison(date(2025, 1, 15));
        let summary = proc.summary(&proc.sales, &proc.transactions);
        assert_eq!(summary.revenue_change, 400.0);
    }

    #[test]
    fn distinct_filter_options_are_sorted() {
        let proc = sample_processor();
        assert_eq!(proc.payment_statuses(), vec!["Paid", "Pending"]);
        assert_eq!(proc.payment_methods(), vec!["Bank", "Cash", "Momo"]);
    }

    #[test]
    fn filter_description_lists_active_parts() {
        let filters = FilterSet {
            customer: "Ama".to_string(),
            payment_status: "Paid".to_string(),
            ..Default::default()
        };
        assert_eq!(filters.describe(), "Customer: Ama, Status: Paid");
        assert_eq!(FilterSet::default().describe(), "No filters applied");
    }
}
