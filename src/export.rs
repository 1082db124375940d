//! Export Manager Module
//! Serializes the filtered view to a CSV report and renders charts to PNG
//! files.

use crate::charts::{ChartData, ChartKind, ChartRenderer, RenderError};
use crate::data::processor::{FilterSet, Summary};
use crate::data::records::{SaleRecord, TransactionRecord};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// Exported chart image dimensions.
const CHART_PNG_WIDTH: u32 = 1400;
const CHART_PNG_HEIGHT: u32 = 1000;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Builds and writes CSV/PNG exports of the current dashboard state.
pub struct ExportManager;

impl ExportManager {
    /// Default report filename, e.g. `financial_report_2025-02-25.csv`.
    pub fn report_filename(date: NaiveDate) -> String {
        format!("financial_report_{date}.csv")
    }

    /// Default image filename for a chart.
    pub fn chart_filename(kind: ChartKind, date: NaiveDate) -> String {
        format!("{}_{date}.png", kind.export_name())
    }

    /// Build the CSV report text: header, filtered sales, filtered
    /// transactions, then summary statistics.
    pub fn build_report(
        filters: &FilterSet,
        sales: &[SaleRecord],
        transactions: &[TransactionRecord],
        summary: &Summary,
        generated_on: NaiveDate,
    ) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Summary Report");
        let _ = writeln!(out, "Generated on: {generated_on}");
        let _ = writeln!(out, "Filters: {}", filters.describe());
        let _ = writeln!(out);

        let _ = writeln!(out, "Sales Data");
        let _ = writeln!(out, "Date,Customer,Total Amount,Payment Status,Payment Method");
        for sale in sales {
            let _ = writeln!(
                out,
                "{},{},{:.2},{},{}",
                sale.date,
                quote(&sale.customer),
                sale.total_amount,
                quote(&sale.payment_status),
                quote(&sale.payment_method),
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Transactions Data");
        let _ = writeln!(out, "Date,Description,Amount,Category,Payment Method,Status");
        for tx in transactions {
            let _ = writeln!(
                out,
                "{},{},{:.2},{},{},{}",
                tx.date,
                quote(&tx.name),
                tx.amount,
                quote(&tx.category),
                quote(&tx.payment_method),
                quote(&tx.status),
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Summary Statistics");
        let _ = writeln!(out, "Total Revenue,{:.2}", summary.total_revenue);
        let _ = writeln!(out, "Total Expenses,{:.2}", summary.total_expenses);
        let _ = writeln!(out, "Net Profit,{:.2}", summary.net_profit);
        let _ = writeln!(out, "Profit Margin,{:.2}%", summary.profit_margin);

        out
    }

    /// Write a report to disk.
    pub fn write_report(path: &Path, contents: &str) -> Result<(), ExportError> {
        std::fs::write(path, contents)?;
        tracing::info!(path = %path.display(), "exported CSV report");
        Ok(())
    }

    /// Render one chart and write it as a PNG file.
    pub fn export_chart(
        path: &Path,
        data: &ChartData,
        symbol: &str,
    ) -> Result<(), ExportError> {
        let png = ChartRenderer::render_to_png(data, symbol, CHART_PNG_WIDTH, CHART_PNG_HEIGHT)?;
        std::fs::write(path, png)?;
        tracing::info!(path = %path.display(), chart = data.kind.title(), "exported chart image");
        Ok(())
    }

    /// Export every chart into `dir`. A failed chart does not abort the
    /// rest; failures are returned for the caller to report.
    pub fn export_all_charts(
        dir: &Path,
        charts: &HashMap<ChartKind, ChartData>,
        symbol: &str,
        date: NaiveDate,
    ) -> Vec<(ChartKind, ExportError)> {
        let mut failures = Vec::new();
        for kind in ChartKind::ALL {
            let Some(data) = charts.get(&kind) else {
                continue;
            };
            let path = dir.join(Self::chart_filename(kind, date));
            if let Err(err) = Self::export_chart(&path, data, symbol) {
                tracing::warn!(chart = kind.title(), error = %err, "chart export failed");
                failures.push((kind, err));
            }
        }
        failures
    }
}

/// Quote a free-text CSV field, escaping embedded quotes.
fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_chart_data;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_sale() -> SaleRecord {
        SaleRecord {
            date: date(2025, 2, 5),
            customer: "Mensah, Kojo".to_string(),
            total_amount: 1234.5,
            payment_status: "Paid".to_string(),
            payment_method: "Cash".to_string(),
            total_trays: 3,
        }
    }

    fn sample_tx() -> TransactionRecord {
        TransactionRecord {
            date: date(2025, 2, 7),
            name: "Feed supplier".to_string(),
            amount: 400.0,
            kind: "Operating".to_string(),
            category: "Feed".to_string(),
            payment_method: "Momo".to_string(),
            status: "Paid".to_string(),
        }
    }

    #[test]
    fn report_contains_all_sections() {
        let summary = Summary {
            total_revenue: 1234.5,
            total_expenses: 400.0,
            net_profit: 834.5,
            profit_margin: 67.6,
            ..Default::default()
        };
        let report = ExportManager::build_report(
            &FilterSet::default(),
            &[sample_sale()],
            &[sample_tx()],
            &summary,
            date(2025, 2, 25),
        );

        assert!(report.starts_with("Summary Report\n"));
        assert!(report.contains("Generated on: 2025-02-25"));
        assert!(report.contains("Filters: No filters applied"));
        assert!(report.contains("Sales Data\nDate,Customer,Total Amount,"));
        assert!(report.contains("2025-02-05,\"Mensah, Kojo\",1234.50,Paid,Cash"));
        assert!(report.contains("2025-02-07,Feed supplier,400.00,Feed,Momo,Paid"));
        assert!(report.contains("Total Revenue,1234.50"));
        assert!(report.contains("Profit Margin,67.60%"));
    }

    #[test]
    fn report_header_reflects_active_filters() {
        let filters = FilterSet {
            customer: "Ama".to_string(),
            start_date: Some(date(2025, 1, 1)),
            ..Default::default()
        };
        let report =
            ExportManager::build_report(&filters, &[], &[], &Summary::default(), date(2025, 2, 1));
        assert!(report.contains("Filters: Customer: Ama, From: 2025-01-01"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn default_filenames_carry_the_date() {
        let d = date(2025, 2, 25);
        assert_eq!(
            ExportManager::report_filename(d),
            "financial_report_2025-02-25.csv"
        );
        assert_eq!(
            ExportManager::chart_filename(ChartKind::RevenueTrend, d),
            "revenue_trends_2025-02-25.png"
        );
    }

    #[test]
    fn export_all_charts_writes_files_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let charts = build_chart_data(&[sample_sale()], &[]);
        let failures =
            ExportManager::export_all_charts(dir.path(), &charts, "₵", date(2025, 2, 25));

        // Expense categories has no data, every other chart renders.
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, ChartKind::ExpenseCategories);
        assert!(dir
            .path()
            .join("financial_overview_2025-02-25.png")
            .exists());
        assert!(dir.path().join("revenue_trends_2025-02-25.png").exists());
    }
}
