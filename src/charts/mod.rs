//! Chart layer: dataset derivation, interactive plotting and static
//! rendering for export.

pub mod plotter;
pub mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderError};

use crate::data::records::{SaleRecord, TransactionRecord};
use crate::stats::{Aggregator, LabeledTotal, MonthBucket};
use rayon::prelude::*;
use std::collections::HashMap;

/// Top-N caps matching the dashboard's card sizes.
const TOP_CUSTOMERS: usize = 10;
const TOP_CATEGORIES: usize = 8;

/// The five dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    MonthlyOverview,
    CustomerPerformance,
    PaymentStatus,
    RevenueTrend,
    ExpenseCategories,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::MonthlyOverview,
        ChartKind::CustomerPerformance,
        ChartKind::PaymentStatus,
        ChartKind::RevenueTrend,
        ChartKind::ExpenseCategories,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::MonthlyOverview => "Financial Overview",
            ChartKind::CustomerPerformance => "Customer Performance",
            ChartKind::PaymentStatus => "Payment Status",
            ChartKind::RevenueTrend => "Revenue Trends",
            ChartKind::ExpenseCategories => "Expense Categories",
        }
    }

    /// Stem used for exported image filenames.
    pub fn export_name(&self) -> &'static str {
        match self {
            ChartKind::MonthlyOverview => "financial_overview",
            ChartKind::CustomerPerformance => "customer_performance",
            ChartKind::PaymentStatus => "payment_status",
            ChartKind::RevenueTrend => "revenue_trends",
            ChartKind::ExpenseCategories => "expense_categories",
        }
    }
}

/// Data behind one chart card. Monthly charts carry month buckets, the
/// rest carry ranked label/total pairs.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub kind: ChartKind,
    pub months: Vec<MonthBucket>,
    pub entries: Vec<LabeledTotal>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty() && self.entries.is_empty()
    }

    fn build(kind: ChartKind, sales: &[SaleRecord], transactions: &[TransactionRecord]) -> Self {
        let (months, entries) = match kind {
            ChartKind::MonthlyOverview | ChartKind::RevenueTrend => {
                (Aggregator::monthly_breakdown(sales, transactions), Vec::new())
            }
            ChartKind::CustomerPerformance => {
                (Vec::new(), Aggregator::customer_totals(sales, TOP_CUSTOMERS))
            }
            ChartKind::PaymentStatus => (Vec::new(), Aggregator::status_totals(sales)),
            ChartKind::ExpenseCategories => (
                Vec::new(),
                Aggregator::category_totals(transactions, TOP_CATEGORIES),
            ),
        };
        Self {
            kind,
            months,
            entries,
        }
    }
}

/// Derive all chart datasets from a filtered view, one chart per worker.
pub fn build_chart_data(
    sales: &[SaleRecord],
    transactions: &[TransactionRecord],
) -> HashMap<ChartKind, ChartData> {
    ChartKind::ALL
        .par_iter()
        .map(|kind| (*kind, ChartData::build(*kind, sales, transactions)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn builds_all_five_charts() {
        let sales = vec![SaleRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            customer: "Ama".to_string(),
            total_amount: 120.0,
            payment_status: "Paid".to_string(),
            payment_method: "Cash".to_string(),
            total_trays: 4,
        }];
        let charts = build_chart_data(&sales, &[]);

        assert_eq!(charts.len(), ChartKind::ALL.len());
        assert!(!charts[&ChartKind::MonthlyOverview].months.is_empty());
        assert_eq!(charts[&ChartKind::CustomerPerformance].entries[0].label, "Ama");
        assert!(charts[&ChartKind::ExpenseCategories].is_empty());
    }
}
