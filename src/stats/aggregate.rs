//! Aggregation Module
//! Groups filtered records into the month/customer/status/category buckets
//! the charts are drawn from.

use crate::data::records::{SaleRecord, TransactionRecord};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Revenue and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub revenue: f64,
    pub expenses: f64,
}

impl MonthBucket {
    pub fn profit(&self) -> f64 {
        self.revenue - self.expenses
    }

    /// Axis label, e.g. `"Feb 2025"`.
    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or("???");
        format!("{} {}", name, self.year)
    }
}

/// A named total for single-dimension bar charts.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTotal {
    pub label: String,
    pub total: f64,
}

/// Groups records into chart-ready buckets.
pub struct Aggregator;

impl Aggregator {
    /// Revenue and expenses bucketed by calendar month, chronological.
    pub fn monthly_breakdown(
        sales: &[SaleRecord],
        transactions: &[TransactionRecord],
    ) -> Vec<MonthBucket> {
        let mut months: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

        for sale in sales {
            let entry = months
                .entry((sale.date.year(), sale.date.month()))
                .or_default();
            entry.0 += sale.total_amount;
        }
        for tx in transactions {
            let entry = months
                .entry((tx.date.year(), tx.date.month()))
                .or_default();
            entry.1 += tx.amount;
        }

        months
            .into_iter()
            .map(|((year, month), (revenue, expenses))| MonthBucket {
                year,
                month,
                revenue,
                expenses,
            })
            .collect()
    }

    /// Revenue per customer, descending, capped at `limit`.
    pub fn customer_totals(sales: &[SaleRecord], limit: usize) -> Vec<LabeledTotal> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for sale in sales {
            *totals.entry(sale.customer.as_str()).or_default() += sale.total_amount;
        }
        Self::ranked(totals, limit)
    }

    /// Revenue per payment status, descending.
    pub fn status_totals(sales: &[SaleRecord]) -> Vec<LabeledTotal> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for sale in sales {
            *totals.entry(sale.payment_status.as_str()).or_default() += sale.total_amount;
        }
        Self::ranked(totals, usize::MAX)
    }

    /// Expenses per category, descending, capped at `limit`.
    pub fn category_totals(
        transactions: &[TransactionRecord],
        limit: usize,
    ) -> Vec<LabeledTotal> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for tx in transactions {
            *totals.entry(tx.category.as_str()).or_default() += tx.amount;
        }
        Self::ranked(totals, limit)
    }

    /// Sort totals descending; ties break alphabetically so output is stable.
    fn ranked(totals: HashMap<&str, f64>, limit: usize) -> Vec<LabeledTotal> {
        let mut ranked: Vec<LabeledTotal> = totals
            .into_iter()
            .map(|(label, total)| LabeledTotal {
                label: label.to_string(),
                total,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(d: NaiveDate, customer: &str, amount: f64, status: &str) -> SaleRecord {
        SaleRecord {
            date: d,
            customer: customer.to_string(),
            total_amount: amount,
            payment_status: status.to_string(),
            payment_method: "Cash".to_string(),
            total_trays: 0,
        }
    }

    fn tx(d: NaiveDate, category: &str, amount: f64) -> TransactionRecord {
        TransactionRecord {
            date: d,
            name: "N/A".to_string(),
            amount,
            kind: "N/A".to_string(),
            category: category.to_string(),
            payment_method: "Cash".to_string(),
            status: "Paid".to_string(),
        }
    }

    #[test]
    fn monthly_breakdown_is_chronological_across_years() {
        let sales = vec![
            sale(date(2025, 1, 5), "A", 100.0, "Paid"),
            sale(date(2024, 12, 20), "A", 50.0, "Paid"),
            sale(date(2025, 1, 25), "B", 200.0, "Paid"),
        ];
        let transactions = vec![tx(date(2024, 12, 1), "Feed", 30.0)];

        let months = Aggregator::monthly_breakdown(&sales, &transactions);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].label(), "Dec 2024");
        assert_eq!(months[0].revenue, 50.0);
        assert_eq!(months[0].expenses, 30.0);
        assert_eq!(months[0].profit(), 20.0);
        assert_eq!(months[1].label(), "Jan 2025");
        assert_eq!(months[1].revenue, 300.0);
    }

    #[test]
    fn customer_totals_rank_and_cap() {
        let sales = vec![
            sale(date(2025, 1, 1), "A", 100.0, "Paid"),
            sale(date(2025, 1, 2), "B", 300.0, "Paid"),
            sale(date(2025, 1, 3), "A", 150.0, "Paid"),
            sale(date(2025, 1, 4), "C", 200.0, "Paid"),
        ];

        let totals = Aggregator::customer_totals(&sales, 2);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].label, "B");
        assert_eq!(totals[1].label, "A");
        assert_eq!(totals[1].total, 250.0);
    }

    #[test]
    fn equal_totals_sort_alphabetically() {
        let sales = vec![
            sale(date(2025, 1, 1), "Zed", 100.0, "Paid"),
            sale(date(2025, 1, 2), "Abe", 100.0, "Paid"),
        ];
        let totals = Aggregator::customer_totals(&sales, 10);
        assert_eq!(totals[0].label, "Abe");
    }

    #[test]
    fn status_totals_sum_by_payment_status() {
        let sales = vec![
            sale(date(2025, 1, 1), "A", 100.0, "Paid"),
            sale(date(2025, 1, 2), "B", 40.0, "Pending"),
            sale(date(2025, 1, 3), "C", 60.0, "Paid"),
        ];
        let totals = Aggregator::status_totals(&sales);
        assert_eq!(totals[0].label, "Paid");
        assert_eq!(totals[0].total, 160.0);
        assert_eq!(totals[1].label, "Pending");
    }

    #[test]
    fn category_totals_cap_at_limit() {
        let transactions: Vec<TransactionRecord> = (0u32..10)
            .map(|i| tx(date(2025, 1, 1 + i), &format!("cat{i}"), f64::from(i + 1)))
            .collect();
        let totals = Aggregator::category_totals(&transactions, 8);
        assert_eq!(totals.len(), 8);
        assert_eq!(totals[0].label, "cat9");
    }
}
