//! Typed Record Definitions
//! Cleaned row types produced from the raw CSV files.

use chrono::NaiveDate;

/// A validated sales row.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub customer: String,
    pub total_amount: f64,
    pub payment_status: String,
    pub payment_method: String,
    pub total_trays: u32,
}

/// A validated expense transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub name: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub payment_method: String,
    pub status: String,
}

/// Which of the two input files a load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSetKind {
    Sales,
    Transactions,
}

impl DataSetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DataSetKind::Sales => "sales",
            DataSetKind::Transactions => "transactions",
        }
    }
}
