//! Aggregation layer feeding the chart datasets.

pub mod aggregate;

pub use aggregate::{Aggregator, LabeledTotal, MonthBucket};
