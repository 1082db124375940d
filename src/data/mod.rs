//! Data layer: CSV loading, typed records, cleaning and filtering.

pub mod loader;
pub mod processor;
pub mod records;

pub use loader::{load_csv, LoaderError};
pub use processor::{DataProcessor, FilterSet, ProcessorError, Summary};
pub use records::{DataSetKind, SaleRecord, TransactionRecord};
