//! CSV Data Loader Module
//! Handles CSV file loading and tolerant column extraction using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV file contains no rows")]
    Empty,
}

/// Load a CSV file using Polars.
///
/// Schema inference is tolerant: mistyped cells are ignored rather than
/// failing the whole file, matching how heterogeneous spreadsheet exports
/// arrive in practice.
pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    let df = LazyCsvReader::new(path.to_string_lossy().as_ref())
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    if df.height() == 0 {
        return Err(LoaderError::Empty);
    }

    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "loaded CSV"
    );

    Ok(df)
}

/// Find a column by any of the given header aliases.
/// Header comparison is trimmed and case-insensitive.
pub fn find_column<'a>(df: &'a DataFrame, aliases: &[&str]) -> Option<&'a Column> {
    df.get_columns().iter().find(|col| {
        let name = col.name().as_str().trim();
        aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias))
    })
}

/// Extract a column as trimmed strings, whatever its inferred dtype.
///
/// Returns `None` when no alias matches. Individual cells are `None` when
/// null or blank.
pub fn column_as_strings(df: &DataFrame, aliases: &[&str]) -> Option<Vec<Option<String>>> {
    let col = find_column(df, aliases)?;
    let casted = col.cast(&DataType::String).ok()?;
    let ca = casted.str().ok()?;

    Some(
        ca.into_iter()
            .map(|cell| {
                cell.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect(),
    )
}
