//! CSV reading and numeric column extraction

use crate::Result;
use bead_core::{ColumnRef, Series};
use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use std::path::Path;
use tracing::debug;

/// Read a comma-delimited file with a header row
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read csv");
    Ok(df)
}

/// Column headers in file order
pub fn header_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Coerce one column to a numeric series
///
/// Empty cells load as NaN. Text that does not parse as a number becomes a
/// missing value during the cast and rejects the whole column with
/// `InvalidInput`, naming `context` and the first offending row.
pub fn numeric_series(df: &DataFrame, column: &ColumnRef, context: &str) -> Result<Series> {
    let headers = header_names(df);
    let pos = column.resolve(&headers)?;
    let raw = df.get_columns()[pos].as_materialized_series();
    let blank = raw.is_null();
    let floats = raw.cast(&DataType::Float64)?;
    let ca = floats.f64()?;
    // Null before the cast: empty in the file. Null only after: not a number.
    let cells = ca
        .into_iter()
        .zip(blank.into_iter())
        .map(|(cell, blank)| match (cell, blank) {
            (None, Some(true)) => Some(f64::NAN),
            (cell, _) => cell,
        });
    Ok(Series::from_cells(
        &format!("{context}: column '{}'", headers[pos]),
        cells,
    )?)
}
