//! Common test utilities for bead-polars tests

use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Two-column CSV text with `Voltage` first and `Current` second
pub fn two_column_csv(voltage: &[f64], current: &[f64]) -> String {
    let mut text = String::from("Voltage,Current\n");
    for (v, c) in voltage.iter().zip(current) {
        text.push_str(&format!("{v},{c}\n"));
    }
    text
}

/// DataFrame over named float columns
pub fn frame(columns: &[(&str, Vec<f64>)]) -> DataFrame {
    DataFrame::new(
        columns
            .iter()
            .map(|(name, values)| Series::new(PlSmallStr::from(*name), values.clone()).into())
            .collect(),
    )
    .unwrap()
}

/// Extract a float cell
pub fn float_cell(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}
