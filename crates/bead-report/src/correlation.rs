//! Pearson correlation across metric columns
//!
//! Each pair of columns is correlated over the rows where neither entry is
//! NaN (pairwise-complete observations). Fewer than two complete pairs, or
//! a pair in which either column has zero variance, yields NaN.

use crate::aggregate::group_mean_by_file;
use crate::selection::FileSelection;
use bead_core::{Error, Result};
use bead_features::{FeatureTable, MetricName};
use nalgebra::DMatrix;
use std::fmt;
use tracing::{debug, instrument};

/// Square correlation matrix labelled by metric name
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    labels: Vec<MetricName>,
    values: DMatrix<f64>,
}

impl CorrelationMatrix {
    /// Correlate every pair of labelled columns
    pub fn from_columns(columns: &[(MetricName, Vec<f64>)]) -> Self {
        let n = columns.len();
        let mut values = DMatrix::from_element(n, n, f64::NAN);
        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i].1, &columns[j].1);
                values[(i, j)] = r;
                values[(j, i)] = r;
            }
        }
        Self {
            labels: columns.iter().map(|(m, _)| *m).collect(),
            values,
        }
    }

    /// Row and column labels in canonical metric order
    pub fn labels(&self) -> &[MetricName] {
        &self.labels
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.labels.len()
    }

    /// Underlying matrix
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Correlation between two metrics, if both are present
    pub fn get(&self, row: MetricName, col: MetricName) -> Option<f64> {
        let i = self.labels.iter().position(|m| *m == row)?;
        let j = self.labels.iter().position(|m| *m == col)?;
        Some(self.values[(i, j)])
    }

    /// One row of the matrix
    pub fn row(&self, metric: MetricName) -> Option<Vec<f64>> {
        let i = self.labels.iter().position(|m| *m == metric)?;
        Some(self.values.row(i).iter().copied().collect())
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10}", "feature")?;
        for label in &self.labels {
            write!(f, " {:>10}", label.as_str())?;
        }
        writeln!(f)?;
        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "{:<10}", label.as_str())?;
            for j in 0..self.dim() {
                write!(f, " {:>10.4}", self.values[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pearson correlation over pairwise-complete observations
///
/// Extra entries of the longer slice are ignored. The result is clamped to
/// `[-1, 1]` against rounding.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlate the metric columns of the selected files
///
/// With `aggregate`, rows are first averaged per file so each file
/// contributes one observation.
#[instrument(level = "debug", skip(table), fields(rows = table.len()))]
pub fn correlate(
    table: &FeatureTable,
    selection: &FileSelection,
    aggregate: bool,
) -> Result<CorrelationMatrix> {
    let selected = selection.apply(table);
    if selected.is_empty() {
        return Err(Error::EmptySelection(match selection {
            FileSelection::All => "the feature table has no rows".to_string(),
            FileSelection::Named(names) => format!(
                "no rows match the selected files ({})",
                names.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        }));
    }

    let columns: Vec<(MetricName, Vec<f64>)> = if aggregate {
        let grouped = group_mean_by_file(&selected);
        grouped
            .metrics()
            .iter()
            .map(|m| (m, grouped.column(m)))
            .collect()
    } else {
        selected
            .metrics()
            .iter()
            .map(|m| (m, selected.column(m)))
            .collect()
    };

    debug!(
        observations = columns.first().map(|c| c.1.len()).unwrap_or(0),
        metrics = columns.len(),
        "correlating metric columns"
    );

    Ok(CorrelationMatrix::from_columns(&columns))
}
