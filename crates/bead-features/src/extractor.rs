//! Feature extraction over segment ranges
//!
//! Each range is sliced from the value series with an inclusive upper bound
//! and summarized with the requested metrics. Records come back in range
//! order. A range whose end lies past the series is stale, i.e. it was
//! computed against different data, and fails the whole call.

use crate::metric::MetricSet;
use crate::moments::SegmentSample;
use crate::registry::MetricRegistry;
use crate::table::{FeatureRecord, FeatureTable};
use bead_core::{Result, SegmentRange, Series};
use tracing::{debug, instrument};

/// Computes the selected metrics for every segment of a series
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    registry: MetricRegistry,
    metrics: MetricSet,
}

impl FeatureExtractor {
    /// Extractor for `metrics` over the standard registry
    pub fn new(metrics: MetricSet) -> Self {
        Self {
            registry: MetricRegistry::standard(),
            metrics,
        }
    }

    /// Extractor over a custom registry
    ///
    /// Fails if any requested metric has no evaluator.
    pub fn with_registry(registry: MetricRegistry, metrics: MetricSet) -> Result<Self> {
        registry.supports(&metrics)?;
        Ok(Self { registry, metrics })
    }

    /// Selected metrics
    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    /// Summarize one inclusive range of `series`
    pub fn extract_one(&self, series: &Series, range: &SegmentRange) -> Result<FeatureRecord> {
        let values = series.slice_inclusive(range.start_index, range.end_index)?;
        let sample = SegmentSample::new(values);
        let metrics = self.registry.evaluate(&sample, &self.metrics)?;
        Ok(FeatureRecord::new(range, metrics))
    }

    /// Summarize every range, preserving order
    ///
    /// An empty range list or an empty metric selection is not an error: the
    /// former yields no records, the latter yields records carrying only
    /// their identity.
    #[instrument(level = "debug", skip_all, fields(ranges = ranges.len(), samples = series.len()))]
    pub fn extract(&self, series: &Series, ranges: &[SegmentRange]) -> Result<Vec<FeatureRecord>> {
        if ranges.is_empty() || self.metrics.is_empty() {
            debug!(metrics = self.metrics.len(), "empty selection");
        }
        ranges
            .iter()
            .map(|range| self.extract_one(series, range))
            .collect()
    }

    /// Extract into a table carrying this extractor's schema
    pub fn extract_table(&self, series: &Series, ranges: &[SegmentRange]) -> Result<FeatureTable> {
        Ok(FeatureTable::from_records(
            self.metrics.clone(),
            self.extract(series, ranges)?,
        ))
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(MetricSet::all())
    }
}

/// Summarize `ranges` of `series` with the standard registry
pub fn extract(
    series: &Series,
    ranges: &[SegmentRange],
    metrics: &MetricSet,
) -> Result<Vec<FeatureRecord>> {
    FeatureExtractor::new(metrics.clone()).extract(series, ranges)
}
