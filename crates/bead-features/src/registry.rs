//! Metric registry
//!
//! Maps each metric name to a pure evaluator over a [`SegmentSample`]. The
//! extractor looks evaluators up from the requested set, so a new statistic
//! is one `register` call.

use crate::metric::{MetricName, MetricSet};
use crate::moments::SegmentSample;
use bead_core::{Error, Result};
use std::collections::BTreeMap;

/// Pure function computing one statistic of a segment
pub type Evaluator = fn(&SegmentSample<'_>) -> f64;

/// Lookup table from metric name to evaluator
#[derive(Clone)]
pub struct MetricRegistry {
    evaluators: BTreeMap<MetricName, Evaluator>,
}

impl std::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.evaluators.keys()).finish()
    }
}

impl MetricRegistry {
    /// Registry with no evaluators
    pub fn empty() -> Self {
        Self {
            evaluators: BTreeMap::new(),
        }
    }

    /// Registry with every standard metric
    pub fn standard() -> Self {
        Self::empty()
            .register(MetricName::Mean, |s| s.mean())
            .register(MetricName::Std, |s| s.std_dev())
            .register(MetricName::Var, |s| s.variance())
            .register(MetricName::Min, |s| s.min())
            .register(MetricName::Max, |s| s.max())
            .register(MetricName::Median, |s| s.median())
            .register(MetricName::Skewness, |s| s.skewness())
            .register(MetricName::Kurtosis, |s| s.kurtosis())
    }

    /// Add or replace the evaluator for `metric`
    pub fn register(mut self, metric: MetricName, evaluator: Evaluator) -> Self {
        self.evaluators.insert(metric, evaluator);
        self
    }

    /// Evaluator registered for `metric`
    pub fn get(&self, metric: MetricName) -> Option<Evaluator> {
        self.evaluators.get(&metric).copied()
    }

    /// Check that every metric in `metrics` has an evaluator
    pub fn supports(&self, metrics: &MetricSet) -> Result<()> {
        match metrics.iter().find(|m| !self.evaluators.contains_key(m)) {
            Some(missing) => Err(Error::InvalidParameter(format!(
                "No evaluator registered for metric '{missing}'"
            ))),
            None => Ok(()),
        }
    }

    /// Evaluate the requested metrics over one segment
    pub fn evaluate(
        &self,
        sample: &SegmentSample<'_>,
        metrics: &MetricSet,
    ) -> Result<BTreeMap<MetricName, f64>> {
        metrics
            .iter()
            .map(|metric| {
                let evaluator = self.get(metric).ok_or_else(|| {
                    Error::InvalidParameter(format!("No evaluator registered for metric '{metric}'"))
                })?;
                Ok((metric, evaluator(sample)))
            })
            .collect()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
