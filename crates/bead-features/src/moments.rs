//! Population moments of one segment
//!
//! Central moments are accumulated once per segment and shared by every
//! metric evaluator. All estimators use divisor `n` with no small-sample
//! correction.
//!
//! Zero-variance policy: when the second central moment is zero, or is
//! indistinguishable from zero relative to the mean (`m2 <= (eps * mean)^2`),
//! skewness and kurtosis are `NaN`. A one-sample segment therefore reports
//! `std == 0`, `var == 0`, and `NaN` for both shape statistics.

use statrs::statistics::{Data, Median, Statistics};

/// Samples of one segment with their population moments
#[derive(Debug, Clone, Copy)]
pub struct SegmentSample<'a> {
    values: &'a [f64],
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl<'a> SegmentSample<'a> {
    /// Accumulate the moments of `values`
    pub fn new(values: &'a [f64]) -> Self {
        let mean = Statistics::mean(values);
        let n = values.len() as f64;

        let (mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0);
        for &v in values {
            let d = v - mean;
            let d2 = d * d;
            s2 += d2;
            s3 += d2 * d;
            s4 += d2 * d2;
        }

        Self {
            values,
            mean,
            m2: s2 / n,
            m3: s3 / n,
            m4: s4 / n,
        }
    }

    /// The raw samples
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the segment holds no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divisor n)
    pub fn variance(&self) -> f64 {
        self.m2
    }

    /// Population standard deviation (divisor n)
    pub fn std_dev(&self) -> f64 {
        self.m2.sqrt()
    }

    /// Smallest sample, NaN if any sample is NaN
    pub fn min(&self) -> f64 {
        if self.has_nan() {
            return f64::NAN;
        }
        Statistics::min(self.values)
    }

    /// Largest sample, NaN if any sample is NaN
    pub fn max(&self) -> f64 {
        if self.has_nan() {
            return f64::NAN;
        }
        Statistics::max(self.values)
    }

    /// Median; the mean of the two middle samples for an even count
    pub fn median(&self) -> f64 {
        if self.values.is_empty() || self.has_nan() {
            return f64::NAN;
        }

        Data::new(self.values.to_vec()).median()
    }

    fn has_nan(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Second central moment
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Whether the spread is zero to working precision
    pub fn is_degenerate(&self) -> bool {
        self.m2 <= (f64::EPSILON * self.mean).powi(2)
    }

    /// Fisher's moment coefficient of skewness, `m3 / m2^1.5`
    pub fn skewness(&self) -> f64 {
        if self.is_degenerate() {
            return f64::NAN;
        }
        self.m3 / self.m2.powf(1.5)
    }

    /// Fisher's excess kurtosis, `m4 / m2^2 - 3`
    pub fn kurtosis(&self) -> f64 {
        if self.is_degenerate() {
            return f64::NAN;
        }
        self.m4 / (self.m2 * self.m2) - 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_moments() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sample = SegmentSample::new(&values);
        assert_relative_eq!(sample.mean(), 5.0);
        assert_relative_eq!(sample.variance(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(sample.std_dev(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(sample.m2(), 4.0, epsilon = 1e-12);
        assert_eq!(sample.min(), 2.0);
        assert_eq!(sample.max(), 9.0);
        assert_eq!(sample.median(), 4.5);
    }

    #[test]
    fn test_shape_statistics_match_population_estimators() {
        // scipy.stats.skew / kurtosis with bias=True
        let values = [1.0, 2.0, 3.0, 4.0, 10.0];
        let sample = SegmentSample::new(&values);
        assert_relative_eq!(sample.skewness(), 1.1384199576606167, epsilon = 1e-12);
        assert_relative_eq!(sample.kurtosis(), -0.212, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric_sample_has_zero_skew() {
        let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let sample = SegmentSample::new(&values);
        assert_relative_eq!(sample.skewness(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.kurtosis(), -1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_policy() {
        let values = [6.0];
        let sample = SegmentSample::new(&values);
        assert_eq!(sample.std_dev(), 0.0);
        assert_eq!(sample.variance(), 0.0);
        assert_eq!(sample.median(), 6.0);
        assert!(sample.skewness().is_nan());
        assert!(sample.kurtosis().is_nan());
    }

    #[test]
    fn test_constant_sample_policy() {
        let values = [0.1; 7];
        let sample = SegmentSample::new(&values);
        assert!(sample.is_degenerate());
        assert!(sample.skewness().is_nan());
        assert!(sample.kurtosis().is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        let values = [1.0, f64::NAN, 3.0];
        let sample = SegmentSample::new(&values);
        assert!(sample.mean().is_nan());
        assert!(sample.variance().is_nan());
        assert!(sample.min().is_nan());
        assert!(sample.max().is_nan());
        assert!(sample.median().is_nan());
        assert!(sample.skewness().is_nan());
    }

    #[test]
    fn test_spread_comes_from_shared_second_moment() {
        let values = [1.0, 2.0, 3.0, 4.0, 10.0];
        let sample = SegmentSample::new(&values);
        assert_eq!(sample.variance(), sample.m2());
        assert_eq!(sample.std_dev(), sample.m2().sqrt());
        assert_relative_eq!(sample.variance(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_even_median_of_unsorted_samples() {
        let values = [7.0, 1.0, 3.0, 10.0];
        assert_eq!(SegmentSample::new(&values).median(), 5.0);
        assert!(SegmentSample::new(&[]).median().is_nan());
    }

    #[test]
    fn test_odd_median() {
        let values = [9.0, 1.0, 5.0];
        assert_eq!(SegmentSample::new(&values).median(), 5.0);
    }
}
