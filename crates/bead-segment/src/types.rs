//! Types used for bead segmentation

use bead_core::{SegmentRange, SourceFile};
use std::fmt;

/// Result of segmenting one file
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    source: SourceFile,
    ranges: Vec<SegmentRange>,
    algorithm: String,
    sample_size: usize,
}

impl Segmentation {
    /// Create a new segmentation result
    pub fn new(
        source: SourceFile,
        ranges: Vec<SegmentRange>,
        algorithm: String,
        sample_size: usize,
    ) -> Self {
        Self {
            source,
            ranges,
            algorithm,
            sample_size,
        }
    }

    /// File that was segmented
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// Detected ranges in discovery order
    pub fn ranges(&self) -> &[SegmentRange] {
        &self.ranges
    }

    /// Take ownership of the ranges
    pub fn into_ranges(self) -> Vec<SegmentRange> {
        self.ranges
    }

    /// `(start, end)` pairs of every range
    pub fn bounds(&self) -> Vec<(usize, usize)> {
        self.ranges.iter().map(SegmentRange::bounds).collect()
    }

    /// Number of detected segments
    pub fn count(&self) -> usize {
        self.ranges.len()
    }

    /// Check if any segments were detected
    pub fn has_segments(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Get the algorithm name used for detection
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Length of the series that was scanned
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Number of samples covered by segments
    pub fn covered_samples(&self) -> usize {
        self.ranges.iter().map(SegmentRange::len).sum()
    }

    /// Longest segment, first one on ties
    pub fn longest(&self) -> Option<&SegmentRange> {
        self.ranges
            .iter()
            .reduce(|best, r| if r.len() > best.len() { r } else { best })
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Segmentation of {}:", self.source)?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Segments detected: {}", self.count())?;

        for range in &self.ranges {
            writeln!(
                f,
                "    #{} [{}, {}] ({} samples)",
                range.sequence_number,
                range.start_index,
                range.end_index,
                range.len()
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Segmentation {
        let source = SourceFile::named("a.csv");
        let ranges = vec![
            SegmentRange::new(source.clone(), 1, 1, 2),
            SegmentRange::new(source.clone(), 2, 4, 4),
            SegmentRange::new(source.clone(), 3, 7, 9),
        ];
        Segmentation::new(source, ranges, "Threshold".to_string(), 10)
    }

    #[test]
    fn test_accessors() {
        let seg = sample();
        assert_eq!(seg.count(), 3);
        assert!(seg.has_segments());
        assert_eq!(seg.bounds(), vec![(1, 2), (4, 4), (7, 9)]);
        assert_eq!(seg.covered_samples(), 6);
        assert_eq!(seg.longest().map(|r| r.sequence_number), Some(3));
        assert_eq!(seg.sample_size(), 10);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.contains("Segments detected: 3"));
        assert!(text.contains("#2 [4, 4] (1 samples)"));
    }
}
