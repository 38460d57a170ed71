//! Two-state threshold scan
//!
//! A scan is either outside a qualifying run or inside one that started at a
//! known index. Each sample moves the machine by one `step`; the end of the
//! series is handled by `finish`. Closed runs are reported as inclusive
//! `(start, end)` pairs, where `end` is the last index that exceeded the
//! threshold.

/// Position of the scan relative to a qualifying run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Not inside a run
    #[default]
    Outside,
    /// Inside a run that began at `start`
    Inside { start: usize },
}

impl ScanState {
    /// Advance over the sample at `index`
    ///
    /// Returns the next state and, when this sample ends a run, the closed
    /// `(start, end)` pair with `end == index - 1`.
    pub fn step(self, index: usize, exceeds: bool) -> (ScanState, Option<(usize, usize)>) {
        match (self, exceeds) {
            (ScanState::Outside, false) => (ScanState::Outside, None),
            (ScanState::Outside, true) => (ScanState::Inside { start: index }, None),
            (inside @ ScanState::Inside { .. }, true) => (inside, None),
            // `index > start` here: the run's first sample moved us Inside
            (ScanState::Inside { start }, false) => (ScanState::Outside, Some((start, index - 1))),
        }
    }

    /// Close a run left open at the end of a series of length `len`
    pub fn finish(self, len: usize) -> Option<(usize, usize)> {
        match self {
            ScanState::Outside => None,
            ScanState::Inside { start } => Some((start, len - 1)),
        }
    }

    /// Whether the scan is inside a run
    pub fn is_inside(&self) -> bool {
        matches!(self, ScanState::Inside { .. })
    }
}

/// Threshold membership rule: strictly greater than
///
/// NaN never exceeds, so NaN samples always count as outside.
#[inline]
pub fn exceeds(value: f64, threshold: f64) -> bool {
    value > threshold
}

/// Lazy iterator over the inclusive runs of a slice that exceed a threshold
#[derive(Debug, Clone)]
pub struct ThresholdRuns<'a> {
    values: &'a [f64],
    threshold: f64,
    index: usize,
    state: ScanState,
}

impl<'a> ThresholdRuns<'a> {
    /// Start a scan over `values`
    pub fn new(values: &'a [f64], threshold: f64) -> Self {
        Self {
            values,
            threshold,
            index: 0,
            state: ScanState::Outside,
        }
    }
}

impl Iterator for ThresholdRuns<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.values.len() {
            let i = self.index;
            self.index += 1;
            let (next, closed) = self.state.step(i, exceeds(self.values[i], self.threshold));
            self.state = next;
            if closed.is_some() {
                return closed;
            }
        }
        let tail = self.state.finish(self.values.len());
        self.state = ScanState::Outside;
        tail
    }
}
