//! Fixed-interval sampling on the virtual clock.
//!
//! Sample times are derived from an integer sample index rather than by
//! repeatedly adding the interval, so long runs neither skip nor duplicate
//! samples as float error accumulates.

use osc_core::{Real, Tolerances, nearly_equal};

/// Relative slack when comparing the clock to the next sample time.
const SAMPLE_SLACK: Real = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleClock {
    interval: Real,
    next_index: u64,
}

impl SampleClock {
    /// Create a clock whose first sample falls one interval after t = 0.
    ///
    /// `interval` must be positive; `EngineConfig::validate` guarantees this
    /// for engine-owned clocks.
    pub fn new(interval: Real) -> Self {
        debug_assert!(interval > 0.0, "sample interval must be positive");
        Self {
            interval,
            next_index: 1,
        }
    }

    pub fn interval(&self) -> Real {
        self.interval
    }

    /// Virtual time of the next scheduled sample.
    pub fn next_sample_time(&self) -> Real {
        self.next_index as Real * self.interval
    }

    /// Returns `true` if a sample is due at `current_time`.
    pub fn should_sample(&self, current_time: Real) -> bool {
        let next = self.next_sample_time();
        current_time >= next || nearly_equal(current_time, next, self.tolerance())
    }

    fn tolerance(&self) -> Tolerances {
        Tolerances::absolute(SAMPLE_SLACK * self.interval)
    }

    /// Schedule the first sample strictly after `current_time`.
    ///
    /// When one step spans several intervals only one sample is taken and the
    /// missed slots are skipped.
    pub fn advance_past(&mut self, current_time: Real) {
        let elapsed = ((current_time + SAMPLE_SLACK * self.interval) / self.interval).floor();
        // Float-to-int casts saturate; keep the increment from wrapping too.
        let past = (elapsed.max(0.0) as u64).saturating_add(1);
        self.next_index = past.max(self.next_index.saturating_add(1));
    }

    /// Take a sample if one is due. Returns `true` when the caller should record.
    pub fn poll(&mut self, current_time: Real) -> bool {
        if self.should_sample(current_time) {
            self.advance_past(current_time);
            true
        } else {
            false
        }
    }

    /// Rewind to the start of a run.
    pub fn reset(&mut self) {
        self.next_index = 1;
    }
}
