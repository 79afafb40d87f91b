//! Append-only wave sample log for the run in progress.

use osc_core::{OscError, OscResult, Real, ensure_finite};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One recorded sample: virtual time and displacement from equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePoint {
    pub time: Real,
    pub displacement: Real,
}

impl WavePoint {
    pub fn new(time: Real, displacement: Real) -> Self {
        Self { time, displacement }
    }
}

/// Ordered samples of the current run.
///
/// The recorder only accepts samples while it is open; the engine opens it
/// when a run starts or resumes and closes it on pause and finalize.
#[derive(Debug, Clone, Default)]
pub struct WaveRecorder {
    points: Vec<WavePoint>,
    open: bool,
    max_samples: Option<usize>,
    dropped: usize,
}

impl WaveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that stops accepting samples after `max_samples` per run.
    pub fn with_cap(max_samples: Option<usize>) -> Self {
        Self {
            max_samples,
            ..Self::default()
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Append a sample.
    ///
    /// Returns `Ok(false)` when the per-run cap is reached and the sample was
    /// dropped.
    pub fn append(&mut self, point: WavePoint) -> OscResult<bool> {
        if !self.open {
            return Err(OscError::Invariant {
                what: "samples may only be appended while a run is running",
            });
        }
        ensure_finite(point.time, "sample time")?;
        ensure_finite(point.displacement, "sample displacement")?;
        if self.points.last().is_some_and(|last| point.time < last.time) {
            return Err(OscError::Invariant {
                what: "sample times must be non-decreasing",
            });
        }
        if let Some(cap) = self.max_samples {
            if self.points.len() >= cap {
                if self.dropped == 0 {
                    warn!(cap, "per-run sample cap reached; dropping further samples");
                }
                self.dropped += 1;
                return Ok(false);
            }
        }
        self.points.push(point);
        Ok(true)
    }

    /// Drop all samples. Leaves the open/closed flag alone.
    pub fn clear(&mut self) {
        self.points.clear();
        self.dropped = 0;
    }

    /// Owned copy of the samples.
    pub fn snapshot(&self) -> Vec<WavePoint> {
        self.points.clone()
    }

    pub fn points(&self) -> &[WavePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Samples rejected by the cap since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
