//! Wall-clock timeout policy layered over the engine.
//!
//! The engine itself never looks at real time. The control surface owns an
//! `AutoFinalize`, feeds it the real frame durations, and it finalizes a run
//! that is still running once the timeout has elapsed since its start.

use crate::config::EngineConfig;
use crate::engine::{FinalizeOutcome, SimulationEngine};
use osc_core::RunState;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AutoFinalize {
    timeout: Duration,
    elapsed: Duration,
    /// Run currently being timed, by start count.
    run: Option<u64>,
}

impl AutoFinalize {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            elapsed: Duration::ZERO,
            run: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        config.auto_finalize_after().map(Self::new)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wall-clock time since the timed run started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Account for one frame and finalize if the deadline has passed.
    ///
    /// Paused time counts toward the deadline, but a paused run is only
    /// finalized on the first poll after it resumes.
    pub fn poll(
        &mut self,
        engine: &mut SimulationEngine,
        frame_elapsed: Duration,
    ) -> Option<FinalizeOutcome> {
        if !engine.state().is_active() {
            self.run = None;
            self.elapsed = Duration::ZERO;
            return None;
        }

        let current = engine.runs_started();
        if self.run != Some(current) {
            self.run = Some(current);
            self.elapsed = Duration::ZERO;
        }
        self.elapsed += frame_elapsed;

        if self.elapsed >= self.timeout && engine.state() == RunState::Running {
            warn!(
                timeout_s = self.timeout.as_secs_f64(),
                virtual_time = engine.virtual_time(),
                "auto-finalizing run"
            );
            self.run = None;
            self.elapsed = Duration::ZERO;
            return Some(engine.finalize());
        }
        None
    }
}
