//! Run lifecycle state machine and virtual clock.
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!   ^                |                         |
//!   +----finalize----+-------------------------+
//! ```
//!
//! Virtual time advances by a fixed step per tick while running and is derived
//! from the tick count, so replays are deterministic regardless of frame rate.

use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::frame::Frame;
use crate::history::{PendingRun, Run, RunHistory};
use crate::recorder::{WavePoint, WaveRecorder};
use crate::sampled::SampleClock;
use osc_core::{
    OscError, OscResult, Oscillation, ParamName, Parameters, Real, RunState, Variant,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No run in progress.
    Idle,
    /// Run in progress but frozen.
    Paused,
    /// Clock advanced.
    Advanced {
        time: Real,
        position: Real,
        sampled: bool,
    },
    /// The next step would leave the finite range; the clock stays where it
    /// was. Only reachable with a configuration `EngineConfig::validate`
    /// would reject.
    Stalled { time: Real, position: Real },
}

/// Result of finalizing a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizeOutcome {
    /// Palette index of the archived run, if one was archived.
    pub archived_color: Option<usize>,
    /// Number of samples moved into history.
    pub samples: usize,
    /// Oldest run pushed out of a full history.
    pub evicted: Option<Run>,
}

impl FinalizeOutcome {
    pub fn archived(&self) -> bool {
        self.archived_color.is_some()
    }
}

/// Owns all simulation state shared between the control surface and the
/// renderer.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: EngineConfig,
    variant: Variant,
    parameters: Parameters,
    oscillation: Oscillation,
    state: RunState,
    ticks: u64,
    virtual_time: Real,
    position: Real,
    sampler: SampleClock,
    recorder: WaveRecorder,
    history: RunHistory,
    runs_started: u64,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let variant = Variant::default();
        let parameters = variant.default_parameters();
        let oscillation = default_oscillation(&parameters);
        Self {
            sampler: SampleClock::new(config.sample_interval),
            recorder: WaveRecorder::with_cap(config.max_samples_per_run),
            history: RunHistory::with_capacity(config.history_capacity),
            position: config.equilibrium,
            config,
            variant,
            parameters,
            oscillation,
            state: RunState::Idle,
            ticks: 0,
            virtual_time: 0.0,
            runs_started: 0,
        }
    }

    /// Switch the experiment. Resets parameters to the variant defaults and
    /// clears both the recorder and the run history.
    pub fn select_variant(&mut self, variant: Variant) -> OscResult<()> {
        self.require_idle("select variant")?;
        let parameters = variant.default_parameters();
        self.oscillation = Oscillation::for_parameters(&parameters)?;
        self.variant = variant;
        self.parameters = parameters;
        self.recorder.clear();
        self.history.clear();
        self.reset_clock();
        debug!(%variant, "variant selected");
        Ok(())
    }

    /// Change one parameter of the active variant. Idle only.
    ///
    /// On error the previous parameters remain in effect.
    pub fn set_parameter(&mut self, name: ParamName, value: Real) -> OscResult<Oscillation> {
        self.require_idle("set parameter")?;
        let updated = self.parameters.with(name, value)?;
        self.apply_parameters(updated)
    }

    /// Replace the whole parameter set. Must match the active variant.
    pub fn set_parameters(&mut self, parameters: Parameters) -> OscResult<Oscillation> {
        self.require_idle("set parameters")?;
        if parameters.variant() != self.variant {
            return Err(OscError::InvalidParameter {
                name: "variant",
                what: "parameters belong to a different variant",
                value: f64::NAN,
            });
        }
        self.apply_parameters(parameters)
    }

    fn apply_parameters(&mut self, parameters: Parameters) -> OscResult<Oscillation> {
        let oscillation = Oscillation::for_parameters(&parameters)?;
        self.parameters = parameters;
        self.oscillation = oscillation;
        debug!(
            %parameters,
            amplitude = oscillation.amplitude,
            period = oscillation.period,
            "parameters updated"
        );
        Ok(oscillation)
    }

    /// Begin a fresh run. Idle only.
    pub fn start(&mut self) -> OscResult<()> {
        self.require_idle("start")?;
        self.reset_clock();
        self.recorder.clear();
        self.recorder.open();
        self.state = RunState::Running;
        self.runs_started += 1;
        debug!(variant = %self.variant, parameters = %self.parameters, "run started");
        Ok(())
    }

    /// Freeze the clock. Pausing an already paused run is a no-op.
    pub fn pause(&mut self) -> OscResult<RunState> {
        match self.state {
            RunState::Idle => Err(self.illegal("pause")),
            RunState::Running => {
                self.recorder.close();
                self.state = RunState::Paused;
                debug!(time = self.virtual_time, "run paused");
                Ok(self.state)
            }
            RunState::Paused => Ok(self.state),
        }
    }

    /// Unfreeze the clock. Resuming a running run is a no-op.
    pub fn resume(&mut self) -> OscResult<RunState> {
        match self.state {
            RunState::Idle => Err(self.illegal("resume")),
            RunState::Paused => {
                self.recorder.open();
                self.state = RunState::Running;
                debug!(time = self.virtual_time, "run resumed");
                Ok(self.state)
            }
            RunState::Running => Ok(self.state),
        }
    }

    /// Single pause/resume button.
    pub fn toggle_pause(&mut self) -> OscResult<RunState> {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Idle => Err(self.illegal("toggle pause")),
        }
    }

    /// End the run in progress.
    ///
    /// Samples recorded so far are archived into history before anything is
    /// reset. From `Idle` this only re-zeroes the clock.
    pub fn finalize(&mut self) -> FinalizeOutcome {
        let mut outcome = FinalizeOutcome::default();
        if self.state.is_active() && !self.recorder.is_empty() {
            let pending = PendingRun {
                parameters: self.parameters,
                points: self.recorder.snapshot(),
            };
            outcome.samples = pending.points.len();
            outcome.evicted = self.history.push(pending);
            outcome.archived_color = self.history.latest().map(Run::color_index);
            info!(
                variant = %self.variant,
                parameters = %self.parameters,
                samples = outcome.samples,
                duration = self.virtual_time,
                history_len = self.history.len(),
                "run archived"
            );
        }
        self.recorder.close();
        self.recorder.clear();
        self.reset_clock();
        self.state = RunState::Idle;
        debug!("run finalized");
        outcome
    }

    /// Drop every archived run.
    pub fn clear_history(&mut self) {
        self.history.clear();
        debug!("history cleared");
    }

    /// Leave the experiment: finalize, then clear history.
    pub fn back(&mut self) -> FinalizeOutcome {
        let outcome = self.finalize();
        self.clear_history();
        outcome
    }

    /// Advance one frame.
    ///
    /// `_frame_elapsed` is accepted for the frame-loop signature but ignored:
    /// virtual time depends only on the number of ticks.
    pub fn tick(&mut self, _frame_elapsed: Duration) -> TickOutcome {
        match self.state {
            RunState::Idle => TickOutcome::Idle,
            RunState::Paused => TickOutcome::Paused,
            RunState::Running => self.advance(),
        }
    }

    fn advance(&mut self) -> TickOutcome {
        let ticks = self.ticks.saturating_add(1);
        let time = ticks as Real * self.config.step_size();
        let position = self.oscillation.position(self.config.equilibrium, time);
        if !time.is_finite() || !position.is_finite() {
            warn!(ticks, time, position, "clock step is not finite; run stalled");
            return TickOutcome::Stalled {
                time: self.virtual_time,
                position: self.position,
            };
        }
        self.ticks = ticks;
        self.virtual_time = time;
        self.position = position;

        let mut sampled = false;
        if self.sampler.poll(time) {
            let point = WavePoint::new(time, self.displacement());
            sampled = match self.recorder.append(point) {
                Ok(kept) => kept,
                Err(err) => {
                    warn!(%err, time, "sample not recorded");
                    false
                }
            };
        }

        TickOutcome::Advanced {
            time,
            position,
            sampled,
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            state: self.state,
            variant: self.variant,
            parameters: self.parameters,
            oscillation: self.oscillation,
            virtual_time: self.virtual_time,
            position: self.position,
            displacement: self.displacement(),
            equilibrium: self.config.equilibrium,
            samples: self.recorder.points(),
            history: &self.history,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn oscillation(&self) -> Oscillation {
        self.oscillation
    }

    pub fn virtual_time(&self) -> Real {
        self.virtual_time
    }

    pub fn position(&self) -> Real {
        self.position
    }

    pub fn displacement(&self) -> Real {
        self.position - self.config.equilibrium
    }

    pub fn recorder(&self) -> &WaveRecorder {
        &self.recorder
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of runs started since construction. Identifies the run in
    /// progress for timeout policies.
    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }

    fn require_idle(&self, action: &'static str) -> OscResult<()> {
        if self.state == RunState::Idle {
            Ok(())
        } else {
            Err(self.illegal(action))
        }
    }

    fn illegal(&self, action: &'static str) -> OscError {
        debug!(action, state = %self.state, "transition rejected");
        OscError::IllegalStateTransition {
            action,
            state: self.state,
        }
    }

    fn reset_clock(&mut self) {
        self.ticks = 0;
        self.virtual_time = 0.0;
        self.position = self.config.equilibrium;
        self.sampler.reset();
    }
}

fn default_oscillation(parameters: &Parameters) -> Oscillation {
    // Variant defaults are always in range; fall back to a unit swing if not.
    Oscillation::for_parameters(parameters).unwrap_or(Oscillation {
        amplitude: 0.0,
        period: 1.0,
    })
}
