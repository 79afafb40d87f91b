//! Simulation state engine for the oscillation lab.
//!
//! Provides:
//! - `SimulationEngine`: run lifecycle state machine and virtual clock
//! - `WaveRecorder`: append-only sample log for the run in progress
//! - `RunHistory`: bounded FIFO of finalized runs with palette assignment
//! - `SampleClock`: drift-free fixed-interval sampling
//! - `AutoFinalize`: optional wall-clock timeout policy for the control surface
//! - `EngineConfig`: tunable constants (YAML via serde)

pub mod auto_finalize;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod history;
pub mod recorder;
pub mod sampled;

pub use auto_finalize::AutoFinalize;
pub use config::EngineConfig;
pub use engine::{FinalizeOutcome, SimulationEngine, TickOutcome};
pub use error::{ConfigError, ConfigResult};
pub use frame::Frame;
pub use history::{DEFAULT_HISTORY_CAPACITY, PendingRun, Run, RunHistory};
pub use recorder::{WavePoint, WaveRecorder};
pub use sampled::SampleClock;

pub use osc_core::{OscError, OscResult, Oscillation, ParamName, Parameters, RunState, Variant};
