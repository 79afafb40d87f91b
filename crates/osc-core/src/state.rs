//! Run lifecycle states.

use std::fmt;

/// Lifecycle of a single run.
///
/// `Idle` is both the initial state and the state every run returns to after
/// it is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RunState {
    /// A run is in progress (started and not yet finalized).
    pub fn is_active(self) -> bool {
        !matches!(self, RunState::Idle)
    }

    /// Parameters may only change while no run is in progress.
    pub fn parameters_locked(self) -> bool {
        self.is_active()
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
        };
        f.write_str(s)
    }
}
