//! Read-only view handed to the renderer once per frame.

use crate::history::{Run, RunHistory};
use crate::recorder::WavePoint;
use osc_core::{Oscillation, Parameters, Real, RunState, Variant};

/// Everything a renderer may read. Borrowing the engine immutably makes
/// mutation from the draw path impossible.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: RunState,
    pub variant: Variant,
    pub parameters: Parameters,
    pub oscillation: Oscillation,
    pub virtual_time: Real,
    pub position: Real,
    pub displacement: Real,
    pub equilibrium: Real,
    pub samples: &'a [WavePoint],
    pub(crate) history: &'a RunHistory,
}

impl<'a> Frame<'a> {
    /// Archived runs of the active variant, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &'a Run> + Clone + use<'a> {
        let history: &'a RunHistory = self.history;
        history.filtered_by(self.variant)
    }

    /// Archived runs of the active variant with their slot in the full
    /// history, oldest first.
    pub fn history_slots(&self) -> impl Iterator<Item = (usize, &'a Run)> + Clone + use<'a> {
        let variant = self.variant;
        let history: &'a RunHistory = self.history;
        history
            .iter()
            .enumerate()
            .filter(move |(_, run)| run.variant() == variant)
    }

    pub fn run_in_progress(&self) -> bool {
        self.state.is_active()
    }
}
