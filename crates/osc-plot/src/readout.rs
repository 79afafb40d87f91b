//! Text readout shown over the object canvas.

use osc_core::{Parameters, RunState};
use osc_sim::Frame;

#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub lines: Vec<String>,
    /// Run status tag, only while a run is in progress.
    pub status: Option<&'static str>,
}

impl Readout {
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        let mut lines = vec![
            format!("Amplitude: {:.1}", frame.oscillation.amplitude),
            format!("Period: {:.2}s", frame.oscillation.period),
        ];
        if let Parameters::Cylinder { density_ratio, .. } = frame.parameters {
            lines.push(format!("Density ratio: {density_ratio}"));
        }
        let status = match frame.state {
            RunState::Idle => None,
            RunState::Running => Some("ACTIVE"),
            RunState::Paused => Some("PAUSED"),
        };
        Self { lines, status }
    }
}
