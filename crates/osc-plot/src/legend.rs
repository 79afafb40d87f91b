//! Legend rows for archived runs.

use crate::mapping::PlotPoint;
use crate::palette::{Rgba, palette_color};
use osc_core::Parameters;
use osc_sim::Frame;

const LEGEND_X: f64 = 60.0;
const LEGEND_Y: f64 = 20.0;
const LINE_LENGTH: f64 = 30.0;
const ROW_SPACING: f64 = 20.0;
const LABEL_GAP: f64 = 10.0;
const LABEL_BASELINE: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub color: Rgba,
    pub line_start: PlotPoint,
    pub line_end: PlotPoint,
    pub label_at: PlotPoint,
    pub label: String,
}

/// Label describing the parameters of a run.
pub fn legend_label(parameters: &Parameters) -> String {
    match parameters {
        Parameters::Cylinder {
            density_ratio,
            length,
        } => format!("ρ₁/ρ₂: {density_ratio}, L: {length}"),
        Parameters::CubicBlock { size } => format!("Cube: {size}"),
    }
}

/// One row per archived run of the active variant.
///
/// Rows are placed by the run's slot in the full history, so the rows of a
/// filtered variant keep stable positions.
pub fn legend_rows(frame: &Frame<'_>) -> Vec<LegendRow> {
    frame
        .history_slots()
        .map(|(slot, run)| {
            let y = LEGEND_Y + slot as f64 * ROW_SPACING;
            LegendRow {
                color: palette_color(run.color_index()),
                line_start: PlotPoint { x: LEGEND_X, y },
                line_end: PlotPoint {
                    x: LEGEND_X + LINE_LENGTH,
                    y,
                },
                label_at: PlotPoint {
                    x: LEGEND_X + LINE_LENGTH + LABEL_GAP,
                    y: y + LABEL_BASELINE,
                },
                label: legend_label(run.parameters()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_sim::SimulationEngine;
    use std::time::Duration;

    #[test]
    fn labels() {
        let cyl = Parameters::cylinder(0.5, 100.0).unwrap();
        assert_eq!(legend_label(&cyl), "ρ₁/ρ₂: 0.5, L: 100");
        let cube = Parameters::cubic_block(42.5).unwrap();
        assert_eq!(legend_label(&cube), "Cube: 42.5");
    }

    #[test]
    fn rows_follow_history() {
        let mut engine = SimulationEngine::default();
        for length in [60.0, 80.0] {
            engine
                .set_parameter(osc_core::ParamName::Length, length)
                .unwrap();
            engine.start().unwrap();
            engine.tick(Duration::ZERO);
            engine.finalize();
        }
        let rows = legend_rows(&engine.frame());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line_start, PlotPoint { x: 60.0, y: 20.0 });
        assert_eq!(rows[1].line_end, PlotPoint { x: 90.0, y: 40.0 });
        assert_eq!(rows[1].label_at, PlotPoint { x: 100.0, y: 44.0 });
        assert_eq!(rows[1].color, palette_color(1));
        assert_eq!(rows[1].label, "ρ₁/ρ₂: 0.5, L: 80");
    }
}
