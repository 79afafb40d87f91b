//! Everything the wave canvas paints in one frame.

use crate::config::PlotConfig;
use crate::legend::{LegendRow, legend_rows};
use crate::mapping::CoordinateMapper;
use crate::palette::{LIVE_TRACE, OVERLAY_ALPHA, palette_color};
use crate::trace::{LIVE_STROKE, OVERLAY_STROKE, Trace};
use osc_sim::Frame;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    /// Archived runs of the active variant, oldest first.
    pub overlays: Vec<Trace>,
    /// Trace of the run in progress, once it has two samples.
    pub live: Option<Trace>,
    pub legend: Vec<LegendRow>,
}

impl PlotScene {
    pub fn build(frame: &Frame<'_>, config: &PlotConfig) -> Self {
        let mapper = CoordinateMapper::new(config);

        let overlays = frame
            .history()
            .map(|run| {
                Trace::from_samples(
                    run.points(),
                    &mapper,
                    palette_color(run.color_index()).with_alpha(OVERLAY_ALPHA),
                    OVERLAY_STROKE,
                )
            })
            .collect();

        let live = (frame.run_in_progress() && frame.samples.len() > 1)
            .then(|| Trace::from_samples(frame.samples, &mapper, LIVE_TRACE, LIVE_STROKE));

        Self {
            overlays,
            live,
            legend: legend_rows(frame),
        }
    }
}
