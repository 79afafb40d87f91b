//! Polylines for the wave plot.

use crate::mapping::{CoordinateMapper, PlotPoint};
use crate::palette::Rgba;
use osc_sim::WavePoint;

pub const LIVE_STROKE: f32 = 2.5;
pub const OVERLAY_STROKE: f32 = 1.8;

/// One stroked polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub color: Rgba,
    pub stroke_weight: f32,
    pub vertices: Vec<PlotPoint>,
}

impl Trace {
    /// Map samples into plot space, dropping vertices outside the drawable band.
    pub fn from_samples(
        samples: &[WavePoint],
        mapper: &CoordinateMapper,
        color: Rgba,
        stroke_weight: f32,
    ) -> Self {
        let vertices = samples
            .iter()
            .map(|p| mapper.to_plot_space(*p))
            .filter(|p| mapper.is_visible(*p))
            .collect();
        Self {
            color,
            stroke_weight,
            vertices,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.vertices.len() > 1
    }
}
