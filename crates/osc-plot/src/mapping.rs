//! Coordinate mapping from engine units to canvas pixels.

use crate::config::PlotConfig;
use osc_core::Real;
use osc_sim::WavePoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: Real,
    pub y: Real,
}

/// Maps `(time, displacement)` samples onto the wave plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub origin_offset: Real,
    pub vertical_scale: Real,
    pub time_scale: Real,
    pub centerline: Real,
    pub width: Real,
}

impl CoordinateMapper {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            origin_offset: config.origin_offset,
            vertical_scale: config.vertical_scale,
            time_scale: config.time_scale,
            centerline: config.centerline(),
            width: config.width,
        }
    }

    /// `x = origin + t·time_scale`, `y = centerline − d·vertical_scale`.
    pub fn to_plot_space(&self, point: WavePoint) -> PlotPoint {
        PlotPoint {
            x: self.origin_offset + point.time * self.time_scale,
            y: self.centerline - point.displacement * self.vertical_scale,
        }
    }

    /// Inside the drawable band `[origin, width)`.
    pub fn is_visible(&self, p: PlotPoint) -> bool {
        p.x >= self.origin_offset && p.x < self.width
    }

    /// Virtual time at which samples leave the right edge.
    pub fn visible_duration(&self) -> Real {
        ((self.width - self.origin_offset) / self.time_scale).max(0.0)
    }
}

/// Pixel Y of the oscillating object.
///
/// Object space shares units with the canvas, so this is a plain offset with
/// no scaling. When the engine equilibrium is configured as the canvas
/// equilibrium, `Frame::position` is already this value.
#[inline]
pub fn to_object_space(displacement: Real, canvas_equilibrium_y: Real) -> Real {
    canvas_equilibrium_y + displacement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_space_formula() {
        let mapper = CoordinateMapper::new(&PlotConfig::with_size(600.0, 200.0));
        let p = mapper.to_plot_space(WavePoint::new(2.0, 10.0));
        assert_eq!(p.x, 50.0 + 40.0);
        assert_eq!(p.y, 100.0 - 5.0);

        let origin = mapper.to_plot_space(WavePoint::new(0.0, 0.0));
        assert_eq!(origin, PlotPoint { x: 50.0, y: 100.0 });
    }

    #[test]
    fn visibility_band() {
        let mapper = CoordinateMapper::new(&PlotConfig::with_size(600.0, 200.0));
        assert!(mapper.is_visible(PlotPoint { x: 50.0, y: 0.0 }));
        assert!(mapper.is_visible(PlotPoint { x: 599.9, y: 0.0 }));
        assert!(!mapper.is_visible(PlotPoint { x: 600.0, y: 0.0 }));
        assert!(!mapper.is_visible(PlotPoint { x: 49.0, y: 0.0 }));
        assert_eq!(mapper.visible_duration(), 27.5);
    }

    #[test]
    fn object_space_is_passthrough() {
        assert_eq!(to_object_space(-12.5, 240.0), 227.5);
        assert_eq!(to_object_space(0.0, 240.0), 240.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use osc_core::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn mapper(width: Real, height: Real, time_scale: Real, vertical_scale: Real) -> CoordinateMapper {
        CoordinateMapper::new(&PlotConfig {
            time_scale,
            vertical_scale,
            ..PlotConfig::with_size(width, height)
        })
    }

    proptest! {
        #[test]
        fn plot_space_inverts_to_sample(
            t in 0.0_f64..1000.0,
            d in -500.0_f64..500.0,
            time_scale in 0.5_f64..100.0,
            vertical_scale in 0.05_f64..5.0,
        ) {
            let m = mapper(800.0, 300.0, time_scale, vertical_scale);
            let p = m.to_plot_space(WavePoint::new(t, d));
            let tol = Tolerances::default();
            prop_assert!(nearly_equal((p.x - m.origin_offset) / time_scale, t, tol));
            prop_assert!(nearly_equal((m.centerline - p.y) / vertical_scale, d, tol));
        }

        #[test]
        fn later_and_higher_samples_map_right_and_up(
            t in 0.0_f64..1000.0,
            dt in 0.0_f64..10.0,
            d in -500.0_f64..500.0,
            dd in 0.0_f64..10.0,
        ) {
            let m = mapper(800.0, 300.0, 20.0, 0.5);
            let a = m.to_plot_space(WavePoint::new(t, d));
            let b = m.to_plot_space(WavePoint::new(t + dt, d + dd));
            prop_assert!(b.x >= a.x);
            // Canvas Y grows downward.
            prop_assert!(b.y <= a.y);
        }

        #[test]
        fn visible_exactly_inside_duration(
            t in 0.0_f64..200.0,
            width in 100.0_f64..2000.0,
            time_scale in 1.0_f64..50.0,
        ) {
            let m = mapper(width, 300.0, time_scale, 0.5);
            let limit = m.visible_duration();
            prop_assume!((t - limit).abs() > 1e-6);
            let p = m.to_plot_space(WavePoint::new(t, 0.0));
            prop_assert_eq!(m.is_visible(p), t < limit);
        }
    }
}
