//! Plot canvas configuration.

use crate::error::{PlotError, PlotResult};
use osc_core::Real;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// X of the time axis origin, in pixels.
    pub origin_offset: Real,
    /// Pixels per unit of displacement.
    pub vertical_scale: Real,
    /// Pixels per unit of virtual time.
    pub time_scale: Real,
    /// Canvas width in pixels.
    pub width: Real,
    /// Canvas height in pixels.
    pub height: Real,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            origin_offset: 50.0,
            vertical_scale: 0.5,
            time_scale: 20.0,
            width: 800.0,
            height: 300.0,
        }
    }
}

impl PlotConfig {
    pub fn with_size(width: Real, height: Real) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Y of the zero-displacement axis.
    pub fn centerline(&self) -> Real {
        self.height / 2.0
    }

    pub fn validate(&self) -> PlotResult<()> {
        for (field, value) in [
            ("vertical_scale", self.vertical_scale),
            ("time_scale", self.time_scale),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidValue {
                    field,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }
        if !self.origin_offset.is_finite() || self.origin_offset < 0.0 {
            return Err(PlotError::InvalidValue {
                field: "origin_offset",
                value: self.origin_offset,
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}
