//! Engine configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use osc_core::Real;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on `history_capacity`.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Upper bound on `step_size / sample_interval`, keeping sample indices
/// far from the integer range.
pub const MAX_STEPS_PER_SAMPLE: Real = 1e6;

/// Tunable engine constants. Every field has a default, so an empty YAML
/// document yields the stock lab behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Virtual time per tick before the speed factor is applied.
    pub base_step: Real,
    /// Multiplier decoupling virtual time from frame rate.
    pub speed_factor: Real,
    /// Virtual time between recorded samples.
    pub sample_interval: Real,
    /// Maximum number of finalized runs kept.
    pub history_capacity: usize,
    /// Resting position, in object-space units.
    pub equilibrium: Real,
    /// Optional cap on samples recorded per run. `None` means unbounded.
    pub max_samples_per_run: Option<usize>,
    /// Optional wall-clock timeout after which a running run is finalized.
    pub auto_finalize_after_s: Option<Real>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_step: 0.02,
            speed_factor: 5.0,
            sample_interval: 0.1,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            equilibrium: 0.0,
            max_samples_per_run: None,
            auto_finalize_after_s: None,
        }
    }
}

impl EngineConfig {
    /// Virtual time added per tick.
    pub fn step_size(&self) -> Real {
        self.base_step * self.speed_factor
    }

    pub fn auto_finalize_after(&self) -> Option<Duration> {
        // `validate` rejects values that cannot be represented.
        self.auto_finalize_after_s
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("base_step", self.base_step)?;
        positive("speed_factor", self.speed_factor)?;
        positive("sample_interval", self.sample_interval)?;
        let step = self.step_size();
        positive("step_size", step)?;
        if step / self.sample_interval > MAX_STEPS_PER_SAMPLE {
            return Err(ConfigError::InvalidValue {
                field: "sample_interval",
                value: self.sample_interval.to_string(),
                reason: "too small for the configured step size",
            });
        }
        if !self.equilibrium.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "equilibrium",
                value: self.equilibrium.to_string(),
                reason: "must be finite",
            });
        }
        if !(1..=MAX_HISTORY_CAPACITY).contains(&self.history_capacity) {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                value: self.history_capacity.to_string(),
                reason: "must be between 1 and 10000",
            });
        }
        if self.max_samples_per_run == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_samples_per_run",
                value: "0".to_string(),
                reason: "must be at least 1 when set",
            });
        }
        if let Some(timeout) = self.auto_finalize_after_s {
            positive("auto_finalize_after_s", timeout)?;
            if Duration::try_from_secs_f64(timeout).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "auto_finalize_after_s",
                    value: timeout.to_string(),
                    reason: "out of range for a duration",
                });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: Real) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must be finite and positive",
        })
    }
}
