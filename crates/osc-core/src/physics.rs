//! Closed-form oscillator models.
//!
//! Both setups are treated as undamped simple harmonic motion released from
//! the top of their swing, so the position is fully determined by amplitude,
//! period and elapsed virtual time.
//!
//! - Cylinder: `A = L/4`, `T = 2π·sqrt(L / (2g(1 − ρ)))`
//! - Cubic block: `A = s/4`, `T = 2π·sqrt(s / g)`

use crate::error::{OscError, OscResult};
use crate::numeric::{G, Real};
use crate::variant::{ParamName, Parameters};
use std::f64::consts::PI;

/// Fraction of the characteristic extent used as swing amplitude.
pub const AMPLITUDE_FRACTION: Real = 0.25;

/// Amplitude for a parameter set.
pub fn amplitude(params: &Parameters) -> OscResult<Real> {
    params.validate()?;
    Ok(AMPLITUDE_FRACTION * params.extent())
}

/// Period for a parameter set.
///
/// Inputs that pass validation can still overflow the quotient (a huge
/// length over a ratio just below 1); those are rejected as an invalid
/// extent rather than yielding an infinite period.
pub fn period(params: &Parameters) -> OscResult<Real> {
    params.validate()?;
    let (period, name, extent) = match *params {
        Parameters::Cylinder {
            density_ratio,
            length,
        } => (
            2.0 * PI * (length / (2.0 * G * (1.0 - density_ratio))).sqrt(),
            ParamName::Length,
            length,
        ),
        Parameters::CubicBlock { size } => (2.0 * PI * (size / G).sqrt(), ParamName::Size, size),
    };
    if !period.is_finite() {
        return Err(OscError::InvalidParameter {
            name: name.as_str(),
            what: "too large for the density ratio; period overflows",
            value: extent,
        });
    }
    Ok(period)
}

/// Position at `time`, starting from `equilibrium − amplitude` at `time = 0`.
#[inline]
pub fn position(equilibrium: Real, amplitude: Real, period: Real, time: Real) -> Real {
    equilibrium - amplitude * (2.0 * PI * time / period).cos()
}

/// Derived motion for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oscillation {
    pub amplitude: Real,
    pub period: Real,
}

impl Oscillation {
    pub fn for_parameters(params: &Parameters) -> OscResult<Self> {
        Ok(Self {
            amplitude: amplitude(params)?,
            period: period(params)?,
        })
    }

    pub fn position(&self, equilibrium: Real, time: Real) -> Real {
        position(equilibrium, self.amplitude, self.period, time)
    }

    /// Position relative to equilibrium.
    pub fn displacement(&self, time: Real) -> Real {
        self.position(0.0, time)
    }

    pub fn angular_frequency(&self) -> Real {
        2.0 * PI / self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        }
    }

    #[test]
    fn cylinder_reference_values() {
        let params = Parameters::cylinder(0.5, 100.0).unwrap();
        let osc = Oscillation::for_parameters(&params).unwrap();
        assert_eq!(osc.amplitude, 25.0);
        let expected = 2.0 * PI * (100.0_f64 / (2.0 * 9.8 * 0.5)).sqrt();
        assert!(nearly_equal(osc.period, expected, tol()));
        assert!((osc.period - 8.977).abs() < 1e-3);
    }

    #[test]
    fn cubic_block_reference_values() {
        let params = Parameters::cubic_block(50.0).unwrap();
        let osc = Oscillation::for_parameters(&params).unwrap();
        assert_eq!(osc.amplitude, 12.5);
        let expected = 2.0 * PI * (50.0_f64 / 9.8).sqrt();
        assert!(nearly_equal(osc.period, expected, tol()));
    }

    #[test]
    fn position_follows_cosine() {
        let eq = 200.0;
        // Start at the top of the swing
        assert!(nearly_equal(position(eq, 10.0, 4.0, 0.0), 190.0, tol()));
        // Quarter period: back through equilibrium
        assert!(nearly_equal(position(eq, 10.0, 4.0, 1.0), 200.0, tol()));
        // Half period: bottom of the swing
        assert!(nearly_equal(position(eq, 10.0, 4.0, 2.0), 210.0, tol()));
        // Full period: back to start
        assert!(nearly_equal(position(eq, 10.0, 4.0, 4.0), 190.0, tol()));
    }

    #[test]
    fn invalid_parameters_rejected() {
        let bad = Parameters::Cylinder {
            density_ratio: 1.0,
            length: 100.0,
        };
        assert!(amplitude(&bad).unwrap_err().is_invalid_parameter());
        assert!(period(&bad).unwrap_err().is_invalid_parameter());

        let bad = Parameters::CubicBlock { size: 0.0 };
        assert!(Oscillation::for_parameters(&bad).is_err());
    }

    #[test]
    fn overflowing_period_is_an_invalid_length() {
        let params = Parameters::cylinder(0.999_999_999_999, 1e308).unwrap();
        let err = period(&params).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(matches!(
            err,
            OscError::InvalidParameter { name: "length", value, .. } if value == 1e308
        ));
        assert!(Oscillation::for_parameters(&params).is_err());
    }

    #[test]
    fn displacement_is_relative() {
        let osc = Oscillation {
            amplitude: 5.0,
            period: 2.0,
        };
        assert!(nearly_equal(
            osc.position(100.0, 0.3) - 100.0,
            osc.displacement(0.3),
            tol()
        ));
        assert!(nearly_equal(osc.angular_frequency(), PI, tol()));
    }
}
