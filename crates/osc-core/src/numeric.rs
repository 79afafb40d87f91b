use crate::OscError;

/// Floating point type used throughout the lab.
pub type Real = f64;

/// Gravitational acceleration used by both oscillator models.
pub const G: Real = 9.8;

/// Number of colors in the run palette.
pub const PALETTE_SIZE: usize = 5;

/// Closeness bounds for comparing virtual times and positions.
///
/// Two values match when they differ by at most `abs`, or by at most `rel`
/// times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Fixed-width band with no relative component.
    pub const fn absolute(abs: Real) -> Self {
        Self { abs, rel: 0.0 }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `true` when `a` and `b` are within `tol` of each other. NaN never matches.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let gap = (a - b).abs();
    gap <= tol.abs || gap <= tol.rel * a.abs().max(b.abs())
}

/// Pass `value` through, or report which quantity went non-finite.
pub fn ensure_finite(value: Real, what: &'static str) -> Result<Real, OscError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OscError::NonFinite { what, value })
    }
}
