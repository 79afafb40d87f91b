use crate::RunState;
use thiserror::Error;

pub type OscResult<T> = Result<T, OscError>;

/// Errors reported synchronously by the simulation core.
///
/// None of these are fatal: parameter errors reject the input and leave the
/// previous values in place, transition errors leave the state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OscError {
    #[error("Invalid parameter {name}: {what} (value={value})")]
    InvalidParameter {
        name: &'static str,
        what: &'static str,
        value: f64,
    },

    #[error("Illegal state transition: cannot {action} while {state}")]
    IllegalStateTransition {
        action: &'static str,
        state: RunState,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

impl OscError {
    pub fn is_recoverable(&self) -> bool {
        // Every core error is either a rejected input or an ignored transition.
        true
    }

    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, OscError::IllegalStateTransition { .. })
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, OscError::InvalidParameter { .. })
    }
}
