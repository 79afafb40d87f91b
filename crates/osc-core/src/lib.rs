//! osc-core: shared foundation for the oscillation lab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - variant (experiment variants and their parameter sets)
//! - state (run lifecycle states)
//! - physics (closed-form amplitude / period / position)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod physics;
pub mod state;
pub mod variant;

pub use error::{OscError, OscResult};
pub use numeric::*;
pub use physics::Oscillation;
pub use state::RunState;
pub use variant::{ParamName, Parameters, Variant};
