//! Experiment variants and their parameter sets.

use crate::error::{OscError, OscResult};
use crate::numeric::Real;
use std::fmt;
use std::str::FromStr;

/// The physical setup being demonstrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Variant {
    /// Partially submerged cylinder bobbing in a liquid.
    #[default]
    Cylinder,
    /// Two stacked cubic blocks on a float.
    CubicBlock,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Cylinder, Variant::CubicBlock];

    pub fn default_parameters(self) -> Parameters {
        match self {
            Variant::Cylinder => Parameters::Cylinder {
                density_ratio: 0.5,
                length: 100.0,
            },
            Variant::CubicBlock => Parameters::CubicBlock { size: 50.0 },
        }
    }

    /// Parameter names accepted by this variant.
    pub fn parameter_names(self) -> &'static [ParamName] {
        match self {
            Variant::Cylinder => &[ParamName::DensityRatio, ParamName::Length],
            Variant::CubicBlock => &[ParamName::Size],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Cylinder => "cylinder",
            Variant::CubicBlock => "cubic_block",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cylinder" => Ok(Variant::Cylinder),
            "cubic_block" | "cubic-block" | "cube" | "cubes" => Ok(Variant::CubicBlock),
            other => Err(format!("unknown variant '{other}'")),
        }
    }
}

/// Name of a single tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamName {
    /// Cylinder density over liquid density, in `[0, 1)`.
    DensityRatio,
    /// Cylinder length, `> 0`.
    Length,
    /// Edge of the smaller cube, `> 0`.
    Size,
}

impl ParamName {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamName::DensityRatio => "density_ratio",
            ParamName::Length => "length",
            ParamName::Size => "size",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "density_ratio" | "densityRatio" | "density-ratio" => Ok(ParamName::DensityRatio),
            "length" | "cylinder_length" => Ok(ParamName::Length),
            "size" | "cube_size" => Ok(ParamName::Size),
            other => Err(format!("unknown parameter '{other}'")),
        }
    }
}

/// Variant-specific parameter set.
///
/// Values are plain copies, so a snapshot taken into run history never
/// observes later edits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "variant", rename_all = "snake_case"))]
pub enum Parameters {
    Cylinder { density_ratio: Real, length: Real },
    CubicBlock { size: Real },
}

impl Parameters {
    /// Build a validated cylinder parameter set.
    pub fn cylinder(density_ratio: Real, length: Real) -> OscResult<Self> {
        let params = Parameters::Cylinder {
            density_ratio,
            length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build a validated cubic-block parameter set.
    pub fn cubic_block(size: Real) -> OscResult<Self> {
        let params = Parameters::CubicBlock { size };
        params.validate()?;
        Ok(params)
    }

    pub fn variant(&self) -> Variant {
        match self {
            Parameters::Cylinder { .. } => Variant::Cylinder,
            Parameters::CubicBlock { .. } => Variant::CubicBlock,
        }
    }

    /// Characteristic extent: cylinder length or cube size.
    pub fn extent(&self) -> Real {
        match *self {
            Parameters::Cylinder { length, .. } => length,
            Parameters::CubicBlock { size } => size,
        }
    }

    pub fn get(&self, name: ParamName) -> Option<Real> {
        match (*self, name) {
            (Parameters::Cylinder { density_ratio, .. }, ParamName::DensityRatio) => {
                Some(density_ratio)
            }
            (Parameters::Cylinder { length, .. }, ParamName::Length) => Some(length),
            (Parameters::CubicBlock { size }, ParamName::Size) => Some(size),
            _ => None,
        }
    }

    /// Return a copy with one parameter replaced, validating the new value.
    pub fn with(&self, name: ParamName, value: Real) -> OscResult<Self> {
        let updated = match (*self, name) {
            (Parameters::Cylinder { length, .. }, ParamName::DensityRatio) => {
                Parameters::Cylinder {
                    density_ratio: value,
                    length,
                }
            }
            (Parameters::Cylinder { density_ratio, .. }, ParamName::Length) => {
                Parameters::Cylinder {
                    density_ratio,
                    length: value,
                }
            }
            (Parameters::CubicBlock { .. }, ParamName::Size) => {
                Parameters::CubicBlock { size: value }
            }
            _ => {
                return Err(OscError::InvalidParameter {
                    name: name.as_str(),
                    what: "not a parameter of the active variant",
                    value,
                });
            }
        };
        updated.validate()?;
        Ok(updated)
    }

    pub fn validate(&self) -> OscResult<()> {
        match *self {
            Parameters::Cylinder {
                density_ratio,
                length,
            } => {
                check_density_ratio(density_ratio)?;
                check_extent(ParamName::Length, length)
            }
            Parameters::CubicBlock { size } => check_extent(ParamName::Size, size),
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameters::Cylinder {
                density_ratio,
                length,
            } => write!(f, "density_ratio={density_ratio}, length={length}"),
            Parameters::CubicBlock { size } => write!(f, "size={size}"),
        }
    }
}

fn check_density_ratio(value: Real) -> OscResult<()> {
    // As the ratio approaches 1 the period diverges.
    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(OscError::InvalidParameter {
            name: ParamName::DensityRatio.as_str(),
            what: "must be finite and in [0, 1)",
            value,
        });
    }
    Ok(())
}

fn check_extent(name: ParamName, value: Real) -> OscResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OscError::InvalidParameter {
            name: name.as_str(),
            what: "must be finite and positive",
            value,
        });
    }
    Ok(())
}
