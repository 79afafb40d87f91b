//! Error types for engine configuration.

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating an `EngineConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
