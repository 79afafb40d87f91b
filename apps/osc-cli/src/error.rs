//! Error type for the CLI.

use std::path::PathBuf;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] osc_sim::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] osc_sim::OscError),

    #[error("Plot error: {0}")]
    Plot(#[from] osc_plot::PlotError),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}
