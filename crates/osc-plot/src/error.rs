use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}
