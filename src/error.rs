//! Error taxonomy for the query interpreter.
//!
//! `SetupError` is fatal and ends the whole run; `LineError` is scoped to
//! a single script line and never stops the lines after it.

use thiserror::Error;

/// Fatal startup failure: dataset or script unavailable or malformed.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("File not found.")]
    FileNotFound,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing a '{0}' column")]
    MissingColumn(&'static str),

    #[error("dataset column '{column}' has non-numeric value '{value}'")]
    BadCell { column: String, value: String },
}

/// Error scoped to one script line. The interpreter reports it and moves
/// on with the working set unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    /// Operation name not in the registry.
    #[error("Invalid operation '{0}'")]
    UnknownOperation(String),

    /// Threshold text that does not parse as a decimal number.
    #[error("invalid numeric threshold '{0}'")]
    Threshold(String),

    /// Recognized operation given the wrong argument shape.
    #[error("'{op}' expects {expected}")]
    Argument { op: String, expected: &'static str },
}
