//! Error types for the nereus-spectrum crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the nereus-spectrum crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    /// Returned when a grid axis has no values.
    #[error("{0} axis is empty")]
    EmptyAxis(&'static str),

    /// Returned when a grid axis contains NaN or infinite values.
    #[error("{0} axis contains non-finite values")]
    NonFiniteAxis(&'static str),

    /// Returned when frequencies are negative or not strictly increasing.
    #[error("frequencies must be non-negative and strictly increasing")]
    FrequenciesNotIncreasing,

    /// Returned when the number of spectral values does not match the grid.
    #[error("spectrum has {got} values, grid needs {expected}")]
    ShapeMismatch {
        /// Number of values required by the grid.
        expected: usize,
        /// Number of values provided.
        got: usize,
    },

    /// Returned when a spectral value is NaN or infinite.
    #[error("spectral value at index {index} is not finite")]
    NonFiniteValue {
        /// Row-major index of the offending value.
        index: usize,
    },

    /// Returned when a unit or convention name is not recognised.
    #[error("unknown unit or convention: {0}")]
    UnknownUnit(String),

    /// Returned when a smoothing weight is negative or non-finite.
    #[error("invalid smoothing weight: {0}")]
    InvalidKernel(f64),

    /// Returned when a spectrum file cannot be read or written.
    #[error("I/O error on {}: {reason}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a spectrum file is malformed.
    #[error("malformed spectrum file {} at line {line}: {reason}", path.display())]
    Format {
        /// Path of the file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}
