//! Error type shared by the engine and the I/O adapters.
//!
//! Numeric primitives that may legitimately have no answer return `Option`;
//! `BasisError` is reserved for conditions that abort a run.

use thiserror::Error;

/// Fatal errors raised while loading input or running the analysis.
#[derive(Debug, Error)]
pub enum BasisError {
    /// A tolerance factor or degrees-of-freedom computation needs n >= 2.
    #[error("invalid sample size: need at least 2 observations, got {n}")]
    InvalidSampleSize { n: usize },

    /// The input file could not be read or the report could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is not present in the header row.
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// A cell could not be interpreted.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Observations must be finite.
    #[error("non-finite observation: {value}")]
    NonFiniteValue { value: f64 },

    /// A numeric primitive failed to produce a required value.
    #[error("numerical failure: {0}")]
    Numerical(&'static str),

    /// The configuration file is malformed.
    #[error("configuration error: {0}")]
    Config(String),
}
