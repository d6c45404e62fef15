//! Errors returned by the complexity estimator, the oracle and the
//! query selectors.
//!
//! The first three variants are contract violations by the caller
//! (bad data, too many queries, a model lacking a capability); they are
//! never retried. The remaining ones wrap errors of the crates we build on.
use thiserror::Error;

/// Crate error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or insufficient data: too few samples, mismatched
    /// dimensions, degenerate label sets, out-of-range parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query was requested after every index had been revealed.
    #[error("oracle exhausted: all {revealed} indices already revealed")]
    ExhaustedOracle {
        /// Number of indices the oracle held (and revealed).
        revealed: usize,
    },

    /// The model exposes none of the capabilities an operation needs.
    #[error("model `{model}` does not support {capability}")]
    UnsupportedModel {
        /// Name of the offending model.
        model: String,
        /// The missing capability.
        capability: &'static str,
    },

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside a rusty-machine learner.
    #[error("learning error: {0}")]
    Learning(#[from] rusty_machine::learning::error::Error),
}

impl Error {
    /// Shorthand for `Error::InvalidInput`.
    pub fn invalid<S: Into<String>>(msg: S) -> Error {
        Error::InvalidInput(msg.into())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
