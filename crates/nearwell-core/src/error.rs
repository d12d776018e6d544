//! Errors raised while validating variable and run specifications.

use thiserror::Error;

/// Errors from [`VariableSpec::validate`](crate::VariableSpec::validate)
/// and [`RunSpecs`](crate::RunSpecs) loading.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpecError {
    /// `min` is greater than `max`.
    #[error("variable '{name}': min {min} exceeds max {max}")]
    InvertedRange {
        /// Variable name.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A bound is NaN or infinite.
    #[error("variable '{name}': bounds must be finite, got [{min}, {max}]")]
    NonFiniteBound {
        /// Variable name.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// `npoints` is zero.
    #[error("variable '{name}': npoints must be at least 1")]
    ZeroPoints {
        /// Variable name.
        name: String,
    },
    /// Log-uniform sampling needs a strictly positive lower bound.
    #[error("variable '{name}': log-uniform sampling requires min > 0, got {min}")]
    NonPositiveLogBound {
        /// Variable name.
        name: String,
        /// Lower bound.
        min: f64,
    },
    /// No integer lies inside `[min, max]`.
    #[error("variable '{name}': no integer in [{min}, {max}]")]
    EmptyIntegerRange {
        /// Variable name.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Two variables share a name.
    #[error("variable '{name}' is declared more than once")]
    DuplicateVariable {
        /// The repeated name.
        name: String,
    },
    /// The TOML document could not be parsed.
    #[error("run specs: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
}
