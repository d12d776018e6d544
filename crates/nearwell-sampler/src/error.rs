//! Error types for ensemble sampling.

use nearwell_core::SpecError;
use thiserror::Error;

/// Errors from [`create_ensemble`](crate::create_ensemble) and
/// [`memory_efficient_sample`](crate::memory_efficient_sample).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SampleError {
    /// A variable spec failed validation.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// `efficient_sampling` names a variable that is not in the run specs.
    #[error("efficient sampling requested for unknown variable '{name}'")]
    UnknownVariable {
        /// The unknown name.
        name: String,
    },
    /// More members were requested than the parameter space holds.
    #[error("requested {requested} members but the parameter space only has {available}")]
    TooManyMembers {
        /// Requested ensemble size.
        requested: usize,
        /// Size of the full Cartesian product.
        available: usize,
    },
    /// Efficient sampling needs an explicit ensemble size.
    #[error("efficient sampling requires an explicit npoints")]
    MissingMemberCount,
    /// The meshed parameter space does not fit in `usize`.
    #[error("the meshed parameter space is too large to enumerate")]
    SpaceTooLarge,
    /// A variable row has no values to draw from.
    #[error("variable row {row} is empty")]
    EmptyVariable {
        /// Row index in the variables array.
        row: usize,
    },
}
