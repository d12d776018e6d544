//! Ensemble parameter sampling.
//!
//! [`create_ensemble`] turns [`RunSpecs`](nearwell_core::RunSpecs) into an
//! [`Ensemble`](nearwell_core::Ensemble). Every variable draws `npoints`
//! samples from its [`DistributionKind`](nearwell_core::DistributionKind).
//! Ordinary variables are meshed (Cartesian product); variables listed in
//! [`SamplingConfig::efficient_sampling`] are instead drawn per member with
//! [`memory_efficient_sample`], so high-dimensional inputs such as
//! per-layer permeabilities never materialise an `O(∏ npoints)` grid.
//!
//! All randomness comes from one seeded [`ChaCha8Rng`](rand_chacha::ChaCha8Rng)
//! local to the call; identical seeds reproduce identical ensembles.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod distribution;
pub mod efficient;
pub mod ensemble;
pub mod error;

pub use config::SamplingConfig;
pub use distribution::sample_variable;
pub use efficient::{memory_efficient_sample, memory_efficient_sample_seeded};
pub use ensemble::{create_ensemble, parameter_space_size};
pub use error::SampleError;
