//! Core data model for the nearwell workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every other crate: how a sampled variable is
//! described ([`VariableSpec`], [`DistributionKind`]), what a concrete
//! parameter assignment looks like ([`EnsembleMember`], [`Ensemble`]),
//! and how a run specification is loaded from TOML ([`RunSpecs`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ensemble;
pub mod error;
pub mod runspecs;
pub mod value;
pub mod variable;

pub use ensemble::{Ensemble, EnsembleMember};
pub use error::SpecError;
pub use runspecs::RunSpecs;
pub use value::ParamValue;
pub use variable::{DistributionKind, VariableSpec};
