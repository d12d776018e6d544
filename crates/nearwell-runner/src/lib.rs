//! Simulation result collector.
//!
//! [`run_ensemble`] launches the external simulator for every ensemble
//! member in fixed-size batches, waits for each batch to finish, and
//! gathers the requested arrays from the members that completed cleanly.
//!
//! # Member lifecycle
//!
//! 1. [`BatchLauncher`] spawns one process per member of the batch and
//!    blocks until all have exited, timed out, or been cancelled.
//! 2. Each member's output is opened through a [`ResultReader`]. A member
//!    is *disregarded* (logged, not fatal) if its process did not succeed,
//!    its output is unreadable, it stopped before the required number of
//!    report steps, or a requested field holds a non-finite value.
//! 3. Surviving members contribute decimated field, init and summary
//!    arrays to [`EnsembleResults`].
//! 4. Working directories of every member except the first are removed
//!    unless [`RunConfig::keep_result_files`] is set.
//!
//! Batches are strictly sequential. Each member owns its own
//! `runfiles_j` / `results_j` directories, so concurrent processes never
//! share a path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod collect;
pub mod config;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod output;

pub use collect::{run_ensemble, DisregardReason, EnsembleResults};
pub use config::{Decimation, Keywords, RunConfig};
pub use error::{ConfigError, RunError};
pub use launcher::{BatchLauncher, CancelToken, ExitOutcome};
pub use layout::MemberPaths;
pub use output::{OutputError, ResultReader, SimulationOutput};
