//! Error types for ensemble runs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors detected by [`RunConfig::validate`](crate::RunConfig::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// No executable configured.
    #[error("executable path is empty")]
    MissingExecutable,
    /// `npruns` is zero.
    #[error("npruns must be at least 1")]
    ZeroBatchSize,
    /// A decimation stride is zero.
    #[error("decimation {which} must be at least 1")]
    ZeroStride {
        /// Which stride (`"step_increment"` or `"cell_stride"`).
        which: &'static str,
    },
    /// Timeout is NaN, infinite, zero, or negative.
    #[error("timeout must be finite and positive, got {value}")]
    InvalidTimeout {
        /// The invalid value in seconds.
        value: f64,
    },
    /// Poll interval is zero.
    #[error("poll_interval_ms must be at least 1")]
    ZeroPollInterval,
    /// `num_report_steps` is zero.
    #[error("num_report_steps must be at least 1 when set")]
    ZeroReportSteps,
}

/// Fatal errors from [`run_ensemble`](crate::run_ensemble).
///
/// Per-member failures are not errors; they are recorded in
/// [`EnsembleResults::disregarded`](crate::EnsembleResults::disregarded).
#[derive(Debug, Error)]
pub enum RunError {
    /// The run configuration is invalid.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// The simulator process could not be started.
    #[error("failed to launch member {member}: {source}")]
    Spawn {
        /// Member index.
        member: usize,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A member's working directory could not be prepared.
    #[error("failed to prepare {path}: {source}")]
    Prepare {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Per-member arrays of a keyword have different shapes.
    #[error("keyword '{keyword}': member arrays have inconsistent shapes")]
    InconsistentShapes {
        /// The keyword being stacked.
        keyword: String,
    },
    /// The keyword was not collected.
    #[error("keyword '{keyword}' was not collected")]
    UnknownKeyword {
        /// The missing keyword.
        keyword: String,
    },
}
