//! Run configuration and validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

// ── Decimation ─────────────────────────────────────────────────────

/// Time and space decimation applied to collected arrays.
///
/// Report steps `step_offset, step_offset + step_increment, ...` are kept;
/// cells are kept every `cell_stride`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Decimation {
    /// Keep every n-th report step. Default: 1.
    pub step_increment: usize,
    /// First report step kept. Default: 0.
    pub step_offset: usize,
    /// Keep every n-th cell. Default: 1.
    pub cell_stride: usize,
}

impl Default for Decimation {
    fn default() -> Self {
        Self {
            step_increment: 1,
            step_offset: 0,
            cell_stride: 1,
        }
    }
}

// ── Keywords ───────────────────────────────────────────────────────

/// Arrays to collect from each member, by simulator keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Keywords {
    /// Restart-file fields, shape `(report_steps, cells)`.
    pub field: Vec<String>,
    /// Init-file arrays, shape `(cells,)`.
    pub init: Vec<String>,
    /// Summary vectors, shape `(report_steps,)`.
    pub summary: Vec<String>,
}

impl Keywords {
    /// Field keywords only.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// All keywords in collection order: fields, init, summary.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.field
            .iter()
            .chain(&self.init)
            .chain(&self.summary)
            .map(String::as_str)
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Configuration for [`run_ensemble`](crate::run_ensemble).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulator executable. Default: `flow`.
    pub executable: PathBuf,
    /// Extra flags appended to every invocation, whitespace separated.
    pub flags: String,
    /// Base name of each member's deck (`<deck_name>_<j>.DATA`). Default: `RUN`.
    pub deck_name: String,
    /// Processes launched per batch. Default: 1.
    pub npruns: usize,
    /// Report steps a member must reach to be kept. `None` accepts any.
    pub num_report_steps: Option<usize>,
    /// Keep the working directories of every member. Default: false.
    pub keep_result_files: bool,
    /// Per-process wall-clock limit in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<f64>,
    /// Interval between process status polls. Default: 50 ms.
    pub poll_interval_ms: u64,
    /// Decimation applied to collected arrays.
    pub decimation: Decimation,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("flow"),
            flags: String::new(),
            deck_name: "RUN".to_string(),
            npruns: 1,
            num_report_steps: None,
            keep_result_files: false,
            timeout_secs: None,
            poll_interval_ms: 50,
            decimation: Decimation::default(),
        }
    }
}

impl RunConfig {
    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executable.as_os_str().is_empty() {
            return Err(ConfigError::MissingExecutable);
        }
        if self.npruns == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.decimation.step_increment == 0 {
            return Err(ConfigError::ZeroStride {
                which: "step_increment",
            });
        }
        if self.decimation.cell_stride == 0 {
            return Err(ConfigError::ZeroStride {
                which: "cell_stride",
            });
        }
        if let Some(secs) = self.timeout_secs {
            if !secs.is_finite() || secs <= 0.0 || Duration::try_from_secs_f64(secs).is_err() {
                return Err(ConfigError::InvalidTimeout { value: secs });
            }
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.num_report_steps == Some(0) {
            return Err(ConfigError::ZeroReportSteps);
        }
        Ok(())
    }

    /// Per-process timeout. Only meaningful after [`validate`](Self::validate).
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Flags split on whitespace.
    pub fn flag_args(&self) -> impl Iterator<Item = &str> {
        self.flags.split_whitespace()
    }
}
