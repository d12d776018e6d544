//! Ensemble run orchestration and result aggregation.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use ndarray::{s, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis};
use tracing::{info, warn};

use crate::config::{Decimation, Keywords, RunConfig};
use crate::error::RunError;
use crate::launcher::{BatchLauncher, CancelToken, ExitOutcome};
use crate::layout::MemberPaths;
use crate::output::{OutputError, ResultReader};

// ── DisregardReason ────────────────────────────────────────────────

/// Why a member was left out of the aggregated results.
#[derive(Clone, Debug, PartialEq)]
pub enum DisregardReason {
    /// The simulator process did not exit cleanly.
    Process(ExitOutcome),
    /// The output could not be opened or a keyword could not be read.
    Unreadable(String),
    /// The run stopped before the required number of report steps.
    Incomplete {
        /// Report steps written.
        reached: usize,
        /// Report steps required.
        required: usize,
    },
    /// A requested field holds `inf` or `NaN`.
    NonFinite {
        /// The offending keyword.
        keyword: String,
    },
    /// The ensemble was cancelled before the member was launched.
    NotLaunched,
}

impl fmt::Display for DisregardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(outcome) => write!(f, "simulator ended with {outcome:?}"),
            Self::Unreadable(reason) => write!(f, "unreadable output: {reason}"),
            Self::Incomplete { reached, required } => {
                write!(f, "reached {reached} of {required} report steps")
            }
            Self::NonFinite { keyword } => write!(f, "non-finite values in '{keyword}'"),
            Self::NotLaunched => write!(f, "not launched (cancelled)"),
        }
    }
}

impl From<OutputError> for DisregardReason {
    fn from(e: OutputError) -> Self {
        Self::Unreadable(e.to_string())
    }
}

// ── EnsembleResults ────────────────────────────────────────────────

/// Arrays collected from the surviving members of an ensemble run.
#[derive(Clone, Debug, Default)]
pub struct EnsembleResults {
    /// Per-keyword arrays, one entry per kept member, in member order.
    /// Keys appear in [`Keywords::all`] order even when no member survived.
    pub data: IndexMap<String, Vec<ArrayD<f64>>>,
    /// Indices of the kept members.
    pub members: Vec<usize>,
    /// Indices of disregarded members with the reason.
    pub disregarded: Vec<(usize, DisregardReason)>,
    /// Number of members in the ensemble.
    pub total_members: usize,
    /// Per-member array rank of each keyword: 2 for fields, 1 otherwise.
    ranks: IndexMap<String, usize>,
}

impl EnsembleResults {
    fn new(keywords: &Keywords, total_members: usize) -> Self {
        Self {
            data: keywords
                .all()
                .map(|kw| (kw.to_string(), Vec::new()))
                .collect(),
            members: Vec::new(),
            disregarded: Vec::new(),
            total_members,
            ranks: keywords
                .field
                .iter()
                .map(|kw| (kw.clone(), 2))
                .chain(keywords.init.iter().chain(&keywords.summary).map(|kw| (kw.clone(), 1)))
                .collect(),
        }
    }

    /// Indices of the members whose arrays were kept.
    pub fn usable_members(&self) -> &[usize] {
        &self.members
    }

    /// Number of disregarded members.
    pub fn num_disregarded(&self) -> usize {
        self.disregarded.len()
    }

    /// Per-member arrays of `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&[ArrayD<f64>]> {
        self.data.get(keyword).map(Vec::as_slice)
    }

    /// Stack the per-member arrays of `keyword` on a new leading axis.
    ///
    /// A field keyword yields `(members, steps, cells)`, init and summary
    /// keywords yield `(members, n)`. With no kept member the result keeps
    /// that rank and every extent is 0.
    pub fn stacked(&self, keyword: &str) -> Result<ArrayD<f64>, RunError> {
        let arrays = self.get(keyword).ok_or_else(|| RunError::UnknownKeyword {
            keyword: keyword.to_string(),
        })?;
        let views: Vec<ArrayViewD<'_, f64>> = arrays.iter().map(|a| a.view()).collect();
        if views.is_empty() {
            let rank = self.ranks.get(keyword).copied().unwrap_or(0);
            return Ok(ArrayD::zeros(vec![0; rank + 1]));
        }
        ndarray::stack(Axis(0), &views).map_err(|_| RunError::InconsistentShapes {
            keyword: keyword.to_string(),
        })
    }

    fn accept(&mut self, member: usize, arrays: Vec<ArrayD<f64>>) {
        for (slot, array) in self.data.values_mut().zip(arrays) {
            slot.push(array);
        }
        self.members.push(member);
    }

    fn disregard(&mut self, member: usize, reason: DisregardReason) {
        warn!(
            member,
            reason = %reason,
            disregarded = self.disregarded.len() + 1,
            "member disregarded"
        );
        self.disregarded.push((member, reason));
    }
}

// ── run_ensemble ───────────────────────────────────────────────────

/// Run the simulator for members `0..ensemble_size` and collect `keywords`.
///
/// Members are launched `config.npruns` at a time; batch `n + 1` starts only
/// after batch `n` has been read and cleaned up. Per-member failures are
/// logged and recorded in [`EnsembleResults::disregarded`]; a run where
/// every member fails returns empty arrays rather than an error.
///
/// # Errors
///
/// Only for an invalid `config`, or when a process or its output directory
/// cannot be created.
pub fn run_ensemble(
    reader: &dyn ResultReader,
    ensemble_path: &Path,
    ensemble_size: usize,
    keywords: &Keywords,
    config: &RunConfig,
    cancel: &CancelToken,
) -> Result<EnsembleResults, RunError> {
    config.validate()?;
    let launcher = BatchLauncher::new(config);
    let mut results = EnsembleResults::new(keywords, ensemble_size);

    let indices: Vec<usize> = (0..ensemble_size).collect();
    for (batch, chunk) in indices.chunks(config.npruns).enumerate() {
        let members: Vec<MemberPaths> = chunk
            .iter()
            .map(|&j| MemberPaths::new(ensemble_path, &config.deck_name, j))
            .collect();

        if cancel.is_cancelled() {
            for member in &members {
                results.disregard(member.index, DisregardReason::NotLaunched);
            }
            continue;
        }

        info!(batch, members = members.len(), "launching batch");
        let outcomes = launcher.run_batch(&members, cancel)?;

        for (member, outcome) in members.iter().zip(outcomes) {
            match collect_member(reader, member, outcome, keywords, config) {
                Ok(arrays) => results.accept(member.index, arrays),
                Err(reason) => results.disregard(member.index, reason),
            }
            if member.index != 0 && !config.keep_result_files {
                remove_member_dirs(member);
            }
        }
    }

    info!(
        disregarded = results.num_disregarded(),
        total = ensemble_size,
        "ensemble collected"
    );
    Ok(results)
}

/// Read and validate one member. Arrays come back in [`Keywords::all`] order.
fn collect_member(
    reader: &dyn ResultReader,
    member: &MemberPaths,
    outcome: ExitOutcome,
    keywords: &Keywords,
    config: &RunConfig,
) -> Result<Vec<ArrayD<f64>>, DisregardReason> {
    if !outcome.is_success() {
        return Err(DisregardReason::Process(outcome));
    }
    let output = reader.open(member)?;
    let reached = output.report_steps();
    if let Some(required) = config.num_report_steps {
        if reached < required {
            return Err(DisregardReason::Incomplete { reached, required });
        }
    }
    let horizon = config.num_report_steps.unwrap_or(reached);
    let d = &config.decimation;

    let mut arrays = Vec::with_capacity(keywords.all().count());
    for kw in &keywords.field {
        let values = output.field(kw)?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DisregardReason::NonFinite {
                keyword: kw.clone(),
            });
        }
        arrays.push(decimate_field(values.view(), horizon, d));
    }
    for kw in &keywords.init {
        let values = output.init(kw)?;
        arrays.push(
            values
                .slice(s![..;d.cell_stride as isize])
                .to_owned()
                .into_dyn(),
        );
    }
    for kw in &keywords.summary {
        let values = output.summary(kw)?;
        arrays.push(decimate_series(values.view(), horizon, d));
    }
    Ok(arrays)
}

fn step_range(len: usize, horizon: usize, d: &Decimation) -> (usize, usize) {
    let end = horizon.min(len);
    (d.step_offset.min(end), end)
}

fn decimate_field(values: ArrayView2<'_, f64>, horizon: usize, d: &Decimation) -> ArrayD<f64> {
    let (start, end) = step_range(values.nrows(), horizon, d);
    values
        .slice(s![start..end;d.step_increment as isize, ..;d.cell_stride as isize])
        .to_owned()
        .into_dyn()
}

fn decimate_series(values: ArrayView1<'_, f64>, horizon: usize, d: &Decimation) -> ArrayD<f64> {
    let (start, end) = step_range(values.len(), horizon, d);
    values
        .slice(s![start..end;d.step_increment as isize])
        .to_owned()
        .into_dyn()
}

fn remove_member_dirs(member: &MemberPaths) {
    for dir in [&member.results, &member.runfiles] {
        if dir.exists() {
            if let Err(e) = fs::remove_dir_all(dir) {
                warn!(member = member.index, path = %dir.display(), error = %e, "cleanup failed");
            }
        }
    }
}
