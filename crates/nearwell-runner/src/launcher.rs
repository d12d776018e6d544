//! Batched process launching with a wait barrier.

use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::layout::MemberPaths;

// ── CancelToken ────────────────────────────────────────────────────

/// Cooperative cancellation shared between the caller and a running batch.
///
/// Cloning shares the flag. Once cancelled, running processes are killed at
/// the next poll and no further batches are launched.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ── ExitOutcome ────────────────────────────────────────────────────

/// How a member's simulator process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited with status 0.
    Success,
    /// Exited with a non-zero status, or was killed by a signal (`None`).
    Failed {
        /// Exit code, if any.
        code: Option<i32>,
    },
    /// Killed after exceeding the configured timeout.
    TimedOut,
    /// Killed because the batch was cancelled.
    Cancelled,
    /// The process status could not be queried.
    Lost,
}

impl ExitOutcome {
    fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            Self::Failed {
                code: status.code(),
            }
        }
    }

    /// Whether the process ran to a clean exit.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

// ── BatchLauncher ──────────────────────────────────────────────────

/// Launches one simulator process per member and waits for all of them.
///
/// Each process is invoked as
/// `<executable> <deck> --output-dir=<results> <flags...>` with stdout and
/// stderr discarded.
pub struct BatchLauncher<'a> {
    config: &'a RunConfig,
}

impl<'a> BatchLauncher<'a> {
    /// Launcher using `config`'s executable, flags, timeout and poll interval.
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Build the command line for one member.
    pub fn command(&self, member: &MemberPaths) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.arg(&member.deck)
            .arg(format!("--output-dir={}", member.results.display()))
            .args(self.config.flag_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    /// Run `members` concurrently and block until every process has ended.
    ///
    /// Outcomes are returned in `members` order. Every results directory is
    /// created before the first spawn, so a preparation failure starts
    /// nothing. If a process cannot be spawned, the ones already started are
    /// killed and the spawn error is returned.
    pub fn run_batch(
        &self,
        members: &[MemberPaths],
        cancel: &CancelToken,
    ) -> Result<Vec<ExitOutcome>, RunError> {
        for member in members {
            std::fs::create_dir_all(&member.results).map_err(|source| RunError::Prepare {
                path: member.results.clone(),
                source,
            })?;
        }
        let mut children: Vec<Child> = Vec::with_capacity(members.len());
        for member in members {
            match self.command(member).spawn() {
                Ok(child) => {
                    debug!(member = member.index, pid = child.id(), "simulator started");
                    children.push(child);
                }
                Err(source) => {
                    for child in &mut children {
                        terminate(child);
                    }
                    return Err(RunError::Spawn {
                        member: member.index,
                        source,
                    });
                }
            }
        }
        Ok(self.wait_all(members, &mut children, cancel))
    }

    fn wait_all(
        &self,
        members: &[MemberPaths],
        children: &mut [Child],
        cancel: &CancelToken,
    ) -> Vec<ExitOutcome> {
        let started = Instant::now();
        let timeout = self.config.timeout();
        let mut outcomes: Vec<Option<ExitOutcome>> = vec![None; children.len()];

        loop {
            let cancelled = cancel.is_cancelled();
            let expired = timeout.is_some_and(|t| started.elapsed() >= t);
            for ((child, outcome), member) in children.iter_mut().zip(&mut outcomes).zip(members) {
                if outcome.is_some() {
                    continue;
                }
                match child.try_wait() {
                    Ok(Some(status)) => *outcome = Some(ExitOutcome::from_status(status)),
                    Ok(None) if cancelled => {
                        terminate(child);
                        *outcome = Some(ExitOutcome::Cancelled);
                    }
                    Ok(None) if expired => {
                        warn!(member = member.index, "simulator timed out, killing");
                        terminate(child);
                        *outcome = Some(ExitOutcome::TimedOut);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(member = member.index, error = %e, "lost track of simulator");
                        terminate(child);
                        *outcome = Some(ExitOutcome::Lost);
                    }
                }
            }
            if outcomes.iter().all(Option::is_some) {
                break;
            }
            thread::sleep(self.config.poll_interval());
        }
        outcomes.into_iter().flatten().collect()
    }
}

/// Kill and reap a child. Errors mean it already exited.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_is_shared() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[cfg(unix)]
    #[test]
    fn command_line_layout() {
        let config = RunConfig {
            executable: "flow".into(),
            flags: "--parsing-strictness=low".to_string(),
            ..RunConfig::default()
        };
        let member = MemberPaths::new(std::path::Path::new("/ens"), "RUN", 2);
        let cmd = BatchLauncher::new(&config).command(&member);
        assert_eq!(cmd.get_program(), "flow");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            [
                "/ens/runfiles_2/RUN_2.DATA",
                "--output-dir=/ens/results_2",
                "--parsing-strictness=low",
            ]
        );
    }
}
