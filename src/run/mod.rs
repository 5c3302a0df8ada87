//! Algorithm-agnostic run layer.
//!
//! A [`RunRequest`] names an algorithm and its input. It is validated up front
//! into a plan, then executed either on the calling thread ([`run_blocking`])
//! or on a worker owned by a [`Session`], which also owns the playback
//! controls and makes sure at most one run is live at a time.

use serde::Serialize;

use crate::control::cancel::CancellationToken;
use crate::control::playback::PlaybackView;
use crate::control::stepper::{Halt, SnapshotSink};
use crate::foundation::error::AlgoResult;

mod config;
mod dispatch;
mod request;
mod session;
mod snapshot;

pub use config::RunnerConfig;
pub use dispatch::{MAX_ACTIVITIES, MAX_ARRAY_LEN};
pub use request::{AlgorithmId, AlgorithmInput, Family, RunOptions, RunRequest};
pub use session::{RunHandle, Session};
pub use snapshot::{AlgorithmResult, ChannelSink, Snapshot};

use dispatch::Plan;
use snapshot::Tally;

/// Lifecycle of a session's current run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
    /// Stopped by the caller or superseded by a newer run.
    Cancelled,
    /// An engine detected a broken internal invariant and stopped.
    Aborted,
}

impl RunStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Aborted)
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunOutcome {
    pub algorithm: AlgorithmId,
    pub kind: &'static str,
    /// Session generation that started the run; 0 for [`run_blocking`].
    pub generation: u64,
    pub status: RunStatus,
    /// Present only for completed runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AlgorithmResult>,
    /// Snapshots emitted before the run ended.
    pub snapshots: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Validate and execute `request` on the calling thread.
///
/// Invalid requests fail before anything is emitted. Once running, the result
/// is always an outcome: cancellation and invariant aborts are reported in
/// [`RunOutcome::status`], not as errors.
pub fn run_blocking(
    request: &RunRequest,
    sink: &mut dyn SnapshotSink<Snapshot>,
    config: &RunnerConfig,
    playback: PlaybackView,
    cancel: CancellationToken,
) -> AlgoResult<RunOutcome> {
    let plan = dispatch::prepare(request)?;
    Ok(drive(plan, request.algorithm, 0, sink, config, playback, cancel))
}

#[tracing::instrument(skip_all, fields(algorithm = %algorithm, generation = generation))]
pub(crate) fn drive(
    plan: Plan,
    algorithm: AlgorithmId,
    generation: u64,
    sink: &mut dyn SnapshotSink<Snapshot>,
    config: &RunnerConfig,
    playback: PlaybackView,
    cancel: CancellationToken,
) -> RunOutcome {
    let pacer = config.pacer(algorithm.family().delay_curve(), playback, cancel);
    let mut tally = Tally::new(sink);
    let ended = plan.execute(&mut tally, pacer, config.record_steps);

    let mut outcome = RunOutcome {
        algorithm,
        kind: algorithm.kind(),
        generation,
        status: RunStatus::Completed,
        result: None,
        snapshots: tally.count,
        error: None,
    };
    match ended {
        Ok(result) => {
            tracing::info!(snapshots = outcome.snapshots, "run completed");
            outcome.result = Some(result);
        }
        Err(Halt::Cancelled) => {
            tracing::debug!(snapshots = outcome.snapshots, "run cancelled");
            outcome.status = RunStatus::Cancelled;
        }
        Err(Halt::Invariant(msg)) => {
            tracing::warn!(snapshots = outcome.snapshots, "run aborted: {msg}");
            outcome.status = RunStatus::Aborted;
            outcome.error = Some(msg);
        }
    }
    outcome
}

#[cfg(test)]
#[path = "../../tests/unit/run/mod.rs"]
mod tests;
