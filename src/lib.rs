//! algoviz runs classic algorithms one observable step at a time.
//!
//! Every engine emits immutable snapshots of its state and suspends between
//! them, so a caller can pause, resume, re-speed or cancel a run mid-flight:
//!
//! - Describe a run with a [`RunRequest`]
//! - Start it on a [`Session`] (worker thread) or with [`run_blocking`]
//! - Consume the [`Snapshot`] stream, then collect the [`RunOutcome`]
//!
//! The engines are also usable directly with a [`Stepper`] and any
//! [`SnapshotSink`].
#![forbid(unsafe_code)]

mod foundation;

pub mod backtracking;
pub mod control;
pub mod dp;
pub mod graph;
pub mod greedy;
pub mod numeric;
/// Request validation, dispatch and session-managed runs.
pub mod run;
pub mod searching;
pub mod sorting;
pub mod tree;

pub use crate::foundation::core::{Cell, MAX_SPEED, SortOrder, clamp_speed};
pub use crate::foundation::error::{AlgoError, AlgoResult};

pub use crate::control::cancel::{CancellationSource, CancellationToken};
pub use crate::control::playback::{DEFAULT_SPEED, PlaybackControl, PlaybackView};
pub use crate::control::stepper::{
    Beat, DelayCurve, FnSink, Halt, NullSink, Pacer, Pacing, Recorder, SnapshotSink, StepResult,
    Stepper,
};
pub use crate::run::{
    AlgorithmId, AlgorithmInput, AlgorithmResult, ChannelSink, Family, RunHandle, RunOptions,
    RunOutcome, RunRequest, RunStatus, RunnerConfig, Session, Snapshot, run_blocking,
};
