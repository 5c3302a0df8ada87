use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::control::cancel::CancellationSource;
use crate::control::playback::PlaybackControl;
use crate::foundation::error::{AlgoError, AlgoResult};

use super::request::{AlgorithmId, RunRequest};
use super::snapshot::{ChannelSink, Snapshot};
use super::{RunOutcome, RunStatus, RunnerConfig, dispatch, drive};

/// Caller's side of one run started by a [`Session`].
///
/// Snapshots queue up in an unbounded channel; iterating
/// [`RunHandle::snapshots`] ends once the run has finished.
#[derive(Debug)]
pub struct RunHandle {
    generation: u64,
    algorithm: AlgorithmId,
    snapshots: mpsc::Receiver<Snapshot>,
    outcome: mpsc::Receiver<RunOutcome>,
}

impl RunHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn snapshots(&self) -> &mpsc::Receiver<Snapshot> {
        &self.snapshots
    }

    /// Block until the run ends. Snapshots not yet received are dropped.
    pub fn join(self) -> AlgoResult<RunOutcome> {
        self.outcome
            .recv()
            .map_err(|_| AlgoError::Other(anyhow::anyhow!("run worker exited without an outcome")))
    }
}

#[derive(Debug)]
struct Worker {
    generation: u64,
    cancel: CancellationSource,
    status: Arc<Mutex<RunStatus>>,
    thread: JoinHandle<RunOutcome>,
}

impl Worker {
    fn status(&self) -> RunStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn join(self) -> AlgoResult<RunOutcome> {
        self.thread
            .join()
            .map_err(|_| AlgoError::Other(anyhow::anyhow!("run worker panicked")))
    }
}

/// Owns the playback controls and at most one live run.
///
/// Every [`Session::start`] bumps the generation, cancels the previous run and
/// waits for it to unwind before the new worker is spawned, so two runs never
/// share the playback controls.
#[derive(Debug)]
pub struct Session {
    config: RunnerConfig,
    playback: PlaybackControl,
    generation: u64,
    current: Option<Worker>,
    last: RunStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl Session {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            playback: PlaybackControl::new(config.initial_speed),
            config,
            generation: 0,
            current: None,
            last: RunStatus::Idle,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Shared with every run this session starts.
    pub fn playback(&self) -> &PlaybackControl {
        &self.playback
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate `request` and run it on a fresh worker thread.
    ///
    /// An invalid request fails here and leaves any current run untouched.
    /// Starting resumes playback.
    #[tracing::instrument(skip_all, fields(algorithm = %request.algorithm))]
    pub fn start(&mut self, request: &RunRequest) -> AlgoResult<RunHandle> {
        let plan = dispatch::prepare(request)?;
        if let Some(previous) = self.stop_current() {
            tracing::debug!(
                generation = previous.generation,
                status = ?previous.status,
                "previous run superseded"
            );
        }

        self.generation += 1;
        let generation = self.generation;
        let algorithm = request.algorithm;
        self.playback.resume();

        let cancel = CancellationSource::new();
        let token = cancel.token();
        let status = Arc::new(Mutex::new(RunStatus::Running));
        let (snapshot_tx, snapshot_rx) = mpsc::channel::<Snapshot>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<RunOutcome>();

        let config = self.config.clone();
        let playback = self.playback.view();
        let worker_status = Arc::clone(&status);
        let thread = std::thread::Builder::new()
            .name(format!("algoviz-run-{generation}"))
            .spawn(move || {
                let mut sink = ChannelSink::new(snapshot_tx);
                let outcome = drive(
                    plan, algorithm, generation, &mut sink, &config, playback, token,
                );
                *worker_status.lock().unwrap_or_else(|e| e.into_inner()) = outcome.status;
                let _ = outcome_tx.send(outcome.clone());
                outcome
            })
            .map_err(|e| anyhow::Error::new(e).context("spawn run worker"))?;

        self.current = Some(Worker {
            generation,
            cancel,
            status,
            thread,
        });
        Ok(RunHandle {
            generation,
            algorithm,
            snapshots: snapshot_rx,
            outcome: outcome_rx,
        })
    }

    pub fn pause(&self) {
        self.playback.pause();
    }

    pub fn resume(&self) {
        self.playback.resume();
    }

    /// Takes effect at the run's next suspension point.
    pub fn set_speed(&self, speed: u8) {
        self.playback.set_speed(speed);
    }

    pub fn speed(&self) -> u8 {
        self.playback.speed()
    }

    /// Ask the current run to stop without waiting for it.
    pub fn cancel(&self) {
        if let Some(worker) = &self.current {
            worker.cancel.cancel();
        }
    }

    /// Wait for the current run to finish on its own.
    pub fn join(&mut self) -> AlgoResult<Option<RunOutcome>> {
        let Some(worker) = self.current.take() else {
            return Ok(None);
        };
        let outcome = worker.join()?;
        self.last = outcome.status;
        Ok(Some(outcome))
    }

    /// Cancel and join the current run, then return to [`RunStatus::Idle`].
    pub fn reset(&mut self) {
        self.stop_current();
        self.last = RunStatus::Idle;
        self.playback.resume();
    }

    pub fn status(&self) -> RunStatus {
        match &self.current {
            Some(worker) => match worker.status() {
                RunStatus::Running if !self.playback.is_running() => RunStatus::Paused,
                status => status,
            },
            None => self.last,
        }
    }

    fn stop_current(&mut self) -> Option<RunOutcome> {
        let worker = self.current.take()?;
        worker.cancel.cancel();
        let generation = worker.generation;
        match worker.join() {
            Ok(outcome) => {
                self.last = outcome.status;
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(generation, "run worker lost: {e}");
                self.last = RunStatus::Aborted;
                None
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_current();
    }
}
