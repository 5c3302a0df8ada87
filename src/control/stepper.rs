//! The cooperative suspension primitive every engine steps through.
//!
//! Engines never sleep or poll on their own. At each semantically meaningful
//! point they hand a structural copy of their state to [`Stepper::emit`], which
//! pushes it to the sink and then suspends: a speed-dependent delay while the
//! run is playing, or a poll loop while it is paused. Cancellation is observed
//! before every push and while suspended, and surfaces as [`Halt::Cancelled`]
//! so engines unwind with `?`.

use std::time::Duration;

use crate::control::cancel::CancellationToken;
use crate::control::playback::PlaybackView;

/// Default poll interval while paused.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why an engine stopped before finishing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// The run's cancellation token fired.
    Cancelled,
    /// An internal invariant check failed; the run stops without touching state further.
    Invariant(String),
}

impl Halt {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

/// Result type of every engine function that suspends.
pub type StepResult<T> = Result<T, Halt>;

/// Receives snapshots emitted by an engine.
///
/// Snapshots arrive by value: the sink owns its copy and can never reach the
/// engine's live state.
pub trait SnapshotSink<S> {
    fn push(&mut self, snapshot: S);
}

/// In-memory sink for tests and debugging.
#[derive(Debug)]
pub struct Recorder<S> {
    /// Snapshots in emission order.
    pub snapshots: Vec<S>,
}

impl<S> Recorder<S> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&S> {
        self.snapshots.last()
    }
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SnapshotSink<S> for Recorder<S> {
    fn push(&mut self, snapshot: S) {
        self.snapshots.push(snapshot);
    }
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl<S> SnapshotSink<S> for NullSink {
    fn push(&mut self, _snapshot: S) {}
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<S, F: FnMut(S)> SnapshotSink<S> for FnSink<F> {
    fn push(&mut self, snapshot: S) {
        (self.0)(snapshot);
    }
}

/// Maps a speed in `0..=100` to a delay; strictly decreasing in speed.
///
/// Each engine owns its own curve. `slowest_ms - fastest_ms` must be at least
/// 100 for every speed increment to shorten the delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayCurve {
    slowest_ms: u64,
    fastest_ms: u64,
}

impl DelayCurve {
    pub const fn new(slowest_ms: u64, fastest_ms: u64) -> Self {
        Self {
            slowest_ms,
            fastest_ms,
        }
    }

    /// Delay at `speed` (clamped to 100).
    pub fn delay(self, speed: u8) -> Duration {
        let speed = u64::from(speed.min(100));
        let span = self.slowest_ms.saturating_sub(self.fastest_ms);
        Duration::from_millis(self.slowest_ms - span * speed / 100)
    }

    pub fn slowest(self) -> Duration {
        Duration::from_millis(self.slowest_ms)
    }

    pub fn fastest(self) -> Duration {
        Duration::from_millis(self.fastest_ms)
    }
}

/// Relative length of a suspension, as a fraction of the curve's delay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Beat {
    Full,
    Swap,
    Half,
    Brief,
    Double,
}

impl Beat {
    pub fn factor(self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Swap => 0.7,
            Self::Half => 0.5,
            Self::Brief => 0.3,
            Self::Double => 2.0,
        }
    }
}

/// Whether suspensions actually sleep.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Sleep for the speed-dependent delay at every step.
    #[default]
    Realtime,
    /// Skip delays; pause and cancellation are still honoured.
    Unpaced,
}

/// Suspension policy shared by all steppers of one run.
#[derive(Clone, Debug)]
pub struct Pacer {
    playback: PlaybackView,
    cancel: CancellationToken,
    curve: DelayCurve,
    pacing: Pacing,
    poll_interval: Duration,
}

impl Pacer {
    pub fn new(playback: PlaybackView, cancel: CancellationToken) -> Self {
        Self {
            playback,
            cancel,
            curve: DelayCurve::new(1000, 50),
            pacing: Pacing::Realtime,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Never paused, never cancelled, no delays.
    pub fn detached() -> Self {
        Self::new(PlaybackView::always_running(), CancellationToken::never())
            .with_pacing(Pacing::Unpaced)
    }

    #[must_use]
    pub fn with_curve(mut self, curve: DelayCurve) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn curve(&self) -> DelayCurve {
        self.curve
    }

    pub fn playback(&self) -> &PlaybackView {
        &self.playback
    }

    /// Fail fast if the run was cancelled.
    pub fn checkpoint(&self) -> StepResult<()> {
        if self.cancel.is_cancelled() {
            return Err(Halt::Cancelled);
        }
        Ok(())
    }

    /// Suspend once: delay while playing, then hold while paused.
    pub fn step(&self, beat: Beat) -> StepResult<()> {
        if self.playback.is_running() && self.pacing == Pacing::Realtime {
            let delay = self
                .curve
                .delay(self.playback.speed())
                .mul_f64(beat.factor());
            if self.cancel.wait_timeout(delay) {
                return Err(Halt::Cancelled);
            }
        }
        self.await_resumed()
    }

    /// Return as soon as the run is playing again.
    pub fn await_resumed(&self) -> StepResult<()> {
        if self.playback.is_running() {
            return self.checkpoint();
        }
        tracing::debug!("run paused; waiting for resume");
        while !self.playback.is_running() {
            if self.cancel.wait_timeout(self.poll_interval) {
                return Err(Halt::Cancelled);
            }
        }
        tracing::debug!("run resumed");
        self.checkpoint()
    }
}

/// Per-engine handle combining a sink with the run's [`Pacer`].
pub struct Stepper<'a, S> {
    sink: &'a mut dyn SnapshotSink<S>,
    pacer: Pacer,
    emitted: u64,
}

impl<'a, S> Stepper<'a, S> {
    pub fn new(sink: &'a mut dyn SnapshotSink<S>, pacer: Pacer) -> Self {
        Self {
            sink,
            pacer,
            emitted: 0,
        }
    }

    /// Stepper that records into `sink` without delays, pauses or cancellation.
    pub fn detached(sink: &'a mut dyn SnapshotSink<S>) -> Self {
        Self::new(sink, Pacer::detached())
    }

    /// Push a snapshot and suspend for a full beat.
    pub fn emit(&mut self, snapshot: S) -> StepResult<()> {
        self.emit_beat(snapshot, Beat::Full)
    }

    pub fn emit_beat(&mut self, snapshot: S, beat: Beat) -> StepResult<()> {
        self.pacer.checkpoint()?;
        self.sink.push(snapshot);
        self.emitted += 1;
        self.pacer.step(beat)
    }

    /// Suspend without emitting (e.g. a skipped candidate that only gets a shorter pause).
    pub fn idle(&mut self, beat: Beat) -> StepResult<()> {
        self.pacer.checkpoint()?;
        self.pacer.step(beat)
    }

    pub fn checkpoint(&self) -> StepResult<()> {
        self.pacer.checkpoint()
    }

    /// Number of snapshots pushed so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/stepper.rs"]
mod tests;
