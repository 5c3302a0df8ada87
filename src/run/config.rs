use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::cancel::CancellationToken;
use crate::control::playback::{DEFAULT_SPEED, PlaybackView};
use crate::control::stepper::{DEFAULT_POLL_INTERVAL, DelayCurve, Pacer, Pacing};
use crate::foundation::core::clamp_speed;

/// Runner-wide knobs. Per-run inputs live in [`super::RunRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub pacing: Pacing,
    /// How often a paused run re-checks playback and cancellation.
    #[serde(with = "millis")]
    pub poll_interval: Duration,
    /// Speed a fresh [`super::Session`] starts with, `0..=100`.
    pub initial_speed: u8,
    /// Keep the per-step action log of backtracking runs.
    pub record_steps: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::Realtime,
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_speed: DEFAULT_SPEED,
            record_steps: true,
        }
    }
}

impl RunnerConfig {
    /// No delays between steps; for tests, batch runs and the CLI.
    pub fn unpaced() -> Self {
        Self::default().with_pacing(Pacing::Unpaced)
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_initial_speed(mut self, speed: u8) -> Self {
        self.initial_speed = clamp_speed(speed);
        self
    }

    #[must_use]
    pub fn with_record_steps(mut self, record: bool) -> Self {
        self.record_steps = record;
        self
    }

    pub(crate) fn pacer(
        &self,
        curve: DelayCurve,
        playback: PlaybackView,
        cancel: CancellationToken,
    ) -> Pacer {
        Pacer::new(playback, cancel)
            .with_curve(curve)
            .with_pacing(self.pacing)
            .with_poll_interval(self.poll_interval)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
