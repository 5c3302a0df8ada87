use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::foundation::core::clamp_speed;

/// Default speed on the `0..=100` scale.
pub const DEFAULT_SPEED: u8 = 50;

#[derive(Debug)]
struct PlaybackInner {
    running: AtomicBool,
    speed: AtomicU8,
}

/// Caller-side playback controls shared with a run.
///
/// Only the caller mutates these; engines see them through a [`PlaybackView`],
/// which re-reads both scalars at every suspension point.
#[derive(Clone, Debug)]
pub struct PlaybackControl {
    inner: Arc<PlaybackInner>,
}

impl PlaybackControl {
    pub fn new(speed: u8) -> Self {
        Self {
            inner: Arc::new(PlaybackInner {
                running: AtomicBool::new(true),
                speed: AtomicU8::new(clamp_speed(speed)),
            }),
        }
    }

    pub fn pause(&self) {
        self.inner.running.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        self.inner.running.store(true, Ordering::Release);
    }

    pub fn set_speed(&self, speed: u8) {
        self.inner
            .speed
            .store(clamp_speed(speed), Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    pub fn speed(&self) -> u8 {
        self.inner.speed.load(Ordering::Acquire)
    }

    /// Read-only handle passed to engines.
    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for PlaybackControl {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

/// Read-only view of a [`PlaybackControl`].
#[derive(Clone, Debug)]
pub struct PlaybackView {
    inner: Arc<PlaybackInner>,
}

impl PlaybackView {
    /// A view that is always running at full speed; nothing can pause it.
    pub fn always_running() -> Self {
        PlaybackControl::new(crate::foundation::core::MAX_SPEED).view()
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    pub fn speed(&self) -> u8 {
        self.inner.speed.load(Ordering::Acquire)
    }
}
