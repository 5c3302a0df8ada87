//! Cooperative cancellation tokens for algorithm runs.
//!
//! A [`CancellationSource`] stays with the controlling side (a session or run
//! handle); every run receives a cloned [`CancellationToken`] and polls it at
//! each suspension point. Starting a new run cancels the previous run's source,
//! so a superseded run unwinds before it touches any more state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// A thread-safe, cloneable cancellation token.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<CancellationInner>,
}

/// The control handle that triggers cancellation.
///
/// Dropping the source does not cancel its tokens.
#[derive(Debug)]
pub struct CancellationSource {
    inner: Arc<CancellationInner>,
}

#[derive(Debug)]
struct CancellationInner {
    cancelled: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

impl CancellationSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationInner {
                cancelled: AtomicBool::new(false),
                notify: (Mutex::new(()), Condvar::new()),
            }),
        }
    }

    /// Obtain a token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Signal cancellation and wake every pending [`CancellationToken::wait_timeout`].
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let (lock, cvar) = &self.inner.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// A token whose source has already been dropped; it can never fire.
    pub fn never() -> Self {
        CancellationSource::new().token()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Block until either cancellation is requested or the timeout elapses.
    ///
    /// Returns `true` if cancelled, `false` if timed out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        if duration.is_zero() {
            return false;
        }
        let (lock, cvar) = &self.inner.notify;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();
        let mut remaining = duration;
        loop {
            if self.is_cancelled() {
                return true;
            }
            let (new_guard, result) = cvar
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = new_guard;
            if self.is_cancelled() {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/cancel.rs"]
mod tests;
