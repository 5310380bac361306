#![forbid(unsafe_code)]

//! Periodic tick leases for autoscroll.
//!
//! A [`TickScheduler`] hands out a [`TickHandle`] when autoscroll starts.
//! The handle is the lease: the host keeps delivering ticks (via
//! [`ReorderSession::tick`](crate::ReorderSession::tick)) for as long as it
//! lives, and dropping it releases the host's timer. The session stores the
//! handle inside the drag state, so every way out of a drag releases it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use web_time::Duration;

/// Source of periodic ticks (display link, frame clock, interval timer).
pub trait TickScheduler {
    /// Start delivering ticks roughly every `interval` until the returned
    /// handle is dropped.
    fn schedule(&mut self, interval: Duration) -> TickHandle;
}

/// Lease on a running tick source. Dropping it stops the ticks.
pub struct TickHandle {
    release: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    /// Create a lease that runs `release` when dropped.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A lease with nothing to release.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[derive(Debug, Default)]
struct ManualTicksState {
    live: Cell<usize>,
    acquired: Cell<u64>,
    released: Cell<u64>,
    interval: Cell<Option<Duration>>,
}

/// Scheduler for hosts that drive ticks from their own frame loop.
///
/// Cloning shares state, so the host keeps one clone to ask
/// [`is_active`](Self::is_active) while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    state: Rc<ManualTicksState>,
}

impl ManualTicks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any lease is outstanding.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.live.get() > 0
    }

    /// Interval requested by the most recent lease, while one is live.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        if self.is_active() {
            self.state.interval.get()
        } else {
            None
        }
    }

    /// Total leases handed out.
    #[must_use]
    pub fn leases_acquired(&self) -> u64 {
        self.state.acquired.get()
    }

    /// Total leases released.
    #[must_use]
    pub fn leases_released(&self) -> u64 {
        self.state.released.get()
    }
}

impl TickScheduler for ManualTicks {
    fn schedule(&mut self, interval: Duration) -> TickHandle {
        let state = Rc::clone(&self.state);
        state.live.set(state.live.get() + 1);
        state.acquired.set(state.acquired.get() + 1);
        state.interval.set(Some(interval));
        TickHandle::new(move || {
            state.live.set(state.live.get().saturating_sub(1));
            state.released.set(state.released.get() + 1);
        })
    }
}
