// SPDX-License-Identifier: MPL-2.0
//! Timer abstraction used for auto-dismiss.
//!
//! The store only ever talks to [`Scheduler`]. Production code backs it with
//! [`TokioScheduler`]; tests drive a [`VirtualScheduler`] by hand so
//! duration-based removal can be asserted without waiting on a wall clock.
//!
//! # Guarantees
//!
//! Every implementation must fire a scheduled callback at most once, and
//! never after [`Scheduler::cancel`] has returned for its handle. Cancelling
//! an unknown, already cancelled, or already fired handle is a no-op.

mod runtime;
mod virtual_clock;

pub use runtime::TokioScheduler;
pub use virtual_clock::VirtualScheduler;

use std::time::Duration;

/// Callback run when a timer fires.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Opaque handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Runs a callback after a delay, cancellably.
pub trait Scheduler {
    /// Schedules `callback` to run once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a pending timer. Idempotent.
    fn cancel(&self, handle: TimerHandle);
}
