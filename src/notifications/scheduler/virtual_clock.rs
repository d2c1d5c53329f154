// SPDX-License-Identifier: MPL-2.0
//! Deterministic, manually advanced scheduler.

use super::{Scheduler, TimerCallback, TimerHandle};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Scheduler driven by an explicit virtual clock.
///
/// Time only moves when [`advance`](Self::advance) is called. Clones share
/// the same clock, so a test can keep one handle while the store owns another.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toast_queue::notifications::{Scheduler, VirtualScheduler};
///
/// let clock = VirtualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// clock.schedule(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// clock.advance_ms(99);
/// assert!(!fired.get());
/// clock.advance_ms(1);
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<ClockState>>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_handle: u64,
    /// Pending callbacks ordered by due time, then by scheduling order.
    pending: BTreeMap<(Duration, u64), TimerCallback>,
    due_at: HashMap<u64, Duration>,
    fired: u64,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Total number of callbacks fired so far.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.clock.borrow().fired
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.clock.borrow().due_at.contains_key(&handle.raw())
    }

    /// Moves the clock forward by `by`, firing every callback that falls due.
    ///
    /// Callbacks run in due order with the clock set to their due time and
    /// no internal borrow held, so they may schedule or cancel timers. Timers
    /// they schedule inside the window also fire. Returns the number fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let (raw, callback) = {
                let mut clock = self.clock.borrow_mut();
                let key = match clock.pending.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                let Some(callback) = clock.pending.remove(&key) else {
                    break;
                };
                clock.due_at.remove(&key.1);
                clock.now = key.0;
                clock.fired += 1;
                (key.1, callback)
            };
            tracing::trace!(handle = raw, "virtual timer fired");
            callback();
            fired += 1;
        }

        self.clock.borrow_mut().now = target;
        fired
    }

    /// Shorthand for `advance(Duration::from_millis(millis))`.
    pub fn advance_ms(&self, millis: u64) -> usize {
        self.advance(Duration::from_millis(millis))
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_handle += 1;
        let raw = clock.next_handle;
        let due = clock.now.saturating_add(delay);
        clock.pending.insert((due, raw), callback);
        clock.due_at.insert(raw, due);
        TimerHandle::new(raw)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut clock = self.clock.borrow_mut();
        if let Some(due) = clock.due_at.remove(&handle.raw()) {
            clock.pending.remove(&(due, handle.raw()));
        }
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .field("fired", &clock.fired)
            .finish()
    }
}
