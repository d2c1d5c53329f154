// SPDX-License-Identifier: MPL-2.0
//! Scheduler backed by tokio timers.

use super::{Scheduler, TimerCallback, TimerHandle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::task::{JoinHandle, LocalSet};

/// Runs each timer as a local tokio task sleeping for the requested delay.
///
/// Callbacks are not `Send`, so timers are spawned onto the given
/// [`LocalSet`]. Spawning only queues the task, so `schedule` may be called
/// from anywhere on the owning thread; timers start counting once the set is
/// driven on a runtime with the time driver enabled.
///
/// A task only runs its callback if its handle is still registered when the
/// sleep completes. `cancel` unregisters before aborting, so a task that has
/// already been woken but not yet polled still cannot fire.
#[derive(Clone)]
pub struct TokioScheduler {
    local: Rc<LocalSet>,
    timers: Rc<RuntimeTimers>,
}

#[derive(Default)]
struct RuntimeTimers {
    next_handle: Cell<u64>,
    tasks: RefCell<HashMap<u64, JoinHandle<()>>>,
}

impl RuntimeTimers {
    fn unregister(&self, raw: u64) -> Option<JoinHandle<()>> {
        self.tasks.borrow_mut().remove(&raw)
    }
}

impl Drop for RuntimeTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.get_mut().drain() {
            task.abort();
        }
    }
}

impl TokioScheduler {
    #[must_use]
    pub fn new(local: Rc<LocalSet>) -> Self {
        Self {
            local,
            timers: Rc::default(),
        }
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let raw = self.timers.next_handle.get() + 1;
        self.timers.next_handle.set(raw);

        let timers: Weak<RuntimeTimers> = Rc::downgrade(&self.timers);
        let task = self.local.spawn_local(async move {
            tokio::time::sleep(delay).await;
            let Some(timers) = timers.upgrade() else {
                return;
            };
            if timers.unregister(raw).is_none() {
                tracing::trace!(handle = raw, "timer woke after cancel");
                return;
            }
            drop(timers);
            callback();
        });
        // The task cannot be polled before this returns, so registering after
        // the spawn is not racy.
        self.timers.tasks.borrow_mut().insert(raw, task);
        TimerHandle::new(raw)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.timers.unregister(handle.raw()) {
            task.abort();
        }
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
