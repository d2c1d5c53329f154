// SPDX-License-Identifier: MPL-2.0
//! Change notifications delivered to subscribers.

use super::toast::{Toast, ToastId};
use std::fmt;
use std::rc::Rc;

/// Why a toast left the queue outside of eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Explicit `remove` call, usually a user dismissal.
    Dismissed,
    /// Its auto-dismiss timer fired.
    Expired,
}

/// What the operation that triggered a notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A toast was inserted. `evicted` lists the toasts pushed out by it,
    /// oldest first; with zero capacity it contains `id` itself.
    Added { id: ToastId, evicted: Vec<ToastId> },
    Removed { id: ToastId, reason: RemovalReason },
    Cleared { removed: Vec<ToastId> },
}

/// State handed to subscribers after each change.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub toasts: Vec<Toast>,
    pub announcement: String,
    pub change: Change,
}

pub(crate) type Listener = Rc<dyn Fn(&StoreSnapshot)>;

#[derive(Default)]
pub(crate) struct SubscriberList {
    next_key: u64,
    listeners: Vec<(u64, Listener)>,
}

impl SubscriberList {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        self.next_key += 1;
        self.listeners.push((self.next_key, listener));
        self.next_key
    }

    pub(crate) fn remove(&mut self, key: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _)| *k != key);
        self.listeners.len() != before
    }

    /// Clones the current listeners so they can run with no borrow held.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.listeners.len())
            .finish()
    }
}
