// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `ToastStore` owns the ordered list of active toasts and the table of
//! pending auto-dismiss timers. Every way a toast can leave the list
//! (dismissal, expiry, eviction, `clear`) goes through one removal path that
//! cancels the toast's timer in the same step, so a timer can never fire for
//! a toast that is gone.

use super::announcement;
use super::eviction;
use super::ids::IdIssuer;
use super::scheduler::{Scheduler, TimerHandle};
use super::settings::QueueSettings;
use super::subscription::{Change, RemovalReason, StoreSnapshot, SubscriberList};
use super::toast::{Toast, ToastId, ToastInput};
use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Bounded, time-expiring collection of toasts.
///
/// Single-threaded: the store and its scheduler live on one thread and timer
/// callbacks re-enter it on a later turn of the event loop. Subscribers are
/// called with no internal borrow held and may call back into the store.
///
/// Dropping the store disposes it.
pub struct ToastStore {
    shared: Rc<Shared>,
}

struct Shared {
    settings: QueueSettings,
    scheduler: Box<dyn Scheduler>,
    state: RefCell<StoreState>,
    subscribers: RefCell<SubscriberList>,
}

#[derive(Debug)]
struct PendingTimer {
    handle: TimerHandle,
    /// Identifies this arming; a callback carrying another token is stale.
    token: u64,
}

#[derive(Debug)]
struct StoreState {
    /// Oldest first.
    toasts: VecDeque<Toast>,
    timers: HashMap<ToastId, PendingTimer>,
    ids: IdIssuer,
    sequence: u64,
    next_token: u64,
    announcement: String,
    disposed: bool,
}

impl StoreState {
    fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            timers: HashMap::new(),
            ids: IdIssuer::new(),
            sequence: 0,
            next_token: 0,
            announcement: announcement::summarize(0),
            disposed: false,
        }
    }

    fn contains<Q>(&self, id: &Q) -> bool
    where
        ToastId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.toasts.iter().any(|toast| {
            let key: &Q = toast.id().borrow();
            key == id
        })
    }

    /// Issues the next id, skipping any still held by an active toast after
    /// a `reset_ids`.
    fn issue_id(&mut self) -> ToastId {
        loop {
            let candidate = self.ids.next();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn refresh_announcement(&mut self) {
        self.announcement = announcement::summarize(self.toasts.len());
    }
}

impl Shared {
    /// The single removal path. Cancels the pending timer, then drops the record.
    fn take<Q>(&self, state: &mut StoreState, id: &Q) -> Option<Toast>
    where
        ToastId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(timer) = state.timers.remove(id) {
            self.scheduler.cancel(timer.handle);
        }
        let position = state.toasts.iter().position(|toast| {
            let key: &Q = toast.id().borrow();
            key == id
        })?;
        state.toasts.remove(position)
    }

    fn arm_timer(shared: &Rc<Shared>, state: &mut StoreState, id: &ToastId, delay: Duration) {
        state.next_token += 1;
        let token = state.next_token;
        let store: Weak<Shared> = Rc::downgrade(shared);
        let expired = id.clone();
        let handle = shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = store.upgrade() {
                    shared.expire(&expired, token);
                }
            }),
        );
        state.timers.insert(id.clone(), PendingTimer { handle, token });
    }

    fn expire(&self, id: &ToastId, token: u64) {
        let change = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            if state.disposed {
                tracing::trace!(%id, "timer fired after dispose, ignoring");
                return;
            }
            if state.timers.get(id).map(|timer| timer.token) != Some(token) {
                tracing::trace!(%id, "stale timer fired, ignoring");
                return;
            }
            let Some(toast) = self.take(state, id) else {
                return;
            };
            state.refresh_announcement();
            tracing::debug!(id = %toast.id(), "toast expired");
            Change::Removed {
                id: toast.id().clone(),
                reason: RemovalReason::Expired,
            }
        };
        self.notify(change);
    }

    fn notify(&self, change: Change) {
        let listeners = self.subscribers.borrow().snapshot();
        if listeners.is_empty() {
            return;
        }
        let snapshot = {
            let state = self.state.borrow();
            StoreSnapshot {
                toasts: state.toasts.iter().cloned().collect(),
                announcement: state.announcement.clone(),
                change,
            }
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl ToastStore {
    /// Creates an empty store.
    pub fn new(settings: QueueSettings, scheduler: impl Scheduler + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                settings,
                scheduler: Box::new(scheduler),
                state: RefCell::new(StoreState::new()),
                subscribers: RefCell::new(SubscriberList::default()),
            }),
        }
    }

    /// Inserts a toast at the tail and returns its id.
    ///
    /// When the queue then exceeds capacity, the oldest toasts are evicted
    /// (their timers cancelled) before anything is scheduled or announced.
    /// The new toast gets an auto-dismiss timer unless its duration is zero
    /// or it was itself evicted. Subscribers are notified exactly once.
    pub fn add(&self, input: ToastInput) -> ToastId {
        let shared = &self.shared;
        let (id, change) = {
            let mut guard = shared.state.borrow_mut();
            let state = &mut *guard;

            let id = state.issue_id();
            let variant = input.variant;
            let duration = input
                .duration
                .unwrap_or_else(|| shared.settings.duration_for(variant));
            state.sequence += 1;
            let toast = Toast::from_input(id.clone(), input, duration, state.sequence);
            state.toasts.push_back(toast);

            let evicted = eviction::select_victims(&state.toasts, shared.settings.max_toasts());
            for victim in &evicted {
                shared.take(state, victim);
                tracing::debug!(id = %victim, "toast evicted");
            }

            if let Some(delay) = duration.as_delay() {
                if state.disposed {
                    tracing::trace!(%id, "store disposed, not arming timer");
                } else if state.contains(&id) {
                    Shared::arm_timer(shared, state, &id, delay);
                }
            }
            state.refresh_announcement();

            tracing::debug!(
                %id,
                %variant,
                duration_ms = duration.value(),
                evicted = evicted.len(),
                "toast added"
            );
            let change = Change::Added {
                id: id.clone(),
                evicted,
            };
            (id, change)
        };
        shared.notify(change);
        id
    }

    /// Removes a toast by id. Returns `true` if it was present.
    ///
    /// Removing an absent id is a no-op and notifies nobody.
    pub fn remove<Q>(&self, id: &Q) -> bool
    where
        ToastId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = {
            let mut guard = self.shared.state.borrow_mut();
            let state = &mut *guard;
            let removed = self.shared.take(state, id);
            if removed.is_some() {
                state.refresh_announcement();
            }
            removed
        };

        match removed {
            Some(toast) => {
                tracing::debug!(id = %toast.id(), "toast dismissed");
                self.shared.notify(Change::Removed {
                    id: toast.id().clone(),
                    reason: RemovalReason::Dismissed,
                });
                true
            }
            None => false,
        }
    }

    /// Removes every toast, notifying once if anything was removed.
    pub fn clear(&self) {
        let removed: Vec<ToastId> = {
            let mut guard = self.shared.state.borrow_mut();
            let state = &mut *guard;
            let ids: Vec<ToastId> = state.toasts.iter().map(|t| t.id().clone()).collect();
            for id in &ids {
                self.shared.take(state, id);
            }
            state.refresh_announcement();
            ids
        };

        if removed.is_empty() {
            return;
        }
        tracing::debug!(count = removed.len(), "toasts cleared");
        self.shared.notify(Change::Cleared { removed });
    }

    /// Snapshot of the active toasts, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<Toast> {
        self.shared.state.borrow().toasts.iter().cloned().collect()
    }

    #[must_use]
    pub fn get<Q>(&self, id: &Q) -> Option<Toast>
    where
        ToastId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shared
            .state
            .borrow()
            .toasts
            .iter()
            .find(|toast| {
                let key: &Q = toast.id().borrow();
                key == id
            })
            .cloned()
    }

    #[must_use]
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        ToastId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shared.state.borrow().contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.state.borrow().toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().toasts.is_empty()
    }

    /// Screen-reader summary for the current state.
    #[must_use]
    pub fn announcement(&self) -> String {
        self.shared.state.borrow().announcement.clone()
    }

    #[must_use]
    pub fn settings(&self) -> QueueSettings {
        self.shared.settings
    }

    /// Number of auto-dismiss timers currently armed.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.shared.state.borrow().timers.len()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.state.borrow().disposed
    }

    /// Registers a listener called after every state-changing operation.
    pub fn subscribe(&self, listener: impl Fn(&StoreSnapshot) + 'static) -> Subscription {
        let key = self
            .shared
            .subscribers
            .borrow_mut()
            .insert(Rc::new(listener));
        Subscription {
            store: Rc::downgrade(&self.shared),
            key,
        }
    }

    /// Restarts id numbering at `toast-1`. Test isolation only.
    ///
    /// Ids still held by active toasts are skipped when issuing, so active
    /// ids stay unique.
    pub fn reset_ids(&self) {
        self.shared.state.borrow_mut().ids.reset();
    }

    /// Cancels every pending timer.
    ///
    /// Active toasts are left in place and no notification is sent. The store
    /// stays usable: `add`, `remove` and `clear` keep working, but no timer is
    /// armed any more and none scheduled earlier will fire. Idempotent.
    pub fn dispose(&self) {
        let handles: Vec<TimerHandle> = {
            let mut state = self.shared.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.timers.drain().map(|(_, timer)| timer.handle).collect()
        };
        for handle in &handles {
            self.shared.scheduler.cancel(*handle);
        }
        tracing::debug!(cancelled = handles.len(), "toast store disposed");
    }
}

impl Drop for ToastStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("ToastStore")
            .field("settings", &self.shared.settings)
            .field("toasts", &state.toasts.len())
            .field("timers", &state.timers.len())
            .field("subscribers", &self.shared.subscribers.borrow().len())
            .field("disposed", &state.disposed)
            .finish()
    }
}

/// Disposer returned by [`ToastStore::subscribe`].
#[must_use = "the listener stays registered until `unsubscribe` is called"]
pub struct Subscription {
    store: Weak<Shared>,
    key: u64,
}

impl Subscription {
    /// Removes the listener. A no-op once the store is gone.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.store.upgrade() {
            shared.subscribers.borrow_mut().remove(self.key);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Change, QueueSettings, RemovalReason, ToastId, ToastInput, ToastStore};
    use crate::domain::queue::{DurationMs, MaxToasts};
    use crate::notifications::{Toast, VirtualScheduler};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn store_with(max: usize) -> (ToastStore, VirtualScheduler) {
        let clock = VirtualScheduler::new();
        let settings = QueueSettings::new(
            MaxToasts::new(max),
            DurationMs::new(1_000),
            DurationMs::new(3_000),
        );
        (ToastStore::new(settings, clock.clone()), clock)
    }

    fn titles(store: &ToastStore) -> Vec<String> {
        store.list().iter().map(|t| t.title().to_string()).collect()
    }

    #[test]
    fn new_store_is_empty() {
        let (store, _clock) = store_with(3);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.announcement(), "No notifications");
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn add_uses_variant_default_duration() {
        let (store, clock) = store_with(3);
        let info = store.add(ToastInput::info("saved"));
        let error = store.add(ToastInput::error("failed"));

        assert_eq!(store.get(&info).map(|t| t.duration().value()), Some(1_000));
        assert_eq!(store.get(&error).map(|t| t.duration().value()), Some(3_000));

        clock.advance_ms(1_000);
        assert!(!store.contains(&info));
        assert!(store.contains(&error));
        clock.advance_ms(2_000);
        assert!(store.is_empty());
    }

    #[test]
    fn explicit_duration_overrides_default() {
        let (store, clock) = store_with(3);
        let id = store.add(ToastInput::error("quick").with_duration_ms(50));

        clock.advance_ms(50);
        assert!(!store.contains(&id));
    }

    #[test]
    fn persistent_toast_arms_no_timer() {
        let (store, clock) = store_with(3);
        store.add(ToastInput::info("sticky").persistent());

        assert_eq!(store.pending_timers(), 0);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn negative_duration_is_treated_as_persistent() {
        let (store, clock) = store_with(3);
        let id = store.add(ToastInput::warning("odd").with_duration_ms(-20));

        clock.advance_ms(60_000);
        assert!(store.contains(&id));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn remove_accepts_str_ids() {
        let (store, _clock) = store_with(3);
        store.add(ToastInput::info("A").persistent());

        assert!(store.remove("toast-1"));
        assert!(!store.remove("toast-1"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_cancels_timer() {
        let (store, clock) = store_with(3);
        let id = store.add(ToastInput::info("A"));
        assert_eq!(clock.pending(), 1);

        store.remove(&id);
        assert_eq!(clock.pending(), 0);
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn one_notification_per_add_even_with_eviction() {
        let (store, _clock) = store_with(1);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let _subscription = store.subscribe(move |snapshot| {
            assert!(snapshot.toasts.len() <= 1, "observers never see overflow");
            sink.borrow_mut().push(snapshot.change.clone());
        });

        store.add(ToastInput::info("A").persistent());
        store.add(ToastInput::info("B").persistent());

        let changes = changes.borrow();
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[1],
            Change::Added {
                id: ToastId::from_sequence(2),
                evicted: vec![ToastId::from_sequence(1)],
            }
        );
    }

    #[test]
    fn zero_capacity_evicts_new_toast_immediately() {
        let (store, clock) = store_with(0);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let _subscription = store.subscribe(move |snapshot| {
            sink.borrow_mut().push((snapshot.toasts.len(), snapshot.change.clone()));
        });

        let id = store.add(ToastInput::info("gone"));

        assert!(store.is_empty());
        assert_eq!(clock.pending(), 0);
        assert_eq!(
            *changes.borrow(),
            [(
                0,
                Change::Added {
                    id: id.clone(),
                    evicted: vec![id],
                }
            )]
        );
    }

    #[test]
    fn removing_absent_id_does_not_notify() {
        let (store, _clock) = store_with(3);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _subscription = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.remove("toast-99");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn expiry_notifies_with_reason() {
        let (store, clock) = store_with(3);
        let last = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);
        let _subscription = store.subscribe(move |snapshot| {
            *sink.borrow_mut() = Some(snapshot.change.clone());
        });

        let id = store.add(ToastInput::success("done"));
        clock.advance_ms(1_000);

        assert_eq!(
            *last.borrow(),
            Some(Change::Removed {
                id,
                reason: RemovalReason::Expired,
            })
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (store, _clock) = store_with(3);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.add(ToastInput::info("A").persistent());
        subscription.unsubscribe();
        store.add(ToastInput::info("B").persistent());

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn subscriber_can_reenter_store() {
        let (store, _clock) = store_with(3);
        let store = Rc::new(store);
        let weak = Rc::downgrade(&store);
        let _subscription = store.subscribe(move |snapshot| {
            if let (Some(store), Change::Added { id, .. }) = (weak.upgrade(), &snapshot.change) {
                if snapshot.toasts.iter().any(|t| t.title() == "self-destruct") {
                    store.remove(id);
                }
            }
        });

        store.add(ToastInput::info("self-destruct").persistent());
        assert!(store.is_empty());
    }

    #[test]
    fn reset_ids_skips_ids_still_active() {
        let (store, _clock) = store_with(3);
        store.add(ToastInput::info("A").persistent());
        store.add(ToastInput::info("B").persistent());
        store.remove("toast-1");

        store.reset_ids();
        let first = store.add(ToastInput::info("C").persistent());
        let second = store.add(ToastInput::info("D").persistent());

        assert_eq!(first, "toast-1");
        assert_eq!(second, "toast-3");
        assert_eq!(titles(&store), ["B", "C", "D"]);
    }

    #[test]
    fn clear_removes_all_and_notifies_once() {
        let (store, clock) = store_with(3);
        store.add(ToastInput::info("A"));
        store.add(ToastInput::info("B").persistent());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _subscription = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.clear();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(clock.pending(), 0);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.announcement(), "No notifications");
    }

    #[test]
    fn dispose_cancels_timers_and_keeps_store_usable() {
        let (store, clock) = store_with(3);
        let id = store.add(ToastInput::info("A"));
        store.dispose();
        store.dispose();

        assert!(store.is_disposed());
        assert_eq!(clock.pending(), 0);
        clock.advance_ms(10_000);
        assert!(store.contains(&id));

        let later = store.add(ToastInput::info("B"));
        assert_eq!(clock.pending(), 0);
        assert!(store.remove(&later));
    }

    #[test]
    fn dropping_store_cancels_timers() {
        let (store, clock) = store_with(3);
        store.add(ToastInput::info("A"));
        drop(store);

        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.advance_ms(5_000), 0);
    }

    #[test]
    fn created_at_follows_insertion_order() {
        let (store, _clock) = store_with(3);
        store.add(ToastInput::info("A").persistent());
        store.add(ToastInput::info("B").persistent());

        let sequence: Vec<u64> = store.list().iter().map(Toast::created_at).collect();
        assert_eq!(sequence, [1, 2]);
    }
}
