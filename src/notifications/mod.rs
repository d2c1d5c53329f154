// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! This module provides the lifecycle core behind toast/snackbar style
//! notifications: a bounded list of short-lived messages with per-toast
//! auto-dismiss timers, FIFO eviction and change subscriptions. Rendering is
//! left to whatever UI layer wraps the store.
//!
//! # Components
//!
//! - [`toast`] - `Toast`, `ToastInput` and the `Variant` enum
//! - [`store`] - `ToastStore` for insertion, removal and timer bookkeeping
//! - [`eviction`] - FIFO overflow rule
//! - [`scheduler`] - `Scheduler` trait with virtual and tokio implementations
//! - [`announcement`] - Screen-reader summary text
//!
//! # Usage
//!
//! ```
//! use toast_queue::notifications::{QueueSettings, ToastInput, ToastStore, VirtualScheduler};
//!
//! let clock = VirtualScheduler::new();
//! let store = ToastStore::new(QueueSettings::default(), clock.clone());
//!
//! let id = store.add(ToastInput::success("Image saved").with_duration_ms(100));
//! assert_eq!(id, "toast-1");
//! assert_eq!(store.announcement(), "1 notification");
//!
//! clock.advance_ms(100);
//! assert!(store.is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - Exactly one notification per `add`, even when it evicts older toasts
//! - Error toasts default to a longer duration than the other variants
//! - `duration_ms == 0` means the toast stays until dismissed or evicted

pub mod announcement;
pub mod eviction;
mod ids;
pub mod scheduler;
mod settings;
pub mod store;
mod subscription;
pub mod toast;

pub use ids::IdIssuer;
pub use scheduler::{Scheduler, TimerCallback, TimerHandle, TokioScheduler, VirtualScheduler};
pub use settings::QueueSettings;
pub use store::{Subscription, ToastStore};
pub use subscription::{Change, RemovalReason, StoreSnapshot};
pub use toast::{Action, Toast, ToastId, ToastInput, Variant};
