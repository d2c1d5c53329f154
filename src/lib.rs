// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is the state core of a toast notification system.
//!
//! It keeps a bounded, time-expiring list of notifications with FIFO
//! eviction, cancellable auto-dismiss timers and change subscriptions, and
//! leaves rendering to the UI layer that wraps it.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
