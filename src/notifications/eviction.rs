// SPDX-License-Identifier: MPL-2.0
//! Overflow rule applied after every insertion.
//!
//! Strict FIFO: the oldest toasts go first, regardless of variant. There is
//! no pinning or priority.

use super::toast::{Toast, ToastId};
use crate::domain::queue::MaxToasts;
use std::collections::VecDeque;

/// Returns the ids to evict, oldest first, so that `toasts` fits `capacity`.
///
/// With a capacity of zero every toast is selected, including one that was
/// just inserted.
#[must_use]
pub fn select_victims(toasts: &VecDeque<Toast>, capacity: MaxToasts) -> Vec<ToastId> {
    let overflow = toasts.len().saturating_sub(capacity.value());
    toasts
        .iter()
        .take(overflow)
        .map(|toast| toast.id().clone())
        .collect()
}
