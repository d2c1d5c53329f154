// SPDX-License-Identifier: MPL-2.0
//! Per-store toast id allocation.

use super::toast::ToastId;

/// Issues `toast-1`, `toast-2`, ... in order.
///
/// Each store owns its issuer, so independent queues never share a counter.
#[derive(Debug, Default)]
pub struct IdIssuer {
    issued: u64,
}

impl IdIssuer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a previously unused id.
    #[allow(clippy::should_implement_trait)] // never exhausts, not an Iterator
    pub fn next(&mut self) -> ToastId {
        self.issued += 1;
        ToastId::from_sequence(self.issued)
    }

    /// Restarts numbering at `toast-1`.
    ///
    /// Ids already handed out may be issued again afterwards; only meant
    /// for test isolation.
    pub fn reset(&mut self) {
        self.issued = 0;
    }

    /// Number of ids issued since creation or the last reset.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
