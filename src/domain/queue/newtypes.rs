// SPDX-License-Identifier: MPL-2.0
//! Queue newtypes.
//!
//! This module provides type-safe wrappers for queue values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Duration Bounds
// =============================================================================

/// Configured duration bounds (0 = persistent, up to 10 minutes).
///
/// `MAX_MS` only limits values read from configuration; a per-toast override
/// is taken as given.
pub mod duration_bounds {
    /// Persistent toasts are never auto-dismissed.
    pub const PERSISTENT: u64 = 0;
    /// Maximum configured auto-dismiss delay in milliseconds.
    pub const MAX_MS: u64 = 600_000;
    /// Default delay for informational variants.
    pub const DEFAULT_MS: u64 = 4_000;
    /// Default delay for the error variant.
    pub const DEFAULT_ERROR_MS: u64 = 8_000;
}

// =============================================================================
// DurationMs
// =============================================================================

/// Auto-dismiss delay in milliseconds.
///
/// Zero means the toast is persistent. Negative inputs are clamped to zero
/// instead of being rejected: a malformed duration still lets the toast
/// appear, it just stays until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DurationMs(u64);

impl DurationMs {
    /// A duration that never expires.
    pub const PERSISTENT: Self = Self(duration_bounds::PERSISTENT);

    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from a signed value, clamping negatives to zero.
    #[must_use]
    pub fn from_signed(millis: i64) -> Self {
        Self::new(u64::try_from(millis).unwrap_or(duration_bounds::PERSISTENT))
    }

    /// Creates a duration from a configured value, clamping to `0..=MAX_MS`.
    #[must_use]
    pub fn clamped(millis: i64) -> Self {
        Self(Self::from_signed(millis).0.min(duration_bounds::MAX_MS))
    }

    /// Returns the raw millisecond value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns whether this duration disables auto-dismiss.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.0 == duration_bounds::PERSISTENT
    }

    /// Returns the delay as a [`Duration`], or `None` when persistent.
    #[must_use]
    pub fn as_delay(self) -> Option<Duration> {
        (!self.is_persistent()).then(|| Duration::from_millis(self.0))
    }
}

// =============================================================================
// Capacity Bounds
// =============================================================================

/// Configured capacity bounds (0 to 50 toasts).
pub mod capacity_bounds {
    /// Minimum capacity. Zero is accepted: every toast is evicted on insert.
    pub const MIN: usize = 0;
    /// Maximum configured capacity.
    pub const MAX: usize = 50;
    /// Default capacity.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// MaxToasts
// =============================================================================

/// Maximum number of simultaneously active toasts.
///
/// A capacity built in code is used as given. Only [`MaxToasts::clamped`],
/// used for configuration files, applies the `0..=50` range.
///
/// # Example
///
/// ```
/// use toast_queue::domain::queue::MaxToasts;
///
/// assert_eq!(MaxToasts::new(100).value(), 100);
///
/// // Configured values outside range are clamped
/// assert_eq!(MaxToasts::clamped(500).value(), 50);
/// assert_eq!(MaxToasts::from_signed(-2).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxToasts(usize);

impl MaxToasts {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// Creates a capacity from a signed value, clamping negatives to zero.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        Self::new(usize::try_from(value).unwrap_or(capacity_bounds::MIN))
    }

    /// Creates a capacity from a configured value, clamping to valid range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self(Self::from_signed(value).0.clamp(capacity_bounds::MIN, capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true when no toast can stay in the queue.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.0 == 0
    }
}

impl Default for MaxToasts {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT)
    }
}
