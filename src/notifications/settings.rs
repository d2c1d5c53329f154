// SPDX-License-Identifier: MPL-2.0
//! Construction-time settings for a [`ToastStore`](super::ToastStore).

use super::toast::Variant;
use crate::domain::queue::{DurationMs, MaxToasts};

/// Capacity and default durations, fixed for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSettings {
    max_toasts: MaxToasts,
    default_duration: DurationMs,
    error_duration: DurationMs,
}

impl QueueSettings {
    /// Creates settings from validated values.
    ///
    /// Capacity and durations are used as given; configuration limits are
    /// applied earlier, by [`Config::queue_settings`](crate::config::Config::queue_settings).
    /// The error duration is raised to at least the informational duration.
    /// A persistent informational duration makes errors persistent too.
    #[must_use]
    pub fn new(
        max_toasts: MaxToasts,
        default_duration: DurationMs,
        error_duration: DurationMs,
    ) -> Self {
        let error_duration = if default_duration.is_persistent() || error_duration.is_persistent() {
            DurationMs::PERSISTENT
        } else {
            error_duration.max(default_duration)
        };
        Self {
            max_toasts,
            default_duration,
            error_duration,
        }
    }

    /// Returns a copy with a different capacity.
    #[must_use]
    pub fn with_max_toasts(mut self, max_toasts: MaxToasts) -> Self {
        self.max_toasts = max_toasts;
        self
    }

    #[must_use]
    pub fn max_toasts(&self) -> MaxToasts {
        self.max_toasts
    }

    #[must_use]
    pub fn default_duration(&self) -> DurationMs {
        self.default_duration
    }

    #[must_use]
    pub fn error_duration(&self) -> DurationMs {
        self.error_duration
    }

    /// Returns the auto-dismiss delay used when an `add` does not override it.
    #[must_use]
    pub fn duration_for(&self, variant: Variant) -> DurationMs {
        match variant {
            Variant::Error => self.error_duration,
            Variant::Success | Variant::Warning | Variant::Info | Variant::Neutral => {
                self.default_duration
            }
        }
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self::new(
            MaxToasts::default(),
            DurationMs::new(crate::domain::queue::duration_bounds::DEFAULT_MS),
            DurationMs::new(crate::domain::queue::duration_bounds::DEFAULT_ERROR_MS),
        )
    }
}
