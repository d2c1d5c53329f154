// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used by the configuration layer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Capacity**: How many toasts may be active at once
//! - **Durations**: Auto-dismiss delays per variant class

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default number of simultaneously active toasts.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Upper bound for the configured capacity.
pub const MAX_TOASTS_LIMIT: usize = 50;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Default auto-dismiss delay for success, info, warning and neutral toasts (ms).
pub const DEFAULT_DURATION_MS: u64 = 4_000;

/// Default auto-dismiss delay for error toasts (ms).
/// Errors stay on screen longer than informational toasts.
pub const DEFAULT_ERROR_DURATION_MS: u64 = 8_000;

/// Upper bound for any configured duration (ms).
pub const MAX_DURATION_MS: u64 = 600_000;
