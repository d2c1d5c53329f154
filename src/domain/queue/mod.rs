// SPDX-License-Identifier: MPL-2.0
//! Queue domain types.
//!
//! Value objects for toast durations and queue capacity, independent of any
//! scheduler or presentation layer.

pub mod newtypes;

pub use newtypes::{capacity_bounds, duration_bounds, DurationMs, MaxToasts};
