// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and the rules that keep them valid.
//! It has no dependencies on external crates (except `std`) so the queue core
//! and the configuration layer can share them without pulling in serde.
//!
//! # Modules
//!
//! - [`queue`]: Queue value objects ([`DurationMs`](queue::DurationMs),
//!   [`MaxToasts`](queue::MaxToasts))

pub mod queue;
