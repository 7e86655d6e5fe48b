// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Generic in-memory caching with TTL expiry and LRU capacity limits.
//!
//! [`TtlCache`] is the building block behind both the asset metadata cache and
//! the block header cache. Time is read through a [`Clock`] so expiry can be
//! driven deterministically in tests with [`ManualClock`].

mod clock;
mod memory;
mod stats;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::TtlCache;
pub use stats::CacheStats;
pub use types::{AccessSequence, TimestampMillis};
