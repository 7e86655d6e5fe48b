// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block ranges and block header caching
//!
//! - [`RangeGuard`] validates caller-supplied `[fromBlock, toBlock]` ranges
//! - [`MaxBlockRange`] bounds range spans and splits log queries into chunks
//! - [`BlockCache`] keeps recently fetched headers shared across requests

mod cache;
mod range;

pub use cache::BlockCache;
pub use range::{BlockRange, ChunkIterator, MaxBlockRange, RangeGuard};
