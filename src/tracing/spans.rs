// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span constructors for pipeline operations.
//!
//! Each instrumented operation gets a helper here instead of an
//! `#[instrument]` attribute, keeping field selection out of the business
//! logic. Spans are attached to futures with [`tracing::Instrument`]:
//!
//! ```rust,ignore
//! async fn my_operation(&self, pool: Address) -> Result<T> {
//!     async move {
//!         // business logic
//!     }
//!     .instrument(spans::my_operation(pool))
//!     .await
//! }
//! ```

use alloy_primitives::{Address, BlockNumber};
use tracing::{Level, Span};

/// Root span of an events request.
///
/// Children: one `process_pool` span per tracked pool
#[inline]
pub(crate) fn resolve_events(from_block: BlockNumber, to_block: BlockNumber, pools: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "swapscan.resolve_events",
        from_block,
        to_block,
        pools,
    )
}

/// Fetch, decode and enrich the swaps of one pool.
///
/// Parent: `resolve_events`
#[inline]
pub(crate) fn process_pool(pool: Address, from_block: BlockNumber, to_block: BlockNumber) -> Span {
    tracing::debug_span!(
        "swapscan.process_pool",
        pool = %pool,
        from_block,
        to_block,
    )
}

/// Block and sender resolution for a batch of logs.
///
/// Parent: `process_pool`
#[inline]
pub(crate) fn resolve_context(logs: usize, blocks: usize, transactions: usize) -> Span {
    tracing::debug_span!(
        "swapscan.resolve_context",
        logs,
        blocks,
        transactions,
    )
}

/// Reserve snapshots for the last swap of each block.
///
/// Parent: `process_pool`
#[inline]
pub(crate) fn attach_reserves(pool: Address, blocks: usize) -> Span {
    tracing::debug_span!("swapscan.attach_reserves", pool = %pool, blocks)
}

#[inline]
pub(crate) fn resolve_asset(token: Address) -> Span {
    tracing::debug_span!("swapscan.resolve_asset", token = %token)
}

#[inline]
pub(crate) fn resolve_pool(pool: Address) -> Span {
    tracing::debug_span!("swapscan.resolve_pool", pool = %pool)
}
