// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Short-lived cache of block headers

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::BlockNumber;

use crate::cache::{CacheStats, Clock, TtlCache};
use crate::chain::ChainReader;
use crate::errors::RpcError;
use crate::types::block::BlockRef;

/// Block headers by height, shared across requests.
///
/// Headers are treated as final once observed, so a hit is always served as
/// is. The TTL only bounds memory and staleness after an unexpected reorg.
#[derive(Debug)]
pub struct BlockCache {
    inner: TtlCache<BlockNumber, BlockRef>,
}

impl BlockCache {
    /// Default time-to-live
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);
    /// Default capacity
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: TtlCache::new("blocks", ttl).with_max_entries(capacity),
        }
    }

    /// Use `clock` for expiry
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: self.inner.with_clock(clock),
        }
    }

    /// Return the cached header for `number`, fetching it on a miss.
    pub async fn get_or_fetch<C>(
        &self,
        chain: &C,
        number: BlockNumber,
    ) -> Result<BlockRef, RpcError>
    where
        C: ChainReader + ?Sized,
    {
        if let Some(block) = self.inner.get(&number).await {
            return Ok(block);
        }

        let block = chain.block(number).await?;
        self.inner.insert(number, block).await;
        Ok(block)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.stats().await
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL, Self::DEFAULT_CAPACITY)
    }
}
