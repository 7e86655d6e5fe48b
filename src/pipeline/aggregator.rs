// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Request-level entry points of the pipeline

use std::sync::Arc;

use alloy_primitives::{Address, BlockNumber};
use futures::future::try_join_all;
use futures::FutureExt;
use tracing::{debug, error, info, Instrument};

use super::context::BatchContextResolver;
use super::decoder::SwapDecoder;
use super::reserves::ReserveSnapshotAttacher;
use crate::address::canonical;
use crate::assets::MetadataCache;
use crate::blocks::{BlockCache, BlockRange, RangeGuard};
use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::chain::ChainReader;
use crate::config::SwapscanConfig;
use crate::errors::{RpcError, SwapscanError};
use crate::tracing::spans;
use crate::types::asset::{AssetDescriptor, PoolDescriptor};
use crate::types::block::BlockRef;
use crate::types::event::TradeEvent;

/// Serves normalized swap events, asset descriptors and pool descriptors.
///
/// Holds the caches shared across requests. Each request is otherwise
/// independent.
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use swapscan::{AlloyChainReader, EventAggregator, SwapscanConfig};
///
/// let chain = Arc::new(AlloyChainReader::new(provider, config.log_chunk_size));
/// let aggregator = EventAggregator::new(chain, config);
///
/// let events = aggregator.resolve_events(6_063_000, 6_063_155).await?;
/// ```
#[derive(Debug)]
pub struct EventAggregator<C: ?Sized> {
    config: SwapscanConfig,
    range_guard: RangeGuard,
    metadata: MetadataCache,
    blocks: BlockCache,
    pools: TtlCache<Address, PoolDescriptor>,
    chain: Arc<C>,
}

impl<C> EventAggregator<C>
where
    C: ChainReader + ?Sized,
{
    pub fn new(chain: Arc<C>, config: SwapscanConfig) -> Self {
        Self::with_clock(chain, config, Arc::new(SystemClock))
    }

    /// Build with `clock` driving every cache's expiry
    pub fn with_clock(chain: Arc<C>, config: SwapscanConfig, clock: Arc<dyn Clock>) -> Self {
        let metadata = MetadataCache::new(
            config.quote_descriptor(),
            config.chain_id,
            config.metadata_ttl,
            config.metadata_capacity,
        )
        .with_clock(Arc::clone(&clock));
        let blocks = BlockCache::new(config.block_cache_ttl, config.block_cache_capacity)
            .with_clock(Arc::clone(&clock));
        // A pool's token never changes, so descriptors share the metadata TTL
        let pools = TtlCache::new("pools", config.metadata_ttl)
            .with_max_entries(config.tracked_pools.len().max(1))
            .with_clock(clock);

        Self {
            range_guard: RangeGuard::new(config.max_block_range),
            config,
            metadata,
            blocks,
            pools,
            chain,
        }
    }

    pub fn config(&self) -> &SwapscanConfig {
        &self.config
    }

    /// Current chain head
    pub async fn latest_block(&self) -> Result<BlockRef, SwapscanError> {
        Ok(self.chain.latest_block().await?)
    }

    /// Asset descriptor for `token`. The quote asset is served without any
    /// upstream call.
    pub async fn resolve_asset(&self, token: Address) -> Result<AssetDescriptor, SwapscanError> {
        Ok(self
            .metadata
            .get(self.chain.as_ref(), token)
            .instrument(spans::resolve_asset(token))
            .await)
    }

    /// Descriptor of a tracked pool.
    ///
    /// # Errors
    ///
    /// [`SwapscanError::PoolNotTracked`] for addresses outside the registry,
    /// [`SwapscanError::UpstreamUnavailable`] if the pool's token cannot be read
    /// or is the quote asset itself.
    pub async fn resolve_pool(&self, pool: Address) -> Result<PoolDescriptor, SwapscanError> {
        if !self.config.is_tracked(&pool) {
            return Err(SwapscanError::pool_not_tracked(canonical(&pool)));
        }

        async {
            if let Some(descriptor) = self.pools.get(&pool).await {
                return Ok(descriptor);
            }

            let token = self.chain.pool_token(pool).await?;
            if token == self.config.quote_asset {
                return Err(RpcError::PoolTokenIsQuote { pool, token }.into());
            }
            let descriptor = PoolDescriptor::new(
                pool,
                token,
                self.config.quote_asset,
                self.config.dex_key.clone(),
                self.config.fee_bps,
                self.config.chain_id,
            );
            self.pools.insert(pool, descriptor.clone()).await;
            Ok(descriptor)
        }
        .instrument(spans::resolve_pool(pool))
        .await
    }

    /// Normalized swaps of every tracked pool in `[from, to]`, sorted by
    /// `(blockNumber, txnIndex, eventIndex)`.
    ///
    /// # Errors
    ///
    /// Range validation errors, or [`SwapscanError::UpstreamUnavailable`] if the
    /// chain head, a pool's token or a pool's logs cannot be fetched.
    pub async fn resolve_events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<TradeEvent>, SwapscanError> {
        let span = spans::resolve_events(from, to, self.config.tracked_pools.len());

        async {
            let range = self.range_guard.validate(self.chain.as_ref(), from, to).await?;

            let per_pool = try_join_all(
                self.config
                    .tracked_pools
                    .iter()
                    .copied()
                    .map(|pool| self.process_pool(pool, range).boxed()),
            )
            .await
            .inspect_err(|e| error!(%range, error = %e, "Failed to resolve events"))?;

            let mut events: Vec<TradeEvent> = per_pool.into_iter().flatten().collect();
            events.sort_by_key(TradeEvent::sort_key);

            info!(%range, events = events.len(), "Resolved events");
            Ok(events)
        }
        .instrument(span)
        .await
    }

    /// Statistics of the asset metadata cache
    pub async fn metadata_stats(&self) -> CacheStats {
        self.metadata.stats().await
    }

    /// Statistics of the block header cache
    pub async fn block_cache_stats(&self) -> CacheStats {
        self.blocks.stats().await
    }

    async fn process_pool(
        &self,
        pool: Address,
        range: BlockRange,
    ) -> Result<Vec<TradeEvent>, SwapscanError> {
        let span = spans::process_pool(pool, range.from, range.to);

        async {
            let descriptor = self.resolve_pool(pool).await?;
            let logs = self.chain.swap_logs(pool, range.from, range.to).await?;
            if logs.is_empty() {
                debug!("No swaps in range");
                return Ok(Vec::new());
            }

            let chain = self.chain.as_ref();
            let resolver =
                BatchContextResolver::new(chain, &self.blocks, self.config.max_in_flight);
            let (token_decimals, quote_decimals, context) = futures::join!(
                self.metadata.decimals(chain, descriptor.token),
                self.metadata.decimals(chain, descriptor.quote()),
                resolver.resolve(&logs),
            );

            let decoder = SwapDecoder::new(&descriptor, token_decimals, quote_decimals);
            let mut events: Vec<TradeEvent> = logs
                .iter()
                .filter_map(|log| {
                    let block = context.block(log.block_number)?;
                    decoder.decode(log, block, context.maker(&log.tx_hash))
                })
                .collect();

            ReserveSnapshotAttacher::new(
                chain,
                &descriptor,
                token_decimals,
                quote_decimals,
                self.config.max_in_flight,
            )
            .attach(&mut events)
            .await;

            debug!(logs = logs.len(), events = events.len(), "Processed pool");
            Ok(events)
        }
        .instrument(span)
        .await
    }
}
