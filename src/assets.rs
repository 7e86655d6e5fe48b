// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Asset metadata resolution and caching
//!
//! [`MetadataCache::get`] turns a token address into an [`AssetDescriptor`].
//! The four ERC-20 getters are queried concurrently and each one falls back to
//! a fixed default on failure, so a token with a broken `name()` still gets a
//! usable descriptor. Results are cached for 24 hours by default.
//!
//! The quote asset is configured up front and never queried.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, TtlCache};
use crate::chain::ChainReader;
use crate::errors::RpcError;
use crate::types::asset::AssetDescriptor;
use crate::types::tokens::TokenDecimals;

/// Resolve a per-field lookup to its default, logging the failure.
fn or_default<T>(
    token: Address,
    field: &'static str,
    result: Result<T, RpcError>,
    default: T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(?token, field, error = %e, "Token metadata call failed, using default");
            default
        }
    }
}

/// TTL cache of asset descriptors with single-flight fetching.
#[derive(Debug)]
pub struct MetadataCache {
    chain_id: u64,
    quote: AssetDescriptor,
    cache: TtlCache<Address, AssetDescriptor>,
    /// One lock per address currently being fetched
    in_flight: Mutex<HashMap<Address, Arc<Mutex<()>>>>,
}

impl MetadataCache {
    /// Default time-to-live
    pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
    /// Default capacity
    pub const DEFAULT_CAPACITY: usize = 10_000;

    /// Create a cache for `chain_id` whose quote asset is `quote`.
    pub fn new(quote: AssetDescriptor, chain_id: u64, ttl: Duration, capacity: usize) -> Self {
        Self {
            chain_id,
            quote,
            cache: TtlCache::new("asset-metadata", ttl).with_max_entries(capacity),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Use `clock` for expiry
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: self.cache.with_clock(clock),
            ..self
        }
    }

    /// The hard-coded quote asset descriptor
    pub fn quote(&self) -> &AssetDescriptor {
        &self.quote
    }

    /// Descriptor for `token`, from cache or freshly fetched.
    ///
    /// Never fails: unreachable fields take their documented defaults.
    pub async fn get<C>(&self, chain: &C, token: Address) -> AssetDescriptor
    where
        C: ChainReader + ?Sized,
    {
        if token == self.quote.address {
            return self.quote.clone();
        }

        if let Some(descriptor) = self.cache.get(&token).await {
            return descriptor;
        }

        let lock = {
            let mut in_flight = self.in_flight.lock().await;
            Arc::clone(in_flight.entry(token).or_default())
        };

        let descriptor = {
            let _guard = lock.lock().await;

            // Another caller may have finished the fetch while we waited
            match self.cache.get(&token).await {
                Some(descriptor) => descriptor,
                None => {
                    let descriptor = self.fetch(chain, token).await;
                    self.cache.insert(token, descriptor.clone()).await;
                    descriptor
                }
            }
        };

        let mut in_flight = self.in_flight.lock().await;
        drop(lock);
        // Only the map still holds the lock: nobody else is waiting on it
        if in_flight.get(&token).map(Arc::strong_count) == Some(1) {
            in_flight.remove(&token);
        }

        descriptor
    }

    /// Decimals for `token`, going through the same cache as [`get`](Self::get).
    pub async fn decimals<C>(&self, chain: &C, token: Address) -> TokenDecimals
    where
        C: ChainReader + ?Sized,
    {
        self.get(chain, token).await.decimals
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Addresses with a fetch lock currently registered
    pub async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    async fn fetch<C>(&self, chain: &C, token: Address) -> AssetDescriptor
    where
        C: ChainReader + ?Sized,
    {
        debug!(?token, "Fetching token metadata");

        let (name, symbol, decimals, total_supply) = tokio::join!(
            chain.token_name(token),
            chain.token_symbol(token),
            chain.token_decimals(token),
            chain.token_total_supply(token),
        );

        AssetDescriptor::new(
            token,
            or_default(token, "name", name, AssetDescriptor::DEFAULT_NAME.to_string()),
            or_default(token, "symbol", symbol, AssetDescriptor::DEFAULT_SYMBOL.to_string()),
            or_default(
                token,
                "decimals",
                decimals.map(TokenDecimals::new),
                TokenDecimals::STANDARD,
            ),
            or_default(
                token,
                "totalSupply",
                total_supply.map(|supply| supply.to_string()),
                AssetDescriptor::DEFAULT_TOTAL_SUPPLY.to_string(),
            ),
            self.chain_id,
        )
    }
}
