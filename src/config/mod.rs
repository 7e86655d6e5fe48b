// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Service configuration
//!
//! [`SwapscanConfig`] holds everything the pipeline needs besides the RPC
//! endpoint: the quote asset, the tracked pools, range limits, concurrency,
//! and cache sizing. Build one in code with [`SwapscanConfigBuilder`] or load
//! it from the environment with [`SwapscanConfig::from_env`].
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::address;
//! use swapscan::SwapscanConfigBuilder;
//!
//! let config = SwapscanConfigBuilder::new()
//!     .chain_id(80069)
//!     .tracked_pool(address!("f7907d94a1faa79f3f552a9f3ca2b82a27d31f09"))
//!     .max_block_range(1_000)
//!     .build();
//!
//! assert_eq!(config.tracked_pools.len(), 1);
//! assert_eq!(config.max_block_range.as_u64(), 1_000);
//! ```
//!
//! # Environment
//!
//! | Variable          | Field             | Default        |
//! |-------------------|-------------------|----------------|
//! | `WBERA_ADDRESS`   | `quote_asset`     | WBERA mainnet  |
//! | `CHAIN_ID`        | `chain_id`        | 80094          |
//! | `CORES`           | `tracked_pools`   | none           |
//! | `MAX_BLOCK_RANGE` | `max_block_range` | 2000           |
//! | `LOG_CHUNK_SIZE`  | `log_chunk_size`  | 2000           |
//! | `MAX_IN_FLIGHT`   | `max_in_flight`   | 16             |

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;

use crate::address::parse_address;
use crate::assets::MetadataCache;
use crate::blocks::{BlockCache, MaxBlockRange};
use crate::errors::SwapscanError;
use crate::types::asset::AssetDescriptor;
use crate::types::tokens::TokenDecimals;

pub mod constants;

use constants::{wbera, DEFAULT_CHAIN_ID, DEFAULT_DEX_KEY, DEFAULT_FEE_BPS, DEFAULT_MAX_IN_FLIGHT};

/// Configuration for the swap pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapscanConfig {
    /// Quote asset every pool trades against
    pub quote_asset: Address,
    /// Chain id reported in descriptor metadata
    pub chain_id: u64,
    /// Pools whose swaps are served, in registry order
    pub tracked_pools: Vec<Address>,
    /// DEX identifier reported for pools
    pub dex_key: String,
    /// Pool fee in basis points
    pub fee_bps: u32,
    /// Largest `toBlock - fromBlock` a caller may request
    pub max_block_range: MaxBlockRange,
    /// Largest block span of one upstream log query
    pub log_chunk_size: MaxBlockRange,
    /// Concurrent upstream lookups per pool and pipeline stage
    pub max_in_flight: usize,
    /// Lifetime of cached asset descriptors
    pub metadata_ttl: Duration,
    /// Maximum cached asset descriptors
    pub metadata_capacity: usize,
    /// Lifetime of cached block headers
    pub block_cache_ttl: Duration,
    /// Maximum cached block headers
    pub block_cache_capacity: usize,
}

impl Default for SwapscanConfig {
    fn default() -> Self {
        Self {
            quote_asset: wbera::ADDRESS,
            chain_id: DEFAULT_CHAIN_ID,
            tracked_pools: Vec::new(),
            dex_key: DEFAULT_DEX_KEY.to_string(),
            fee_bps: DEFAULT_FEE_BPS,
            max_block_range: MaxBlockRange::DEFAULT,
            log_chunk_size: MaxBlockRange::DEFAULT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            metadata_ttl: MetadataCache::DEFAULT_TTL,
            metadata_capacity: MetadataCache::DEFAULT_CAPACITY,
            block_cache_ttl: BlockCache::DEFAULT_TTL,
            block_cache_capacity: BlockCache::DEFAULT_CAPACITY,
        }
    }
}

impl SwapscanConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, SwapscanError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SwapscanError> {
        let mut builder = SwapscanConfigBuilder::new();

        if let Some(raw) = lookup("WBERA_ADDRESS") {
            let quote = parse_address(&raw)
                .map_err(|_| SwapscanError::invalid_config("WBERA_ADDRESS", &raw))?;
            builder = builder.quote_asset(quote);
        }
        if let Some(raw) = lookup("CHAIN_ID") {
            builder = builder.chain_id(parse_number("CHAIN_ID", &raw)?);
        }
        if let Some(raw) = lookup("CORES") {
            builder = builder.tracked_pools(parse_pools(&raw)?);
        }
        if let Some(raw) = lookup("MAX_BLOCK_RANGE") {
            builder = builder.max_block_range(parse_number("MAX_BLOCK_RANGE", &raw)?);
        }
        if let Some(raw) = lookup("LOG_CHUNK_SIZE") {
            builder = builder.log_chunk_size(parse_number("LOG_CHUNK_SIZE", &raw)?);
        }
        if let Some(raw) = lookup("MAX_IN_FLIGHT") {
            builder = builder.max_in_flight(parse_number("MAX_IN_FLIGHT", &raw)?);
        }

        Ok(builder.build())
    }

    /// Hard-coded descriptor of the quote asset
    pub fn quote_descriptor(&self) -> AssetDescriptor {
        AssetDescriptor::new(
            self.quote_asset,
            wbera::NAME,
            wbera::SYMBOL,
            TokenDecimals::new(wbera::DECIMALS),
            AssetDescriptor::DEFAULT_TOTAL_SUPPLY,
            self.chain_id,
        )
    }

    /// Returns true if `pool` is in the registry
    pub fn is_tracked(&self, pool: &Address) -> bool {
        self.tracked_pools.contains(pool)
    }
}

fn parse_number<T: FromStr>(key: &'static str, raw: &str) -> Result<T, SwapscanError> {
    raw.trim()
        .parse()
        .map_err(|_| SwapscanError::invalid_config(key, raw))
}

/// Parse a comma-separated pool list, skipping blanks and duplicates.
fn parse_pools(raw: &str) -> Result<Vec<Address>, SwapscanError> {
    let mut pools = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let pool = parse_address(item).map_err(|_| SwapscanError::invalid_config("CORES", item))?;
        if !pools.contains(&pool) {
            pools.push(pool);
        }
    }
    Ok(pools)
}

/// Builder for [`SwapscanConfig`]
#[derive(Debug, Clone, Default)]
pub struct SwapscanConfigBuilder {
    config: SwapscanConfig,
}

impl SwapscanConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quote_asset(mut self, quote_asset: Address) -> Self {
        self.config.quote_asset = quote_asset;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    /// Add one pool to the registry
    pub fn tracked_pool(mut self, pool: Address) -> Self {
        if !self.config.tracked_pools.contains(&pool) {
            self.config.tracked_pools.push(pool);
        }
        self
    }

    /// Replace the registry
    pub fn tracked_pools(mut self, pools: impl IntoIterator<Item = Address>) -> Self {
        self.config.tracked_pools.clear();
        for pool in pools {
            self = self.tracked_pool(pool);
        }
        self
    }

    pub fn dex_key(mut self, dex_key: impl Into<String>) -> Self {
        self.config.dex_key = dex_key.into();
        self
    }

    pub fn fee_bps(mut self, fee_bps: u32) -> Self {
        self.config.fee_bps = fee_bps;
        self
    }

    pub fn max_block_range(mut self, max: u64) -> Self {
        self.config.max_block_range = MaxBlockRange::new(max);
        self
    }

    pub fn log_chunk_size(mut self, blocks: u64) -> Self {
        self.config.log_chunk_size = MaxBlockRange::new(blocks);
        self
    }

    /// Concurrent upstream lookups per pool and pipeline stage. Zero is treated as one.
    pub fn max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.config.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn metadata_cache(mut self, ttl: Duration, capacity: usize) -> Self {
        self.config.metadata_ttl = ttl;
        self.config.metadata_capacity = capacity;
        self
    }

    pub fn block_cache(mut self, ttl: Duration, capacity: usize) -> Self {
        self.config.block_cache_ttl = ttl;
        self.config.block_cache_capacity = capacity;
        self
    }

    pub fn build(self) -> SwapscanConfig {
        self.config
    }
}
