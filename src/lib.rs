// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Trade-event normalization for tracked liquidity pools.
//!
//! Reads `Swap` logs from a set of tracked pools over a block range, resolves
//! their block timestamps and senders, decodes them into asset-ordered
//! [`TradeEvent`]s with a native price, and attaches a reserve snapshot to
//! the last swap of each block. The [`api`] module serves the results over
//! HTTP.

pub mod address;
pub mod api;
mod assets;
mod blocks;
pub mod bootstrap;
pub mod cache;
mod chain;
mod config;
mod errors;
mod pipeline;
pub mod provider;
pub(crate) mod tracing;
pub mod transport;
mod types;

pub use assets::MetadataCache;
pub use blocks::{BlockCache, BlockRange, ChunkIterator, MaxBlockRange, RangeGuard};
pub use chain::{AlloyChainReader, ChainReader, IERC20Metadata, IOsitoCore};
pub use config::{constants, SwapscanConfig, SwapscanConfigBuilder};
pub use errors::{ErrorKind, RpcError, SwapscanError};
pub use pipeline::{
    orient_reserves, BatchContext, BatchContextResolver, EventAggregator, ReserveSnapshotAttacher,
    SwapDecoder,
};
pub use types::asset::{AssetDescriptor, ChainMetadata, PoolDescriptor};
pub use types::block::BlockRef;
pub use types::event::{PoolReserves, PriceNative, RawSwapLog, Reserves, SwapLegs, TradeEvent};
pub use types::tokens::{TokenAmount, TokenDecimals};
