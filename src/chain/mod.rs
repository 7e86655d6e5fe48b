// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain access
//!
//! [`ChainReader`] is the narrow set of reads the pipeline needs from a node:
//! block headers, transaction senders, swap logs of a pool, and a handful of
//! view calls. [`AlloyChainReader`] implements it on top of an alloy
//! [`Provider`](alloy_provider::Provider); tests substitute an in-memory
//! implementation.

mod abi;
mod alloy;

pub use abi::{IERC20Metadata, IOsitoCore};
pub use alloy::AlloyChainReader;

use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use async_trait::async_trait;

use crate::errors::RpcError;
use crate::types::block::BlockRef;
use crate::types::event::{PoolReserves, RawSwapLog};

/// Read-only view of the chain used by the swap pipeline.
///
/// Every method is a single upstream round-trip (or a chunked series of them
/// for [`swap_logs`](ChainReader::swap_logs)). None of them retry.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Header of the current chain head
    async fn latest_block(&self) -> Result<BlockRef, RpcError>;

    /// Header of the block at `number`
    async fn block(&self, number: BlockNumber) -> Result<BlockRef, RpcError>;

    /// Sender of the transaction `tx_hash`
    async fn transaction_sender(&self, tx_hash: TxHash) -> Result<Address, RpcError>;

    /// Decoded `Swap` logs emitted by `pool` in `[from, to]`, inclusive.
    ///
    /// Logs that fail to decode are skipped.
    async fn swap_logs(
        &self,
        pool: Address,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<RawSwapLog>, RpcError>;

    /// The non-quote token traded by `pool`
    async fn pool_token(&self, pool: Address) -> Result<Address, RpcError>;

    /// Reserves of `pool` as of the end of `block`
    async fn pool_reserves(
        &self,
        pool: Address,
        block: BlockNumber,
    ) -> Result<PoolReserves, RpcError>;

    async fn token_name(&self, token: Address) -> Result<String, RpcError>;

    async fn token_symbol(&self, token: Address) -> Result<String, RpcError>;

    async fn token_decimals(&self, token: Address) -> Result<u8, RpcError>;

    async fn token_total_supply(&self, token: Address) -> Result<U256, RpcError>;
}
