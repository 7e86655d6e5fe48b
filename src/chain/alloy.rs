// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainReader`] backed by an alloy provider

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_network::TransactionResponse;
use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{Filter, Log};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::abi::{IERC20Metadata, IOsitoCore};
use super::ChainReader;
use crate::blocks::MaxBlockRange;
use crate::errors::RpcError;
use crate::types::block::BlockRef;
use crate::types::event::{PoolReserves, RawSwapLog};

/// Chain reader over any Ethereum-network alloy [`Provider`].
///
/// Log queries wider than `log_chunk_size` blocks are split into consecutive
/// chunks and fetched one after another. A failing chunk fails the whole
/// query: a partial log set would silently drop trades.
#[derive(Debug, Clone)]
pub struct AlloyChainReader<P> {
    provider: P,
    log_chunk_size: MaxBlockRange,
}

impl<P: Provider> AlloyChainReader<P> {
    pub fn new(provider: P, log_chunk_size: MaxBlockRange) -> Self {
        Self {
            provider,
            log_chunk_size,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn block_by_tag(&self, tag: BlockNumberOrTag) -> Result<BlockRef, RpcError> {
        let block = self
            .provider
            .get_block_by_number(tag)
            .await
            .map_err(|e| match tag {
                BlockNumberOrTag::Number(n) => RpcError::get_block_failed(n, e),
                _ => RpcError::get_latest_block_failed(e),
            })?;

        match block {
            Some(block) => {
                let header = &block.header;
                Ok(BlockRef::new(header.number, header.timestamp))
            }
            None => match tag {
                BlockNumberOrTag::Number(block_number) => {
                    Err(RpcError::BlockNotFound { block_number })
                }
                _ => Err(RpcError::GetLatestBlockFailed { source: None }),
            },
        }
    }

    fn decode_swap(pool: Address, log: &Log) -> Option<RawSwapLog> {
        let (Some(block_number), Some(tx_hash)) = (log.block_number, log.transaction_hash) else {
            warn!(?pool, "Skipping pending swap log without block or transaction");
            return None;
        };

        match IOsitoCore::Swap::decode_log(&log.inner).map(|decoded| decoded.data) {
            Ok(swap) => Some(RawSwapLog {
                pool,
                block_number,
                tx_hash,
                tx_index: log.transaction_index.unwrap_or_default(),
                log_index: log.log_index.unwrap_or_default(),
                token_in: swap.tokenIn,
                amount_in: swap.amountIn,
                amount_out: swap.amountOut,
                fee: swap.fee,
            }),
            Err(e) => {
                warn!(?pool, block_number, %tx_hash, error = %e, "Skipping undecodable swap log");
                None
            }
        }
    }
}

#[async_trait]
impl<P: Provider> ChainReader for AlloyChainReader<P> {
    async fn latest_block(&self) -> Result<BlockRef, RpcError> {
        self.block_by_tag(BlockNumberOrTag::Latest).await
    }

    async fn block(&self, number: BlockNumber) -> Result<BlockRef, RpcError> {
        self.block_by_tag(BlockNumberOrTag::Number(number)).await
    }

    async fn transaction_sender(&self, tx_hash: TxHash) -> Result<Address, RpcError> {
        let tx = self
            .provider
            .get_transaction_by_hash(tx_hash)
            .await
            .map_err(|e| RpcError::get_transaction_failed(tx_hash, e))?
            .ok_or(RpcError::TransactionNotFound { tx_hash })?;
        Ok(tx.from())
    }

    async fn swap_logs(
        &self,
        pool: Address,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<RawSwapLog>, RpcError> {
        let template = Filter::new()
            .address(pool)
            .event_signature(IOsitoCore::Swap::SIGNATURE_HASH);

        let mut swaps = Vec::new();
        for (chunk_from, chunk_to) in self.log_chunk_size.chunk_range(from, to) {
            let filter = template.clone().from_block(chunk_from).to_block(chunk_to);
            let logs = self.provider.get_logs(&filter).await.map_err(|e| {
                RpcError::get_logs_failed(
                    format!("Swap logs of {pool} in blocks {chunk_from}..={chunk_to}"),
                    e,
                )
            })?;

            debug!(
                ?pool,
                chunk_from,
                chunk_to,
                logs = logs.len(),
                "Fetched swap logs for chunk"
            );
            swaps.extend(logs.iter().filter_map(|log| Self::decode_swap(pool, log)));
        }

        Ok(swaps)
    }

    async fn pool_token(&self, pool: Address) -> Result<Address, RpcError> {
        IOsitoCore::new(pool, &self.provider)
            .TOK()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(pool, "TOK", e))
    }

    async fn pool_reserves(
        &self,
        pool: Address,
        block: BlockNumber,
    ) -> Result<PoolReserves, RpcError> {
        let reserves = IOsitoCore::new(pool, &self.provider)
            .R()
            .block(BlockId::number(block))
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(pool, "R", e))?;

        Ok(PoolReserves {
            token: U256::from(reserves.tokenReserve),
            quote: U256::from(reserves.quoteReserve),
        })
    }

    async fn token_name(&self, token: Address) -> Result<String, RpcError> {
        IERC20Metadata::new(token, &self.provider)
            .name()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(token, "name", e))
    }

    async fn token_symbol(&self, token: Address) -> Result<String, RpcError> {
        IERC20Metadata::new(token, &self.provider)
            .symbol()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(token, "symbol", e))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, RpcError> {
        IERC20Metadata::new(token, &self.provider)
            .decimals()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(token, "decimals", e))
    }

    async fn token_total_supply(&self, token: Address) -> Result<U256, RpcError> {
        IERC20Metadata::new(token, &self.provider)
            .totalSupply()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed(token, "totalSupply", e))
    }
}
