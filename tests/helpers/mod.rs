// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for swapscan integration tests
//!
//! Provides an in-memory [`ChainReader`] so the pipeline can be exercised
//! without a node.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{address, Address, BlockNumber, TxHash, B256, U256};
use async_trait::async_trait;
use swapscan::constants::wbera;
use swapscan::{
    BlockRef, ChainReader, PoolReserves, RawSwapLog, RpcError, SwapscanConfig,
    SwapscanConfigBuilder,
};

/// Token that sorts below WBERA, so it is `asset0` of its pool
pub const LOW_TOKEN: Address = address!("07974f37167524b0b56da29b5b437014c5626797");
/// Token that sorts above WBERA, so it is `asset1` of its pool
pub const HIGH_TOKEN: Address = address!("f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0");

pub const POOL_A: Address = address!("f7907d94a1faa79f3f552a9f3ca2b82a27d31f09");
pub const POOL_B: Address = address!("a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1");

pub const TRADER: Address = address!("beefbeefbeefbeefbeefbeefbeefbeefbeefbeef");

/// Block timestamps are derived from the height
pub const GENESIS_TIMESTAMP: u64 = 1_737_000_000;

/// `n` whole units of an 18-decimal token
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

/// Deterministic transaction hash for a `(block, tx_index)` position
pub fn tx_hash(block: BlockNumber, tx_index: u64) -> TxHash {
    B256::from(U256::from(block * 10_000 + tx_index + 1))
}

/// A swap log at `(block, tx_index, log_index)`
pub fn swap_log(
    pool: Address,
    block: BlockNumber,
    tx_index: u64,
    log_index: u64,
    token_in: bool,
    amount_in: U256,
    amount_out: U256,
) -> RawSwapLog {
    RawSwapLog {
        pool,
        block_number: block,
        tx_hash: tx_hash(block, tx_index),
        tx_index,
        log_index,
        token_in,
        amount_in,
        amount_out,
        fee: U256::ZERO,
    }
}

/// Configuration tracking `pools`, with the default quote asset
pub fn config_for(pools: &[Address]) -> SwapscanConfig {
    SwapscanConfigBuilder::new()
        .tracked_pools(pools.iter().copied())
        .max_block_range(100)
        .build()
}

/// ERC-20 metadata served by [`MockChain`]. `None` fields fail when read.
#[derive(Debug, Clone, Default)]
pub struct TokenMeta {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
}

impl TokenMeta {
    pub fn full(name: &str, symbol: &str, decimals: u8, total_supply: U256) -> Self {
        Self {
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            decimals: Some(decimals),
            total_supply: Some(total_supply),
        }
    }
}

/// In-memory chain.
///
/// Every block up to `head` exists. Transactions, pool tokens, reserves and
/// token metadata resolve only if registered. Each call is counted by method
/// name.
///
/// # Example
///
/// ```rust,ignore
/// let chain = MockChain::new(200)
///     .with_pool(POOL_A, LOW_TOKEN)
///     .with_logs(POOL_A, vec![swap_log(POOL_A, 100, 0, 0, true, ether(1000), ether(500))])
///     .with_sender(tx_hash(100, 0), TRADER);
/// ```
#[derive(Debug, Default)]
pub struct MockChain {
    head: BlockNumber,
    senders: HashMap<TxHash, Address>,
    logs: HashMap<Address, Vec<RawSwapLog>>,
    pool_tokens: HashMap<Address, Address>,
    reserves: HashMap<(Address, BlockNumber), PoolReserves>,
    metadata: HashMap<Address, TokenMeta>,
    failing_logs: HashSet<Address>,
    failing_blocks: HashSet<BlockNumber>,
    failing_head: bool,
    latency: Option<Duration>,
    lookup_latency: Option<Duration>,
    lookups_in_flight: AtomicUsize,
    peak_lookups: AtomicUsize,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl MockChain {
    pub fn new(head: BlockNumber) -> Self {
        Self {
            head,
            ..Default::default()
        }
    }

    pub fn with_pool(mut self, pool: Address, token: Address) -> Self {
        self.pool_tokens.insert(pool, token);
        self
    }

    pub fn with_logs(mut self, pool: Address, logs: Vec<RawSwapLog>) -> Self {
        self.logs.entry(pool).or_default().extend(logs);
        self
    }

    pub fn with_sender(mut self, tx_hash: TxHash, sender: Address) -> Self {
        self.senders.insert(tx_hash, sender);
        self
    }

    /// Register `sender` for the transaction of every registered log
    pub fn with_sender_for_all_logs(mut self, sender: Address) -> Self {
        let hashes: Vec<TxHash> = self.logs.values().flatten().map(|log| log.tx_hash).collect();
        for hash in hashes {
            self.senders.insert(hash, sender);
        }
        self
    }

    pub fn with_reserves(
        mut self,
        pool: Address,
        block: BlockNumber,
        reserves: PoolReserves,
    ) -> Self {
        self.reserves.insert((pool, block), reserves);
        self
    }

    pub fn with_token(mut self, token: Address, meta: TokenMeta) -> Self {
        self.metadata.insert(token, meta);
        self
    }

    pub fn failing_logs_for(mut self, pool: Address) -> Self {
        self.failing_logs.insert(pool);
        self
    }

    pub fn failing_block(mut self, block: BlockNumber) -> Self {
        self.failing_blocks.insert(block);
        self
    }

    pub fn failing_head(mut self) -> Self {
        self.failing_head = true;
        self
    }

    /// Delay every metadata call, to let concurrent callers overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Delay every block and transaction lookup
    pub fn with_lookup_latency(mut self, latency: Duration) -> Self {
        self.lookup_latency = Some(latency);
        self
    }

    /// Most block and transaction lookups ever outstanding at once
    pub fn peak_lookups(&self) -> usize {
        self.peak_lookups.load(Ordering::SeqCst)
    }

    /// Number of calls made to `method`
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    /// Number of calls made to any method
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn track_lookup(&self) {
        let now = self.lookups_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_lookups.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.lookup_latency {
            tokio::time::sleep(latency).await;
        }
        self.lookups_in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn contract_error(contract: Address, method: &'static str) -> RpcError {
        RpcError::contract_call_failed(contract, method, io::Error::other("execution reverted"))
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn latest_block(&self) -> Result<BlockRef, RpcError> {
        self.record("latest_block");
        if self.failing_head {
            return Err(RpcError::get_latest_block_failed(io::Error::other("connection refused")));
        }
        Ok(BlockRef::new(self.head, GENESIS_TIMESTAMP + self.head))
    }

    async fn block(&self, number: BlockNumber) -> Result<BlockRef, RpcError> {
        self.record("block");
        self.track_lookup().await;
        if self.failing_blocks.contains(&number) {
            return Err(RpcError::get_block_failed(number, io::Error::other("timeout")));
        }
        if number > self.head {
            return Err(RpcError::BlockNotFound {
                block_number: number,
            });
        }
        Ok(BlockRef::new(number, GENESIS_TIMESTAMP + number))
    }

    async fn transaction_sender(&self, tx_hash: TxHash) -> Result<Address, RpcError> {
        self.record("transaction_sender");
        self.track_lookup().await;
        self.senders
            .get(&tx_hash)
            .copied()
            .ok_or(RpcError::TransactionNotFound { tx_hash })
    }

    async fn swap_logs(
        &self,
        pool: Address,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<RawSwapLog>, RpcError> {
        self.record("swap_logs");
        if self.failing_logs.contains(&pool) {
            return Err(RpcError::get_logs_failed(
                format!("Swap logs {from}-{to}"),
                io::Error::other("rate limited"),
            ));
        }
        Ok(self
            .logs
            .get(&pool)
            .into_iter()
            .flatten()
            .filter(|log| (from..=to).contains(&log.block_number))
            .cloned()
            .collect())
    }

    async fn pool_token(&self, pool: Address) -> Result<Address, RpcError> {
        self.record("pool_token");
        self.pool_tokens
            .get(&pool)
            .copied()
            .ok_or_else(|| Self::contract_error(pool, "TOK()"))
    }

    async fn pool_reserves(
        &self,
        pool: Address,
        block: BlockNumber,
    ) -> Result<PoolReserves, RpcError> {
        self.record("pool_reserves");
        self.reserves
            .get(&(pool, block))
            .copied()
            .ok_or_else(|| Self::contract_error(pool, "R()"))
    }

    async fn token_name(&self, token: Address) -> Result<String, RpcError> {
        self.record("token_name");
        self.simulate_latency().await;
        self.metadata
            .get(&token)
            .and_then(|meta| meta.name.clone())
            .ok_or_else(|| Self::contract_error(token, "name()"))
    }

    async fn token_symbol(&self, token: Address) -> Result<String, RpcError> {
        self.record("token_symbol");
        self.simulate_latency().await;
        self.metadata
            .get(&token)
            .and_then(|meta| meta.symbol.clone())
            .ok_or_else(|| Self::contract_error(token, "symbol()"))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, RpcError> {
        self.record("token_decimals");
        self.simulate_latency().await;
        self.metadata
            .get(&token)
            .and_then(|meta| meta.decimals)
            .ok_or_else(|| Self::contract_error(token, "decimals()"))
    }

    async fn token_total_supply(&self, token: Address) -> Result<U256, RpcError> {
        self.record("token_total_supply");
        self.simulate_latency().await;
        self.metadata
            .get(&token)
            .and_then(|meta| meta.total_supply)
            .ok_or_else(|| Self::contract_error(token, "totalSupply()"))
    }
}

/// Quote asset used by every test configuration
pub const QUOTE: Address = wbera::ADDRESS;
