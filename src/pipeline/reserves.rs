// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Reserve snapshots for the last swap of each block

use std::collections::HashMap;

use alloy_primitives::{Address, BlockNumber};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn, Instrument};

use crate::chain::ChainReader;
use crate::errors::RpcError;
use crate::tracing::spans;
use crate::types::asset::PoolDescriptor;
use crate::types::event::{PoolReserves, Reserves, TradeEvent};
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// Orient raw pool reserves to the canonical sides and format them.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{address, U256};
/// use swapscan::{orient_reserves, PoolDescriptor, PoolReserves, TokenDecimals};
///
/// let wbera = address!("6969696969696969696969696969696969696969");
/// let token = address!("fc363be22236d5034381b08e17c4e763b8334c79");
/// let core = address!("f7907d94a1faa79f3f552a9f3ca2b82a27d31f09");
/// let pool = PoolDescriptor::new(core, token, wbera, "osito", 30, 80069);
///
/// let reserves = orient_reserves(
///     &pool,
///     PoolReserves { token: U256::from(3_000_000u64), quote: U256::from(250u64) },
///     TokenDecimals::new(6),
///     TokenDecimals::new(2),
/// );
/// // WBERA sorts first, so it is asset0
/// assert_eq!(reserves.asset0, "2.5");
/// assert_eq!(reserves.asset1, "3.0");
/// ```
pub fn orient_reserves(
    pool: &PoolDescriptor,
    raw: PoolReserves,
    token_decimals: TokenDecimals,
    quote_decimals: TokenDecimals,
) -> Reserves {
    let token = TokenAmount::new(raw.token).format_units(token_decimals);
    let quote = TokenAmount::new(raw.quote).format_units(quote_decimals);

    if pool.token_is_asset0() {
        Reserves {
            asset0: token,
            asset1: quote,
        }
    } else {
        Reserves {
            asset0: quote,
            asset1: token,
        }
    }
}

/// Index of the last event of each block, by `(txnIndex, eventIndex)`.
pub(crate) fn last_event_per_block(events: &[TradeEvent]) -> HashMap<BlockNumber, usize> {
    let mut last: HashMap<BlockNumber, usize> = HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        let block = event.block().number;
        match last.get(&block) {
            Some(&current) if events[current].sort_key() >= event.sort_key() => {}
            _ => {
                last.insert(block, idx);
            }
        }
    }
    last
}

type Snapshot = (usize, BlockNumber, Result<PoolReserves, RpcError>);

async fn fetch_snapshot<C>(chain: &C, pool: Address, block: BlockNumber, idx: usize) -> Snapshot
where
    C: ChainReader + ?Sized,
{
    (idx, block, chain.pool_reserves(pool, block).await)
}

/// Attaches a reserve snapshot to the chronologically last swap of every
/// block in a pool's event list.
///
/// One historical state query is issued per distinct block. A failed query
/// leaves that block's last event without reserves.
pub struct ReserveSnapshotAttacher<'a, C: ?Sized> {
    chain: &'a C,
    pool: &'a PoolDescriptor,
    token_decimals: TokenDecimals,
    quote_decimals: TokenDecimals,
    max_in_flight: usize,
}

impl<'a, C> ReserveSnapshotAttacher<'a, C>
where
    C: ChainReader + ?Sized,
{
    pub fn new(
        chain: &'a C,
        pool: &'a PoolDescriptor,
        token_decimals: TokenDecimals,
        quote_decimals: TokenDecimals,
        max_in_flight: usize,
    ) -> Self {
        Self {
            chain,
            pool,
            token_decimals,
            quote_decimals,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub async fn attach(&self, events: &mut [TradeEvent]) {
        let targets = last_event_per_block(events);
        if targets.is_empty() {
            return;
        }

        let span = spans::attach_reserves(self.pool.pool, targets.len());
        let (chain, pool) = (self.chain, self.pool.pool);

        let snapshots: Vec<Snapshot> = stream::iter(targets)
            .map(move |(block, idx)| fetch_snapshot(chain, pool, block, idx))
            .buffer_unordered(self.max_in_flight)
            .boxed()
            .collect()
            .instrument(span)
            .await;

        let mut attached = 0usize;
        for (idx, block, result) in snapshots {
            match result {
                Ok(raw) => {
                    events[idx].attach_reserves(orient_reserves(
                        self.pool,
                        raw,
                        self.token_decimals,
                        self.quote_decimals,
                    ));
                    attached += 1;
                }
                Err(e) => {
                    warn!(
                        pool = %pool,
                        block_number = block,
                        error = %e,
                        "Reserve snapshot failed, emitting swap without reserves"
                    );
                }
            }
        }

        debug!(pool = %pool, attached, "Attached reserve snapshots");
    }
}
