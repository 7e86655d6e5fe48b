// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block and transaction context for a batch of swap logs

use std::collections::{BTreeSet, HashMap};

use alloy_primitives::{Address, BlockNumber, TxHash};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn, Instrument};

use crate::blocks::BlockCache;
use crate::chain::ChainReader;
use crate::errors::RpcError;
use crate::tracing::spans;
use crate::types::block::BlockRef;
use crate::types::event::RawSwapLog;

/// Lookup maps produced by [`BatchContextResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchContext {
    blocks: HashMap<BlockNumber, BlockRef>,
    senders: HashMap<TxHash, Address>,
}

impl BatchContext {
    /// Header of `number`, if it resolved
    pub fn block(&self, number: BlockNumber) -> Option<BlockRef> {
        self.blocks.get(&number).copied()
    }

    /// Sender of `tx_hash`, or the zero address if it did not resolve
    pub fn maker(&self, tx_hash: &TxHash) -> Address {
        self.senders.get(tx_hash).copied().unwrap_or(Address::ZERO)
    }

    pub fn resolved_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn resolved_senders(&self) -> usize {
        self.senders.len()
    }
}

/// One upstream lookup issued by the resolver
#[derive(Debug, Clone, Copy)]
enum Lookup {
    Block(BlockNumber),
    Sender(TxHash),
}

/// Outcome of a [`Lookup`], keyed by what was asked for
enum Resolved {
    Block(BlockNumber, Result<BlockRef, RpcError>),
    Sender(TxHash, Result<Address, RpcError>),
}

async fn run_lookup<C>(chain: &C, cache: &BlockCache, lookup: Lookup) -> Resolved
where
    C: ChainReader + ?Sized,
{
    match lookup {
        Lookup::Block(number) => Resolved::Block(number, cache.get_or_fetch(chain, number).await),
        Lookup::Sender(tx_hash) => {
            Resolved::Sender(tx_hash, chain.transaction_sender(tx_hash).await)
        }
    }
}

/// Resolves the distinct blocks and transactions referenced by a batch of
/// logs, one upstream request per distinct value.
///
/// Block and sender lookups share one stream, so at most `max_in_flight`
/// requests are outstanding per batch. Failures are logged and leave the
/// entry out of the map.
pub struct BatchContextResolver<'a, C: ?Sized> {
    chain: &'a C,
    blocks: &'a BlockCache,
    max_in_flight: usize,
}

impl<'a, C> BatchContextResolver<'a, C>
where
    C: ChainReader + ?Sized,
{
    pub fn new(chain: &'a C, blocks: &'a BlockCache, max_in_flight: usize) -> Self {
        Self {
            chain,
            blocks,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub async fn resolve(&self, logs: &[RawSwapLog]) -> BatchContext {
        let block_numbers: BTreeSet<BlockNumber> =
            logs.iter().map(|log| log.block_number).collect();
        let mut tx_hashes: Vec<TxHash> = logs.iter().map(|log| log.tx_hash).collect();
        tx_hashes.sort_unstable();
        tx_hashes.dedup();

        let span = spans::resolve_context(logs.len(), block_numbers.len(), tx_hashes.len());

        let lookups: Vec<Lookup> = block_numbers
            .into_iter()
            .map(Lookup::Block)
            .chain(tx_hashes.into_iter().map(Lookup::Sender))
            .collect();

        let (chain, cache) = (self.chain, self.blocks);
        // Boxed so the stream's Send bound is checked here rather than on
        // every caller's future
        let resolved: Vec<Resolved> = stream::iter(lookups)
            .map(move |lookup| run_lookup(chain, cache, lookup))
            .buffer_unordered(self.max_in_flight)
            .boxed()
            .collect()
            .instrument(span)
            .await;

        let mut context = BatchContext::default();
        for outcome in resolved {
            match outcome {
                Resolved::Block(number, Ok(block)) => {
                    context.blocks.insert(number, block);
                }
                Resolved::Block(number, Err(e)) => {
                    warn!(
                        block_number = number,
                        error = %e,
                        "Block lookup failed, dropping its swaps"
                    );
                }
                Resolved::Sender(tx_hash, Ok(sender)) => {
                    context.senders.insert(tx_hash, sender);
                }
                Resolved::Sender(tx_hash, Err(e)) => {
                    warn!(
                        %tx_hash,
                        error = %e,
                        "Transaction lookup failed, using zero-address maker"
                    );
                }
            }
        }

        debug!(
            blocks = context.blocks.len(),
            senders = context.senders.len(),
            "Resolved batch context"
        );
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sender_falls_back_to_zero_address() {
        let mut context = BatchContext::default();
        let known = TxHash::repeat_byte(1);
        context.senders.insert(known, Address::repeat_byte(9));

        assert_eq!(context.maker(&known), Address::repeat_byte(9));
        assert_eq!(context.maker(&TxHash::repeat_byte(2)), Address::ZERO);
        assert!(context.block(1).is_none());
    }
}
