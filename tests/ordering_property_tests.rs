// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for event ordering and reserve attachment
//!
//! These tests feed arbitrary swap batches for two pools through the full
//! pipeline and check the invariants of the output stream.

mod helpers;

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::U256;
use helpers::{config_for, swap_log, MockChain, HIGH_TOKEN, LOW_TOKEN, POOL_A, POOL_B};
use proptest::prelude::*;
use swapscan::{EventAggregator, PoolReserves, TradeEvent};

const HEAD: u64 = 100;
const MAX_BLOCK: u64 = 20;

#[derive(Debug, Clone)]
struct ArbSwap {
    first_pool: bool,
    block: u64,
    tx_index: u64,
    token_in: bool,
    amount_in: u64,
    amount_out: u64,
}

fn arb_swap() -> impl Strategy<Value = ArbSwap> {
    (
        any::<bool>(),
        0..=MAX_BLOCK,
        0u64..5,
        any::<bool>(),
        0u64..1_000,
        0u64..1_000,
    )
        .prop_map(
            |(first_pool, block, tx_index, token_in, amount_in, amount_out)| ArbSwap {
                first_pool,
                block,
                tx_index,
                token_in,
                amount_in,
                amount_out,
            },
        )
}

fn run_pipeline(swaps: &[ArbSwap]) -> Vec<TradeEvent> {
    let reserves = PoolReserves {
        token: U256::from(7u64),
        quote: U256::from(11u64),
    };
    let mut chain = MockChain::new(HEAD)
        .with_pool(POOL_A, LOW_TOKEN)
        .with_pool(POOL_B, HIGH_TOKEN);
    for block in 0..=MAX_BLOCK {
        chain = chain
            .with_reserves(POOL_A, block, reserves)
            .with_reserves(POOL_B, block, reserves);
    }
    for (i, swap) in swaps.iter().enumerate() {
        let pool = if swap.first_pool { POOL_A } else { POOL_B };
        // Log indices are unique within a block on a real chain
        let log = swap_log(
            pool,
            swap.block,
            swap.tx_index,
            i as u64,
            swap.token_in,
            U256::from(swap.amount_in),
            U256::from(swap.amount_out),
        );
        chain = chain.with_logs(pool, vec![log]);
    }

    let aggregator = EventAggregator::new(Arc::new(chain), config_for(&[POOL_A, POOL_B]));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime
        .block_on(aggregator.resolve_events(0, MAX_BLOCK))
        .unwrap()
}

proptest! {
    /// Property: output is sorted by (blockNumber, txnIndex, eventIndex) and
    /// sorting it again changes nothing
    #[test]
    fn prop_output_is_sorted(swaps in prop::collection::vec(arb_swap(), 0..40)) {
        let events = run_pipeline(&swaps);

        prop_assert!(events.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));

        let mut resorted = events.clone();
        resorted.sort_by_key(TradeEvent::sort_key);
        prop_assert_eq!(resorted, events);
    }

    /// Property: every event has exactly one inbound and one outbound leg, on
    /// opposite sides
    #[test]
    fn prop_exactly_one_leg_each_way(swaps in prop::collection::vec(arb_swap(), 1..40)) {
        for event in run_pipeline(&swaps) {
            prop_assert!(event.asset0_in().is_some() != event.asset1_in().is_some());
            prop_assert!(event.asset0_out().is_some() != event.asset1_out().is_some());
            prop_assert_eq!(event.asset0_in().is_some(), event.asset1_out().is_some());
        }
    }

    /// Property: only swaps with a usable price survive, and all of them do
    #[test]
    fn prop_degenerate_prices_are_absent(swaps in prop::collection::vec(arb_swap(), 1..40)) {
        let events = run_pipeline(&swaps);

        let priced = swaps.iter().filter(|s| s.amount_in > 0 && s.amount_out > 0).count();
        prop_assert_eq!(events.len(), priced);
        for event in &events {
            let price = event.price_native().as_f64();
            prop_assert!(price.is_finite() && price > 0.0);
        }
    }

    /// Property: each (pair, block) group carries reserves exactly once, on
    /// its last event
    #[test]
    fn prop_reserves_on_last_event_per_block(swaps in prop::collection::vec(arb_swap(), 1..40)) {
        let events = run_pipeline(&swaps);

        let mut groups: HashMap<_, Vec<&TradeEvent>> = HashMap::new();
        for event in &events {
            groups.entry((event.pair_id(), event.block().number)).or_default().push(event);
        }

        for group in groups.values() {
            let with_reserves: Vec<_> = group.iter().filter(|e| e.reserves().is_some()).collect();
            prop_assert_eq!(with_reserves.len(), 1);

            let last = group.iter().map(|e| e.sort_key()).max();
            prop_assert_eq!(Some(with_reserves[0].sort_key()), last);
        }
    }
}
