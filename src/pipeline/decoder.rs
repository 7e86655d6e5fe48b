// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw swap log to trade event

use alloy_primitives::Address;
use tracing::debug;

use crate::types::asset::PoolDescriptor;
use crate::types::block::BlockRef;
use crate::types::event::{PriceNative, RawSwapLog, SwapLegs, TradeEvent};
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// Decodes the swaps of one pool.
///
/// Side assignment follows from two facts: which way the swap went
/// (`token_in`) and whether the pool's token is `asset0` or `asset1`.
///
/// | token in | token is asset0 | legs            |
/// |----------|-----------------|-----------------|
/// | yes      | yes             | asset0 → asset1 |
/// | yes      | no              | asset1 → asset0 |
/// | no       | yes             | asset1 → asset0 |
/// | no       | no              | asset0 → asset1 |
///
/// `priceNative` is asset1 per asset0. Swaps whose price is zero, negative or
/// not finite (a zero amount on either side) are dropped.
#[derive(Debug, Clone, Copy)]
pub struct SwapDecoder<'a> {
    pool: &'a PoolDescriptor,
    token_decimals: TokenDecimals,
    quote_decimals: TokenDecimals,
}

impl<'a> SwapDecoder<'a> {
    pub fn new(
        pool: &'a PoolDescriptor,
        token_decimals: TokenDecimals,
        quote_decimals: TokenDecimals,
    ) -> Self {
        Self {
            pool,
            token_decimals,
            quote_decimals,
        }
    }

    /// Decode `log`, or `None` if its price is unusable.
    pub fn decode(&self, log: &RawSwapLog, block: BlockRef, maker: Address) -> Option<TradeEvent> {
        let Some(price) = PriceNative::new(self.price(log)) else {
            debug!(
                pool = %self.pool.pool,
                tx_hash = %log.tx_hash,
                log_index = log.log_index,
                "Dropping swap with degenerate price"
            );
            return None;
        };

        Some(TradeEvent::new(
            block,
            log.tx_hash,
            log.tx_index,
            log.log_index,
            maker,
            self.pool.pool,
            self.legs(log),
            price,
        ))
    }

    fn legs(&self, log: &RawSwapLog) -> SwapLegs {
        let (in_decimals, out_decimals) = if log.token_in {
            (self.token_decimals, self.quote_decimals)
        } else {
            (self.quote_decimals, self.token_decimals)
        };
        let amount_in = TokenAmount::new(log.amount_in).format_units(in_decimals);
        let amount_out = TokenAmount::new(log.amount_out).format_units(out_decimals);

        // The inbound asset is asset0 exactly when "token went in" agrees with
        // "token is asset0"
        if log.token_in == self.pool.token_is_asset0() {
            SwapLegs::Asset0ForAsset1 {
                asset0_in: amount_in,
                asset1_out: amount_out,
            }
        } else {
            SwapLegs::Asset1ForAsset0 {
                asset1_in: amount_in,
                asset0_out: amount_out,
            }
        }
    }

    fn price(&self, log: &RawSwapLog) -> f64 {
        let token = TokenAmount::new(log.token_amount()).to_f64(self.token_decimals);
        let quote = TokenAmount::new(log.quote_amount()).to_f64(self.quote_decimals);

        if self.pool.token_is_asset0() {
            quote / token
        } else {
            token / quote
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, TxHash, U256};

    const WBERA: Address = address!("6969696969696969696969696969696969696969");
    const LOW_TOKEN: Address = address!("07974f37167524b0b56da29b5b437014c5626797");
    const HIGH_TOKEN: Address = address!("fc363be22236d5034381b08e17c4e763b8334c79");

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn pool(token: Address) -> PoolDescriptor {
        PoolDescriptor::new(Address::repeat_byte(0xc0), token, WBERA, "osito", 30, 80069)
    }

    fn log(token_in: bool, amount_in: U256, amount_out: U256) -> RawSwapLog {
        RawSwapLog {
            pool: Address::repeat_byte(0xc0),
            block_number: 100,
            tx_hash: TxHash::repeat_byte(0xaa),
            tx_index: 1,
            log_index: 4,
            token_in,
            amount_in,
            amount_out,
            fee: U256::ZERO,
        }
    }

    fn decode(token: Address, log: &RawSwapLog) -> Option<TradeEvent> {
        let pool = pool(token);
        SwapDecoder::new(&pool, TokenDecimals::STANDARD, TokenDecimals::STANDARD).decode(
            log,
            BlockRef::new(100, 1_700_000_000),
            Address::repeat_byte(0x01),
        )
    }

    #[test]
    fn token_asset0_sold_into_pool() {
        let event = decode(LOW_TOKEN, &log(true, ether(1000), ether(500))).unwrap();

        assert_eq!(event.asset0_in(), Some("1000.0"));
        assert_eq!(event.asset1_out(), Some("500.0"));
        assert_eq!(event.asset1_in(), None);
        assert_eq!(event.asset0_out(), None);
        assert_eq!(event.price_native().to_string(), "0.5");
    }

    #[test]
    fn token_asset0_bought_from_pool() {
        // 500 WBERA in, 1000 token out
        let event = decode(LOW_TOKEN, &log(false, ether(500), ether(1000))).unwrap();

        assert_eq!(event.asset1_in(), Some("500.0"));
        assert_eq!(event.asset0_out(), Some("1000.0"));
        assert_eq!(event.price_native().to_string(), "0.5");
    }

    #[test]
    fn token_asset1_sold_into_pool() {
        // 1000 token in, 500 WBERA out; WBERA is asset0
        let event = decode(HIGH_TOKEN, &log(true, ether(1000), ether(500))).unwrap();

        assert_eq!(event.asset1_in(), Some("1000.0"));
        assert_eq!(event.asset0_out(), Some("500.0"));
        assert_eq!(event.price_native().to_string(), "2");
    }

    #[test]
    fn token_asset1_bought_from_pool() {
        let event = decode(HIGH_TOKEN, &log(false, ether(500), ether(1000))).unwrap();

        assert_eq!(event.asset0_in(), Some("500.0"));
        assert_eq!(event.asset1_out(), Some("1000.0"));
        assert_eq!(event.price_native().to_string(), "2");
    }

    #[test]
    fn zero_amounts_are_dropped() {
        assert!(decode(LOW_TOKEN, &log(true, U256::ZERO, ether(5))).is_none());
        assert!(decode(LOW_TOKEN, &log(true, ether(5), U256::ZERO)).is_none());
        assert!(decode(HIGH_TOKEN, &log(false, U256::ZERO, U256::ZERO)).is_none());
    }

    #[test]
    fn amounts_use_each_side_decimals() {
        let pool = pool(LOW_TOKEN);
        let decoder = SwapDecoder::new(&pool, TokenDecimals::new(6), TokenDecimals::STANDARD);
        let event = decoder
            .decode(
                &log(true, U256::from(2_000_000u64), ether(1)),
                BlockRef::new(100, 0),
                Address::ZERO,
            )
            .unwrap();

        assert_eq!(event.asset0_in(), Some("2.0"));
        assert_eq!(event.asset1_out(), Some("1.0"));
        assert_eq!(event.price_native().to_string(), "0.5");
    }

    #[test]
    fn carries_log_position_and_maker() {
        let event = decode(LOW_TOKEN, &log(true, ether(1), ether(1))).unwrap();
        assert_eq!(event.txn_index(), 1);
        assert_eq!(event.event_index(), 4);
        assert_eq!(event.maker(), Address::repeat_byte(0x01));
        assert_eq!(event.pair_id(), Address::repeat_byte(0xc0));
    }
}
