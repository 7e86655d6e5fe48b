// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw swap logs and normalized trade events
//!
//! [`RawSwapLog`] is what the chain returns for a single `Swap` emission.
//! [`TradeEvent`] is the normalized record served to aggregators. Trade
//! events can only be built through [`TradeEvent::new`], which takes a
//! [`SwapLegs`] value and a validated [`PriceNative`], so every event carries
//! exactly one inbound and one outbound amount and a usable price.

use std::fmt;

use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use serde::{Serialize, Serializer};

use super::block::BlockRef;
use crate::address::serialize_canonical;

/// A decoded `Swap` log emitted by a tracked pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSwapLog {
    /// Emitting pool
    pub pool: Address,
    /// Block the log was included in
    pub block_number: BlockNumber,
    /// Transaction that emitted the log
    pub tx_hash: TxHash,
    /// Index of the transaction within its block
    pub tx_index: u64,
    /// Index of the log within its block
    pub log_index: u64,
    /// `true` when the pool's token went in and the quote asset came out
    pub token_in: bool,
    /// Raw amount received by the pool
    pub amount_in: U256,
    /// Raw amount paid out by the pool
    pub amount_out: U256,
    /// Raw fee charged on the swap
    pub fee: U256,
}

impl RawSwapLog {
    /// Raw amount of the pool's token moved by this swap.
    pub fn token_amount(&self) -> U256 {
        if self.token_in {
            self.amount_in
        } else {
            self.amount_out
        }
    }

    /// Raw amount of the quote asset moved by this swap.
    pub fn quote_amount(&self) -> U256 {
        if self.token_in {
            self.amount_out
        } else {
            self.amount_in
        }
    }
}

/// Raw pool reserves as returned by the pool's reserve getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolReserves {
    /// Reserve of the pool's own token
    pub token: U256,
    /// Reserve of the quote asset
    pub quote: U256,
}

/// Pool reserves oriented to the canonical sides, formatted as decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reserves {
    pub asset0: String,
    pub asset1: String,
}

/// The inbound and outbound legs of a swap in canonical side terms.
///
/// A swap either sends asset0 into the pool and takes asset1 out, or the
/// reverse. There is no other shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapLegs {
    /// asset0 in, asset1 out
    Asset0ForAsset1 {
        asset0_in: String,
        asset1_out: String,
    },
    /// asset1 in, asset0 out
    Asset1ForAsset0 {
        asset1_in: String,
        asset0_out: String,
    },
}

/// A strictly positive, finite price of asset0 in units of asset1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceNative(f64);

impl PriceNative {
    /// Validate a computed price. Returns `None` for zero, negative, NaN or
    /// infinite values.
    ///
    /// # Examples
    ///
    /// ```
    /// use swapscan::PriceNative;
    ///
    /// assert!(PriceNative::new(0.5).is_some());
    /// assert!(PriceNative::new(0.0).is_none());
    /// assert!(PriceNative::new(f64::INFINITY).is_none());
    /// assert!(PriceNative::new(f64::NAN).is_none());
    /// ```
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for PriceNative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display is the shortest representation that round-trips
        write!(f, "{}", self.0)
    }
}

impl Serialize for PriceNative {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A normalized swap, ready to be served.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    block: BlockRef,
    event_type: &'static str,
    txn_id: TxHash,
    txn_index: u64,
    event_index: u64,
    #[serde(serialize_with = "serialize_canonical")]
    maker: Address,
    #[serde(serialize_with = "serialize_canonical")]
    pair_id: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset0_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset1_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset0_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset1_out: Option<String>,
    price_native: PriceNative,
    #[serde(skip_serializing_if = "Option::is_none")]
    reserves: Option<Reserves>,
}

impl TradeEvent {
    /// Value of the `eventType` field for every swap
    pub const EVENT_TYPE: &'static str = "swap";

    /// Build a trade event without reserves.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        block: BlockRef,
        txn_id: TxHash,
        txn_index: u64,
        event_index: u64,
        maker: Address,
        pair_id: Address,
        legs: SwapLegs,
        price_native: PriceNative,
    ) -> Self {
        let (asset0_in, asset1_in, asset0_out, asset1_out) = match legs {
            SwapLegs::Asset0ForAsset1 {
                asset0_in,
                asset1_out,
            } => (Some(asset0_in), None, None, Some(asset1_out)),
            SwapLegs::Asset1ForAsset0 {
                asset1_in,
                asset0_out,
            } => (None, Some(asset1_in), Some(asset0_out), None),
        };

        Self {
            block,
            event_type: Self::EVENT_TYPE,
            txn_id,
            txn_index,
            event_index,
            maker,
            pair_id,
            asset0_in,
            asset1_in,
            asset0_out,
            asset1_out,
            price_native,
            reserves: None,
        }
    }

    /// Attach a reserve snapshot, replacing any existing one.
    pub fn attach_reserves(&mut self, reserves: Reserves) {
        self.reserves = Some(reserves);
    }

    /// Ordering key: `(blockNumber, txnIndex, eventIndex)`.
    pub fn sort_key(&self) -> (BlockNumber, u64, u64) {
        (self.block.number, self.txn_index, self.event_index)
    }

    pub fn block(&self) -> BlockRef {
        self.block
    }

    pub fn txn_id(&self) -> TxHash {
        self.txn_id
    }

    pub fn txn_index(&self) -> u64 {
        self.txn_index
    }

    pub fn event_index(&self) -> u64 {
        self.event_index
    }

    pub fn maker(&self) -> Address {
        self.maker
    }

    pub fn pair_id(&self) -> Address {
        self.pair_id
    }

    pub fn asset0_in(&self) -> Option<&str> {
        self.asset0_in.as_deref()
    }

    pub fn asset1_in(&self) -> Option<&str> {
        self.asset1_in.as_deref()
    }

    pub fn asset0_out(&self) -> Option<&str> {
        self.asset0_out.as_deref()
    }

    pub fn asset1_out(&self) -> Option<&str> {
        self.asset1_out.as_deref()
    }

    pub fn price_native(&self) -> PriceNative {
        self.price_native
    }

    pub fn reserves(&self) -> Option<&Reserves> {
        self.reserves.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(legs: SwapLegs) -> TradeEvent {
        TradeEvent::new(
            BlockRef::new(100, 1_700_000_000),
            TxHash::repeat_byte(0x11),
            2,
            7,
            Address::repeat_byte(0x22),
            Address::repeat_byte(0x33),
            legs,
            PriceNative::new(0.5).unwrap(),
        )
    }

    #[test]
    fn asset0_for_asset1_populates_one_in_and_one_out() {
        let event = sample(SwapLegs::Asset0ForAsset1 {
            asset0_in: "1000.0".into(),
            asset1_out: "500.0".into(),
        });

        assert_eq!(event.asset0_in(), Some("1000.0"));
        assert_eq!(event.asset1_out(), Some("500.0"));
        assert!(event.asset1_in().is_none());
        assert!(event.asset0_out().is_none());
    }

    #[test]
    fn serializes_wire_names_and_skips_absent_fields() {
        let mut event = sample(SwapLegs::Asset1ForAsset0 {
            asset1_in: "3.0".into(),
            asset0_out: "1.5".into(),
        });
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventType"], "swap");
        assert_eq!(json["block"]["blockNumber"], 100);
        assert_eq!(json["txnIndex"], 2);
        assert_eq!(json["eventIndex"], 7);
        assert_eq!(json["maker"], "0x2222222222222222222222222222222222222222");
        assert_eq!(json["pairId"], "0x3333333333333333333333333333333333333333");
        assert_eq!(json["asset1In"], "3.0");
        assert_eq!(json["asset0Out"], "1.5");
        assert_eq!(json["priceNative"], "0.5");
        assert!(json.get("asset0In").is_none());
        assert!(json.get("asset1Out").is_none());
        assert!(json.get("reserves").is_none());

        event.attach_reserves(Reserves {
            asset0: "10.0".into(),
            asset1: "20.0".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["reserves"]["asset0"], "10.0");
        assert_eq!(json["reserves"]["asset1"], "20.0");
    }

    #[test]
    fn price_renders_shortest_form() {
        assert_eq!(PriceNative::new(2.0).unwrap().to_string(), "2");
        assert_eq!(PriceNative::new(0.5).unwrap().to_string(), "0.5");
        assert!(PriceNative::new(-1.0).is_none());
    }

    #[test]
    fn swap_log_sides_follow_direction() {
        let log = RawSwapLog {
            pool: Address::ZERO,
            block_number: 1,
            tx_hash: TxHash::ZERO,
            tx_index: 0,
            log_index: 0,
            token_in: false,
            amount_in: U256::from(5),
            amount_out: U256::from(9),
            fee: U256::ZERO,
        };
        assert_eq!(log.quote_amount(), U256::from(5));
        assert_eq!(log.token_amount(), U256::from(9));
    }
}
