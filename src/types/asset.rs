// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Asset and pool descriptors
//!
//! Both serialize to the aggregator's wire format: addresses in canonical
//! lowercase form, supplies as decimal strings, and a `metadata.chainId`
//! string.

use alloy_primitives::Address;
use serde::Serialize;

use super::tokens::TokenDecimals;
use crate::address::{canonical_pair, serialize_canonical};

/// Chain metadata attached to every descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainMetadata {
    /// Chain id as a decimal string
    #[serde(rename = "chainId")]
    pub chain_id: String,
}

impl ChainMetadata {
    /// Create metadata for a numeric chain id
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id: chain_id.to_string(),
        }
    }
}

/// Descriptor of an ERC-20 asset.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use swapscan::{AssetDescriptor, TokenDecimals};
///
/// let wbera = AssetDescriptor::new(
///     address!("6969696969696969696969696969696969696969"),
///     "Wrapped BERA",
///     "WBERA",
///     TokenDecimals::STANDARD,
///     "0",
///     80069,
/// );
///
/// let json = serde_json::to_value(&wbera).unwrap();
/// assert_eq!(json["id"], "0x6969696969696969696969696969696969696969");
/// assert_eq!(json["decimals"], 18);
/// assert_eq!(json["metadata"]["chainId"], "80069");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetDescriptor {
    /// Token contract address
    #[serde(rename = "id", serialize_with = "serialize_canonical")]
    pub address: Address,
    /// Token name, `"Unknown"` when the contract does not answer
    pub name: String,
    /// Token symbol, `"UNK"` when the contract does not answer
    pub symbol: String,
    /// Raw total supply as a decimal string, `"0"` when unavailable
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
    /// Decimal precision, 18 when unavailable
    pub decimals: TokenDecimals,
    /// Chain metadata
    pub metadata: ChainMetadata,
}

impl AssetDescriptor {
    /// Fallback name for tokens whose `name()` call fails
    pub const DEFAULT_NAME: &'static str = "Unknown";
    /// Fallback symbol for tokens whose `symbol()` call fails
    pub const DEFAULT_SYMBOL: &'static str = "UNK";
    /// Fallback supply for tokens whose `totalSupply()` call fails
    pub const DEFAULT_TOTAL_SUPPLY: &'static str = "0";

    /// Create a new asset descriptor
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: TokenDecimals,
        total_supply: impl Into<String>,
        chain_id: u64,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            total_supply: total_supply.into(),
            decimals,
            metadata: ChainMetadata::new(chain_id),
        }
    }
}

/// Descriptor of a tracked pool.
///
/// A pool trades its own token against the quote asset. The two are ordered
/// canonically: `asset0` is always the lower address, which fixes the meaning
/// of `asset0In`/`asset1Out` and of `priceNative` (asset1 per asset0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolDescriptor {
    /// Pool contract address
    #[serde(rename = "id", serialize_with = "serialize_canonical")]
    pub pool: Address,
    /// Identifier of the DEX the pool belongs to
    #[serde(rename = "dexKey")]
    pub dex_key: String,
    /// Lower of the two asset addresses
    #[serde(rename = "asset0Id", serialize_with = "serialize_canonical")]
    pub asset0: Address,
    /// Higher of the two asset addresses
    #[serde(rename = "asset1Id", serialize_with = "serialize_canonical")]
    pub asset1: Address,
    /// Swap fee in basis points
    #[serde(rename = "feeBps")]
    pub fee_bps: u32,
    /// Chain metadata
    pub metadata: ChainMetadata,
    /// The pool's own (non-quote) token
    #[serde(skip)]
    pub token: Address,
}

impl PoolDescriptor {
    /// Build a descriptor from the pool's token and the quote asset,
    /// assigning sides by canonical order.
    ///
    /// `token` must differ from `quote`, otherwise both sides hold the same
    /// asset.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::address;
    /// use swapscan::PoolDescriptor;
    ///
    /// let token = address!("fc363be22236d5034381b08e17c4e763b8334c79");
    /// let wbera = address!("6969696969696969696969696969696969696969");
    /// let pool = PoolDescriptor::new(
    ///     address!("f7907d94a1faa79f3f552a9f3ca2b82a27d31f09"),
    ///     token,
    ///     wbera,
    ///     "osito",
    ///     30,
    ///     80069,
    /// );
    ///
    /// assert_eq!(pool.asset0, wbera);
    /// assert_eq!(pool.asset1, token);
    /// assert!(!pool.token_is_asset0());
    /// ```
    pub fn new(
        pool: Address,
        token: Address,
        quote: Address,
        dex_key: impl Into<String>,
        fee_bps: u32,
        chain_id: u64,
    ) -> Self {
        let (asset0, asset1) = canonical_pair(token, quote);
        Self {
            pool,
            dex_key: dex_key.into(),
            asset0,
            asset1,
            fee_bps,
            metadata: ChainMetadata::new(chain_id),
            token,
        }
    }

    /// Returns true when the pool's own token sorts first.
    pub fn token_is_asset0(&self) -> bool {
        self.asset0 == self.token
    }

    /// The quote side of the pool.
    pub fn quote(&self) -> Address {
        if self.token_is_asset0() {
            self.asset1
        } else {
            self.asset0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const WBERA: Address = address!("6969696969696969696969696969696969696969");

    #[test]
    fn token_below_quote_is_asset0() {
        let token = address!("07974f37167524b0b56da29b5b437014c5626797");
        let pool = PoolDescriptor::new(Address::repeat_byte(0xaa), token, WBERA, "osito", 30, 1);

        assert_eq!(pool.asset0, token);
        assert_eq!(pool.asset1, WBERA);
        assert!(pool.token_is_asset0());
        assert_eq!(pool.quote(), WBERA);
    }

    #[test]
    fn pool_serializes_without_token_field() {
        let token = address!("FC363BE22236D5034381B08E17C4E763B8334C79");
        let pool =
            PoolDescriptor::new(Address::repeat_byte(0xab), token, WBERA, "osito", 30, 80069);
        let json = serde_json::to_value(&pool).unwrap();

        assert_eq!(json["dexKey"], "osito");
        assert_eq!(json["feeBps"], 30);
        assert_eq!(json["asset0Id"], "0x6969696969696969696969696969696969696969");
        assert_eq!(json["asset1Id"], "0xfc363be22236d5034381b08e17c4e763b8334c79");
        assert!(json.get("token").is_none());
    }
}
