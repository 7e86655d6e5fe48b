// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Defaults and well-known addresses

use std::time::Duration;

use alloy_primitives::{address, Address};

/// Wrapped BERA, the quote asset every tracked pool trades against
pub mod wbera {
    use super::*;

    /// Default WBERA contract, overridable with `WBERA_ADDRESS`
    pub const ADDRESS: Address = address!("7507c1dc16935b82698e4c63f2746a5fcf994df8");
    pub const NAME: &str = "Wrapped BERA";
    pub const SYMBOL: &str = "WBERA";
    pub const DECIMALS: u8 = 18;
}

/// Berachain mainnet
pub const DEFAULT_CHAIN_ID: u64 = 80094;

/// DEX identifier reported for every pool
pub const DEFAULT_DEX_KEY: &str = "osito";

/// Pool swap fee in basis points
pub const DEFAULT_FEE_BPS: u32 = 30;

/// Upper bound on concurrent upstream lookups per batch
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
