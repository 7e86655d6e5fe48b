// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token decimal precision and raw on-chain amounts
//!
//! ```text
//! TokenAmount (U256, raw)
//!     |
//!     | format_units(TokenDecimals)   exact, integer arithmetic
//!     ↓
//! "1000.0"  (decimal string, wire format)
//!     |
//!     | to_f64(TokenDecimals)         approximate, for price ratios
//!     ↓
//! f64
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// # Examples
///
/// ```
/// use swapscan::TokenDecimals;
///
/// assert_eq!(TokenDecimals::STANDARD.as_u8(), 18);
/// assert_eq!(TokenDecimals::default(), TokenDecimals::STANDARD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Standard decimals for ETH-like tokens (18), also the fallback when a
    /// token's `decimals()` call fails
    pub const STANDARD: Self = Self(18);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

/// Raw token amount (not normalized for decimals)
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use swapscan::{TokenAmount, TokenDecimals};
///
/// let amount = TokenAmount::new(U256::from(1_500_000u64));
/// assert_eq!(amount.format_units(TokenDecimals::new(6)), "1.5");
/// assert_eq!(amount.to_f64(TokenDecimals::new(6)), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Returns true if the raw amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render `amount / 10^decimals` exactly as a decimal string.
    ///
    /// The output always carries a fractional part (`"1000.0"`, not
    /// `"1000"`), with trailing zeros trimmed beyond the first digit.
    pub fn format_units(&self, decimals: TokenDecimals) -> String {
        let decimals = decimals.as_u8() as usize;
        if decimals == 0 {
            return format!("{}.0", self.0);
        }

        // 10^77 is the largest power of ten that fits in a U256
        if decimals > 77 {
            let digits = self.0.to_string();
            let padded = format!("{digits:0>width$}", width = decimals);
            return join_whole_and_fraction("0", &padded);
        }

        let divisor = U256::from(10u64).pow(U256::from(decimals));
        let whole = self.0 / divisor;
        let fractional = self.0 % divisor;

        let fractional_str = format!("{:0>width$}", fractional.to_string(), width = decimals);
        join_whole_and_fraction(&whole.to_string(), &fractional_str)
    }

    /// Human-scaled amount as a float.
    ///
    /// Goes through the exact decimal rendering so large raw values keep as
    /// much precision as an `f64` can hold.
    pub fn to_f64(&self, decimals: TokenDecimals) -> f64 {
        let rendered = self.format_units(decimals);
        rendered.parse::<f64>().unwrap_or_else(|e| {
            tracing::warn!(
                amount = %self.0,
                error = %e,
                "Failed to parse token amount to f64, using NaN"
            );
            f64::NAN
        })
    }
}

fn join_whole_and_fraction(whole: &str, fraction: &str) -> String {
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
