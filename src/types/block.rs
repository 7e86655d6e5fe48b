// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block references

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};

/// A block height together with its timestamp.
///
/// Blocks at the queried depth are treated as final, so a `BlockRef` never
/// changes once observed.
///
/// # Examples
///
/// ```
/// use swapscan::BlockRef;
///
/// let block = BlockRef::new(6_063_155, 1_751_303_331);
/// let json = serde_json::to_value(block).unwrap();
/// assert_eq!(json["blockNumber"], 6_063_155);
/// assert_eq!(json["blockTimestamp"], 1_751_303_331);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    /// Block height
    #[serde(rename = "blockNumber")]
    pub number: BlockNumber,
    /// Unix timestamp in seconds
    #[serde(rename = "blockTimestamp")]
    pub timestamp: u64,
}

impl BlockRef {
    /// Create a new block reference
    pub const fn new(number: BlockNumber, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}
