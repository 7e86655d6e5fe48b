// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block range validation and chunking

use std::fmt;

use alloy_primitives::BlockNumber;
use tracing::debug;

use crate::chain::ChainReader;
use crate::errors::SwapscanError;

/// Maximum number of blocks covered by one query.
///
/// Used both as the largest span a caller may request and as the chunk size
/// for upstream log queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxBlockRange(u64);

impl MaxBlockRange {
    /// Default request span
    pub const DEFAULT: Self = Self(2_000);

    /// Create a new limit. Zero is treated as one.
    ///
    /// ```
    /// use swapscan::MaxBlockRange;
    ///
    /// assert_eq!(MaxBlockRange::new(500).as_u64(), 500);
    /// assert_eq!(MaxBlockRange::new(0).as_u64(), 1);
    /// ```
    pub const fn new(blocks: u64) -> Self {
        if blocks == 0 {
            Self(1)
        } else {
            Self(blocks)
        }
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Split the inclusive range `[start, end]` into chunks of at most
    /// `self` blocks.
    ///
    /// ```
    /// use swapscan::MaxBlockRange;
    ///
    /// let chunks: Vec<_> = MaxBlockRange::new(1000).chunk_range(0, 2500).collect();
    /// assert_eq!(chunks, vec![(0, 999), (1000, 1999), (2000, 2500)]);
    /// ```
    pub fn chunk_range(&self, start: BlockNumber, end: BlockNumber) -> ChunkIterator {
        ChunkIterator {
            next: (start <= end).then_some(start),
            end,
            chunk_size: self.0,
        }
    }
}

impl Default for MaxBlockRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for MaxBlockRange {
    fn from(blocks: u64) -> Self {
        Self::new(blocks)
    }
}

impl fmt::Display for MaxBlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} blocks", self.0)
    }
}

/// Iterator over `(from, to)` chunks of an inclusive block range.
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    next: Option<BlockNumber>,
    end: BlockNumber,
    chunk_size: u64,
}

impl Iterator for ChunkIterator {
    type Item = (BlockNumber, BlockNumber);

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.next?;
        let to = from.saturating_add(self.chunk_size - 1).min(self.end);
        self.next = if to >= self.end { None } else { Some(to + 1) };
        Some((from, to))
    }
}

/// A validated, inclusive block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from: BlockNumber,
    pub to: BlockNumber,
}

impl BlockRange {
    /// `to - from`
    pub fn span(&self) -> u64 {
        self.to - self.from
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Validates requested block ranges.
///
/// Checks run in order: bounds parse as non-negative integers, `from <= to`,
/// the span fits the configured maximum, and `to` does not exceed the chain
/// head. The head is fetched fresh on every validation.
#[derive(Debug, Clone, Copy)]
pub struct RangeGuard {
    max_span: MaxBlockRange,
}

impl RangeGuard {
    pub fn new(max_span: MaxBlockRange) -> Self {
        Self { max_span }
    }

    pub fn max_span(&self) -> MaxBlockRange {
        self.max_span
    }

    /// Parse raw query values into block numbers.
    ///
    /// ```
    /// use swapscan::{RangeGuard, SwapscanError};
    ///
    /// let range = RangeGuard::parse_bounds(Some("100"), Some("200")).unwrap();
    /// assert_eq!((range.from, range.to), (100, 200));
    ///
    /// assert!(matches!(
    ///     RangeGuard::parse_bounds(Some("-1"), Some("200")),
    ///     Err(SwapscanError::InvalidRange { .. })
    /// ));
    /// ```
    pub fn parse_bounds(from: Option<&str>, to: Option<&str>) -> Result<BlockRange, SwapscanError> {
        let from = parse_bound("fromBlock", from)?;
        let to = parse_bound("toBlock", to)?;
        Ok(BlockRange { from, to })
    }

    /// Check ordering and span without consulting the chain.
    pub fn check_shape(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<BlockRange, SwapscanError> {
        if from > to {
            return Err(SwapscanError::invalid_range(format!(
                "fromBlock {from} is after toBlock {to}"
            )));
        }

        let range = BlockRange { from, to };
        if range.span() > self.max_span.as_u64() {
            return Err(SwapscanError::RangeTooLarge {
                span: range.span(),
                max: self.max_span.as_u64(),
            });
        }

        Ok(range)
    }

    /// Full validation, including the chain-head check.
    pub async fn validate<C>(
        &self,
        chain: &C,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<BlockRange, SwapscanError>
    where
        C: ChainReader + ?Sized,
    {
        let range = self.check_shape(from, to)?;
        let head = chain.latest_block().await?.number;

        if range.to > head {
            return Err(SwapscanError::RangeBeyondHead {
                to_block: range.to,
                head,
            });
        }

        debug!(%range, head, "Block range validated");
        Ok(range)
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<BlockNumber, SwapscanError> {
    let raw = raw.ok_or_else(|| SwapscanError::invalid_range(format!("{name} is required")))?;
    raw.trim().parse::<BlockNumber>().map_err(|_| {
        SwapscanError::invalid_range(format!(
            "{name} must be a non-negative integer, got {raw:?}"
        ))
    })
}
