// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the swapscan library.
//!
//! Two layers, mirroring how failures actually travel through the pipeline:
//!
//! - [`RpcError`] describes a single failed upstream call. Most of these are
//!   recovered locally (a missing transaction sender becomes the zero address,
//!   a failed reserve snapshot is simply not attached) and never reach the
//!   caller.
//! - [`SwapscanError`] is what the public entry points return. Its variants map
//!   one-to-one onto the responses of the HTTP surface: malformed input is a
//!   client error, an untracked pool is "not found", and an unreachable node is
//!   a server error.
//!
//! # Examples
//!
//! ```rust
//! use swapscan::{ErrorKind, SwapscanError};
//!
//! let err = SwapscanError::invalid_range("fromBlock 200 is after toBlock 100");
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! assert!(err.to_string().contains("fromBlock 200"));
//! ```

mod rpc;

pub use rpc::RpcError;

use alloy_primitives::BlockNumber;

/// Errors surfaced by the public pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum SwapscanError {
    /// The input is not a 20-byte hex address.
    #[error("Invalid address: {input:?}")]
    InvalidAddress {
        /// The rejected input, verbatim
        input: String,
    },

    /// The block range is malformed: unparsable bounds or `from > to`.
    #[error("Invalid block range: {reason}")]
    InvalidRange {
        /// Description of why the range is invalid
        reason: String,
    },

    /// The block range spans more blocks than the service allows.
    #[error("Block range too large: span of {span} blocks exceeds maximum of {max}")]
    RangeTooLarge {
        /// `toBlock - fromBlock` as requested
        span: u64,
        /// Configured maximum span
        max: u64,
    },

    /// The requested range ends past the current chain head.
    #[error("Block {to_block} is beyond the chain head {head}")]
    RangeBeyondHead {
        /// Requested upper bound
        to_block: BlockNumber,
        /// Chain head observed for this request
        head: BlockNumber,
    },

    /// The address is valid but not one of the tracked pools.
    #[error("Pool not tracked: {pool}")]
    PoolNotTracked {
        /// Canonical address of the requested pool
        pool: String,
    },

    /// The chain RPC endpoint is unreachable or returned an error that the
    /// pipeline cannot recover from.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] RpcError),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfig {
        /// Environment variable or setting name
        key: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Coarse classification of [`SwapscanError`], used by transports to pick a
/// response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied malformed input (400)
    InvalidInput,
    /// Caller asked for something that is not tracked (404)
    NotFound,
    /// Upstream failure (500)
    Upstream,
    /// The service itself is misconfigured
    Configuration,
}

impl SwapscanError {
    /// Create an `InvalidAddress` error for the given input.
    pub fn invalid_address(input: impl Into<String>) -> Self {
        SwapscanError::InvalidAddress {
            input: input.into(),
        }
    }

    /// Create an `InvalidRange` error with a reason.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        SwapscanError::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Create a `PoolNotTracked` error for a canonical pool address.
    pub fn pool_not_tracked(pool: impl Into<String>) -> Self {
        SwapscanError::PoolNotTracked { pool: pool.into() }
    }

    /// Create an `InvalidConfig` error for a setting and its raw value.
    pub fn invalid_config(key: &'static str, value: impl Into<String>) -> Self {
        SwapscanError::InvalidConfig {
            key,
            value: value.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwapscanError::InvalidAddress { .. }
            | SwapscanError::InvalidRange { .. }
            | SwapscanError::RangeTooLarge { .. }
            | SwapscanError::RangeBeyondHead { .. } => ErrorKind::InvalidInput,
            SwapscanError::PoolNotTracked { .. } => ErrorKind::NotFound,
            SwapscanError::UpstreamUnavailable(_) => ErrorKind::Upstream,
            SwapscanError::InvalidConfig { .. } => ErrorKind::Configuration,
        }
    }

    /// Returns true if the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput | ErrorKind::NotFound)
    }
}
