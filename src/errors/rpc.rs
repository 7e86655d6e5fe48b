// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for chain-access operations.
//!
//! Every call the pipeline makes against the upstream node funnels its
//! failure through [`RpcError`], carrying enough context (operation, block,
//! transaction, contract method) to make the log line useful on its own.

use alloy_primitives::{Address, BlockNumber, TxHash};

/// Errors that can occur while talking to the chain RPC endpoint.
///
/// # Examples
///
/// ```rust
/// use swapscan::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 42 };
/// assert_eq!(error.to_string(), "Block not found: 42");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to fetch logs from the node.
    ///
    /// This can occur due to rate limiting, oversized block ranges or plain
    /// connectivity issues.
    #[error("Failed to fetch logs for {operation}")]
    GetLogsFailed {
        /// Description of the operation that failed (e.g., "Swap logs 100-200")
        operation: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered, but has no block at this height.
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: BlockNumber,
    },

    /// The block request itself failed.
    ///
    /// This is different from `BlockNotFound` - it indicates the RPC call
    /// failed, not that the block doesn't exist.
    #[error("Failed to fetch block {block_number} details")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: BlockNumber,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the latest block header.
    #[error("Failed to get latest block")]
    GetLatestBlockFailed {
        /// The underlying provider error, if the node returned one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transaction was not found on the node.
    #[error("Transaction not found: {tx_hash}")]
    TransactionNotFound {
        /// The transaction hash that wasn't found
        tx_hash: TxHash,
    },

    /// The transaction request itself failed.
    #[error("Failed to fetch transaction {tx_hash}")]
    GetTransactionFailed {
        /// The transaction hash we tried to fetch
        tx_hash: TxHash,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read-only contract call failed or reverted.
    #[error("Contract call {method} on {contract} failed")]
    ContractCallFailed {
        /// The contract that was called
        contract: Address,
        /// Solidity method name, e.g. `R()` or `symbol()`
        method: &'static str,
        /// The underlying contract error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The pool reported the quote asset as its own token, so it has no
    /// distinct asset0/asset1 pair.
    #[error("Pool {pool} reports the quote asset {token} as its token")]
    PoolTokenIsQuote {
        /// The pool that was queried
        pool: Address,
        /// Token returned by `TOK()`
        token: Address,
    },

    /// The configured RPC URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `GetLogsFailed` error from any error type.
    pub fn get_logs_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetLogsFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: BlockNumber,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetLatestBlockFailed` error from any error type.
    pub fn get_latest_block_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetLatestBlockFailed {
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a `GetTransactionFailed` error from any error type.
    pub fn get_transaction_failed(
        tx_hash: TxHash,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetTransactionFailed {
            tx_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `ContractCallFailed` error from any error type.
    pub fn contract_call_failed(
        contract: Address,
        method: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ContractCallFailed {
            contract,
            method,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::error::Error as _;

    #[test]
    fn contract_call_failed_keeps_source() {
        let io = std::io::Error::other("execution reverted");
        let err = RpcError::contract_call_failed(
            address!("0000000000000000000000000000000000000001"),
            "R()",
            io,
        );

        assert_eq!(
            err.to_string(),
            "Contract call R() on 0x0000000000000000000000000000000000000001 failed"
        );
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("execution reverted".to_string())
        );
    }

    #[test]
    fn latest_block_failure_without_source() {
        let err = RpcError::GetLatestBlockFailed { source: None };
        assert!(err.source().is_none());
    }
}
