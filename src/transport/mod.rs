// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware for the RPC transport.
//!
//! [`RateLimitLayer`] caps the number of upstream calls per period. It sits
//! under alloy's `ClientBuilder`, so every request the provider issues
//! (log queries, block and transaction lookups, contract calls) is throttled
//! by the same limiter. [`RequestTimeoutLayer`] bounds how long any single
//! request may take:
//!
//! ```rust,ignore
//! use swapscan::transport::RateLimitLayer;
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(RequestTimeoutLayer::new(Duration::from_secs(30)))
//!     .layer(RateLimitLayer::per_second(10))
//!     .http(rpc_url);
//! ```

mod rate_limit;
mod timeout;

pub use rate_limit::{RateLimitLayer, RateLimitService};
pub use timeout::{RequestTimeoutLayer, RequestTimeoutService};
