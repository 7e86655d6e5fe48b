// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! [`create_http_provider`] builds an alloy [`RootProvider`] whose transport is
//! wrapped in the layers from [`crate::transport`]: a per-request timeout and
//! a rate limiter shared by every call made through the provider.
//!
//! ```rust,ignore
//! use swapscan::provider::{create_http_provider, ProviderConfig};
//!
//! let provider = create_http_provider(
//!     ProviderConfig::new("https://rpc.example.org").with_rate_limit(10),
//! )?;
//! let head = provider.get_block_number().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_http_provider;

use alloy_network::Ethereum;
use alloy_provider::RootProvider;

/// HTTP provider used by the service
pub type HttpProvider = RootProvider<Ethereum>;
