// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;
use tracing::info;

use crate::errors::RpcError;
use crate::transport::{RateLimitLayer, RequestTimeoutLayer};

use super::config::ProviderConfig;
use super::HttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: the service only reads from the chain,
/// so a bare [`alloy_provider::RootProvider`] is all it needs.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<HttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    info!(
        url = %url,
        rate_limit = ?config.rate_limit_per_second,
        timeout_ms = config.timeout.map(|t| t.as_millis() as u64),
        "Creating HTTP provider"
    );

    let provider = match (config.rate_limit_per_second, config.timeout) {
        (Some(rps), Some(timeout)) => {
            let client = ClientBuilder::default()
                .layer(RequestTimeoutLayer::new(timeout))
                .layer(RateLimitLayer::per_second(rps))
                .http(url);
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_client(client)
        }
        (Some(rps), None) => {
            let client = ClientBuilder::default()
                .layer(RateLimitLayer::per_second(rps))
                .http(url);
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_client(client)
        }
        (None, Some(timeout)) => {
            let client = ClientBuilder::default()
                .layer(RequestTimeoutLayer::new(timeout))
                .http(url);
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_client(client)
        }
        (None, None) => ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url),
    };

    Ok(provider)
}
