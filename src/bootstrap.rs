// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Process wiring: environment → provider → pipeline → HTTP server.

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{router, serve_api};
use crate::chain::AlloyChainReader;
use crate::config::constants::DEFAULT_LISTEN_ADDR;
use crate::config::SwapscanConfig;
use crate::pipeline::EventAggregator;
use crate::provider::{create_http_provider, HttpProvider, ProviderConfig};

/// Aggregator over the HTTP provider, as served by the binary
pub type HttpAggregator = EventAggregator<AlloyChainReader<HttpProvider>>;

/// Build the aggregator from explicit configuration.
pub fn build_aggregator(
    provider_config: ProviderConfig,
    config: SwapscanConfig,
) -> anyhow::Result<HttpAggregator> {
    let url = provider_config.url.clone();
    let provider = create_http_provider(provider_config)
        .with_context(|| format!("Failed to create provider for {url}"))?;
    let chain = AlloyChainReader::new(provider, config.log_chunk_size);
    Ok(EventAggregator::new(Arc::new(chain), config))
}

/// Listen address from `LISTEN_ADDR`, or `0.0.0.0:$PORT`, or the default.
fn listen_addr() -> String {
    if let Ok(addr) = dotenvy::var("LISTEN_ADDR") {
        return addr;
    }
    match dotenvy::var("PORT") {
        Ok(port) => format!("0.0.0.0:{port}"),
        Err(_) => DEFAULT_LISTEN_ADDR.to_string(),
    }
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let provider_config = ProviderConfig::from_env()?;
    let config = SwapscanConfig::from_env()?;

    if config.tracked_pools.is_empty() {
        warn!("CORES is empty, /events will always return no events");
    }
    info!(
        rpc_url = %provider_config.url,
        rate_limit = ?provider_config.rate_limit_per_second,
        chain_id = config.chain_id,
        pools = config.tracked_pools.len(),
        max_block_range = %config.max_block_range,
        "Loaded configuration"
    );

    let aggregator = Arc::new(build_aggregator(provider_config, config)?);

    let addr = listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    serve_api(listener, router(aggregator)).await
}
