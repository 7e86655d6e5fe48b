// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::constants::{DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL};
use crate::errors::SwapscanError;

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use swapscan::provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("https://rpc.example.org")
///     .with_rate_limit(10)
///     .with_timeout(Duration::from_secs(15));
/// assert!(config.has_rate_limiting());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Requests per second, `None` for unlimited
    pub rate_limit_per_second: Option<u32>,
    /// Per-request deadline, `None` to wait indefinitely
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Create a configuration for `url` with no rate limit and the default timeout
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rate_limit_per_second: None,
            timeout: Some(DEFAULT_RPC_TIMEOUT),
        }
    }

    /// Throttle requests to `requests_per_second`
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set rate limiting from an optional value
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the per-request timeout
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    #[must_use]
    pub fn has_rate_limiting(&self) -> bool {
        self.rate_limit_per_second.is_some()
    }

    /// Load from the environment.
    ///
    /// | Variable          | Meaning                         | Default                 |
    /// |-------------------|---------------------------------|-------------------------|
    /// | `RPC_URL`         | endpoint                        | `http://localhost:8545` |
    /// | `RPC_RATE_LIMIT`  | requests per second             | unlimited               |
    /// | `RPC_TIMEOUT_SECS`| per-request timeout in seconds  | 30                      |
    pub fn from_env() -> Result<Self, SwapscanError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SwapscanError> {
        let url = lookup("RPC_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let mut config = Self::new(url);

        if let Some(raw) = lookup("RPC_RATE_LIMIT") {
            let rps = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| SwapscanError::invalid_config("RPC_RATE_LIMIT", &raw))?;
            config = config.with_rate_limit(rps);
        }

        if let Some(raw) = lookup("RPC_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| SwapscanError::invalid_config("RPC_TIMEOUT_SECS", &raw))?;
            config = if secs == 0 {
                config.without_timeout()
            } else {
                config.with_timeout(Duration::from_secs(secs))
            };
        }

        Ok(config)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}
