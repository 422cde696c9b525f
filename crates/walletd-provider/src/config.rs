//! Provider endpoint and HTTP client configuration.

use std::time::Duration;

use url::Url;

use crate::{ProviderError, Result};

/// Configuration for the wallet provider endpoint
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Wallet JSON-RPC URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How often the selected account is polled, in milliseconds
    pub account_poll_interval_ms: u64,
    /// How often a pending transaction's receipt is polled, in milliseconds
    pub receipt_poll_interval_ms: u64,
    /// Optional client-side rate limit
    pub rate_limit: Option<RateLimitConfig>,
}

impl ProviderConfig {
    /// Creates a new provider configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
            account_poll_interval_ms: 1000,
            receipt_poll_interval_ms: 2000,
            rate_limit: Some(RateLimitConfig::default()),
        }
    }

    /// Sets the request timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the account polling interval
    pub fn with_account_poll_interval(mut self, ms: u64) -> Self {
        self.account_poll_interval_ms = ms;
        self
    }

    /// Sets the receipt polling interval
    pub fn with_receipt_poll_interval(mut self, ms: u64) -> Self {
        self.receipt_poll_interval_ms = ms;
        self
    }

    /// Sets or clears the client-side rate limit
    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimitConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.url).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;
        if self.timeout_secs == 0 {
            return Err(ProviderError::InvalidConfig("timeout must be non-zero".into()));
        }
        if self.account_poll_interval_ms == 0 || self.receipt_poll_interval_ms == 0 {
            return Err(ProviderError::InvalidConfig(
                "poll intervals must be non-zero".into(),
            ));
        }
        if let Some(limit) = &self.rate_limit {
            limit.validate()?;
        }
        Ok(())
    }

    /// Account polling interval as a [`Duration`]
    pub fn account_poll_interval(&self) -> Duration {
        Duration::from_millis(self.account_poll_interval_ms)
    }

    /// Receipt polling interval as a [`Duration`]
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}

impl Default for ProviderConfig {
    // Frame's local RPC endpoint
    fn default() -> Self {
        Self::new("http://127.0.0.1:1248")
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout_secs: u64,
    /// Connection timeout
    pub connect_timeout_secs: u64,
    /// Request timeout
    pub request_timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Enable gzip compression
    pub gzip: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 4,
            pool_idle_timeout_secs: 90,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            user_agent: format!("WalletD-Token/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
        }
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per second
    pub requests_per_second: u32,
    /// Burst size (max requests in a burst)
    pub burst_size: u32,
}

impl RateLimitConfig {
    fn validate(&self) -> Result<()> {
        if self.requests_per_second == 0 || self.burst_size == 0 {
            return Err(ProviderError::InvalidConfig(
                "rate limit values must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 20,
        }
    }
}
