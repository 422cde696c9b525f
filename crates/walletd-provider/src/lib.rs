//! # WalletD Provider
//!
//! This crate is the bridge between the token console and the user's wallet.
//! The wallet is an external signer exposing the standard Ethereum JSON-RPC
//! methods; this crate talks to it, checks that it is the expected wallet on
//! the supported network, and watches for account changes.
//!
//! ## Features
//!
//! - [`WalletProvider`] trait describing the wallet surface the console uses
//! - [`HttpWalletProvider`] over a pooled, optionally rate-limited [`RpcClient`]
//! - [`connect`] startup detection (wallet kind, account access, network)
//! - [`AccountWatch`] account-change subscription
//! - [`SupportedNetwork`] the single network the console runs against
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use walletd_provider::{connect, BridgeConfig, HttpWalletProvider, ProviderConfig};
//!
//! let config = ProviderConfig::new("http://127.0.0.1:1248").with_timeout(30);
//! let provider = Arc::new(HttpWalletProvider::new(&config)?);
//!
//! let connection = connect(provider.as_ref(), &BridgeConfig::new("Frame")).await?;
//! println!("selected account: {:?}", connection.selected_account());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accounts;
pub mod bridge;
pub mod config;
pub mod network;
pub mod rpc;
pub mod wallet;

use thiserror::Error;
use walletd_error::WalletdError;

pub use accounts::AccountWatch;
pub use bridge::{connect, BridgeConfig, WalletConnection};
pub use config::{HttpClientConfig, ProviderConfig, RateLimitConfig};
pub use network::{SupportedNetwork, SEPOLIA};
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcClient};
pub use wallet::{HttpWalletProvider, TransactionReceipt, TransactionRequest, WalletProvider};

/// Provider-related errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RPC error response
    #[error("RPC error: code={code}, message={message}")]
    RpcError {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    /// Converts into the workspace error, tagging it with the RPC method and
    /// endpoint that produced it.
    pub fn into_walletd(self, url: &str, method: &str) -> WalletdError {
        match self {
            ProviderError::Http(e) if e.is_connect() || e.is_timeout() => {
                WalletdError::RpcConnectionError {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
            ProviderError::ConnectionFailed(reason) => WalletdError::RpcConnectionError {
                url: url.to_string(),
                reason,
            },
            other => WalletdError::RpcRequestError {
                method: method.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<ProviderError> for WalletdError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidUrl(_) | ProviderError::InvalidConfig(_) => {
                WalletdError::ConfigError(err.to_string())
            }
            other => WalletdError::External {
                message: other.to_string(),
            },
        }
    }
}
