//! The wallet provider surface and its JSON-RPC implementation.

use alloy::primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use walletd_error::Result;

use crate::config::{HttpClientConfig, ProviderConfig};
use crate::rpc::RpcClient;

/// A transaction the wallet is asked to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Sending account; must be one the wallet controls
    pub from: Address,
    /// Contract being called
    pub to: Address,
    /// ABI-encoded call data
    pub data: Bytes,
}

/// The subset of a transaction receipt the console cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the mined transaction
    pub transaction_hash: B256,
    /// Block the transaction was included in
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` on success, `0` on revert
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// Block number of the first confirmation, if the receipt has one
    pub fn confirmed_block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// Methods the console needs from a wallet.
///
/// Signing, key storage and account management all live behind this trait;
/// the console never sees a private key.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Self-reported client identification (`web3_clientVersion`)
    async fn client_version(&self) -> Result<String>;

    /// Asks the user to expose accounts (`eth_requestAccounts`). May wait for
    /// the user to approve in the wallet.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Accounts currently exposed to the console (`eth_accounts`)
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Network identifier (`net_version`)
    async fn network_version(&self) -> Result<String>;

    /// Read-only contract call against the latest block (`eth_call`)
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Signs and broadcasts a transaction (`eth_sendTransaction`)
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256>;

    /// Receipt of a transaction, `None` while it is not mined
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;
}

/// [`WalletProvider`] speaking JSON-RPC over HTTP to a local signing wallet.
#[derive(Debug)]
pub struct HttpWalletProvider {
    url: String,
    client: RpcClient,
}

impl HttpWalletProvider {
    /// Creates a provider for the configured endpoint
    pub fn new(config: &ProviderConfig) -> crate::Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig {
            request_timeout_secs: config.timeout_secs,
            ..Default::default()
        };
        let client = RpcClient::with_config(http_config, config.rate_limit.clone())?;

        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    /// Endpoint this provider talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<R>(&self, method: &str, params: serde_json::Value) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        self.client
            .rpc_call(&self.url, method, params)
            .await
            .map_err(|e| e.into_walletd(&self.url, method))
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn client_version(&self) -> Result<String> {
        self.request("web3_clientVersion", json!([])).await
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_requestAccounts", json!([])).await
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    async fn network_version(&self) -> Result<String> {
        self.request("net_version", json!([])).await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let method = "eth_getTransactionReceipt";
        self.client
            .rpc_call_nullable(&self.url, method, json!([hash]))
            .await
            .map_err(|e| e.into_walletd(&self.url, method))
    }
}
