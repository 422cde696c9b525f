//! Startup detection: is there a wallet, is it the right kind, may we use an
//! account, and is it on the supported network.

use alloy::primitives::Address;
use walletd_error::{Result, WalletdError};

use crate::network::{SupportedNetwork, SEPOLIA};
use crate::wallet::WalletProvider;

/// What the bridge expects to find on the other end.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Substring the wallet's client version must contain (case-insensitive)
    pub expected_wallet: String,
    /// The one network the console accepts
    pub network: SupportedNetwork,
}

impl BridgeConfig {
    /// Expects `expected_wallet` on [`SEPOLIA`]
    pub fn new(expected_wallet: impl Into<String>) -> Self {
        Self {
            expected_wallet: expected_wallet.into(),
            network: SEPOLIA,
        }
    }
}

/// A wallet that passed every startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConnection {
    /// Client version the wallet reported
    pub client_version: String,
    /// Network identifier the wallet reported
    pub network_id: String,
    /// Accounts exposed after the access request
    pub accounts: Vec<Address>,
}

impl WalletConnection {
    /// The account transactions are sent from
    pub fn selected_account(&self) -> Option<Address> {
        self.accounts.first().copied()
    }
}

/// Runs the startup checks in order and stops at the first failure.
///
/// Every error returned here is fatal ([`WalletdError::is_fatal`]); nothing is
/// retried. The caller reports it once and gives up.
pub async fn connect<P>(provider: &P, config: &BridgeConfig) -> Result<WalletConnection>
where
    P: WalletProvider + ?Sized,
{
    let client_version = match provider.client_version().await {
        Ok(version) => version,
        Err(e) => {
            tracing::error!("wallet provider did not answer: {e}");
            return Err(WalletdError::ProviderNotFound(e.to_string()));
        }
    };

    let expected = config.expected_wallet.to_lowercase();
    if !client_version.to_lowercase().contains(&expected) {
        tracing::error!(
            found = %client_version,
            expected = %config.expected_wallet,
            "unexpected wallet provider"
        );
        return Err(WalletdError::ProviderNotFound(format!(
            "expected {}, found {}",
            config.expected_wallet, client_version
        )));
    }

    let accounts = provider.request_accounts().await.map_err(|e| {
        tracing::error!("account access request failed: {e}");
        WalletdError::AccessDenied(e.to_string())
    })?;

    let network_id = provider.network_version().await.map_err(|e| {
        tracing::error!("network identification failed: {e}");
        WalletdError::WrongNetwork {
            expected: config.network.name.to_string(),
            got: "unknown".to_string(),
        }
    })?;

    if !config.network.matches(&network_id) {
        tracing::error!(
            expected = config.network.network_id,
            got = %network_id,
            "wallet is on an unsupported network"
        );
        return Err(WalletdError::WrongNetwork {
            expected: config.network.name.to_string(),
            got: network_id,
        });
    }

    tracing::info!(
        wallet = %client_version,
        network = config.network.name,
        accounts = accounts.len(),
        "wallet connected"
    );

    Ok(WalletConnection {
        client_version,
        network_id,
        accounts,
    })
}
