//! The single network the console is allowed to run against.

use alloy::primitives::B256;

/// A network the wallet must be connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedNetwork {
    /// Human-readable network name
    pub name: &'static str,
    /// Identifier reported by `net_version`
    pub network_id: &'static str,
    /// Block explorer prefix for transaction pages
    explorer_tx_base: &'static str,
}

/// Ethereum Sepolia testnet
pub const SEPOLIA: SupportedNetwork = SupportedNetwork {
    name: "Sepolia",
    network_id: "11155111",
    explorer_tx_base: "https://sepolia.etherscan.io/tx/",
};

impl SupportedNetwork {
    /// Link to the explorer page of a transaction
    pub fn explorer_tx_url(&self, hash: &B256) -> String {
        format!("{}{}", self.explorer_tx_base, hash)
    }

    /// Whether a `net_version` answer designates this network
    pub fn matches(&self, network_version: &str) -> bool {
        network_version.trim() == self.network_id
    }
}
