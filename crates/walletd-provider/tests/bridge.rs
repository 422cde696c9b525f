//! Startup detection and account watching against the mock wallet.
//!
//! Run with: `cargo test -p walletd-provider --test bridge`

use std::sync::Arc;
use std::time::Duration;

use walletd_error::{ErrorCode, WalletdError};
use walletd_provider::{connect, AccountWatch, BridgeConfig, SEPOLIA};
use walletd_testing::{EdgeCaseAddresses, MockWalletProvider};

#[cfg(test)]
mod connect_tests {
    use super::*;

    #[tokio::test]
    async fn test_healthy_wallet_connects() {
        let wallet = MockWalletProvider::new();
        let connection = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap();

        assert_eq!(connection.network_id, SEPOLIA.network_id);
        assert_eq!(connection.selected_account(), Some(EdgeCaseAddresses::OWNER));
        assert_eq!(
            wallet.methods(),
            vec!["web3_clientVersion", "eth_requestAccounts", "net_version"]
        );
    }

    #[tokio::test]
    async fn test_wallet_kind_is_case_insensitive() {
        let wallet = MockWalletProvider::new().with_client_version("frame/v0.6.9");
        assert!(connect(&wallet, &BridgeConfig::new("FRAME")).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_wallet_is_fatal() {
        let wallet = MockWalletProvider::absent();
        let err = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProviderNotFound);
        assert!(err.is_fatal());
        // stops at the first check
        assert_eq!(wallet.methods(), vec!["web3_clientVersion"]);
    }

    #[tokio::test]
    async fn test_other_wallet_kind_is_not_found() {
        let wallet = MockWalletProvider::new().with_client_version("anvil/v0.2.0");
        let err = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap_err();

        assert!(matches!(err, WalletdError::ProviderNotFound(ref msg) if msg.contains("anvil")));
        assert!(!wallet.methods().contains(&"eth_requestAccounts"));
    }

    #[tokio::test]
    async fn test_denied_access_is_fatal() {
        let wallet = MockWalletProvider::new().deny_access();
        let err = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::AccessDenied);
        assert!(!wallet.methods().contains(&"net_version"));
    }

    #[tokio::test]
    async fn test_wrong_network_is_fatal() {
        let wallet = MockWalletProvider::new().with_network("1");
        let err = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap_err();

        match err {
            WalletdError::WrongNetwork { expected, got } => {
                assert_eq!(expected, "Sepolia");
                assert_eq!(got, "1");
            }
            other => panic!("expected WrongNetwork, got {other:?}"),
        }
        assert_eq!(wallet.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_no_accounts_still_connects() {
        let wallet = MockWalletProvider::new().with_accounts(vec![]);
        let connection = connect(&wallet, &BridgeConfig::new("Frame")).await.unwrap();
        assert_eq!(connection.selected_account(), None);
    }
}

#[cfg(test)]
mod account_watch_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_account_change_is_published_once() {
        let wallet = Arc::new(MockWalletProvider::new());
        let mut watch = AccountWatch::spawn(
            wallet.clone(),
            Some(EdgeCaseAddresses::OWNER),
            Duration::from_millis(100),
        );
        assert_eq!(watch.current(), Some(EdgeCaseAddresses::OWNER));

        wallet.set_accounts(vec![EdgeCaseAddresses::RECIPIENT]);
        let changed = watch.changed().await;
        assert_eq!(changed, Some(Some(EdgeCaseAddresses::RECIPIENT)));
        assert_eq!(watch.current(), Some(EdgeCaseAddresses::RECIPIENT));

        // unchanged accounts publish nothing
        let quiet = tokio::time::timeout(Duration::from_millis(550), watch.changed()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_locked_wallet_publishes_none() {
        let wallet = Arc::new(MockWalletProvider::new());
        let mut watch = AccountWatch::spawn(
            wallet.clone(),
            Some(EdgeCaseAddresses::OWNER),
            Duration::from_millis(100),
        );

        wallet.set_accounts(vec![]);
        assert_eq!(watch.changed().await, Some(None));
    }
}
