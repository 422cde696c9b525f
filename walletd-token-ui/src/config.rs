//! Configuration

use std::path::Path;
use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use walletd_error::{ErrorContext, Result, WalletdError};
use walletd_provider::{BridgeConfig, ProviderConfig};

use crate::session::SessionSettings;

pub const DEFAULT_CONFIG_FILE: &str = "walletd_token.json";

pub const ENV_PROVIDER_URL: &str = "WALLETD_PROVIDER_URL";
pub const ENV_TOKEN_CONTRACT: &str = "WALLETD_TOKEN_CONTRACT";
pub const ENV_EXPECTED_WALLET: &str = "WALLETD_EXPECTED_WALLET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUiConfig {
    pub provider_url: String,
    pub expected_wallet: String,
    pub contract_address: Option<String>,
    pub default_recipient: Option<String>,
    pub account_poll_interval_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for TokenUiConfig {
    fn default() -> Self {
        Self {
            provider_url: "http://127.0.0.1:1248".to_string(),
            expected_wallet: "Frame".to_string(),
            contract_address: None,
            default_recipient: Some("0x837DEb7B906fbcE871E80CF833f76f8562f598B3".to_string()),
            account_poll_interval_ms: 1000,
            receipt_poll_interval_ms: 2000,
            request_timeout_secs: 30,
        }
    }
}

impl TokenUiConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw)
            .map_err(|e| WalletdError::ConfigError(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Applies `WALLETD_*` variables from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_PROVIDER_URL) {
            self.provider_url = url;
        }
        if let Some(contract) = lookup(ENV_TOKEN_CONTRACT) {
            self.contract_address = Some(contract);
        }
        if let Some(wallet) = lookup(ENV_EXPECTED_WALLET) {
            self.expected_wallet = wallet;
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.provider_url.clone())
            .with_timeout(self.request_timeout_secs)
            .with_account_poll_interval(self.account_poll_interval_ms)
            .with_receipt_poll_interval(self.receipt_poll_interval_ms)
    }

    pub fn session_settings(&self) -> Result<SessionSettings> {
        let raw = self.contract_address.as_deref().ok_or_else(|| {
            WalletdError::ConfigError(format!(
                "contract_address is not set (config file or {ENV_TOKEN_CONTRACT})"
            ))
        })?;
        let contract_address: Address = raw.trim().parse().map_err(|e| {
            WalletdError::ConfigError(format!("contract_address '{raw}' is not an address: {e}"))
        })?;

        Ok(SessionSettings {
            bridge: BridgeConfig::new(self.expected_wallet.clone()),
            contract_address,
            default_recipient: self.default_recipient.clone(),
            account_poll_interval: Duration::from_millis(self.account_poll_interval_ms),
            receipt_poll_interval: Duration::from_millis(self.receipt_poll_interval_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use walletd_testing::EdgeCaseAddresses;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TokenUiConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, TokenUiConfig::default());
        assert_eq!(config.provider_url, "http://127.0.0.1:1248");
        assert_eq!(config.expected_wallet, "Frame");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "contract_address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "receipt_poll_interval_ms": 500 }"#,
        )
        .unwrap();

        let config = TokenUiConfig::load(&path).unwrap();
        assert_eq!(config.receipt_poll_interval_ms, 500);
        assert_eq!(config.account_poll_interval_ms, 1000);

        let settings = config.session_settings().unwrap();
        assert_eq!(settings.contract_address, EdgeCaseAddresses::TOKEN);
        assert_eq!(settings.receipt_poll_interval, Duration::from_millis(500));
        assert_eq!(settings.bridge.expected_wallet, "Frame");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let config = TokenUiConfig {
            contract_address: Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into()),
            ..TokenUiConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(TokenUiConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(TokenUiConfig::load(&path), Err(WalletdError::ConfigError(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_PROVIDER_URL, "http://localhost:8545"),
            (ENV_EXPECTED_WALLET, "Anvil"),
        ]
        .into_iter()
        .collect();

        let mut config = TokenUiConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.provider_url, "http://localhost:8545");
        assert_eq!(config.expected_wallet, "Anvil");
        assert_eq!(config.contract_address, None);
    }

    #[test]
    fn test_contract_address_required() {
        let err = TokenUiConfig::default().session_settings().unwrap_err();
        assert!(err.to_string().contains(ENV_TOKEN_CONTRACT));

        let config = TokenUiConfig {
            contract_address: Some("0x1234".into()),
            ..TokenUiConfig::default()
        };
        assert!(matches!(config.session_settings(), Err(WalletdError::ConfigError(_))));
    }

    #[test]
    fn test_provider_config_carries_timings() {
        let config = TokenUiConfig {
            request_timeout_secs: 5,
            receipt_poll_interval_ms: 250,
            ..TokenUiConfig::default()
        };
        let provider = config.provider_config();
        assert_eq!(provider.timeout_secs, 5);
        assert_eq!(provider.receipt_poll_interval_ms, 250);
        assert!(provider.validate().is_ok());
    }
}
