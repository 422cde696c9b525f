//! # WalletD Error
//!
//! Unified error types for the WalletD token console. Every crate in the
//! workspace reports failures through [`WalletdError`] so the session can
//! decide, per error, whether the user sees it or it is only logged.
//!
//! ## Error Tiers
//!
//! - Setup errors ([`WalletdError::is_fatal`]) are shown once and never retried
//! - Write-validation errors are shown to the user
//! - Call errors (failed reads, RPC failures) are logged only
//!
//! ## Example
//!
//! ```
//! use walletd_error::{WalletdError, Result};
//!
//! fn require_recipient(recipient: &str) -> Result<()> {
//!     if recipient.is_empty() {
//!         return Err(WalletdError::MissingRecipient);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for WalletD operations.
#[derive(Error, Debug)]
pub enum WalletdError {
    // ============ Setup Errors ============
    /// No wallet provider answered, or it is not the expected wallet kind
    #[error("Wallet provider not found: {0}")]
    ProviderNotFound(String),

    /// The user refused account access
    #[error("Account access denied: {0}")]
    AccessDenied(String),

    /// The provider is connected to a network other than the supported one
    #[error("Wrong network: expected {expected}, got {got}")]
    WrongNetwork {
        /// Supported network identifier
        expected: String,
        /// Network identifier reported by the provider
        got: String,
    },

    /// No account is selected in the wallet
    #[error("User account not initialized")]
    AccountNotInitialized,

    // ============ Write Validation Errors ============
    /// Recipient field left empty
    #[error("Recipient address is missing")]
    MissingRecipient,

    /// Amount field left empty
    #[error("Token amount is missing")]
    MissingAmount,

    /// Invalid address format or checksum
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The invalid address
        address: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid amount format
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount overflow during scaling
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    // ============ Network Errors ============
    /// RPC connection failed
    #[error("RPC connection failed: {url} - {reason}")]
    RpcConnectionError {
        /// RPC URL
        url: String,
        /// Error reason
        reason: String,
    },

    /// RPC request failed
    #[error("RPC request failed: {method} - {reason}")]
    RpcRequestError {
        /// RPC method name
        method: String,
        /// Error reason
        reason: String,
    },

    // ============ Contract Errors ============
    /// Contract call failed
    #[error("Contract call failed: {0}")]
    ContractError(String),

    /// ABI encoding/decoding error
    #[error("ABI error: {0}")]
    AbiError(String),

    /// Transaction submission failed
    #[error("Failed to broadcast transaction: {0}")]
    BroadcastError(String),

    // ============ Parsing Errors ============
    /// JSON parse error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ============ IO Errors ============
    /// File IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ============ Generic ============
    /// Unknown/other error
    #[error("{0}")]
    Other(String),

    /// Wrapped error from external source
    #[error("External error: {message}")]
    External {
        /// Error message
        message: String,
    },
}

/// Convenient Result type using WalletdError
pub type Result<T> = std::result::Result<T, WalletdError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Adds context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;

    /// Adds context using a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| WalletdError::External {
            message: format!("{}: {}", ctx.into(), e),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| WalletdError::External {
            message: format!("{}: {}", f(), e),
        })
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| WalletdError::Other(ctx.into()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| WalletdError::Other(f()))
    }
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for WalletdError {
    fn from(err: std::io::Error) -> Self {
        WalletdError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for WalletdError {
    fn from(err: serde_json::Error) -> Self {
        WalletdError::JsonError(err.to_string())
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// Unknown error
    Unknown = 0,
    /// Provider missing or of the wrong kind
    ProviderNotFound = 1001,
    /// Account access refused
    AccessDenied = 1002,
    /// Provider on an unsupported network
    WrongNetwork = 1003,
    /// No selected account
    AccountNotInitialized = 1004,
    /// Recipient missing
    MissingRecipient = 2001,
    /// Amount missing
    MissingAmount = 2002,
    /// Invalid address
    InvalidAddress = 2003,
    /// Invalid amount
    InvalidAmount = 2004,
    /// Amount overflow
    AmountOverflow = 2005,
    /// RPC connection error
    RpcConnectionError = 4001,
    /// RPC request error
    RpcRequestError = 4002,
    /// Contract error
    ContractError = 5001,
    /// ABI error
    AbiError = 5002,
    /// Broadcast error
    BroadcastError = 5003,
    /// Configuration error
    ConfigError = 9001,
}

impl WalletdError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            WalletdError::ProviderNotFound(_) => ErrorCode::ProviderNotFound,
            WalletdError::AccessDenied(_) => ErrorCode::AccessDenied,
            WalletdError::WrongNetwork { .. } => ErrorCode::WrongNetwork,
            WalletdError::AccountNotInitialized => ErrorCode::AccountNotInitialized,
            WalletdError::MissingRecipient => ErrorCode::MissingRecipient,
            WalletdError::MissingAmount => ErrorCode::MissingAmount,
            WalletdError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            WalletdError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            WalletdError::AmountOverflow(_) => ErrorCode::AmountOverflow,
            WalletdError::RpcConnectionError { .. } => ErrorCode::RpcConnectionError,
            WalletdError::RpcRequestError { .. } => ErrorCode::RpcRequestError,
            WalletdError::ContractError(_) => ErrorCode::ContractError,
            WalletdError::AbiError(_) => ErrorCode::AbiError,
            WalletdError::BroadcastError(_) => ErrorCode::BroadcastError,
            WalletdError::ConfigError(_) => ErrorCode::ConfigError,
            _ => ErrorCode::Unknown,
        }
    }

    /// Returns true for setup errors the user has to fix in their environment.
    ///
    /// These are reported once and never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WalletdError::ProviderNotFound(_)
                | WalletdError::AccessDenied(_)
                | WalletdError::WrongNetwork { .. }
                | WalletdError::AccountNotInitialized
        )
    }

    /// Returns true for errors raised while validating a write request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletdError::MissingRecipient
                | WalletdError::MissingAmount
                | WalletdError::InvalidAddress { .. }
                | WalletdError::InvalidAmount(_)
                | WalletdError::AmountOverflow(_)
        )
    }

    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            WalletdError::ProviderNotFound(_) => "Wallet provider not installed".to_string(),
            WalletdError::AccessDenied(_) => "Please allow account access in your wallet".to_string(),
            WalletdError::WrongNetwork { expected, .. } => {
                format!("Please change the network in your wallet to {expected}")
            }
            WalletdError::AccountNotInitialized => "User account not initialized".to_string(),
            WalletdError::MissingRecipient => "Please enter the recipient address".to_string(),
            WalletdError::MissingAmount => "Please enter tokens to transfer".to_string(),
            WalletdError::InvalidAddress { .. } => "Invalid recipient address".to_string(),
            WalletdError::InvalidAmount(_) | WalletdError::AmountOverflow(_) => {
                "Please enter a valid token amount".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletdError::InvalidAddress {
            address: "0x123".to_string(),
            reason: "Too short".to_string(),
        };
        assert!(err.to_string().contains("0x123"));
        assert!(err.to_string().contains("Too short"));
    }

    #[test]
    fn test_error_code() {
        let err = WalletdError::WrongNetwork {
            expected: "11155111".into(),
            got: "1".into(),
        };
        assert_eq!(err.code(), ErrorCode::WrongNetwork);
        assert_eq!(WalletdError::Other("x".into()).code(), ErrorCode::Unknown);
    }

    #[test]
    fn test_fatal_tier() {
        assert!(WalletdError::ProviderNotFound("none".into()).is_fatal());
        assert!(WalletdError::AccountNotInitialized.is_fatal());
        assert!(!WalletdError::MissingAmount.is_fatal());
        assert!(!WalletdError::ContractError("reverted".into()).is_fatal());
    }

    #[test]
    fn test_validation_tier() {
        assert!(WalletdError::MissingRecipient.is_validation());
        assert!(WalletdError::InvalidAmount("abc".into()).is_validation());
        assert!(!WalletdError::RpcRequestError {
            method: "eth_call".into(),
            reason: "timeout".into(),
        }
        .is_validation());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WalletdError::MissingRecipient.user_message(),
            "Please enter the recipient address"
        );
        assert_eq!(
            WalletdError::MissingAmount.user_message(),
            "Please enter tokens to transfer"
        );
        let wrong = WalletdError::WrongNetwork {
            expected: "Sepolia".into(),
            got: "1".into(),
        };
        assert!(wrong.user_message().contains("Sepolia"));
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "file missing"));

        let with_ctx = result.context("Failed to load config");
        assert!(with_ctx.is_err());
        assert!(with_ctx.unwrap_err().to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: WalletdError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(err.code(), ErrorCode::Unknown);
        assert!(matches!(err, WalletdError::JsonError(_)));
    }
}
