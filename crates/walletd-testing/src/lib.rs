//! # WalletD Testing Infrastructure
//!
//! Testing utilities for the WalletD token console:
//! - [`MockWalletProvider`], a scriptable wallet
//! - Edge case addresses and amounts
//! - Property-based testing strategies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use walletd_testing::*;
//!
//! let wallet = MockWalletProvider::new()
//!     .with_symbol("TKN")
//!     .with_decimals(18)
//!     .auto_confirm(1);
//!
//! proptest! {
//!     #[test]
//!     fn scaling_is_exact(whole in whole_token_amount(), decimals in token_decimals()) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod mock;

use alloy::primitives::{address, Address};
use proptest::prelude::*;

pub use mock::{selector, MockWalletProvider};

// ============================================================================
// Edge Case Addresses
// ============================================================================

/// Addresses used across the test suites
pub struct EdgeCaseAddresses;

impl EdgeCaseAddresses {
    /// Account selected in the mock wallet
    pub const OWNER: Address = address!("742d35Cc6634C0532925a3b844Bc9e7595f5fFb9");

    /// Default transfer recipient
    pub const RECIPIENT: Address = address!("837DEb7B906fbcE871E80CF833f76f8562f598B3");

    /// Token contract under test
    pub const TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    /// Ethereum zero address
    pub const ZERO: Address = Address::ZERO;

    /// Invalid Ethereum addresses
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "0x",
            "0xGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG", // Invalid hex
            "0x742d35Cc6634C0532925a3b844Bc9e7595f5",      // Too short
            "not an address",
        ]
    }
}

// ============================================================================
// Edge Case Amounts
// ============================================================================

/// Amount strings as typed by a user
pub struct EdgeCaseAmounts;

impl EdgeCaseAmounts {
    /// Malformed amount inputs
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "abc",
            "-5",
            "1.2.3",
            ".",
            "1e18",
            "5 tokens",
        ]
    }

    /// Inputs with their value scaled to 18 decimals
    pub fn scaled_18() -> Vec<(&'static str, &'static str)> {
        vec![
            ("5", "5000000000000000000"),
            ("0.5", "500000000000000000"),
            ("1.000000000000000001", "1000000000000000001"),
            ("0", "0"),
            ("007", "7000000000000000000"),
        ]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Whole-token amounts a user might type
pub fn whole_token_amount() -> impl Strategy<Value = u64> {
    0u64..=1_000_000_000_000u64
}

/// Decimals an ERC-20 token may declare
pub fn token_decimals() -> impl Strategy<Value = u8> {
    0u8..=36u8
}
