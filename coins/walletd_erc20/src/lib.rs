//! WalletD ERC‑20 module
//!
//! This crate binds the token console to one deployed ERC‑20 style
//! contract. Reads go through `eth_call`; writes are handed to the user's
//! wallet for signing and tracked until their first confirmation.
//! Every call is routed through a [`walletd_provider::WalletProvider`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod adapter;
pub mod amount;
pub mod contract;
pub mod tracker;

/// Exposes commonly used types when working with the token binding.
pub mod prelude {
    pub use super::adapter::Erc20Adapter;
    pub use super::amount::{display_balance, scale_amount, BALANCE_DISPLAY_DECIMALS};
    pub use super::contract::TokenContract;
    pub use super::tracker::{TransactionWatch, TxEvent};
}
