//! Generic ERC-20 read interface

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use walletd_error::Result;

/// Read side of an ERC-20 token.
///
/// None of these calls change chain state. Callers decide whether a failure
/// is worth showing to the user.
#[async_trait]
pub trait Erc20Adapter: Send + Sync {
    /// Returns the contract address for this token
    fn contract_address(&self) -> Address;

    /// Returns the token symbol
    async fn symbol(&self) -> Result<String>;

    /// Returns the number of decimals
    async fn decimals(&self) -> Result<u8>;

    /// Returns the raw balance of the given address
    async fn balance_of(&self, owner: Address) -> Result<U256>;
}
