//! Binding to the deployed token contract

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use walletd_error::{Result, WalletdError};
use walletd_provider::{TransactionRequest, WalletProvider};

use crate::adapter::Erc20Adapter;
use crate::tracker::TransactionWatch;

// Interface descriptor of the token contract
sol! {
    function symbol() external view returns (string);
    function decimals() external view returns (uint8);
    function balanceOf(address account) external view returns (uint256);
    function transfer(address to, uint256 amount) external returns (bool);
    function mint(address to, uint256 amount) external;
}

const DEFAULT_RECEIPT_POLL: Duration = Duration::from_secs(2);

/// Typed handle on the token contract, calling through the user's wallet.
pub struct TokenContract<P: ?Sized> {
    provider: Arc<P>,
    address: Address,
    receipt_poll_interval: Duration,
}

impl<P: ?Sized> Clone for TokenContract<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            address: self.address,
            receipt_poll_interval: self.receipt_poll_interval,
        }
    }
}

impl<P: ?Sized> std::fmt::Debug for TokenContract<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenContract")
            .field("address", &self.address)
            .field("receipt_poll_interval", &self.receipt_poll_interval)
            .finish()
    }
}

impl<P> TokenContract<P>
where
    P: WalletProvider + ?Sized + 'static,
{
    /// Binds the contract at `address`
    pub fn new(provider: Arc<P>, address: Address) -> Self {
        Self {
            provider,
            address,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL,
        }
    }

    /// Sets how often receipts of submitted writes are polled
    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    /// Sends `amount` base units from `from` to `to`
    pub fn transfer(&self, from: Address, to: Address, amount: U256) -> TransactionWatch {
        self.submit(from, transferCall { to, amount }, "transfer")
    }

    /// Mints `amount` base units to `to`, sent by `from`
    pub fn mint(&self, from: Address, to: Address, amount: U256) -> TransactionWatch {
        self.submit(from, mintCall { to, amount }, "mint")
    }

    fn submit<C: SolCall>(&self, from: Address, call: C, label: &'static str) -> TransactionWatch {
        let tx = TransactionRequest {
            from,
            to: self.address,
            data: Bytes::from(call.abi_encode()),
        };
        TransactionWatch::spawn(
            Arc::clone(&self.provider),
            tx,
            self.receipt_poll_interval,
            label,
        )
    }

    async fn call_contract<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let result = self
            .provider
            .call(self.address, Bytes::from(call.abi_encode()))
            .await
            .map_err(|e| WalletdError::ContractError(format!("{}: {e}", C::SIGNATURE)))?;

        C::abi_decode_returns(&result)
            .map_err(|e| WalletdError::AbiError(format!("Decode error in {}: {e}", C::SIGNATURE)))
    }
}

#[async_trait]
impl<P> Erc20Adapter for TokenContract<P>
where
    P: WalletProvider + ?Sized + 'static,
{
    fn contract_address(&self) -> Address {
        self.address
    }

    async fn symbol(&self) -> Result<String> {
        self.call_contract(symbolCall {}).await
    }

    async fn decimals(&self) -> Result<u8> {
        self.call_contract(decimalsCall {}).await
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.call_contract(balanceOfCall { account: owner }).await
    }
}
