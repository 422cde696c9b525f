//! Scriptable in-memory wallet.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{keccak256, Address, Bytes, B256, U256, U64};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use walletd_error::{Result, WalletdError};
use walletd_provider::{TransactionReceipt, TransactionRequest, WalletProvider};

use crate::EdgeCaseAddresses;

/// Four-byte selector of a Solidity function signature, e.g. `"symbol()"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[derive(Debug)]
struct MockState {
    client_version: Option<String>,
    access_denied: bool,
    accounts: Vec<Address>,
    network_version: String,
    call_responses: HashMap<[u8; 4], Bytes>,
    failing_selectors: HashSet<[u8; 4]>,
    calls: Vec<(Address, Bytes)>,
    methods: Vec<&'static str>,
    send_error: Option<String>,
    sent: Vec<TransactionRequest>,
    sent_hashes: Vec<B256>,
    confirmed: HashMap<B256, u64>,
    auto_confirm_block: Option<u64>,
    receipt_polls: u64,
}

/// A [`WalletProvider`] whose answers are set up by the test.
///
/// By default it behaves like a healthy Frame wallet on Sepolia with one
/// account and no contract state: every `eth_call` fails until a response
/// is registered. Submitted transactions stay pending until
/// [`MockWalletProvider::confirm`] is called or auto-confirmation is on.
#[derive(Debug)]
pub struct MockWalletProvider {
    state: Mutex<MockState>,
}

impl Default for MockWalletProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWalletProvider {
    /// Healthy wallet on Sepolia with [`EdgeCaseAddresses::OWNER`] selected
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                client_version: Some("Frame/v0.6.9".to_string()),
                access_denied: false,
                accounts: vec![EdgeCaseAddresses::OWNER],
                network_version: "11155111".to_string(),
                call_responses: HashMap::new(),
                failing_selectors: HashSet::new(),
                calls: Vec::new(),
                methods: Vec::new(),
                send_error: None,
                sent: Vec::new(),
                sent_hashes: Vec::new(),
                confirmed: HashMap::new(),
                auto_confirm_block: None,
                receipt_polls: 0,
            }),
        }
    }

    /// No wallet at all: every method fails as if the endpoint were down
    pub fn absent() -> Self {
        let mock = Self::new();
        mock.state.lock().client_version = None;
        mock
    }

    /// Reports a different client version
    pub fn with_client_version(self, version: impl Into<String>) -> Self {
        self.state.lock().client_version = Some(version.into());
        self
    }

    /// Reports a different network
    pub fn with_network(self, network_version: impl Into<String>) -> Self {
        self.state.lock().network_version = network_version.into();
        self
    }

    /// Exposes these accounts
    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state.lock().accounts = accounts;
        self
    }

    /// Rejects the account access request
    pub fn deny_access(self) -> Self {
        self.state.lock().access_denied = true;
        self
    }

    /// Answers `symbol()`
    pub fn with_symbol(self, symbol: &str) -> Self {
        self.respond(selector("symbol()"), symbol.to_string().abi_encode())
    }

    /// Answers `decimals()`
    pub fn with_decimals(self, decimals: u8) -> Self {
        self.respond(selector("decimals()"), U256::from(decimals).abi_encode())
    }

    /// Answers `balanceOf(address)` for every owner
    pub fn with_balance(self, balance: U256) -> Self {
        self.respond(selector("balanceOf(address)"), balance.abi_encode())
    }

    /// Answers calls to `signature` with raw bytes
    pub fn with_raw_response(self, signature: &str, data: impl Into<Bytes>) -> Self {
        self.respond(selector(signature), data.into().to_vec())
    }

    /// Makes calls with this selector fail
    pub fn failing(self, signature: &str) -> Self {
        self.state.lock().failing_selectors.insert(selector(signature));
        self
    }

    /// Makes `eth_sendTransaction` fail with `reason`
    pub fn rejecting_transactions(self, reason: impl Into<String>) -> Self {
        self.state.lock().send_error = Some(reason.into());
        self
    }

    /// Confirms every transaction in `block` on its first receipt poll
    pub fn auto_confirm(self, block: u64) -> Self {
        self.state.lock().auto_confirm_block = Some(block);
        self
    }

    fn respond(self, selector: [u8; 4], encoded: Vec<u8>) -> Self {
        self.state
            .lock()
            .call_responses
            .insert(selector, Bytes::from(encoded));
        self
    }

    /// Switches the selected account at runtime
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().accounts = accounts;
    }

    /// Changes the `balanceOf` answer at runtime
    pub fn set_balance(&self, balance: U256) {
        self.state
            .lock()
            .call_responses
            .insert(selector("balanceOf(address)"), Bytes::from(balance.abi_encode()));
    }

    /// Mines `hash` in `block`
    pub fn confirm(&self, hash: B256, block: u64) {
        self.state.lock().confirmed.insert(hash, block);
    }

    /// Number of `eth_call`s made with this function signature
    pub fn calls_to(&self, signature: &str) -> usize {
        let wanted = selector(signature);
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(_, data)| data.len() >= 4 && data[..4] == wanted)
            .count()
    }

    /// Number of `eth_call`s made
    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// RPC methods invoked so far, in order
    pub fn methods(&self) -> Vec<&'static str> {
        self.state.lock().methods.clone()
    }

    /// Transactions handed to `eth_sendTransaction`
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().sent.clone()
    }

    /// Hashes returned for the sent transactions
    pub fn sent_hashes(&self) -> Vec<B256> {
        self.state.lock().sent_hashes.clone()
    }

    /// Number of receipt polls answered
    pub fn receipt_polls(&self) -> u64 {
        self.state.lock().receipt_polls
    }

    fn unreachable(method: &str) -> WalletdError {
        WalletdError::RpcConnectionError {
            url: "mock://wallet".to_string(),
            reason: format!("no wallet answered {method}"),
        }
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn client_version(&self) -> Result<String> {
        let mut state = self.state.lock();
        state.methods.push("web3_clientVersion");
        state
            .client_version
            .clone()
            .ok_or_else(|| Self::unreachable("web3_clientVersion"))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let mut state = self.state.lock();
        state.methods.push("eth_requestAccounts");
        if state.client_version.is_none() {
            return Err(Self::unreachable("eth_requestAccounts"));
        }
        if state.access_denied {
            return Err(WalletdError::RpcRequestError {
                method: "eth_requestAccounts".to_string(),
                reason: "User rejected the request.".to_string(),
            });
        }
        Ok(state.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let mut state = self.state.lock();
        state.methods.push("eth_accounts");
        if state.client_version.is_none() {
            return Err(Self::unreachable("eth_accounts"));
        }
        Ok(state.accounts.clone())
    }

    async fn network_version(&self) -> Result<String> {
        let mut state = self.state.lock();
        state.methods.push("net_version");
        if state.client_version.is_none() {
            return Err(Self::unreachable("net_version"));
        }
        Ok(state.network_version.clone())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let mut state = self.state.lock();
        state.methods.push("eth_call");
        state.calls.push((to, data.clone()));

        if data.len() < 4 {
            return Err(WalletdError::ContractError("calldata shorter than a selector".into()));
        }
        let mut key = [0u8; 4];
        key.copy_from_slice(&data[..4]);

        if state.failing_selectors.contains(&key) {
            return Err(WalletdError::RpcRequestError {
                method: "eth_call".to_string(),
                reason: "execution reverted".to_string(),
            });
        }
        state.call_responses.get(&key).cloned().ok_or_else(|| {
            WalletdError::RpcRequestError {
                method: "eth_call".to_string(),
                reason: "no response registered".to_string(),
            }
        })
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        let mut state = self.state.lock();
        state.methods.push("eth_sendTransaction");
        if let Some(reason) = state.send_error.clone() {
            return Err(WalletdError::RpcRequestError {
                method: "eth_sendTransaction".to_string(),
                reason,
            });
        }

        let nonce = state.sent.len() as u64;
        let hash = keccak256([tx.data.as_ref(), &nonce.to_be_bytes()[..]].concat());
        state.sent.push(tx);
        state.sent_hashes.push(hash);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let mut state = self.state.lock();
        state.methods.push("eth_getTransactionReceipt");
        state.receipt_polls += 1;

        let block = state
            .confirmed
            .get(&hash)
            .copied()
            .or(state.auto_confirm_block);

        Ok(block.map(|block| TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(block)),
            status: Some(U64::from(1)),
        }))
    }
}
