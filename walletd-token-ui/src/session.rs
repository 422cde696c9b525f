//! One console session against one wallet and one token contract.
//!
//! The session owns the contract binding, the view state and the notifier.
//! Background work (account polling, transaction tracking) runs in spawned
//! tasks that report back through a single event channel; the owner pulls
//! events with [`TokenSession::next_event`] and applies them with
//! [`TokenSession::handle_event`].

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walletd_erc20::prelude::*;
use walletd_error::{Result, WalletdError};
use walletd_provider::{connect, AccountWatch, BridgeConfig, WalletProvider};

use crate::notify::{Notification, Notifier};
use crate::state::ViewState;

/// Everything a session needs besides the wallet itself.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub bridge: BridgeConfig,
    pub contract_address: Address,
    pub default_recipient: Option<String>,
    pub account_poll_interval: Duration,
    pub receipt_poll_interval: Duration,
}

impl SessionSettings {
    /// Rejects settings the pollers cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.account_poll_interval.is_zero() {
            return Err(WalletdError::ConfigError(
                "account poll interval must be greater than zero".to_string(),
            ));
        }
        if self.receipt_poll_interval.is_zero() {
            return Err(WalletdError::ConfigError(
                "receipt poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The two state-changing contract calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Transfer,
    Mint,
}

/// Something that happened in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Tx { kind: WriteKind, event: TxEvent },
    AccountsChanged(Option<Address>),
}

pub struct TokenSession<P: ?Sized, N> {
    contract: TokenContract<P>,
    notifier: N,
    state: ViewState,
    sender: mpsc::UnboundedSender<SessionEvent>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl<P, N> TokenSession<P, N>
where
    P: WalletProvider + ?Sized + 'static,
    N: Notifier,
{
    /// Connects to the wallet and loads the token.
    ///
    /// A setup failure is shown once through `notifier` and returned; no
    /// contract call is made in that case.
    pub async fn start(provider: Arc<P>, settings: SessionSettings, notifier: N) -> Result<Self> {
        settings.validate()?;

        let connection = match connect(provider.as_ref(), &settings.bridge).await {
            Ok(connection) => connection,
            Err(e) => {
                report(&notifier, &e);
                return Err(e);
            }
        };
        tracing::info!(
            wallet = %connection.client_version,
            network = %connection.network_id,
            "wallet connected"
        );

        let contract = TokenContract::new(Arc::clone(&provider), settings.contract_address)
            .with_receipt_poll_interval(settings.receipt_poll_interval);
        let account = connection.selected_account();
        let mut state = ViewState::new(settings.default_recipient.clone());
        state.selected_address = account;

        let (sender, events) = mpsc::unbounded_channel();
        let mut session = Self {
            contract,
            notifier,
            state,
            sender,
            events,
            tasks: Vec::new(),
        };

        session.load_metadata().await;
        session.refresh_balance().await;

        let watch = AccountWatch::spawn(provider, account, settings.account_poll_interval);
        session
            .tasks
            .push(forward_accounts(watch, session.sender.clone()));

        Ok(session)
    }

    /// Current view state
    pub fn view(&self) -> &ViewState {
        &self.state
    }

    async fn load_metadata(&mut self) {
        match self.contract.symbol().await {
            Ok(symbol) => self.state.symbol = symbol,
            Err(e) => tracing::error!("failed to load token symbol: {e}"),
        }
        match self.contract.decimals().await {
            Ok(decimals) => self.state.decimals = decimals,
            Err(e) => tracing::error!("failed to load token decimals: {e}"),
        }
        tracing::debug!(symbol = %self.state.symbol, decimals = self.state.decimals, "token metadata");
    }

    /// Re-reads the active account's balance. Failures are only logged.
    pub async fn refresh_balance(&mut self) {
        let Some(account) = self.state.selected_address else {
            tracing::debug!("no active account, balance not fetched");
            return;
        };
        match self.contract.balance_of(account).await {
            Ok(raw) => self.state.balance = display_balance(raw),
            Err(e) => tracing::error!(%account, "failed to load balance: {e}"),
        }
    }

    pub fn edit_amount(&mut self, amount: impl Into<String>) {
        self.state.edit_amount(amount);
    }

    pub fn edit_recipient(&mut self, recipient: impl Into<String>) {
        self.state.edit_recipient(recipient);
    }

    /// Validates the inputs and hands the write to the wallet.
    ///
    /// Returns as soon as the write is spawned; progress arrives as
    /// [`SessionEvent::Tx`]. Validation failures are shown and returned.
    pub fn submit(&mut self, kind: WriteKind) -> Result<()> {
        let (from, to, amount) = match self.prepare_write() {
            Ok(Some(write)) => write,
            Ok(None) => {
                tracing::warn!(?kind, "token decimals unknown, write skipped");
                return Ok(());
            }
            Err(e) => {
                report(&self.notifier, &e);
                return Err(e);
            }
        };

        tracing::info!(?kind, %from, %to, %amount, "submitting write");
        let watch = match kind {
            WriteKind::Transfer => self.contract.transfer(from, to, amount),
            WriteKind::Mint => self.contract.mint(from, to, amount),
        };

        self.tasks.retain(|task| !task.is_finished());
        self.tasks
            .push(forward_transaction(watch, kind, self.sender.clone()));
        Ok(())
    }

    fn prepare_write(&self) -> Result<Option<(Address, Address, U256)>> {
        let from = self
            .state
            .selected_address
            .ok_or(WalletdError::AccountNotInitialized)?;

        let recipient = self.state.recipient.trim();
        if recipient.is_empty() {
            return Err(WalletdError::MissingRecipient);
        }
        if self.state.amount.trim().is_empty() {
            return Err(WalletdError::MissingAmount);
        }
        if self.state.decimals == 0 {
            return Ok(None);
        }

        let to: Address = recipient.parse().map_err(|e| WalletdError::InvalidAddress {
            address: recipient.to_string(),
            reason: format!("{e}"),
        })?;
        let amount = scale_amount(&self.state.amount, self.state.decimals)?;

        Ok(Some((from, to, amount)))
    }

    /// Waits for the next background event
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    pub async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tx { kind, event: TxEvent::Hash(hash) } => {
                self.state.record_hash(hash);
                if kind == WriteKind::Transfer {
                    self.notifier.notify(Notification::info("Transaction sent successfully"));
                }
            }
            SessionEvent::Tx { kind, event: TxEvent::Confirmed { .. } } => {
                self.state.record_confirmation();
                if kind == WriteKind::Transfer {
                    self.notifier.notify(Notification::info("Transaction Confirmed."));
                }
                self.refresh_balance().await;
            }
            SessionEvent::AccountsChanged(account) => {
                self.state.selected_address = account;
                self.refresh_balance().await;
            }
        }
    }
}

/// Setup and validation failures are shown; anything else is only logged.
fn report<N: Notifier>(notifier: &N, e: &WalletdError) {
    if e.is_fatal() || e.is_validation() {
        notifier.notify(Notification::error(e.user_message()));
    } else {
        tracing::error!(code = ?e.code(), "{e}");
    }
}

impl<P: ?Sized, N> Drop for TokenSession<P, N> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn forward_accounts(
    mut watch: AccountWatch,
    sender: mpsc::UnboundedSender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(account) = watch.changed().await {
            if sender.send(SessionEvent::AccountsChanged(account)).is_err() {
                break;
            }
        }
    })
}

fn forward_transaction(
    mut watch: TransactionWatch,
    kind: WriteKind,
    sender: mpsc::UnboundedSender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = watch.next().await {
            if sender.send(SessionEvent::Tx { kind, event }).is_err() {
                break;
            }
        }
    })
}
