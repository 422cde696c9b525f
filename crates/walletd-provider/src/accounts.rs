//! Account-change subscription.
//!
//! JSON-RPC wallets have no push channel over HTTP, so the selected account is
//! polled and a change is published only when the first account differs from
//! the last one seen.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::wallet::WalletProvider;

/// Live view of the wallet's selected account. Dropping it stops the poller.
#[derive(Debug)]
pub struct AccountWatch {
    receiver: watch::Receiver<Option<Address>>,
    task: JoinHandle<()>,
}

impl AccountWatch {
    /// Starts polling `provider` every `interval`, seeded with `initial`.
    pub fn spawn<P>(provider: Arc<P>, initial: Option<Address>, interval: Duration) -> Self
    where
        P: WalletProvider + ?Sized + 'static,
    {
        let (sender, receiver) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if sender.is_closed() {
                    break;
                }

                match provider.accounts().await {
                    Ok(accounts) => {
                        let next = accounts.first().copied();
                        let changed = sender.send_if_modified(|current| {
                            if *current != next {
                                *current = next;
                                true
                            } else {
                                false
                            }
                        });
                        if changed {
                            tracing::info!(account = ?next, "selected account changed");
                        }
                    }
                    Err(e) => tracing::debug!("account poll failed: {e}"),
                }
            }
        });

        Self { receiver, task }
    }

    /// The most recently observed account
    pub fn current(&self) -> Option<Address> {
        *self.receiver.borrow()
    }

    /// Waits for the next account change. Returns `None` once the poller has
    /// stopped.
    pub async fn changed(&mut self) -> Option<Option<Address>> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}

impl Drop for AccountWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
