//! Submitted-transaction tracking.
//!
//! A write is handed to the wallet in a background task. The task emits the
//! hash once the wallet accepts the transaction and a single confirmation
//! once a receipt with a block number shows up. There is no failure event:
//! a rejected submission is logged and the watch simply closes, and a
//! transaction that never gets mined stays pending.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::B256;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walletd_error::WalletdError;
use walletd_provider::{TransactionRequest, WalletProvider};

/// Lifecycle notification for one submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxEvent {
    /// The wallet accepted the transaction
    Hash(B256),
    /// The transaction is in a block
    Confirmed {
        /// Transaction hash
        hash: B256,
        /// Block holding the transaction
        block_number: u64,
    },
}

/// Subscription to one transaction's events. Dropping it cancels tracking.
#[derive(Debug)]
pub struct TransactionWatch {
    events: mpsc::Receiver<TxEvent>,
    task: JoinHandle<()>,
}

impl TransactionWatch {
    pub(crate) fn spawn<P>(
        provider: Arc<P>,
        tx: TransactionRequest,
        poll_interval: Duration,
        label: &'static str,
    ) -> Self
    where
        P: WalletProvider + ?Sized + 'static,
    {
        let (sender, events) = mpsc::channel(2);

        let task = tokio::spawn(async move {
            let hash = match provider.send_transaction(tx).await {
                Ok(hash) => hash,
                Err(e) => {
                    let e = broadcast_error(label, e);
                    tracing::error!(code = ?e.code(), "{e}");
                    return;
                }
            };
            tracing::info!(call = label, %hash, "transaction submitted");
            if sender.send(TxEvent::Hash(hash)).await.is_err() {
                return;
            }

            let mut ticker = tokio::time::interval(poll_interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match provider.transaction_receipt(hash).await {
                    Ok(Some(receipt)) => {
                        if let Some(block_number) = receipt.confirmed_block() {
                            tracing::info!(call = label, %hash, block_number, "transaction confirmed");
                            let _ = sender.send(TxEvent::Confirmed { hash, block_number }).await;
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::debug!(%hash, "receipt poll failed: {e}"),
                }
            }
        });

        Self { events, task }
    }

    /// Next event, or `None` once tracking is over
    pub async fn next(&mut self) -> Option<TxEvent> {
        self.events.recv().await
    }

    /// Stops tracking
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TransactionWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn broadcast_error(label: &str, e: WalletdError) -> WalletdError {
    WalletdError::BroadcastError(format!("{label}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use walletd_error::ErrorCode;

    #[test]
    fn test_rejected_submission_is_broadcast_error() {
        let rejected = WalletdError::RpcRequestError {
            method: "eth_sendTransaction".into(),
            reason: "User denied transaction signature".into(),
        };
        let err = broadcast_error("transfer", rejected);

        assert_eq!(err.code(), ErrorCode::BroadcastError);
        assert!(!err.is_fatal());
        assert!(!err.is_validation());
        let text = err.to_string();
        assert!(text.starts_with("Failed to broadcast transaction: transfer"));
        assert!(text.contains("User denied transaction signature"));
    }
}
