//! Text rendering of the console.

use std::fmt::Write;

use walletd_provider::SEPOLIA;

use crate::notify::Notification;
use crate::state::{TxStatus, ViewState};

pub const LEGEND: &str =
    "Commands: amount <value> | to <address> | transfer | mint | refresh | help | quit";

/// Renders the whole screen. Pure: same input, same text.
pub fn render(state: &ViewState, toasts: &[Notification]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "══════════ WalletD Token Console ══════════");
    match state.selected_address {
        Some(account) => {
            let _ = writeln!(out, "Account : {account}");
        }
        None => {
            let _ = writeln!(out, "Account : not connected");
        }
    }

    if let Some(hash) = state.tx_hash {
        let link = SEPOLIA.explorer_tx_url(&hash);
        match state.tx_status {
            TxStatus::Pending => {
                let _ = writeln!(out, "Transaction sent with hash {hash} ({link})");
            }
            TxStatus::Confirmed => {
                let _ = writeln!(out, "Transaction confirmed with hash {hash} ({link})");
            }
            TxStatus::None => {}
        }
    }

    let _ = writeln!(out, "Token Balance : {} {}", state.balance, state.symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "Amount    : {}", state.amount);
    let _ = writeln!(out, "Recipient : {}", state.recipient);
    let _ = writeln!(out);
    let _ = writeln!(out, "{LEGEND}");

    for toast in toasts {
        let _ = writeln!(out, "[{}] {}", toast.title, toast.message);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256, B256};

    const HASH: B256 = b256!("4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd");

    #[test]
    fn test_balance_line() {
        let state = ViewState {
            balance: "1.5".into(),
            symbol: "TKN".into(),
            ..ViewState::default()
        };
        let text = render(&state, &[]);
        assert!(text.contains("Token Balance : 1.5 TKN"));
        assert!(text.contains("Account : not connected"));
        assert!(!text.contains("Transaction"));
    }

    #[test]
    fn test_pending_banner_links_hash() {
        let mut state = ViewState::default();
        state.record_hash(HASH);
        let text = render(&state, &[]);
        let expected = format!(
            "Transaction sent with hash {HASH} (https://sepolia.etherscan.io/tx/{HASH})"
        );
        assert!(text.contains(&expected), "{text}");
    }

    #[test]
    fn test_confirmed_banner() {
        let mut state = ViewState::default();
        state.record_hash(HASH);
        state.record_confirmation();
        let text = render(&state, &[]);
        assert!(text.contains(&format!("Transaction confirmed with hash {HASH}")));
        assert!(!text.contains("Transaction sent"));
    }

    #[test]
    fn test_inputs_and_toasts() {
        let state = ViewState {
            selected_address: Some(address!("742d35Cc6634C0532925a3b844Bc9e7595f5fFb9")),
            amount: "5".into(),
            recipient: "0x837DEb7B906fbcE871E80CF833f76f8562f598B3".into(),
            ..ViewState::default()
        };
        let toasts = [Notification::error("Please enter tokens to transfer")];
        let text = render(&state, &toasts);

        assert!(text.contains("Amount    : 5"));
        assert!(text.contains("Recipient : 0x837DEb7B906fbcE871E80CF833f76f8562f598B3"));
        assert!(text.contains("[Error] Please enter tokens to transfer"));
        assert!(text.contains(LEGEND));
    }

    #[test]
    fn test_render_is_pure() {
        let state = ViewState::default();
        assert_eq!(render(&state, &[]), render(&state, &[]));
    }
}
