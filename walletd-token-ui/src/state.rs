//! What the console shows.

use alloy::primitives::{Address, B256};

/// Progress of the last submitted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxStatus {
    #[default]
    None,
    Pending,
    Confirmed,
}

/// Everything the view renders. Only the session mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_address: Option<Address>,
    pub amount: String,
    pub recipient: String,
    pub symbol: String,
    pub decimals: u8,
    /// Already formatted for display
    pub balance: String,
    pub tx_hash: Option<B256>,
    pub tx_status: TxStatus,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_address: None,
            amount: String::new(),
            recipient: String::new(),
            symbol: String::new(),
            decimals: 0,
            balance: "0".to_string(),
            tx_hash: None,
            tx_status: TxStatus::None,
        }
    }
}

impl ViewState {
    /// Empty state with the recipient pre-filled
    pub fn new(default_recipient: Option<String>) -> Self {
        Self {
            recipient: default_recipient.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn edit_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.clear_transaction();
    }

    pub fn edit_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
        self.clear_transaction();
    }

    pub fn record_hash(&mut self, hash: B256) {
        self.tx_hash = Some(hash);
        self.tx_status = TxStatus::Pending;
    }

    pub fn record_confirmation(&mut self) {
        self.tx_status = TxStatus::Confirmed;
    }

    fn clear_transaction(&mut self) {
        self.tx_hash = None;
        self.tx_status = TxStatus::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    const HASH: B256 = b256!("4e3a3754410177e6937ef1f84bba68ea139e8d1a2258c5f85db9f1cd715a1bdd");

    #[test]
    fn test_pending_then_confirmed() {
        let mut state = ViewState::default();
        assert_eq!(state.tx_status, TxStatus::None);

        state.record_hash(HASH);
        assert_eq!(state.tx_hash, Some(HASH));
        assert_eq!(state.tx_status, TxStatus::Pending);

        state.record_confirmation();
        assert_eq!(state.tx_hash, Some(HASH));
        assert_eq!(state.tx_status, TxStatus::Confirmed);
    }

    #[test]
    fn test_edits_clear_transaction() {
        let mut state = ViewState::default();
        state.record_hash(HASH);
        state.edit_amount("10");
        assert_eq!(state.amount, "10");
        assert_eq!(state.tx_hash, None);
        assert_eq!(state.tx_status, TxStatus::None);

        state.record_hash(HASH);
        state.record_confirmation();
        state.edit_recipient("0xabc");
        assert_eq!(state.recipient, "0xabc");
        assert_eq!(state.tx_hash, None);
        assert_eq!(state.tx_status, TxStatus::None);
    }

    #[test]
    fn test_default_recipient_prefilled() {
        let state = ViewState::new(Some("0x837DEb7B906fbcE871E80CF833f76f8562f598B3".into()));
        assert_eq!(state.recipient, "0x837DEb7B906fbcE871E80CF833f76f8562f598B3");
        assert_eq!(state.balance, "0");
        assert!(state.symbol.is_empty());
    }
}
