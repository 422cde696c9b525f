//! WalletD Token Console
//!
//! Shows the balance of one ERC-20 token held by the wallet's selected
//! account and submits `transfer` and `mint` calls through that wallet.

#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod notify;
pub mod session;
pub mod state;
pub mod view;

pub use command::Command;
pub use config::{TokenUiConfig, DEFAULT_CONFIG_FILE};
pub use notify::{ConsoleNotifier, Notification, Notifier, Severity, ToastBoard};
pub use session::{SessionEvent, SessionSettings, TokenSession, WriteKind};
pub use state::{TxStatus, ViewState};
pub use view::render;
