//! WalletD Token Console
//!
//! Interactive console for one ERC-20 token, signing through a local wallet.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use walletd_provider::{HttpWalletProvider, WalletProvider};
use walletd_token_ui::view::LEGEND;
use walletd_token_ui::{
    render, Command, ConsoleNotifier, SessionEvent, ToastBoard, TokenSession, TokenUiConfig,
    WriteKind, DEFAULT_CONFIG_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "walletd-token", version, about = "WalletD Token Console")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Wallet JSON-RPC endpoint
    #[arg(long)]
    provider_url: Option<String>,

    /// Token contract address
    #[arg(long)]
    contract: Option<String>,

    /// Log filter, e.g. `info` or `walletd_erc20=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

enum Input {
    Line(Option<String>),
    Event(Option<SessionEvent>),
}

type Session = TokenSession<HttpWalletProvider, ConsoleNotifier>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let mut config = TokenUiConfig::load(&cli.config)?;
    config.apply_env();
    if let Some(url) = cli.provider_url {
        config.provider_url = url;
    }
    if let Some(contract) = cli.contract {
        config.contract_address = Some(contract);
    }
    if cli.save_config {
        config.save(&cli.config)?;
    }

    let settings = config.session_settings()?;
    let provider_config = config.provider_config();
    provider_config.validate()?;
    let provider = Arc::new(HttpWalletProvider::new(&provider_config)?);
    tracing::info!(url = provider.url(), "using wallet provider");

    let board = ToastBoard::new();
    let notifier = ConsoleNotifier::new(board.clone());
    let mut session: Session = TokenSession::start(provider, settings, notifier).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    redraw(&session, &board);

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            event = session.next_event() => Input::Event(event),
        };

        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => match Command::parse(&line) {
                Some(Command::Quit) => break,
                Some(command) => run_command(&mut session, command).await,
                None if line.trim().is_empty() => {}
                None => eprintln!("Unknown command: {}", line.trim()),
            },
            Input::Event(Some(event)) => session.handle_event(event).await,
            Input::Event(None) => break,
        }

        redraw(&session, &board);
    }

    println!("\nThank you for using WalletD!");
    Ok(())
}

async fn run_command<P>(session: &mut TokenSession<P, ConsoleNotifier>, command: Command)
where
    P: WalletProvider + ?Sized + 'static,
{
    let submitted = match command {
        Command::Amount(amount) => {
            session.edit_amount(amount);
            Ok(())
        }
        Command::Recipient(recipient) => {
            session.edit_recipient(recipient);
            Ok(())
        }
        Command::Transfer => session.submit(WriteKind::Transfer),
        Command::Mint => session.submit(WriteKind::Mint),
        Command::Refresh => {
            session.refresh_balance().await;
            Ok(())
        }
        Command::Help => {
            println!("{LEGEND}");
            Ok(())
        }
        Command::Quit => Ok(()),
    };
    if let Err(e) = submitted {
        tracing::debug!("write not submitted: {e}");
    }
}

fn redraw(session: &Session, board: &ToastBoard) {
    println!();
    print!("{}", render(session.view(), &board.active(Instant::now())));
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
