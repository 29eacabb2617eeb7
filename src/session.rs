//! Interactive run: probe, prompt, print balances, optionally transfer
//!
//! [`run`] reads answers from any `BufRead` and writes the report to any
//! `Write`, so the whole flow can be driven from tests. The private key is
//! read according to [`SecretInput`], hidden when stdin is a terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use ethers::utils::to_checksum;
use thiserror::Error;
use tracing::{info, warn};

use crate::address::{parse_address, parse_private_key};
use crate::balance::{get_balances, TokenBalance};
use crate::config::Config;
use crate::probe::check_connection;
use crate::rpc::{ChainRpc, RpcError};
use crate::transfer::{transfer_tokens, TransferError, TransferRequest};
use crate::units::parse_units;

const BANNER_WIDTH: usize = 52;

/// How the private key prompt reads its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretInput {
    /// Read from the controlling terminal with echo disabled
    Hidden,
    /// Read the next line from the session input, like any other answer
    Echoed,
}

impl SecretInput {
    /// `Hidden` for an interactive terminal, `Echoed` for piped stdin
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            SecretInput::Hidden
        } else {
            SecretInput::Echoed
        }
    }

    fn read<I: BufRead, W: Write>(self, input: &mut I, out: &mut W, message: &str) -> io::Result<String> {
        match self {
            SecretInput::Hidden => {
                out.flush()?;
                let secret = rpassword::prompt_password(message)?;
                Ok(secret.trim().to_string())
            }
            SecretInput::Echoed => prompt(input, out, message),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(RpcError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch balances: {0}")]
    Balance(RpcError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionError::InvalidInput(_) => 2,
            _ => 1,
        }
    }

    fn invalid(err: anyhow::Error) -> Self {
        SessionError::InvalidInput(format!("{:#}", err))
    }
}

/// Boxed start-up banner naming the token and network
pub fn print_banner<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    let border = "═".repeat(BANNER_WIDTH);
    let title = format!("{} TOKEN MANAGER", config.token.name.to_uppercase());
    let subtitle = format!("{} · chain {}", config.network.name, config.network.chain_id);

    writeln!(out)?;
    writeln!(out, "╔{}╗", border)?;
    writeln!(out, "║{:^width$}║", title, width = BANNER_WIDTH)?;
    writeln!(out, "║{:^width$}║", subtitle, width = BANNER_WIDTH)?;
    writeln!(out, "╚{}╝", border)?;
    writeln!(out)
}

/// Drive one interactive session to completion
///
/// # Arguments
///
/// * `config` - Network, token and gas settings
/// * `rpc` - Node connection used for every chain call
/// * `input` - Source of the prompt answers
/// * `secret` - How the private key answer is read
/// * `out` - Destination of the human-readable report
///
/// # Returns
///
/// `Ok(())` once balances are printed (and the transfer broadcast, when a
/// key was given). Errors carry their exit code via
/// [`SessionError::exit_code`].
pub async fn run<R, I, W>(
    config: &Config,
    rpc: &R,
    input: &mut I,
    secret: SecretInput,
    out: &mut W,
) -> Result<(), SessionError>
where
    R: ChainRpc + ?Sized,
    I: BufRead,
    W: Write,
{
    print_banner(out, config)?;

    let status = match check_connection(rpc, &config.network).await {
        Ok(status) => status,
        Err(e) => {
            writeln!(out, "❌ Connection failed")?;
            return Err(SessionError::Connection(e));
        }
    };
    writeln!(out, "✅ Connected to {}", config.network.name)?;
    writeln!(out, "⛓ Chain ID: {}", status.chain_id)?;
    writeln!(out, "📦 Latest block: {}", status.latest_block)?;
    if !status.matches_chain(&config.network) {
        writeln!(
            out,
            "⚠️  Endpoint reports chain ID {}, expected {}",
            status.chain_id, config.network.chain_id
        )?;
    }
    writeln!(out)?;

    let address_input = prompt(input, out, "Enter wallet address (blank to use the private key's): ")?;
    let key_input = secret.read(input, out, "Enter private key (or leave blank for balance check): ")?;

    let wallet = if key_input.is_empty() {
        None
    } else {
        Some(parse_private_key(&key_input).map_err(SessionError::invalid)?)
    };
    let address = resolve_address(&address_input, wallet.as_ref())?;

    let report = get_balances(rpc, config, address)
        .await
        .map_err(SessionError::Balance)?;

    writeln!(out)?;
    writeln!(out, "💎 Native Balance: {}", report.native_display(config))?;
    if let Some(display) = report.token_display(config) {
        writeln!(out, "🪙 Token Balance: {}", display)?;
    } else if let TokenBalance::Failed(reason) = &report.token {
        writeln!(out, "⚠️  Token balance unavailable: {}", reason)?;
    } else {
        writeln!(
            out,
            "⚠️  {} contract not deployed at {}",
            config.token.name,
            to_checksum(&config.token.address, None)
        )?;
    }

    let Some(wallet) = wallet else {
        return Ok(());
    };

    writeln!(out)?;
    let recipient = prompt(input, out, "Enter recipient address: ")?;
    let recipient = parse_address(&recipient).map_err(SessionError::invalid)?;
    let amount = prompt(input, out, "Enter amount to send: ")?;
    let amount = parse_units(&amount, config.token.decimals).map_err(SessionError::invalid)?;

    writeln!(out)?;
    writeln!(out, "🚀 Sending transaction...")?;
    let request = TransferRequest { recipient, amount };
    let tx_hash = match transfer_tokens(rpc, config, &wallet, &request).await {
        Ok(hash) => hash,
        Err(e) => {
            writeln!(out, "❌ Transaction failed")?;
            return Err(e.into());
        }
    };

    writeln!(out)?;
    writeln!(out, "✅ Transaction submitted!")?;
    writeln!(out, "🔗 View on explorer: {}", config.network.tx_url(tx_hash))?;

    Ok(())
}

/// The typed address wins; a blank answer falls back to the key's address
fn resolve_address(input: &str, wallet: Option<&LocalWallet>) -> Result<Address, SessionError> {
    if !input.is_empty() {
        return parse_address(input).map_err(SessionError::invalid);
    }

    match wallet {
        Some(wallet) => {
            let address = wallet.address();
            info!(?address, "using address derived from private key");
            Ok(address)
        }
        None => {
            warn!("no wallet address or private key given");
            Err(SessionError::InvalidInput(
                "Wallet address is required".to_string(),
            ))
        }
    }
}

fn prompt<I: BufRead, W: Write>(input: &mut I, out: &mut W, message: &str) -> io::Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
