//! Sharar Legend CLI
//!
//! Interactive tool to check SAHARA and Sharar Legend balances and send tokens

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sharar_legend::session::{self, SecretInput};
use sharar_legend::{Config, HttpRpc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sharar-legend")]
#[command(version)]
#[command(about = "Check Sharar Legend balances and send tokens on the Sahara testnet")]
#[command(long_about = "Check Sharar Legend balances and send tokens on the Sahara testnet.\n\n\
The wallet address, private key, recipient and amount are asked for interactively; \
the options below only adjust the endpoint and diagnostics.")]
struct Cli {
    /// JSON-RPC endpoint to use instead of the Sahara testnet default
    #[arg(long, value_name = "URL")]
    rpc_url: Option<String>,

    /// Diagnostics filter for stderr logging (e.g. "info", "sharar_legend=debug")
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).context("Invalid --log-level filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    let mut config = Config::sahara_testnet();
    if let Some(url) = cli.rpc_url {
        config = config.with_rpc_url(url);
    }

    let rpc = HttpRpc::new(config.network.rpc_url.clone());
    info!(url = rpc.url(), "using RPC endpoint");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match session::run(&config, &rpc, &mut input, SecretInput::detect(), &mut output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
