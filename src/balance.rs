//! Native and token balance lookup

use ethers::types::{Address, U256};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::rpc::{ChainRpc, RpcError};
use crate::units::format_units;

/// Outcome of the token half of a balance lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenBalance {
    /// Raw `balanceOf` result in smallest units
    Available(U256),
    /// No bytecode at the token address
    NotDeployed,
    /// The token read failed; the native balance is still valid
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub address: Address,
    /// Native balance in wei
    pub native: U256,
    pub token: TokenBalance,
}

impl BalanceReport {
    /// e.g. `"2.5 SAHARA"`
    pub fn native_display(&self, config: &Config) -> String {
        format!(
            "{} {}",
            format_units(self.native, config.network.native_decimals),
            config.network.native_symbol
        )
    }

    /// e.g. `"1.0 Sharar Legend"`; `None` unless the token read succeeded
    pub fn token_display(&self, config: &Config) -> Option<String> {
        match &self.token {
            TokenBalance::Available(raw) => Some(format!(
                "{} {}",
                format_units(*raw, config.token.decimals),
                config.token.name
            )),
            _ => None,
        }
    }
}

/// Fetch the native balance of `address`, then its token balance if the
/// token contract is deployed
///
/// # Arguments
///
/// * `rpc` - Node to query
/// * `config` - Supplies the token contract address and ABI
/// * `address` - Validated account to look up
///
/// # Returns
///
/// A `BalanceReport` whose `token` field records whether the token read
/// succeeded, found no contract, or failed. Only a failure of the native
/// balance read is returned as an error.
pub async fn get_balances<R>(rpc: &R, config: &Config, address: Address) -> Result<BalanceReport, RpcError>
where
    R: ChainRpc + ?Sized,
{
    let native = rpc.get_balance(address).await?;
    debug!(?address, %native, "native balance");

    let token = read_token_balance(rpc, config, address).await;

    Ok(BalanceReport {
        address,
        native,
        token,
    })
}

async fn read_token_balance<R>(rpc: &R, config: &Config, owner: Address) -> TokenBalance
where
    R: ChainRpc + ?Sized,
{
    let token_address = config.token.address;

    let code = match rpc.get_code(token_address).await {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "token code check failed");
            return TokenBalance::Failed(format!("Failed to check token contract: {}", e));
        }
    };
    if code.is_empty() {
        debug!(?token_address, "no code at token address");
        return TokenBalance::NotDeployed;
    }

    let contract = match config.token_contract() {
        Ok(contract) => contract,
        Err(e) => return TokenBalance::Failed(format!("{:#}", e)),
    };
    let data = match contract.encode_balance_of(owner) {
        Ok(data) => data,
        Err(e) => return TokenBalance::Failed(format!("{:#}", e)),
    };

    let output = match rpc.call(token_address, data).await {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "balanceOf call failed");
            return TokenBalance::Failed(format!("balanceOf call failed: {}", e));
        }
    };

    match contract.decode_balance_of(&output) {
        Ok(raw) => {
            debug!(%raw, "token balance");
            TokenBalance::Available(raw)
        }
        Err(e) => TokenBalance::Failed(format!("{:#}", e)),
    }
}
