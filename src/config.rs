//! Network, token and gas settings
//!
//! Everything the CLI talks to is described by one immutable [`Config`]
//! value. [`Config::sahara_testnet`] returns the defaults; tests build their
//! own values.

use anyhow::{Context, Result};
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

use crate::token::{TokenContract, TOKEN_ABI};

const SAHARA_RPC_URL: &str = "https://testnet.saharalabs.ai";
const SAHARA_CHAIN_ID: u64 = 313313;
const SAHARA_EXPLORER_URL: &str = "https://testnet-explorer.saharalabs.ai";

// 0x3c3364173607CB4D1D5adD83E3F4a24Be0Fa870b
const SHARAR_LEGEND_CONTRACT: [u8; 20] = [
    0x3c, 0x33, 0x64, 0x17, 0x36, 0x07, 0xcb, 0x4d, 0x1d, 0x5a, 0xdd, 0x83, 0xe3, 0xf4, 0xa2, 0x4b,
    0xe0, 0xfa, 0x87, 0x0b,
];

const TRANSFER_GAS_LIMIT: u64 = 200_000;
// 10 gwei
const TRANSFER_GAS_PRICE_WEI: u64 = 10_000_000_000;

/// RPC endpoint and chain identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub native_symbol: String,
    pub native_decimals: u32,
}

impl NetworkConfig {
    /// Explorer link for a broadcast transaction
    pub fn tx_url(&self, tx_hash: H256) -> String {
        format!("{}/tx/{:#x}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

/// The ERC20-style token the CLI reads and transfers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenConfig {
    pub name: String,
    pub address: Address,
    pub decimals: u32,
    pub abi: String,
}

/// Fixed fee parameters for transfers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GasSettings {
    pub gas_limit: u64,
    pub gas_price: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub network: NetworkConfig,
    pub token: TokenConfig,
    pub gas: GasSettings,
}

impl Config {
    /// Sahara testnet with the Sharar Legend token
    pub fn sahara_testnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "Sahara Testnet".to_string(),
                rpc_url: SAHARA_RPC_URL.to_string(),
                chain_id: SAHARA_CHAIN_ID,
                explorer_url: SAHARA_EXPLORER_URL.to_string(),
                native_symbol: "SAHARA".to_string(),
                native_decimals: 18,
            },
            token: TokenConfig {
                name: "Sharar Legend".to_string(),
                address: Address::from(SHARAR_LEGEND_CONTRACT),
                decimals: 18,
                abi: TOKEN_ABI.to_string(),
            },
            gas: GasSettings {
                gas_limit: TRANSFER_GAS_LIMIT,
                gas_price: U256::from(TRANSFER_GAS_PRICE_WEI),
            },
        }
    }

    /// Replace the RPC endpoint, keeping every other setting
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.network.rpc_url = rpc_url.into();
        self
    }

    /// Build the contract handle described by the token settings
    pub fn token_contract(&self) -> Result<TokenContract> {
        TokenContract::new(self.token.address, &self.token.abi)
            .with_context(|| format!("Invalid ABI for token {}", self.token.name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::sahara_testnet()
    }
}
