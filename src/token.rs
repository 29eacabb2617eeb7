//! Sharar Legend token contract calls
//!
//! Encodes `balanceOf` / `transfer` calldata and decodes `balanceOf` output
//! from the JSON ABI fragment.

use anyhow::{anyhow, Context, Result};
use ethers::abi::{Abi, Token};
use ethers::types::{Address, Bytes, U256};

/// ABI fragment for the two functions the CLI uses
pub const TOKEN_ABI: &str = r#"[
    {
        "inputs": [{"internalType": "address", "name": "account", "type": "address"}],
        "name": "balanceOf",
        "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
        "stateMutability": "view",
        "type": "function"
    },
    {
        "inputs": [
            {"internalType": "address", "name": "recipient", "type": "address"},
            {"internalType": "uint256", "name": "amount", "type": "uint256"}
        ],
        "name": "transfer",
        "outputs": [{"internalType": "bool", "name": "", "type": "bool"}],
        "stateMutability": "nonpayable",
        "type": "function"
    }
]"#;

#[derive(Debug, Clone)]
pub struct TokenContract {
    address: Address,
    abi: Abi,
}

impl TokenContract {
    /// Parse `abi_json` and bind it to `address`
    ///
    /// Fails if the ABI is malformed or lacks `balanceOf` / `transfer`.
    pub fn new(address: Address, abi_json: &str) -> Result<Self> {
        let abi: Abi = serde_json::from_str(abi_json).context("Failed to parse token ABI")?;

        for name in ["balanceOf", "transfer"] {
            abi.function(name)
                .with_context(|| format!("Token ABI has no `{}` function", name))?;
        }

        Ok(Self { address, abi })
    }

    /// Contract the calldata is meant for
    pub fn address(&self) -> Address {
        self.address
    }

    /// Calldata for `balanceOf(owner)`
    pub fn encode_balance_of(&self, owner: Address) -> Result<Bytes> {
        let data = self
            .abi
            .function("balanceOf")?
            .encode_input(&[Token::Address(owner)])
            .context("Failed to encode balanceOf call")?;
        Ok(data.into())
    }

    /// Decode the `uint256` returned by `balanceOf`
    pub fn decode_balance_of(&self, output: &[u8]) -> Result<U256> {
        if output.is_empty() {
            return Err(anyhow!("balanceOf returned no data"));
        }

        let tokens = self
            .abi
            .function("balanceOf")?
            .decode_output(output)
            .context("Failed to decode balanceOf output")?;

        tokens
            .into_iter()
            .next()
            .and_then(Token::into_uint)
            .ok_or_else(|| anyhow!("balanceOf output is not a uint256"))
    }

    /// Calldata for `transfer(recipient, amount)`
    pub fn encode_transfer(&self, recipient: Address, amount: U256) -> Result<Bytes> {
        let data = self
            .abi
            .function("transfer")?
            .encode_input(&[Token::Address(recipient), Token::Uint(amount)])
            .context("Failed to encode transfer call")?;
        Ok(data.into())
    }
}
