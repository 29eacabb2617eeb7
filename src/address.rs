//! Address and private key input handling

use anyhow::{anyhow, Context, Result};
use ethers::signers::LocalWallet;
use ethers::types::Address;
use ethers::utils::to_checksum;

/// Parse a user-supplied address
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase hex is
/// accepted as is; mixed case must be a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address> {
    let address = normalize_address(input)?;
    validate_address(&address)?;

    let parsed: Address = address
        .parse()
        .with_context(|| format!("Invalid address: {}", address))?;

    let body = &address[2..];
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&parsed, None) != address {
        return Err(anyhow!("Address checksum mismatch: {}", address));
    }

    Ok(parsed)
}

/// Ensure the address carries a lowercase 0x prefix, keeping the body's case
fn normalize_address(address: &str) -> Result<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(anyhow!("Address cannot be empty"));
    }

    let body = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    Ok(format!("0x{}", body))
}

fn validate_address(address: &str) -> Result<()> {
    if address.len() != 42 {
        return Err(anyhow!(
            "Invalid address length (expected 42 characters): {}",
            address
        ));
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("Address contains invalid hex characters: {}", address));
    }

    Ok(())
}

/// Build a signing wallet from a hex private key, with or without `0x`
pub fn parse_private_key(input: &str) -> Result<LocalWallet> {
    let key = input.trim();
    let key = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);

    let bytes = hex::decode(key).map_err(|_| anyhow!("Private key is not valid hex"))?;
    if bytes.len() != 32 {
        return Err(anyhow!(
            "Private key must be 32 bytes, got {}",
            bytes.len()
        ));
    }

    LocalWallet::from_bytes(&bytes).map_err(|e| anyhow!("Invalid private key: {}", e))
}
