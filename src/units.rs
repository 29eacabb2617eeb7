//! Conversion between smallest-unit integers and decimal strings

use anyhow::{anyhow, Context, Result};
use ethers::types::U256;

/// Render `value / 10^decimals` as an exact decimal string
///
/// Trailing zeros are trimmed but at least one fractional digit is kept, so
/// `10^18` with 18 decimals renders as `"1.0"`.
pub fn format_units(value: U256, decimals: u32) -> String {
    let scale = U256::exp10(decimals as usize);
    let whole = value / scale;
    let fraction = value % scale;

    if fraction.is_zero() {
        return format!("{}.0", whole);
    }

    // Pad with leading zeros up to the full number of decimals
    let fraction_str = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let trimmed = fraction_str.trim_end_matches('0');

    format!("{}.{}", whole, trimmed)
}

/// Parse a non-negative decimal string into `round(input * 10^decimals)`
///
/// Digits beyond `decimals` are rounded half-up.
pub fn parse_units(input: &str, decimals: u32) -> Result<U256> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Amount cannot be empty"));
    }
    if input.starts_with('-') {
        return Err(anyhow!("Amount must not be negative"));
    }

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(anyhow!("Invalid amount: {}", input));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Amount contains invalid characters: {}", input));
    }

    let decimals = decimals as usize;
    let scale = U256::exp10(decimals);

    let whole_value = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).context("Amount is too large")?
    };

    let (kept, rest) = fraction.split_at(fraction.len().min(decimals));
    let padded = format!("{:0<width$}", kept, width = decimals);
    let mut fraction_value = if padded.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(&padded).context("Invalid fractional part")?
    };
    if rest.starts_with(|c: char| c >= '5') {
        fraction_value += U256::one();
    }

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| anyhow!("Amount is too large: {}", input))
}
