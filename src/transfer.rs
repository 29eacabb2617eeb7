//! Signed token transfers
//!
//! Builds a legacy `transfer(recipient, amount)` transaction with the fixed
//! gas settings, signs it locally (EIP-155) and broadcasts the raw bytes.

use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, H256, U256};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::rpc::{ChainRpc, RpcError};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Failed to build transfer: {0:#}")]
    Build(anyhow::Error),

    #[error("Failed to sign transaction: {0}")]
    Sign(String),

    #[error("Failed to fetch nonce: {0}")]
    Nonce(RpcError),

    #[error("Failed to broadcast transaction: {0}")]
    Broadcast(RpcError),
}

/// Recipient and amount in smallest token units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: Address,
    pub amount: U256,
}

/// Unsigned legacy transaction calling `transfer` on the token contract
pub fn build_transfer_tx(
    config: &Config,
    sender: Address,
    request: &TransferRequest,
    nonce: U256,
) -> Result<TypedTransaction, TransferError> {
    let contract = config.token_contract().map_err(TransferError::Build)?;
    let data = contract
        .encode_transfer(request.recipient, request.amount)
        .map_err(TransferError::Build)?;

    let tx = TransactionRequest::new()
        .from(sender)
        .to(contract.address())
        .data(data)
        .gas(config.gas.gas_limit)
        .gas_price(config.gas.gas_price)
        .nonce(nonce)
        .chain_id(config.network.chain_id);

    Ok(tx.into())
}

/// RLP-encoded signed transaction, ready for `eth_sendRawTransaction`
pub fn sign_transaction(
    wallet: &LocalWallet,
    chain_id: u64,
    tx: &TypedTransaction,
) -> Result<Bytes, TransferError> {
    let wallet = wallet.clone().with_chain_id(chain_id);
    let signature = wallet
        .sign_transaction_sync(tx)
        .map_err(|e| TransferError::Sign(e.to_string()))?;

    Ok(tx.rlp_signed(&signature))
}

/// Send `request.amount` tokens from the wallet to `request.recipient`
///
/// # Arguments
///
/// * `rpc` - Node used for the nonce lookup and the broadcast
/// * `config` - Token contract, chain ID and gas settings
/// * `wallet` - Signing key; its address is the sender
/// * `request` - Recipient and amount in smallest token units
///
/// # Returns
///
/// The transaction hash reported by the node. The nonce is read fresh and
/// nothing is retried; a rejected transaction surfaces as
/// [`TransferError::Broadcast`].
pub async fn transfer_tokens<R>(
    rpc: &R,
    config: &Config,
    wallet: &LocalWallet,
    request: &TransferRequest,
) -> Result<H256, TransferError>
where
    R: ChainRpc + ?Sized,
{
    let sender = wallet.address();
    let nonce = rpc
        .transaction_count(sender)
        .await
        .map_err(TransferError::Nonce)?;

    let tx = build_transfer_tx(config, sender, request, nonce)?;
    let raw = sign_transaction(wallet, config.network.chain_id, &tx)?;

    info!(
        ?sender,
        recipient = ?request.recipient,
        amount = %request.amount,
        %nonce,
        "broadcasting transfer"
    );

    let tx_hash = rpc
        .send_raw_transaction(raw)
        .await
        .map_err(TransferError::Broadcast)?;

    info!(?tx_hash, "transfer broadcast");
    Ok(tx_hash)
}
