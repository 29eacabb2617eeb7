//! JSON-RPC access to the chain
//!
//! [`ChainRpc`] is the narrow set of node calls the CLI needs. [`HttpRpc`]
//! implements it over HTTP with `reqwest`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, U256, U64};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Failed to reach RPC endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("No result in RPC response for {0}")]
    MissingResult(String),
}

/// Node calls used by the probe, balance reader and transfer executor
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn chain_id(&self) -> Result<u64, RpcError>;

    async fn block_number(&self) -> Result<u64, RpcError>;

    /// Native balance in wei at the latest block
    async fn get_balance(&self, address: Address) -> Result<U256, RpcError>;

    /// Deployed bytecode at `address`; empty for plain accounts
    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError>;

    /// Read-only `eth_call` against `to`
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError>;

    /// Transaction count of `address`, used as the next nonce
    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError>;

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError>;
}

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<serde_json::Value>,
    id: u64,
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// [`ChainRpc`] over HTTP JSON-RPC
#[derive(Debug)]
pub struct HttpRpc {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpRpc {
    /// Client for the JSON-RPC endpoint at `url`; nothing is sent until the first call
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<T, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        debug!(method, id = request.id, "sending RPC request");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::Status(response.status()));
        }

        let rpc_response: JsonRpcResponse<T> = response.json().await?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::MissingResult(method.to_string()))
    }
}

#[async_trait]
impl ChainRpc for HttpRpc {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        let id: U64 = self.request("eth_chainId", vec![]).await?;
        Ok(id.as_u64())
    }

    async fn block_number(&self) -> Result<u64, RpcError> {
        let number: U64 = self.request("eth_blockNumber", vec![]).await?;
        Ok(number.as_u64())
    }

    async fn get_balance(&self, address: Address) -> Result<U256, RpcError> {
        self.request("eth_getBalance", vec![json!(address), json!("latest")])
            .await
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError> {
        self.request("eth_getCode", vec![json!(address), json!("latest")])
            .await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        self.request(
            "eth_call",
            vec![json!({ "to": to, "data": data }), json!("latest")],
        )
        .await
    }

    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError> {
        self.request(
            "eth_getTransactionCount",
            vec![json!(address), json!("latest")],
        )
        .await
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError> {
        self.request("eth_sendRawTransaction", vec![json!(raw)]).await
    }
}
