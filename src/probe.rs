//! Connectivity check against the configured endpoint

use tracing::{info, warn};

use crate::config::NetworkConfig;
use crate::rpc::{ChainRpc, RpcError};

/// What the node reported when probed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    pub chain_id: u64,
    pub latest_block: u64,
}

impl NetworkStatus {
    pub fn matches_chain(&self, network: &NetworkConfig) -> bool {
        self.chain_id == network.chain_id
    }
}

/// Confirm the node answers, returning its chain ID and latest block
pub async fn check_connection<R>(rpc: &R, network: &NetworkConfig) -> Result<NetworkStatus, RpcError>
where
    R: ChainRpc + ?Sized,
{
    let chain_id = rpc.chain_id().await?;
    let latest_block = rpc.block_number().await?;
    let status = NetworkStatus {
        chain_id,
        latest_block,
    };

    if status.matches_chain(network) {
        info!(chain_id, latest_block, network = %network.name, "connected");
    } else {
        warn!(
            expected = network.chain_id,
            reported = chain_id,
            "endpoint reports a different chain ID"
        );
    }

    Ok(status)
}
