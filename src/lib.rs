//! Sharar Legend Token Library
//!
//! Balance checks and token transfers for the Sharar Legend token on the
//! Sahara testnet, over JSON-RPC.

pub mod address;
pub mod balance;
pub mod config;
pub mod probe;
pub mod rpc;
pub mod session;
pub mod token;
pub mod transfer;
pub mod units;

pub use balance::{BalanceReport, TokenBalance};
pub use config::Config;
pub use rpc::{ChainRpc, HttpRpc, RpcError};
pub use session::SessionError;
