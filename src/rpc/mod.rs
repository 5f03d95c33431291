//!
//! Node access.
//!
//! The transport is not part of this crate: callers implement `ChainRpc`
//! over whatever JSON-RPC client they use, and `RpcAdapter` turns its
//! answers into canonical blocks.
//!

mod adapter;

pub use adapter::RpcAdapter;

use crate::parser::errors::OpResult;
use crate::parser::proto::canonical::{BlockHeader, Tx};
use serde::{Deserialize, Serialize};

/// subset of `getblockchaininfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub bestblockhash: String,
}

/// `getblock` with verbosity 1: the header and the transaction ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinBlock {
    #[serde(flatten)]
    pub header: BlockHeader,
    #[serde(rename = "tx")]
    pub txids: Vec<String>,
}

///
/// Calls the adapters make against a running node.
///
/// `get_transaction` must fail with `OpErrorKind::TxNotFound` when the
/// node does not know the transaction.
///
pub trait ChainRpc: Send + Sync {
    fn get_chain_info(&self) -> OpResult<ChainInfo>;

    fn get_block_hash(&self, height: u32) -> OpResult<String>;

    fn get_raw_block(&self, hash: &str) -> OpResult<Vec<u8>>;

    fn get_thin_block(&self, hash: &str) -> OpResult<ThinBlock>;

    fn get_transaction(&self, txid: &str) -> OpResult<Tx>;
}
