//!
//! Crates APIs, essential structs, functions, methods are all here!
//!
//! To quickly understand how to use this crate, have a look at the
//! documentation for `altchain_parser::CoinParser`.
//!
//! # Example
//!
//! ```rust
//! use altchain_parser::{BlockDecoder, Coin, ParamRegistry};
//!
//! let registry = ParamRegistry::new();
//! let parser = Coin::Bitcoinvault.parser("main", &registry).unwrap();
//!
//! let block = parser.parse_block(&raw_block_bytes).unwrap();
//! for tx in block.txs {
//!     println!("{}", tx.txid);
//! }
//! ```
//!

use crate::networks::CoinProfile;
use crate::params::NetworkParams;
use crate::parser::address::address_to_script;
use crate::parser::amount::AmountFormat;
use crate::parser::block::decode_block;
use crate::parser::pack::TxPacker;
use crate::parser::script::evaluate_script;
use bitcoin::consensus::deserialize;
use rayon::prelude::*;
// re-exports
pub use crate::config::Configuration;
pub use crate::networks::{BlockFetch, Coin};
pub use crate::params::ParamRegistry;
pub use crate::parser::errors::{OpError, OpErrorKind, OpResult};
pub use crate::parser::proto::canonical::{Block, BlockHeader, ScriptPubKey, Tx, Vin, Vout};
pub use crate::parser::script::{ScriptInfo, ScriptType};
pub use bitcoin::hashes::hex::{FromHex, ToHex};
pub use bitcoin::Script;

///
/// Decodes serialized blocks into the canonical model.
///
pub trait BlockDecoder {
    fn parse_block(&self, raw: &[u8]) -> OpResult<Block>;
}

///
/// Converts between locking scripts and human readable addresses.
///
pub trait AddressCodec {
    fn address_to_script(&self, address: &str) -> OpResult<Script>;

    fn script_to_addresses(&self, script: &Script) -> ScriptInfo;
}

///
/// Extract addresses from a hex encoded script public key.
///
#[inline]
pub fn parse_script(script_pub_key: &str, params: &NetworkParams) -> OpResult<ScriptInfo> {
    let script = Script::from_hex(script_pub_key)?;
    Ok(evaluate_script(&script, params))
}

///
/// This is the main struct of this crate!! Click and read the doc.
///
/// One `CoinParser` serves one network: the shared decoding engine,
/// fixed to a `NetworkParams` and the coin's `CoinProfile`.
/// It holds no mutable state and can be shared between threads.
///
#[derive(Debug, Clone)]
pub struct CoinParser {
    params: NetworkParams,
    profile: CoinProfile,
}

impl CoinParser {
    pub fn new(params: NetworkParams, profile: CoinProfile) -> CoinParser {
        CoinParser { params, profile }
    }

    /// parser for `coin` with the overrides of `config` applied
    pub fn with_config(
        coin: Coin,
        chain: &str,
        config: &Configuration,
        registry: &ParamRegistry,
    ) -> OpResult<CoinParser> {
        Ok(CoinParser::new(
            coin.chain_params(chain, registry)?,
            config.apply(coin.profile()),
        ))
    }

    #[inline]
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    #[inline]
    pub fn profile(&self) -> &CoinProfile {
        &self.profile
    }

    #[inline]
    pub fn amount_format(&self) -> &AmountFormat {
        &self.profile.amounts
    }

    ///
    /// Decode many independent blocks in parallel.
    ///
    /// Results come back in the order of `raws`; a failing block
    /// does not affect the others.
    ///
    pub fn parse_blocks(&self, raws: &[Vec<u8>]) -> Vec<OpResult<Block>> {
        raws.par_iter().map(|raw| self.parse_block(raw)).collect()
    }

    /// Decode one serialized transaction, witness data included.
    pub fn parse_tx(&self, raw: &[u8]) -> OpResult<Tx> {
        let tx: bitcoin::Transaction = deserialize(raw)?;
        Ok(Tx::parse(tx, &self.params))
    }

    pub fn pack_tx(
        &self,
        packer: &dyn TxPacker,
        tx: &Tx,
        height: u32,
        block_time: i64,
    ) -> OpResult<Vec<u8>> {
        packer.pack_tx(tx, height, block_time, &self.profile.amounts)
    }

    pub fn unpack_tx(&self, packer: &dyn TxPacker, buf: &[u8]) -> OpResult<(Tx, u32)> {
        packer.unpack_tx(buf, &self.profile.amounts)
    }
}

impl BlockDecoder for CoinParser {
    ///
    /// Decode a serialized block.
    ///
    /// Merged-mining proofs are skipped for coins whose profile has
    /// auxpow rules.
    ///
    fn parse_block(&self, raw: &[u8]) -> OpResult<Block> {
        decode_block(raw, &self.params, self.profile.aux_pow.as_ref())
    }
}

impl AddressCodec for CoinParser {
    fn address_to_script(&self, address: &str) -> OpResult<Script> {
        address_to_script(address, &self.params)
    }

    fn script_to_addresses(&self, script: &Script) -> ScriptInfo {
        evaluate_script(script, &self.params)
    }
}
