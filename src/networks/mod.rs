//!
//! Supported networks.
//!
//! Each coin module holds only what differs from Bitcoin: its parameter
//! sets and a `CoinProfile` with behavioural deltas. Parsing itself is
//! shared, see `CoinParser`.
//!

pub mod bitcoinvault;
pub mod reddcoin;
pub mod verge;

use crate::api::CoinParser;
use crate::params::{NetworkParams, ParamRegistry};
use crate::parser::amount::AmountFormat;
use crate::parser::auxpow::AuxPowRules;
use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

///
/// How a full block is obtained from the node.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockFetch {
    /// serialized block, decoded locally
    Raw,
    /// header and txids, then every transaction on its own
    Thin,
}

///
/// Behavioural deltas of one coin on top of the shared parser.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinProfile {
    /// merged-mining rules, `None` when headers never carry a proof
    pub aux_pow: Option<AuxPowRules>,
    pub amounts: AmountFormat,
    pub supports_estimate_fee: bool,
    pub block_fetch: BlockFetch,
}

impl Default for CoinProfile {
    fn default() -> Self {
        CoinProfile {
            aux_pow: None,
            amounts: AmountFormat::default(),
            supports_estimate_fee: true,
            block_fetch: BlockFetch::Raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    Bitcoinvault,
    Reddcoin,
    Verge,
}

impl Coin {
    pub const ALL: [Coin; 3] = [Coin::Bitcoinvault, Coin::Reddcoin, Coin::Verge];

    pub fn profile(&self) -> CoinProfile {
        match self {
            Coin::Bitcoinvault => bitcoinvault::profile(),
            Coin::Reddcoin => reddcoin::profile(),
            Coin::Verge => verge::profile(),
        }
    }

    ///
    /// Parameter set for `chain` as reported by the node.
    ///
    /// The coin's parameter sets are registered first; doing so again
    /// on later calls is a no-op.
    ///
    pub fn chain_params(&self, chain: &str, registry: &ParamRegistry) -> OpResult<NetworkParams> {
        match self {
            Coin::Bitcoinvault => bitcoinvault::chain_params(chain, registry),
            Coin::Reddcoin => reddcoin::chain_params(chain, registry),
            Coin::Verge => verge::chain_params(chain, registry),
        }
    }

    pub fn parser(&self, chain: &str, registry: &ParamRegistry) -> OpResult<CoinParser> {
        Ok(CoinParser::new(
            self.chain_params(chain, registry)?,
            self.profile(),
        ))
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            Coin::Bitcoinvault => "BTCV",
            Coin::Reddcoin => "RDD",
            Coin::Verge => "XVG",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Coin::Bitcoinvault => write!(f, "Bitcoinvault"),
            Coin::Reddcoin => write!(f, "Reddcoin"),
            Coin::Verge => write!(f, "Verge"),
        }
    }
}

impl FromStr for Coin {
    type Err = OpError;

    /// accepts the coin name or its ticker, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Coin::ALL
            .iter()
            .find(|c| {
                c.to_string().eq_ignore_ascii_case(wanted)
                    || c.shortcut().eq_ignore_ascii_case(wanted)
            })
            .copied()
            .ok_or_else(|| OpError::new(OpErrorKind::UnknownCoin).join_msg(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_from_str() {
        assert_eq!("bitcoinvault".parse::<Coin>().unwrap(), Coin::Bitcoinvault);
        assert_eq!("RDD".parse::<Coin>().unwrap(), Coin::Reddcoin);
        assert_eq!(" Verge ".parse::<Coin>().unwrap(), Coin::Verge);
        let err = "dogecoin".parse::<Coin>().unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::UnknownCoin);
    }

    #[test]
    fn test_every_coin_registers_once() {
        let registry = ParamRegistry::new();
        for coin in Coin::ALL.iter() {
            let first = coin.chain_params("main", &registry).unwrap();
            let second = coin.chain_params("main", &registry).unwrap();
            assert_eq!(first, second);
        }
        // reddcoin registers its testnet too
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_magics_are_distinct() {
        let registry = ParamRegistry::new();
        let mut magics: Vec<u32> = Coin::ALL
            .iter()
            .map(|c| c.chain_params("main", &registry).unwrap().net)
            .collect();
        magics.push(reddcoin::testnet_params().net);
        magics.sort_unstable();
        magics.dedup();
        assert_eq!(magics.len(), 4);
    }
}
