//!
//! Bitcoin Vault: Bitcoin parameters with its own magic, version bytes
//! and segwit prefix, plus merged mining.
//!

use crate::networks::CoinProfile;
use crate::params::{NetworkParams, ParamRegistry};
use crate::parser::auxpow::{AuxPowExceptions, AuxPowRules};
use crate::parser::errors::OpResult;

pub const MAINNET_MAGIC: u32 = 0xc0c0_c0c0;

///
/// Parents of the blocks that set the auxpow version bit before the
/// merged-mining fork without carrying a proof.
///
/// These are *parent* hashes: the flagged block's `prev_blockhash`.
///
pub static FAKE_AUXPOW_PREFORK_BLOCK_PARENTS: &[&str] = &[
    "0000000000000000144c7fb7dad69be270035fa2d7f4652819369d9e3bb8023d",
    "000000000000000017b3b639f6f4ff8618c0fe5fbc44c39fa924a60974be6a2d",
    "0000000000000000022a3e19cd72f7012a2089fa5854ac42374bd48c010f1f4f",
    "00000000000000001e8818e5c81c2f224fbf21f7be90888f4c6314bb56f11d3f",
];

pub fn mainnet_params() -> NetworkParams {
    NetworkParams {
        net: MAINNET_MAGIC,
        pubkey_hash_addr_id: vec![78],
        script_hash_addr_id: vec![60],
        bech32_hrp_segwit: "royale".to_string(),
        ..NetworkParams::bitcoin_mainnet()
    }
}

pub fn profile() -> CoinProfile {
    CoinProfile {
        aux_pow: Some(AuxPowRules::new(AuxPowExceptions::new(
            FAKE_AUXPOW_PREFORK_BLOCK_PARENTS,
        ))),
        ..CoinProfile::default()
    }
}

/// single network: the chain name is ignored
pub fn chain_params(_chain: &str, registry: &ParamRegistry) -> OpResult<NetworkParams> {
    let params = mainnet_params();
    registry.register(&params)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_chain_is_mainnet() {
        let registry = ParamRegistry::new();
        let main = chain_params("main", &registry).unwrap();
        let test = chain_params("test", &registry).unwrap();
        assert_eq!(main, test);
        assert_eq!(main.net, 0xc0c0c0c0);
        assert_eq!(main.script_hash_addr_id, vec![0x3c]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_four_exceptions() {
        let rules = profile().aux_pow.unwrap();
        assert_eq!(rules.exceptions.len(), 4);
        for parent in FAKE_AUXPOW_PREFORK_BLOCK_PARENTS {
            assert!(rules.exceptions.contains_hex(parent));
        }
    }
}
