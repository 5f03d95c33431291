//!
//! Verge: six decimal places, no fee estimation, and blocks are
//! assembled from their transaction ids.
//!

use crate::networks::{BlockFetch, CoinProfile};
use crate::params::{NetworkParams, ParamRegistry};
use crate::parser::amount::AmountFormat;
use crate::parser::errors::OpResult;

pub const MAINNET_MAGIC: u32 = 0xff7e_a7f7;

pub fn mainnet_params() -> NetworkParams {
    NetworkParams {
        net: MAINNET_MAGIC,
        pubkey_hash_addr_id: vec![30],
        script_hash_addr_id: vec![33],
        bech32_hrp_segwit: "xvg".to_string(),
        ..NetworkParams::bitcoin_mainnet()
    }
}

pub fn profile() -> CoinProfile {
    CoinProfile {
        amounts: AmountFormat::new(6),
        supports_estimate_fee: false,
        block_fetch: BlockFetch::Thin,
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
    use crate::parser::address::{address_to_script, p2pkh_address};

    #[test]
    fn test_profile() {
        let profile = profile();
        assert_eq!(profile.amounts.decimal_point, 6);
        assert!(!profile.supports_estimate_fee);
        assert_eq!(profile.block_fetch, BlockFetch::Thin);
        assert!(profile.aux_pow.is_none());
    }

    #[test]
    fn test_address_prefix() {
        let registry = ParamRegistry::new();
        let params = chain_params("anything", &registry).unwrap();
        assert_eq!(params.net, MAINNET_MAGIC);

        let addr = p2pkh_address(&[0x11; 20], &params);
        assert!(addr.starts_with('D'));
        let script = address_to_script(&addr, &params).unwrap();
        assert!(script.is_p2pkh());
    }
}
