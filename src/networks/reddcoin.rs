//!
//! Reddcoin: complete parameter sets for main and test networks.
//!

use crate::networks::CoinProfile;
use crate::params::{NetworkParams, ParamRegistry};
use crate::parser::errors::OpResult;

pub const MAINNET_MAGIC: u32 = 0x0050_4852; // PHR
pub const TESTNET_MAGIC: u32 = 0x0054_5048; // TP

pub fn mainnet_params() -> NetworkParams {
    NetworkParams {
        name: "mainRedd".to_string(),
        net: MAINNET_MAGIC,
        default_port: "45444".to_string(),
        pubkey_hash_addr_id: vec![0x3d], // starts with R
        script_hash_addr_id: vec![0x05],
        private_key_id: vec![0xbd],
        // segwit addresses were never given a prefix of their own
        bech32_hrp_segwit: "bc".to_string(),
        hd_private_key_id: [0x04, 0x35, 0x83, 0x94],
        hd_public_key_id: [0x04, 0x35, 0x87, 0xcf],
        hd_coin_type: 0x8000_0004,
    }
}

pub fn testnet_params() -> NetworkParams {
    NetworkParams {
        name: "testnetRedd".to_string(),
        net: TESTNET_MAGIC,
        default_port: "55444".to_string(),
        pubkey_hash_addr_id: vec![0x8b],
        script_hash_addr_id: vec![0x13],
        private_key_id: vec![0xef],
        bech32_hrp_segwit: "bc".to_string(),
        hd_private_key_id: [0x3a, 0x80, 0x61, 0xa0],
        hd_public_key_id: [0x3a, 0x80, 0x58, 0x37],
        hd_coin_type: 0x8000_0001,
    }
}

pub fn profile() -> CoinProfile {
    CoinProfile::default()
}

/// `"test"` selects testnet, any other name mainnet
pub fn chain_params(chain: &str, registry: &ParamRegistry) -> OpResult<NetworkParams> {
    let main = mainnet_params();
    let test = testnet_params();
    registry.register(&main)?;
    registry.register(&test)?;
    match chain {
        "test" => Ok(test),
        _ => Ok(main),
    }
}
