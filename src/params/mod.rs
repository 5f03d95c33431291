//!
//! Network parameter sets and their registry.
//!
//! A `NetworkParams` carries the wire and address conventions of one
//! network. Coins start from the Bitcoin defaults and override the
//! few fields that differ, see `crate::networks`.
//!

mod registry;

pub use registry::ParamRegistry;

use serde::{Deserialize, Serialize};

/// Bitcoin mainnet magic, as it appears on the wire.
pub const BITCOIN_MAINNET_MAGIC: u32 = 0xd9b4_bef9;

/// Bitcoin testnet3 magic.
pub const BITCOIN_TESTNET_MAGIC: u32 = 0x0709_110b;

///
/// Immutable description of one network's wire and address conventions.
///
/// Identity of a parameter set is its `net` magic: the registry refuses
/// two different sets with the same magic.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub name: String,
    pub net: u32,
    pub default_port: String,

    /// Base58Check version bytes of pay-to-pubkey-hash addresses
    pub pubkey_hash_addr_id: Vec<u8>,
    /// Base58Check version bytes of pay-to-script-hash addresses
    pub script_hash_addr_id: Vec<u8>,
    /// Base58Check version bytes of WIF private keys
    pub private_key_id: Vec<u8>,
    /// human-readable part of Bech32 segwit addresses (BIP 173)
    pub bech32_hrp_segwit: String,

    /// BIP32 extended key magics
    pub hd_private_key_id: [u8; 4],
    pub hd_public_key_id: [u8; 4],
    /// BIP44 coin type
    pub hd_coin_type: u32,
}

impl NetworkParams {
    pub fn bitcoin_mainnet() -> NetworkParams {
        NetworkParams {
            name: "mainnet".to_string(),
            net: BITCOIN_MAINNET_MAGIC,
            default_port: "8333".to_string(),
            pubkey_hash_addr_id: vec![0x00],
            script_hash_addr_id: vec![0x05],
            private_key_id: vec![0x80],
            bech32_hrp_segwit: "bc".to_string(),
            hd_private_key_id: [0x04, 0x88, 0xad, 0xe4],
            hd_public_key_id: [0x04, 0x88, 0xb2, 0x1e],
            hd_coin_type: 0,
        }
    }

    pub fn bitcoin_testnet() -> NetworkParams {
        NetworkParams {
            name: "testnet3".to_string(),
            net: BITCOIN_TESTNET_MAGIC,
            default_port: "18333".to_string(),
            pubkey_hash_addr_id: vec![0x6f],
            script_hash_addr_id: vec![0xc4],
            private_key_id: vec![0xef],
            bech32_hrp_segwit: "tb".to_string(),
            hd_private_key_id: [0x04, 0x35, 0x83, 0x94],
            hd_public_key_id: [0x04, 0x35, 0x87, 0xcf],
            hd_coin_type: 1,
        }
    }

    /// Number of version bytes prefixed to a Base58Check address payload.
    #[inline]
    pub fn address_magic_len(&self) -> usize {
        self.pubkey_hash_addr_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_defaults() {
        let main = NetworkParams::bitcoin_mainnet();
        assert_eq!(main.net, 0xd9b4bef9);
        assert_eq!(main.address_magic_len(), 1);
        assert_eq!(main.bech32_hrp_segwit, "bc");

        let test = NetworkParams::bitcoin_testnet();
        assert_ne!(main, test);
        assert_eq!(test.bech32_hrp_segwit, "tb");
    }
}
