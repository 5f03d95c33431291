//!
//! Base58Check and Bech32 address encoding, parameterized by the
//! version bytes and segwit prefix of a `NetworkParams`.
//!

use crate::params::NetworkParams;
use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use bitcoin::bech32::{self, u5, FromBase32, ToBase32, Variant};
use bitcoin::blockdata::opcodes::all;
use bitcoin::blockdata::script::Builder;
use bitcoin::util::base58;
use bitcoin::Script;

const HASH160_LEN: usize = 20;

///
/// Decode a human readable address into the locking script it pays to.
///
/// Base58Check is tried first, then Bech32. Version bytes and HRP must
/// belong to `params`, anything else is `InvalidAddressFormat`.
///
pub fn address_to_script(address: &str, params: &NetworkParams) -> OpResult<Script> {
    match base58::from_check(address) {
        Ok(payload) => base58_payload_to_script(&payload, params),
        Err(base58_err) => match bech32::decode(address) {
            Ok((hrp, data, variant)) => segwit_to_script(&hrp, &data, variant, params),
            Err(_) => Err(invalid(&format!("{}: {}", address, base58_err))),
        },
    }
}

fn base58_payload_to_script(payload: &[u8], params: &NetworkParams) -> OpResult<Script> {
    let magic_len = params.address_magic_len();
    if payload.len() != magic_len + HASH160_LEN {
        return Err(invalid(&format!(
            "base58 payload of {} bytes, expected {}",
            payload.len(),
            magic_len + HASH160_LEN
        )));
    }
    let (version, hash) = payload.split_at(magic_len);
    if version == params.pubkey_hash_addr_id.as_slice() {
        Ok(p2pkh_script(hash))
    } else if version == params.script_hash_addr_id.as_slice() {
        Ok(p2sh_script(hash))
    } else {
        Err(invalid(&format!(
            "version {:02x?} is not used by {}",
            version, params.name
        )))
    }
}

fn segwit_to_script(
    hrp: &str,
    data: &[u5],
    variant: Variant,
    params: &NetworkParams,
) -> OpResult<Script> {
    if !hrp.eq_ignore_ascii_case(&params.bech32_hrp_segwit) {
        return Err(invalid(&format!(
            "hrp {} is not {}",
            hrp, params.bech32_hrp_segwit
        )));
    }
    let (version, program) = match data.split_first() {
        Some((v, p)) => (v.to_u8(), Vec::<u8>::from_base32(p)?),
        None => return Err(invalid("empty witness program")),
    };
    match (version, variant) {
        (0, Variant::Bech32) if program.len() == 20 || program.len() == 32 => {}
        (1..=16, Variant::Bech32m) if program.len() >= 2 && program.len() <= 40 => {}
        _ => {
            return Err(invalid(&format!(
                "witness v{} program of {} bytes ({:?})",
                version,
                program.len(),
                variant
            )))
        }
    }
    Ok(Builder::new()
        .push_int(version as i64)
        .push_slice(&program)
        .into_script())
}

pub(crate) fn p2pkh_script(hash: &[u8]) -> Script {
    Builder::new()
        .push_opcode(all::OP_DUP)
        .push_opcode(all::OP_HASH160)
        .push_slice(hash)
        .push_opcode(all::OP_EQUALVERIFY)
        .push_opcode(all::OP_CHECKSIG)
        .into_script()
}

pub(crate) fn p2sh_script(hash: &[u8]) -> Script {
    Builder::new()
        .push_opcode(all::OP_HASH160)
        .push_slice(hash)
        .push_opcode(all::OP_EQUAL)
        .into_script()
}

/// Base58Check address of a 20 byte hash under the given version bytes.
pub fn encode_base58(version: &[u8], hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(version.len() + hash.len());
    payload.extend_from_slice(version);
    payload.extend_from_slice(hash);
    base58::check_encode_slice(&payload)
}

#[inline]
pub fn p2pkh_address(hash: &[u8], params: &NetworkParams) -> String {
    encode_base58(&params.pubkey_hash_addr_id, hash)
}

#[inline]
pub fn p2sh_address(hash: &[u8], params: &NetworkParams) -> String {
    encode_base58(&params.script_hash_addr_id, hash)
}

///
/// Bech32 (v0) or Bech32m (v1+) address of a witness program.
///
pub fn segwit_address(version: u8, program: &[u8], params: &NetworkParams) -> OpResult<String> {
    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(u5::try_from_u8(version)?);
    data.extend(program.to_base32());
    let variant = if version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    };
    Ok(bech32::encode(&params.bech32_hrp_segwit, data, variant)?)
}

fn invalid(msg: &str) -> OpError {
    OpError::new(OpErrorKind::InvalidAddressFormat).join_msg(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin_hashes::hex::ToHex;

    #[test]
    fn test_bitcoin_p2pkh() {
        let params = NetworkParams::bitcoin_mainnet();
        let script = address_to_script("12higDjoCCNXSA95xZMWUdPvXNmkAduhWv", &params).unwrap();
        assert_eq!(
            script.to_hex(),
            "76a91412ab8dc588ca9d5787dde7eb29569da63c3a238c88ac"
        );
    }

    #[test]
    fn test_bitcoin_p2sh() {
        let params = NetworkParams::bitcoin_mainnet();
        let script = address_to_script("3P14159f73E4gFr7JterCCQh9QjiTjiZrG", &params).unwrap();
        assert_eq!(
            script.to_hex(),
            "a914e9c3dd0c07aac76179ebc76a6c78d4d67c6c160a87"
        );
    }

    #[test]
    fn test_wrong_network_version() {
        // bitcoin mainnet address against testnet version bytes
        let params = NetworkParams::bitcoin_testnet();
        let err = address_to_script("12higDjoCCNXSA95xZMWUdPvXNmkAduhWv", &params).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::InvalidAddressFormat);
    }

    #[test]
    fn test_bad_checksum() {
        let params = NetworkParams::bitcoin_mainnet();
        let err = address_to_script("12higDjoCCNXSA95xZMWUdPvXNmkAduhWw", &params).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::InvalidAddressFormat);
    }

    #[test]
    fn test_segwit_round_trip() {
        let params = NetworkParams::bitcoin_mainnet();
        let program = [0x75u8; 20];
        let address = segwit_address(0, &program, &params).unwrap();
        assert!(address.starts_with("bc1q"));
        let script = address_to_script(&address, &params).unwrap();
        assert!(script.is_v0_p2wpkh());
        assert_eq!(&script.as_bytes()[2..], &program[..]);

        // same program under another prefix is rejected
        let err = address_to_script(&address, &NetworkParams::bitcoin_testnet()).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::InvalidAddressFormat);
    }

    #[test]
    fn test_taproot_uses_bech32m() {
        let params = NetworkParams::bitcoin_mainnet();
        let program = [0x11u8; 32];
        let address = segwit_address(1, &program, &params).unwrap();
        assert!(address.starts_with("bc1p"));
        let script = address_to_script(&address, &params).unwrap();
        assert_eq!(script.as_bytes()[0], 0x51);
        assert_eq!(&script.as_bytes()[2..], &program[..]);
    }

    #[test]
    fn test_garbage() {
        let params = NetworkParams::bitcoin_mainnet();
        let err = address_to_script("not an address", &params).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::InvalidAddressFormat);
    }
}
