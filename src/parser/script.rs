use crate::params::NetworkParams;
use crate::parser::address::{p2pkh_address, p2sh_address, segwit_address};
use bitcoin::blockdata::opcodes::{all, All};
use bitcoin::blockdata::script::Instruction;
use bitcoin::hashes::{hash160, Hash};
use bitcoin::{PublicKey, Script};
use bitcoin_hashes::hex::ToHex;
use serde::{Deserialize, Serialize};
use std::fmt;
use Instruction::{Op, PushBytes};

///
/// Different types of output scripts.
///
/// See [An Analysis of Non-standard Transactions](https://doi.org/10.3389/fbloc.2019.00007)
/// for a more detailed explanation.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScriptType {
    OpReturn,
    Pay2MultiSig,
    Pay2PublicKey,
    Pay2PublicKeyHash,
    Pay2ScriptHash,
    Pay2WitnessPublicKeyHash,
    Pay2WitnessScriptHash,
    Pay2Taproot,
    WitnessProgram,
    Unspendable,
    NotRecognised,
}

///
/// `ScriptInfo` stores the addresses extracted from a locking script.
///
/// `resolved` is true only when the script pays to exactly one standard
/// hash address. Null-data outputs carry a human readable `annotation`
/// instead of addresses.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub addresses: Vec<String>,
    pub pattern: ScriptType,
    pub annotation: Option<String>,
    pub resolved: bool,
}

///
/// This function extract addresses and script type from Script.
///
pub fn evaluate_script(script: &Script, params: &NetworkParams) -> ScriptInfo {
    let bytes = script.as_bytes();
    if script.is_p2pk() {
        ScriptInfo::unresolved(p2pk_address(script, params), ScriptType::Pay2PublicKey)
    } else if script.is_p2pkh() {
        ScriptInfo::resolved(p2pkh_address(&bytes[3..23], params), ScriptType::Pay2PublicKeyHash)
    } else if script.is_p2sh() {
        ScriptInfo::resolved(p2sh_address(&bytes[2..22], params), ScriptType::Pay2ScriptHash)
    } else if script.is_witness_program() {
        witness_info(bytes, params)
    } else if script.is_op_return() {
        match op_return_annotation(bytes) {
            Some(text) => ScriptInfo {
                addresses: Vec::new(),
                pattern: ScriptType::OpReturn,
                annotation: Some(text),
                resolved: false,
            },
            None => ScriptInfo::unresolved(Vec::new(), ScriptType::Unspendable),
        }
    } else if script.is_provably_unspendable() {
        ScriptInfo::unresolved(Vec::new(), ScriptType::Unspendable)
    } else if is_multisig(script) {
        ScriptInfo::unresolved(multisig_addresses(script, params), ScriptType::Pay2MultiSig)
    } else {
        ScriptInfo::unresolved(Vec::new(), ScriptType::NotRecognised)
    }
}

impl ScriptInfo {
    pub(crate) fn resolved(address: String, pattern: ScriptType) -> Self {
        ScriptInfo {
            addresses: vec![address],
            pattern,
            annotation: None,
            resolved: true,
        }
    }

    pub(crate) fn unresolved(addresses: Vec<String>, pattern: ScriptType) -> Self {
        ScriptInfo {
            addresses,
            pattern,
            annotation: None,
            resolved: false,
        }
    }
}

///
/// Witness programs: version opcode followed by a single push.
///
fn witness_info(bytes: &[u8], params: &NetworkParams) -> ScriptInfo {
    let version = match bytes[0] {
        0 => 0,
        op => op - all::OP_PUSHNUM_1.into_u8() + 1,
    };
    let program = &bytes[2..];
    let address = match segwit_address(version, program, params) {
        Ok(address) => address,
        Err(_) => return ScriptInfo::unresolved(Vec::new(), ScriptType::NotRecognised),
    };
    match (version, program.len()) {
        (0, 20) => ScriptInfo::resolved(address, ScriptType::Pay2WitnessPublicKeyHash),
        (0, 32) => ScriptInfo::resolved(address, ScriptType::Pay2WitnessScriptHash),
        (1, 32) => ScriptInfo::resolved(address, ScriptType::Pay2Taproot),
        _ => ScriptInfo::unresolved(vec![address], ScriptType::WitnessProgram),
    }
}

///
/// Render a null-data payload.
///
/// Accepted forms are `OP_RETURN <len> <data>`,
/// `OP_RETURN OP_PUSHDATA1 <len> <data>` and
/// `OP_RETURN OP_PUSHDATA2 <len_lo> <len_hi> <data>`.
/// The declared length must cover the rest of the script exactly.
///
pub fn op_return_annotation(script: &[u8]) -> Option<String> {
    if script.len() < 2 || script[0] != all::OP_RETURN.into_u8() {
        return None;
    }
    let direct = (script[1] as usize, &script[2..]);
    let (len, data) = if script[1] == all::OP_PUSHDATA1.into_u8() && script.len() > 2 {
        let candidate = (script[2] as usize, &script[3..]);
        if candidate.0 == candidate.1.len() {
            candidate
        } else {
            direct
        }
    } else if script[1] == all::OP_PUSHDATA2.into_u8() && script.len() > 3 {
        let candidate = (
            script[2] as usize | (script[3] as usize) << 8,
            &script[4..],
        );
        if candidate.0 == candidate.1.len() {
            candidate
        } else {
            direct
        }
    } else {
        direct
    };
    if len != data.len() {
        return None;
    }
    if data.iter().all(|c| (0x20..0x7f).contains(c)) {
        // printable ascii only, so this is valid utf8
        Some(format!("OP_RETURN ({})", String::from_utf8_lossy(data)))
    } else {
        Some(format!("OP_RETURN {}", data.to_hex()))
    }
}

///
/// translated from Bitcoinj:
/// [isSentToMultisig()](https://github.com/bitcoinj/bitcoinj/blob/d3d5edbcbdb91b25de4df3b6ed6740d7e2329efc/core/src/main/java/org/bitcoinj/script/ScriptPattern.java#L225:L246)
fn is_multisig(script: &Script) -> bool {
    // Read OpCodes
    let mut chunks: Vec<Instruction> = Vec::new();
    for i in script.instructions() {
        if let Ok(i) = i {
            chunks.push(i);
        } else {
            return false;
        }
    }

    // At least four chunks
    if chunks.len() < 4 {
        return false;
    }

    // Must end in OP_CHECKMULTISIG[VERIFY].
    match chunks.last() {
        Some(Op(op)) if *op == all::OP_CHECKMULTISIG || *op == all::OP_CHECKMULTISIGVERIFY => {}
        _ => return false,
    }

    // Second to last chunk must be an OP_N opcode and there should be that many data chunks (keys).
    match get_num_keys(&chunks[chunks.len() - 2]) {
        Some(num_keys) if num_keys >= 1 && (num_keys + 3) as usize == chunks.len() => {}
        _ => return false,
    }

    // the rest must be data (except the first and the last 2)
    for chunk in chunks.iter().skip(1).take(chunks.len() - 3) {
        if let Op(_) = chunk {
            return false;
        }
    }

    // First chunk must be an OP_N opcode too.
    matches!(get_num_keys(&chunks[0]), Some(n) if n >= 1)
}

///
/// Obtain P2PKH addresses of the keys of a multisig script.
///
/// Any key that does not parse empties the whole list.
///
fn multisig_addresses(script: &Script, params: &NetworkParams) -> Vec<String> {
    let ops: Vec<Instruction> = script.instructions().filter_map(|o| o.ok()).collect();
    let mut addresses = Vec::with_capacity(ops.len().saturating_sub(3));
    for op in ops.iter().skip(1).take(ops.len().saturating_sub(3)) {
        match op {
            PushBytes(data) => match PublicKey::from_slice(data) {
                Ok(pk) => addresses.push(p2pkh_address(&pk.pubkey_hash()[..], params)),
                Err(_) => return Vec::new(),
            },
            Op(_) => return Vec::new(),
        }
    }
    addresses
}

///
/// Decode OP_N
///
/// translated from BitcoinJ:
/// [decodeFromOpN()](https://github.com/bitcoinj/bitcoinj/blob/d3d5edbcbdb91b25de4df3b6ed6740d7e2329efc/core/src/main/java/org/bitcoinj/script/Script.java#L515:L524)
///
#[inline]
fn decode_from_op_n(op: &All) -> i32 {
    if op.eq(&all::OP_PUSHBYTES_0) {
        0
    } else if op.eq(&all::OP_PUSHNUM_NEG1) {
        -1
    } else {
        op.into_u8() as i32 + 1 - all::OP_PUSHNUM_1.into_u8() as i32
    }
}

///
/// Get number of keys for multisig
///
#[inline]
fn get_num_keys(op: &Instruction) -> Option<i32> {
    match op {
        PushBytes(_) => None,
        Op(op) => {
            let n = op.into_u8();
            if *op == all::OP_PUSHNUM_NEG1
                || *op == all::OP_PUSHBYTES_0
                || (n >= all::OP_PUSHNUM_1.into_u8() && n <= all::OP_PUSHNUM_16.into_u8())
            {
                Some(decode_from_op_n(op))
            } else {
                None
            }
        }
    }
}

///
/// P2PKH address of the key in a p2pk script.
///
#[inline]
fn p2pk_address(script: &Script, params: &NetworkParams) -> Vec<String> {
    match script.instructions().next() {
        Some(Ok(PushBytes(pk))) => {
            let pkh = hash160::Hash::hash(pk);
            vec![p2pkh_address(&pkh[..], params)]
        }
        _ => Vec::new(),
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ScriptType::OpReturn => write!(f, "OpReturn"),
            ScriptType::Pay2MultiSig => write!(f, "Pay2MultiSig"),
            ScriptType::Pay2PublicKey => write!(f, "Pay2PublicKey"),
            ScriptType::Pay2PublicKeyHash => write!(f, "Pay2PublicKeyHash"),
            ScriptType::Pay2ScriptHash => write!(f, "Pay2ScriptHash"),
            ScriptType::Pay2WitnessPublicKeyHash => write!(f, "Pay2WitnessPublicKeyHash"),
            ScriptType::Pay2WitnessScriptHash => write!(f, "Pay2WitnessScriptHash"),
            ScriptType::Pay2Taproot => write!(f, "Pay2Taproot"),
            ScriptType::WitnessProgram => write!(f, "WitnessProgram"),
            ScriptType::Unspendable => write!(f, "Unspendable"),
            ScriptType::NotRecognised => write!(f, "NotRecognised"),
        }
    }
}
