//!
//! Canonical block model shared by every network adapter
//!

use crate::params::NetworkParams;
use crate::parser::script::{evaluate_script, ScriptType};
use bitcoin_hashes::hex::ToHex;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub header: BlockHeader,
    pub txs: Vec<Tx>,
}

///
/// `size` is the length of the buffer the block was decoded from,
/// framing included.
///
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct BlockHeader {
    pub hash: String,
    pub prev: String,
    pub height: u32,
    pub size: usize,
    pub time: i64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Tx {
    pub txid: String,
    pub version: i32,
    pub lock_time: u32,
    /// List of inputs
    pub vin: Vec<Vin>,
    /// List of outputs
    pub vout: Vec<Vout>,
}

impl Tx {
    /// obtain addresses for each output
    pub fn parse(tx: bitcoin::Transaction, params: &NetworkParams) -> Tx {
        Tx {
            txid: tx.txid().to_hex(),
            version: tx.version,
            lock_time: tx.lock_time,
            vin: tx.input.into_iter().map(Vin::parse).collect(),
            vout: tx
                .output
                .into_iter()
                .enumerate()
                .map(|(n, out)| Vout::parse(out, n as u32, params))
                .collect(),
        }
    }
}

///
/// Coinbase inputs carry their script in `coinbase` and leave
/// the outpoint fields empty.
///
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Vin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    pub txid: String,
    pub vout: u32,
    pub script_sig: String,
    pub sequence: u32,
}

impl Vin {
    fn parse(tx_in: bitcoin::TxIn) -> Vin {
        if tx_in.previous_output.is_null() {
            Vin {
                coinbase: Some(tx_in.script_sig.to_hex()),
                txid: String::new(),
                vout: 0,
                script_sig: String::new(),
                sequence: tx_in.sequence,
            }
        } else {
            Vin {
                coinbase: None,
                txid: tx_in.previous_output.txid.to_hex(),
                vout: tx_in.previous_output.vout,
                script_sig: tx_in.script_sig.to_hex(),
                sequence: tx_in.sequence,
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Vout {
    pub value_sat: BigUint,
    pub n: u32,
    pub script_pubkey: ScriptPubKey,
}

impl Vout {
    pub fn parse(out: bitcoin::TxOut, n: u32, params: &NetworkParams) -> Vout {
        Vout {
            value_sat: BigUint::from(out.value),
            n,
            script_pubkey: ScriptPubKey::parse(&out.script_pubkey, params),
        }
    }
}

///
/// Locking script with its decoded addresses.
///
/// `resolved` tells decoded addresses apart from outputs that could
/// only be described, e.g. `OP_RETURN (text)` in `annotation`.
///
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ScriptPubKey {
    pub hex: String,
    pub script_type: ScriptType,
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub resolved: bool,
}

impl ScriptPubKey {
    pub fn parse(script: &bitcoin::Script, params: &NetworkParams) -> ScriptPubKey {
        let eval = evaluate_script(script, params);
        ScriptPubKey {
            hex: script.to_hex(),
            script_type: eval.pattern,
            addresses: eval.addresses,
            annotation: eval.annotation,
            resolved: eval.resolved,
        }
    }
}
