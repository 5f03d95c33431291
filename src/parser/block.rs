use crate::params::NetworkParams;
use crate::parser::auxpow::AuxPowRules;
use crate::parser::errors::OpResult;
use crate::parser::proto::canonical::{Block, BlockHeader, Tx};
use crate::parser::reader::BlockchainRead;
use bitcoin_hashes::hex::ToHex;
use log::debug;
use std::io::Cursor;

///
/// Decode one serialized block into the canonical model.
///
/// With `aux_pow` rules, a header whose version carries the merged-mining
/// bit is followed by a parent chain proof that gets skipped, unless the
/// header's parent is listed as an exception. Without rules the
/// transaction list always starts right after the header.
///
/// Either the whole block decodes or an error is returned.
///
pub fn decode_block(
    raw: &[u8],
    params: &NetworkParams,
    aux_pow: Option<&AuxPowRules>,
) -> OpResult<Block> {
    let mut r = Cursor::new(raw);
    let header = r.read_block_header()?;

    if let Some(rules) = aux_pow {
        if rules.carries_auxpow(header.version, &header.prev_blockhash) {
            let start = r.position();
            r.skip_auxpow()?;
            debug!(
                "skipped {} bytes of auxpow after header {}",
                r.position() - start,
                header.block_hash().to_hex()
            );
        } else if rules.has_aux_flag(header.version) {
            debug!(
                "auxpow bit ignored for child of {}",
                header.prev_blockhash.to_hex()
            );
        }
    }

    let txs = r
        .read_transactions()?
        .into_iter()
        .map(|tx| Tx::parse(tx, params))
        .collect();

    Ok(Block {
        header: BlockHeader {
            hash: header.block_hash().to_hex(),
            prev: header.prev_blockhash.to_hex(),
            height: 0,
            size: raw.len(),
            time: header.time as i64,
        },
        txs,
    })
}
