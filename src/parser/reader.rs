use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use bitcoin::consensus::encode::{self, VarInt};
use bitcoin::consensus::Decodable;
use bitcoin::{BlockHeader, Transaction};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor};

/// serialized size of a native block header
pub const BLOCK_HEADER_SIZE: u64 = 80;

const HASH_SIZE: u64 = 32;

/// smallest serialized transaction, used to bound preallocation
const MIN_TX_SIZE: u64 = 60;

///
/// Linear reader over a serialized block.
///
/// Every method advances the same cursor, so the order of calls
/// mirrors the order of fields on the wire.
///
pub trait BlockchainRead: std::io::Read {
    /// bytes left between the cursor and the end of the buffer
    fn bytes_left(&self) -> u64;

    /// advance the cursor, failing if it would pass the end of the buffer
    fn skip_bytes(&mut self, n: u64) -> OpResult<()>;

    #[inline]
    fn read_u32_le(&mut self) -> OpResult<u32> {
        let u = ReadBytesExt::read_u32::<LittleEndian>(self)?;
        Ok(u)
    }

    /// Bitcoin `CompactSize` integer
    #[inline]
    fn read_compact_size(&mut self) -> OpResult<u64> {
        Ok(VarInt::consensus_decode(self)?.0)
    }

    #[inline]
    fn read_block_header(&mut self) -> OpResult<BlockHeader> {
        if self.bytes_left() < BLOCK_HEADER_SIZE {
            return Err(OpError::new(OpErrorKind::TruncatedHeader).join_msg(&format!(
                "need {} bytes, {} left",
                BLOCK_HEADER_SIZE,
                self.bytes_left()
            )));
        }
        Ok(BlockHeader::consensus_decode(self)?)
    }

    ///
    /// Skip the merged-mining proof that follows a flagged header.
    ///
    /// Layout: parent coinbase transaction, parent block hash,
    /// coinbase merkle branch, chain merkle branch, parent header.
    /// Nothing is validated or kept.
    ///
    fn skip_auxpow(&mut self) -> OpResult<()> {
        let skipped = (|| -> OpResult<()> {
            Transaction::consensus_decode(&mut *self)?;
            self.skip_bytes(HASH_SIZE)?;
            self.skip_merkle_branch()?;
            self.skip_merkle_branch()?;
            self.skip_bytes(BLOCK_HEADER_SIZE)
        })();
        skipped.map_err(|e| {
            OpError::new(OpErrorKind::MalformedAuxPow).join_msg(&e.to_string())
        })
    }

    /// hash count, hashes, then the 4 byte side mask
    #[inline]
    fn skip_merkle_branch(&mut self) -> OpResult<()> {
        let count = self.read_compact_size()?;
        let len = count
            .checked_mul(HASH_SIZE)
            .ok_or_else(|| OpError::from("merkle branch length overflow"))?;
        self.skip_bytes(len)?;
        self.read_u32_le()?;
        Ok(())
    }

    ///
    /// Read the length-prefixed transaction list, witness data included.
    ///
    fn read_transactions(&mut self) -> OpResult<Vec<Transaction>> {
        let count = self.read_compact_size().map_err(truncated_list)?;
        if count > self.bytes_left() {
            return Err(
                OpError::new(OpErrorKind::TruncatedTransactionList).join_msg(&format!(
                    "{} transactions declared, {} bytes left",
                    count,
                    self.bytes_left()
                )),
            );
        }
        let mut txs = Vec::with_capacity(count.min(self.bytes_left() / MIN_TX_SIZE) as usize);
        for i in 0..count {
            match Transaction::consensus_decode(&mut *self) {
                Ok(tx) => txs.push(tx),
                // a cut-short length prefix may claim more than the decoder will allocate
                Err(ref e) if is_truncation(e) => {
                    return Err(OpError::new(OpErrorKind::TruncatedTransactionList)
                        .join_msg(&format!("transaction {} of {} cut short", i, count))
                        .join_msg(&e.to_string()));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(txs)
    }
}

fn is_truncation(e: &encode::Error) -> bool {
    match e {
        encode::Error::Io(io_err) => io_err.kind() == io::ErrorKind::UnexpectedEof,
        encode::Error::OversizedVectorAllocation { .. } => true,
        _ => false,
    }
}

fn truncated_list(e: OpError) -> OpError {
    OpError::new(OpErrorKind::TruncatedTransactionList).join_msg(e.message())
}

fn skip_cursor<T: AsRef<[u8]>>(c: &mut Cursor<T>, n: u64) -> OpResult<()> {
    let len = c.get_ref().as_ref().len() as u64;
    match c.position().checked_add(n) {
        Some(end) if end <= len => {
            c.set_position(end);
            Ok(())
        }
        _ => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("cannot skip {} bytes at offset {}", n, c.position()),
        )
        .into()),
    }
}

fn remaining_cursor<T: AsRef<[u8]>>(c: &Cursor<T>) -> u64 {
    (c.get_ref().as_ref().len() as u64).saturating_sub(c.position())
}

impl BlockchainRead for Cursor<&[u8]> {
    fn bytes_left(&self) -> u64 {
        remaining_cursor(self)
    }

    fn skip_bytes(&mut self, n: u64) -> OpResult<()> {
        skip_cursor(self, n)
    }
}
