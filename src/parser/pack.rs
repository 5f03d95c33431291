use crate::parser::amount::AmountFormat;
use crate::parser::errors::OpResult;
use crate::parser::proto::canonical::Tx;

///
/// Compact storage codec for canonical transactions.
///
/// The byte layout belongs to the implementor. Adapters only supply
/// the coin's `AmountFormat`, which the codec needs to interpret
/// monetary fields.
///
pub trait TxPacker: Send + Sync {
    fn pack_tx(
        &self,
        tx: &Tx,
        height: u32,
        block_time: i64,
        amounts: &AmountFormat,
    ) -> OpResult<Vec<u8>>;

    /// returns the transaction and the height it was packed with
    fn unpack_tx(&self, buf: &[u8], amounts: &AmountFormat) -> OpResult<(Tx, u32)>;
}
