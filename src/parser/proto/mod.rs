//!
//! ## Canonical Block Types
//!
//! Every network decodes into the same `Block` / `Tx` model, so the
//! indexing pipeline never sees chain specific wire types.
//!
//! - values are `BigUint`, never truncated to 64 bits
//! - output addresses are rendered with the active `NetworkParams`
//!

/// network independent block, transaction, input and output
pub mod canonical;
