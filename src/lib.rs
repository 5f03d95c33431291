//!
//! # Introduction
//!
//! This library normalizes the block and transaction wire formats of
//! Bitcoin-like proof-of-work networks into one canonical model.
//!
//! One decoding engine serves every network. A network contributes
//! only its `NetworkParams` (magic, address version bytes, segwit
//! prefix) and a `CoinProfile` with its behavioural deltas: merged
//! mining, decimal places, fee estimation, how blocks are fetched.
//!
//! ## Merged mining
//!
//! Some networks put a parent chain proof-of-work right after the
//! header, announced by a version bit. A few historical blocks set that
//! bit without the proof; they are recognised by their parent hash.
//!
//! # Example
//!
//! ```rust
//! use altchain_parser::{AddressCodec, Coin, ParamRegistry, Script, FromHex};
//!
//! let registry = ParamRegistry::new();
//! let parser = Coin::Bitcoinvault.parser("main", &registry).unwrap();
//!
//! let script = Script::from_hex("a9140e692ebf126dc9fd945d6f90524a150d7a5921c387").unwrap();
//! let info = parser.script_to_addresses(&script);
//! assert_eq!(info.addresses, vec!["RAbPYR9GedFf56Fuyzu4cieBW5CG6Ybeoy".to_string()]);
//! ```
//!

pub(crate) mod api;
pub mod config;
pub mod networks;
pub mod params;
pub mod parser;
pub mod rpc;

#[doc(inline)]
pub use crate::api::*;
