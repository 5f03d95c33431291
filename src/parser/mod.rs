//!
//! This module defines how to parse raw block bytes into the canonical
//! structs defined in proto.
//!

/// Base58Check / Bech32 addresses driven by network parameters
pub mod address;

/// integer base units to and from decimal strings
pub mod amount;

/// merged-mining version bit and its historical exceptions
pub mod auxpow;

/// raw block decoding
pub mod block;

/// storage codec contract
pub mod pack;

/// define binary readers
pub mod reader;

/// script classification, multi-sig pattern recognition and null-data rendering
pub mod script;

/// canonical blockchain data representation
pub mod proto;

/// error handling
pub mod errors;
