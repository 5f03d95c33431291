use bitcoin::BlockHash;
use bitcoin_hashes::hex::ToHex;

/// version bit announcing a merged-mining proof after the header
pub const AUX_POW_VERSION_MASK: i32 = 1 << 8;

///
/// Parent hashes of blocks that set the merged-mining version bit
/// without carrying the proof.
///
/// Keys are the *previous* block hash of the offending block, rendered
/// as the usual byte-reversed hex string.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxPowExceptions {
    parents: &'static [&'static str],
}

impl AuxPowExceptions {
    pub const fn new(parents: &'static [&'static str]) -> AuxPowExceptions {
        AuxPowExceptions { parents }
    }

    pub const fn empty() -> AuxPowExceptions {
        AuxPowExceptions { parents: &[] }
    }

    #[inline]
    pub fn contains(&self, prev_blockhash: &BlockHash) -> bool {
        self.contains_hex(&prev_blockhash.to_hex())
    }

    #[inline]
    pub fn contains_hex(&self, hash: &str) -> bool {
        self.parents.iter().any(|p| *p == hash)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

///
/// Merged-mining behaviour of a network.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxPowRules {
    pub version_mask: i32,
    pub exceptions: AuxPowExceptions,
}

impl AuxPowRules {
    pub const fn new(exceptions: AuxPowExceptions) -> AuxPowRules {
        AuxPowRules {
            version_mask: AUX_POW_VERSION_MASK,
            exceptions,
        }
    }

    #[inline]
    pub fn has_aux_flag(&self, version: i32) -> bool {
        version & self.version_mask != 0
    }

    ///
    /// Whether a header with this version and parent is followed
    /// by an embedded proof.
    ///
    pub fn carries_auxpow(&self, version: i32, prev_blockhash: &BlockHash) -> bool {
        self.has_aux_flag(version) && !self.exceptions.contains(prev_blockhash)
    }
}
