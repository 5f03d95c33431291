use std::error::Error;
use std::fmt;
use std::io;

pub type OpResult<T> = Result<T, OpError>;

///
/// Error kinds raised while decoding blocks, addresses and amounts.
///
/// None of these are retried internally. A failed call never
/// yields a partially decoded value.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpErrorKind {
    /// fewer bytes than a fixed-size block header
    TruncatedHeader,
    /// the embedded auxiliary proof-of-work could not be skipped
    MalformedAuxPow,
    /// declared transaction count or a transaction runs past the buffer
    TruncatedTransactionList,
    InvalidAddressFormat,
    /// a different parameter set is registered under the same network magic
    AlreadyRegisteredConflict,
    TxNotFound,
    InvalidAmount,
    UnknownCoin,
    IoError,
    BitcoinError,
    SerdeError,
    RuntimeError,
}

#[derive(Debug)]
pub struct OpError {
    kind: OpErrorKind,
    message: String,
}

impl OpError {
    pub fn new(kind: OpErrorKind) -> Self {
        OpError {
            kind,
            message: String::new(),
        }
    }

    /// append a message to this error
    pub fn join_msg(mut self, msg: &str) -> Self {
        if !self.message.is_empty() {
            self.message.push_str("; ");
        }
        self.message.push_str(msg);
        self
    }

    #[inline]
    pub fn kind(&self) -> OpErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OpErrorKind::TruncatedHeader => write!(f, "truncated block header"),
            OpErrorKind::MalformedAuxPow => write!(f, "malformed auxpow"),
            OpErrorKind::TruncatedTransactionList => write!(f, "truncated transaction list"),
            OpErrorKind::InvalidAddressFormat => write!(f, "invalid address format"),
            OpErrorKind::AlreadyRegisteredConflict => {
                write!(f, "conflicting network already registered")
            }
            OpErrorKind::TxNotFound => write!(f, "transaction not found"),
            OpErrorKind::InvalidAmount => write!(f, "invalid amount"),
            OpErrorKind::UnknownCoin => write!(f, "unknown coin"),
            OpErrorKind::IoError => write!(f, "io error"),
            OpErrorKind::BitcoinError => write!(f, "bitcoin error"),
            OpErrorKind::SerdeError => write!(f, "serde error"),
            OpErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl Error for OpError {}

impl From<&str> for OpError {
    fn from(msg: &str) -> Self {
        OpError::new(OpErrorKind::RuntimeError).join_msg(msg)
    }
}

impl From<String> for OpError {
    fn from(msg: String) -> Self {
        OpError::from(msg.as_str())
    }
}

impl From<io::Error> for OpError {
    fn from(err: io::Error) -> Self {
        OpError::new(OpErrorKind::IoError).join_msg(&err.to_string())
    }
}

impl From<bitcoin::consensus::encode::Error> for OpError {
    fn from(err: bitcoin::consensus::encode::Error) -> Self {
        OpError::new(OpErrorKind::BitcoinError).join_msg(&err.to_string())
    }
}

impl From<bitcoin::util::base58::Error> for OpError {
    fn from(err: bitcoin::util::base58::Error) -> Self {
        OpError::new(OpErrorKind::InvalidAddressFormat).join_msg(&err.to_string())
    }
}

impl From<bitcoin::bech32::Error> for OpError {
    fn from(err: bitcoin::bech32::Error) -> Self {
        OpError::new(OpErrorKind::InvalidAddressFormat).join_msg(&err.to_string())
    }
}

impl From<bitcoin_hashes::hex::Error> for OpError {
    fn from(err: bitcoin_hashes::hex::Error) -> Self {
        OpError::new(OpErrorKind::RuntimeError).join_msg(&err.to_string())
    }
}

impl From<serde_json::Error> for OpError {
    fn from(err: serde_json::Error) -> Self {
        OpError::new(OpErrorKind::SerdeError).join_msg(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_msg() {
        let err = OpError::new(OpErrorKind::MalformedAuxPow)
            .join_msg("coinbase branch")
            .join_msg("unexpected eof");
        assert_eq!(err.kind(), OpErrorKind::MalformedAuxPow);
        assert_eq!(
            err.to_string(),
            "malformed auxpow: coinbase branch; unexpected eof"
        );
    }

    #[test]
    fn test_from_str_is_runtime_error() {
        let err = OpError::from("height not found");
        assert_eq!(err.kind(), OpErrorKind::RuntimeError);
        assert_eq!(err.message(), "height not found");
    }
}
