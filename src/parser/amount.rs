use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use num_bigint::BigUint;
use num_traits::{pow, Zero};
use serde::{Deserialize, Serialize};

/// decimal places of a Bitcoin amount
pub const DEFAULT_DECIMAL_POINT: u32 = 8;

///
/// Converts between integer base units and decimal strings
/// for a coin with `decimal_point` fractional digits.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub decimal_point: u32,
}

impl Default for AmountFormat {
    fn default() -> Self {
        AmountFormat {
            decimal_point: DEFAULT_DECIMAL_POINT,
        }
    }
}

impl AmountFormat {
    pub fn new(decimal_point: u32) -> AmountFormat {
        AmountFormat { decimal_point }
    }

    fn unit(&self) -> BigUint {
        pow(BigUint::from(10u32), self.decimal_point as usize)
    }

    ///
    /// `123450000` with 8 decimals renders as `1.2345`.
    /// Trailing fractional zeros are dropped.
    ///
    pub fn to_decimal_string(&self, amount: &BigUint) -> String {
        let unit = self.unit();
        let whole = amount / &unit;
        let frac = amount % &unit;
        if frac.is_zero() {
            return whole.to_string();
        }
        let frac = format!("{:0>width$}", frac.to_string(), width = self.decimal_point as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }

    ///
    /// Parse a non-negative decimal string into base units.
    ///
    pub fn parse_decimal(&self, s: &str) -> OpResult<BigUint> {
        let s = s.trim();
        let (whole, frac) = match s.find('.') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid_amount(s, "empty"));
        }
        if !whole.bytes().all(|c| c.is_ascii_digit()) || !frac.bytes().all(|c| c.is_ascii_digit())
        {
            return Err(invalid_amount(s, "not a decimal number"));
        }
        if frac.len() > self.decimal_point as usize {
            return Err(invalid_amount(
                s,
                &format!("more than {} decimal places", self.decimal_point),
            ));
        }
        let digits = format!(
            "{}{}{}",
            whole,
            frac,
            "0".repeat(self.decimal_point as usize - frac.len())
        );
        BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| invalid_amount(s, "overflow"))
    }
}

fn invalid_amount(s: &str, why: &str) -> OpError {
    OpError::new(OpErrorKind::InvalidAmount).join_msg(&format!("{:?}: {}", s, why))
}
