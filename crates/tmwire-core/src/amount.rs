//! Fixed-point coin amounts.
//!
//! On-chain amounts are integers counted in the smallest indivisible unit,
//! while humans write token amounts as decimal strings. [`DECIMALS`] fixes the
//! scaling between the two at 10^5. Conversions are exact: parsing scales with
//! integer arithmetic only (never binary floating point) and rounds half away
//! from zero on the digit past the fifth fractional place; formatting is the
//! minimal inverse, so every representable coin round-trips losslessly.

use num_bigint::BigInt;
use std::fmt;
use thiserror::Error;

/// Scaling factor between one token and the smallest on-chain unit.
pub const DECIMALS: i64 = 100_000;

/// Largest whole-token value accepted by [`Coin::from_decimal_str`].
pub const UPPER_BOUND: i64 = i64::MAX / DECIMALS;

/// Fractional digits accepted before input counts as malformed.
const MAX_PRECISION: usize = 18;

/// Errors from decimal amount conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid decimal amount: {0}")]
    InvalidAmount(String),

    #[error("amount exceeds {UPPER_BOUND} tokens")]
    Overflow,

    #[error("amount is below the smallest representable unit")]
    Underflow,
}

/// An on-chain token amount in the smallest indivisible unit.
///
/// Values produced by [`Coin::from_decimal_str`] are always positive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Coin {
    amount: BigInt,
}

impl Coin {
    pub fn new(amount: BigInt) -> Self {
        Self { amount }
    }

    /// Coin holding `units` smallest on-chain units.
    pub fn from_units(units: i64) -> Self {
        Self {
            amount: BigInt::from(units),
        }
    }

    /// Raw amount in smallest on-chain units.
    pub fn amount(&self) -> &BigInt {
        &self.amount
    }

    /// Parse a human decimal token amount into a coin.
    ///
    /// The value must lie in `[1/DECIMALS, UPPER_BOUND]`; zero and negative
    /// amounts report [`AmountError::Underflow`]. Digits past the fifth
    /// fractional place are rounded half away from zero.
    pub fn from_decimal_str(s: &str) -> Result<Self, AmountError> {
        let invalid = || AmountError::InvalidAmount(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(invalid());
                }
                (int_part, frac_part)
            }
            None => (body, ""),
        };

        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_part.len() > MAX_PRECISION {
            return Err(invalid());
        }
        if negative {
            return Err(AmountError::Underflow);
        }

        // Bounds are checked against the unscaled value, before rounding.
        let int_value = BigInt::parse_bytes(int_part.as_bytes(), 10).ok_or_else(invalid)?;
        let frac_nonzero = frac_part.bytes().any(|b| b != b'0');
        let upper = BigInt::from(UPPER_BOUND);
        if int_value > upper || (int_value == upper && frac_nonzero) {
            return Err(AmountError::Overflow);
        }
        let below_one_unit = int_part.bytes().all(|b| b == b'0')
            && frac_part.bytes().take(5).all(|b| b == b'0');
        if below_one_unit {
            return Err(AmountError::Underflow);
        }

        // scaled = digits * 10^5 / 10^(frac len), exact on the digit string.
        let mut scaled = String::with_capacity(int_part.len() + 5);
        scaled.push_str(int_part);
        let amount = if frac_part.len() <= 5 {
            scaled.push_str(frac_part);
            scaled.push_str(&"0".repeat(5 - frac_part.len()));
            BigInt::parse_bytes(scaled.as_bytes(), 10).ok_or_else(invalid)?
        } else {
            let (kept, dropped) = frac_part.split_at(5);
            scaled.push_str(kept);
            let truncated = BigInt::parse_bytes(scaled.as_bytes(), 10).ok_or_else(invalid)?;
            if dropped.as_bytes()[0] >= b'5' {
                truncated + 1
            } else {
                truncated
            }
        };

        Ok(Self { amount })
    }

    /// Minimal decimal representation: no trailing fractional zeros, no dot
    /// for whole-token amounts. Exact inverse of [`Coin::from_decimal_str`]
    /// for every value it produces.
    pub fn to_decimal_str(&self) -> String {
        let zero = BigInt::from(0);
        let (sign, magnitude) = if self.amount < zero {
            ("-", -self.amount.clone())
        } else {
            ("", self.amount.clone())
        };

        let scale = BigInt::from(DECIMALS);
        let whole = &magnitude / &scale;
        let frac = &magnitude % &scale;
        if frac == zero {
            format!("{sign}{whole}")
        } else {
            let frac = format!("{:0>5}", frac.to_string());
            format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_conversions() {
        let cases = [
            ("123", "12300000"),
            ("100.00023", "10000023"),
            ("1230", "123000000"),
            ("12.3", "1230000"),
            ("0.123", "12300"),
            ("0.00123", "123"),
            ("100082.92819", "10008292819"),
        ];
        for (input, units) in cases {
            let coin = Coin::from_decimal_str(input).unwrap();
            assert_eq!(coin.amount().to_string(), units, "units for {input}");
            assert_eq!(coin.to_decimal_str(), input, "round trip for {input}");
        }
    }

    #[test]
    fn test_smallest_unit_parses() {
        let coin = Coin::from_decimal_str("0.00001").unwrap();
        assert_eq!(coin, Coin::from_units(1));
        assert_eq!(coin.to_decimal_str(), "0.00001");
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let coin = Coin::from_decimal_str("92233720368547").unwrap();
        assert_eq!(coin.amount().to_string(), "9223372036854700000");
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            Coin::from_decimal_str("92233720368548"),
            Err(AmountError::Overflow)
        );
        assert_eq!(
            Coin::from_decimal_str("92233720368547.5"),
            Err(AmountError::Overflow)
        );
        assert_eq!(
            Coin::from_decimal_str("999999999999999999999999"),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_underflow() {
        assert_eq!(Coin::from_decimal_str("0"), Err(AmountError::Underflow));
        assert_eq!(Coin::from_decimal_str("0.0"), Err(AmountError::Underflow));
        assert_eq!(
            Coin::from_decimal_str("0.000001"),
            Err(AmountError::Underflow)
        );
        assert_eq!(Coin::from_decimal_str("-1"), Err(AmountError::Underflow));
        assert_eq!(
            Coin::from_decimal_str("-0.5"),
            Err(AmountError::Underflow)
        );
    }

    #[test]
    fn test_malformed_input() {
        for bad in ["", ".", "abc", "1.2.3", "1.", ".5", "12a", "1,5", "+1", "-"] {
            assert!(
                matches!(
                    Coin::from_decimal_str(bad),
                    Err(AmountError::InvalidAmount(_))
                ),
                "expected invalid for {bad:?}"
            );
        }
        // 19 fractional digits exceeds the precision cap
        assert!(matches!(
            Coin::from_decimal_str("1.0000000000000000001"),
            Err(AmountError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rounding_past_fifth_fractional_digit() {
        // half and above rounds away from zero, below half truncates
        assert_eq!(
            Coin::from_decimal_str("0.000015").unwrap(),
            Coin::from_units(2)
        );
        assert_eq!(
            Coin::from_decimal_str("0.000014").unwrap(),
            Coin::from_units(1)
        );
        assert_eq!(
            Coin::from_decimal_str("1.000001").unwrap(),
            Coin::from_units(100_000)
        );
        assert_eq!(
            Coin::from_decimal_str("1.0000051").unwrap(),
            Coin::from_units(100_001)
        );
    }

    #[test]
    fn test_leading_zeros_accepted() {
        assert_eq!(
            Coin::from_decimal_str("007").unwrap(),
            Coin::from_units(700_000)
        );
        assert_eq!(
            Coin::from_decimal_str("00.12300").unwrap(),
            Coin::from_units(12_300)
        );
    }

    proptest! {
        #[test]
        fn decimal_round_trip(units in 1i64..=9_223_372_036_854_700_000) {
            let coin = Coin::from_units(units);
            let parsed = Coin::from_decimal_str(&coin.to_decimal_str()).unwrap();
            prop_assert_eq!(parsed, coin);
        }
    }
}
