use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional decimal digits an [`Amount`] keeps.
pub const AMOUNT_DECIMALS: u32 = 6;

const SCALE: i64 = 10_i64.pow(AMOUNT_DECIMALS);

/// Fifteen significant digits, the most a JSON float carries exactly.
const MAX_MICROS: i64 = 999_999_999_999_999;

/// A monetary or chip quantity stored as a fixed-point decimal.
///
/// Hand histories carry blinds, stacks, bets and pot sizes as plain JSON
/// numbers. `Amount` keeps an integer count of micro-units instead of a
/// float, so pot arithmetic is exact and equality is meaningful.
///
/// On the wire an `Amount` is a JSON number. Decoding rounds to the nearest
/// micro-unit and also accepts numeric strings, which some producers emit.
/// Magnitudes are limited to [`Amount::MAX`] so every value survives a trip
/// through a JSON float unchanged.
///
/// ```
/// use standardized_hand_history::core::Amount;
///
/// let sb = Amount::from_f64(0.1).unwrap();
/// let bb = Amount::from_f64(0.2).unwrap();
/// assert_eq!(sb + bb, "0.3".parse::<Amount>().unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AmountError {
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount is out of range")]
    OutOfRange,
    #[error("invalid decimal literal: {0:?}")]
    InvalidLiteral(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);
    /// 999999999.999999
    pub const MAX: Amount = Amount(MAX_MICROS);
    pub const MIN: Amount = Amount(-MAX_MICROS);

    /// Build an amount from a count of micro-units (millionths).
    pub fn from_micros(micros: i64) -> Result<Self, AmountError> {
        if (-MAX_MICROS..=MAX_MICROS).contains(&micros) {
            Ok(Amount(micros))
        } else {
            Err(AmountError::OutOfRange)
        }
    }

    /// Build an amount from a whole number of units.
    pub fn from_units(units: i64) -> Result<Self, AmountError> {
        units
            .checked_mul(SCALE)
            .ok_or(AmountError::OutOfRange)
            .and_then(Self::from_micros)
    }

    /// Build an amount from hundredths of a unit. Every `i32` is in range.
    pub const fn from_cents(cents: i32) -> Self {
        Amount(cents as i64 * (SCALE / 100))
    }

    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Convert from a float, rounding to the nearest micro-unit.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        // Display gives the shortest decimal that reads back as `value`,
        // never in exponent form, so parsing it is exact.
        value.to_string().parse()
    }

    /// The nearest float. Used for encoding and for display math only.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs_diff(self, other: Amount) -> Amount {
        Amount::clamped(self.0 - other.0).abs()
    }

    pub fn abs(self) -> Amount {
        Amount(self.0.abs())
    }

    /// Treat zero as "not applicable".
    ///
    /// Optional amounts such as the ante or a bet cap use absent, `null` and
    /// `0` interchangeably; `None` is the single in-memory spelling.
    pub fn non_zero(value: Option<Amount>) -> Option<Amount> {
        value.filter(|amount| !amount.is_zero())
    }

    fn clamped(micros: i64) -> Amount {
        Amount(micros.clamp(-MAX_MICROS, MAX_MICROS))
    }
}

// Two in-range values never overflow `i64`; results saturate at the limits.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::clamped(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::clamped(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / SCALE as u64;
        let frac = magnitude % SCALE as u64;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{frac:0width$}", width = AMOUNT_DECIMALS as usize);
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse a plain decimal literal such as `"12"`, `"-0.5"` or `"1.25"`.
    ///
    /// Digits past the sixth decimal place are rounded half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::InvalidLiteral(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::OutOfRange)?
        };
        let mut frac_value: i64 = 0;
        for (idx, digit) in frac.bytes().take(AMOUNT_DECIMALS as usize).enumerate() {
            let place = 10_i64.pow(AMOUNT_DECIMALS - 1 - idx as u32);
            frac_value += i64::from(digit - b'0') * place;
        }
        if let Some(next) = frac.bytes().nth(AMOUNT_DECIMALS as usize) {
            if next >= b'5' {
                frac_value += 1;
            }
        }

        let micros = whole_value
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_value))
            .ok_or(AmountError::OutOfRange)?;
        Amount::from_micros(if negative { -micros } else { micros })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % SCALE == 0 {
            serializer.serialize_i64(self.0 / SCALE)
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Amount::from_units(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .map_err(|_| AmountError::OutOfRange)
            .and_then(Amount::from_units)
            .map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
