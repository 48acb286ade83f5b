// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Scaled Fixed-Point
//!
//! A decimal value stored as a signed 64-bit integer with an implicit
//! base-10 scale factor of 1,000,000: the raw store `v` represents the
//! logical value `v / 10^6`, giving six fractional digits of resolution.
//!
//! Arithmetic is layered on the saturating operations from
//! [`arith`](crate::arith): addition and subtraction act on the raw store
//! directly, while multiplication and division rescale through a 128-bit
//! intermediate so the intermediate product can never overflow.
//!
//! Crossing the floating-point boundary goes through decimal-string
//! formatting and reparsing, never through floating-point division, so no
//! binary-fraction rounding artifact can leak into the fixed-point store.

use crate::arith::{self, Scale};
use crate::convert::NumericKernel;
use crate::error::{FormatError, RangeError};
use crate::kind::NumericKind;
use crate::wide::Wide;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

/// How a value exactly halfway between two rounding targets is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round to the nearest even neighbor (banker's rounding).
    ToEven,
    /// Round to the neighbor further from zero.
    AwayFromZero,
    /// Truncate toward zero (no midpoint: the fraction is always dropped).
    TowardZero,
}

/// A fixed-point decimal: an `i64` store scaled by 10^6.
///
/// All arithmetic saturates at the representable bounds instead of wrapping
/// or panicking, including division by zero (which follows the
/// saturating-divide convention of [`arith::div`]).
///
/// # Examples
///
/// ```rust
/// # use capstan_core::scaled::Scaled64;
/// let price: Scaled64 = "19.99".parse().unwrap();
/// let qty = Scaled64::from_int(3);
/// assert_eq!((price * qty).to_string(), "59.97");
///
/// // Parsing truncates past the sixth fractional digit; it never rounds.
/// let v: Scaled64 = "12.1234567".parse().unwrap();
/// assert_eq!(v.to_string(), "12.123456");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Scaled64 {
    raw: i64,
}

impl Scaled64 {
    /// The implicit scale factor of the raw store.
    pub const SCALE: i64 = 1_000_000;

    /// The number of fractional digits of resolution.
    pub const DECIMALS: u32 = 6;

    /// Logical zero.
    pub const ZERO: Self = Self { raw: 0 };

    /// Logical one.
    pub const ONE: Self = Self { raw: Self::SCALE };

    /// The smallest representable value (`i64::MIN / 10^6`).
    pub const MIN: Self = Self { raw: i64::MIN };

    /// The largest representable value (`i64::MAX / 10^6`).
    pub const MAX: Self = Self { raw: i64::MAX };

    /// Wraps a raw pre-scaled store without rescaling.
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Returns the raw pre-scaled store.
    pub const fn to_raw(self) -> i64 {
        self.raw
    }

    /// Converts a whole number, saturating past the representable range.
    pub const fn from_int(value: i64) -> Self {
        Self {
            raw: value.saturating_mul(Self::SCALE),
        }
    }

    /// Returns the whole part, truncating toward zero.
    pub const fn to_int(self) -> i64 {
        self.raw / Self::SCALE
    }

    /// Returns `true` if the value is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Returns `true` if the value is strictly negative.
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Rounds toward zero to a whole number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_core::scaled::Scaled64;
    /// let v: Scaled64 = "2.7".parse().unwrap();
    /// assert_eq!(v.truncate(), Scaled64::from_int(2));
    /// let v: Scaled64 = "-2.7".parse().unwrap();
    /// assert_eq!(v.truncate(), Scaled64::from_int(-2));
    /// ```
    pub const fn truncate(self) -> Self {
        Self {
            raw: (self.raw / Self::SCALE) * Self::SCALE,
        }
    }

    /// Rounds toward negative infinity to a whole number; saturates if the
    /// result is not representable.
    pub fn floor(self) -> Self {
        let fraction = self.raw.rem_euclid(Self::SCALE);
        Self {
            raw: self.raw.saturating_sub(fraction),
        }
    }

    /// Rounds toward positive infinity to a whole number; saturates if the
    /// result is not representable.
    pub fn ceiling(self) -> Self {
        let fraction = self.raw.rem_euclid(Self::SCALE);
        if fraction == 0 {
            self
        } else {
            Self {
                raw: self.raw.saturating_add(Self::SCALE - fraction),
            }
        }
    }

    /// Rounds to `digits` fractional digits using the given midpoint rule.
    ///
    /// Negative `digits` is a [`RangeError`]; `digits > 5` is a no-op
    /// because the store carries only six fractional digits of resolution.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_core::scaled::{RoundingMode, Scaled64};
    /// let v: Scaled64 = "2.5".parse().unwrap();
    /// assert_eq!(v.round(0, RoundingMode::ToEven).unwrap(), Scaled64::from_int(2));
    /// assert_eq!(v.round(0, RoundingMode::AwayFromZero).unwrap(), Scaled64::from_int(3));
    /// assert!(v.round(-1, RoundingMode::ToEven).is_err());
    /// ```
    pub fn round(self, digits: i32, mode: RoundingMode) -> Result<Self, RangeError> {
        if digits < 0 {
            return Err(RangeError {
                argument: "digits",
                value: digits as i64,
            });
        }
        if digits > 5 {
            return Ok(self);
        }
        let unit = 10i64.pow(Self::DECIMALS - digits as u32);
        let quotient = self.raw / unit;
        let remainder = self.raw % unit;
        if remainder == 0 {
            return Ok(self);
        }
        let twice = 2 * remainder.abs();
        let round_away = match mode {
            RoundingMode::TowardZero => false,
            RoundingMode::AwayFromZero => twice >= unit,
            RoundingMode::ToEven => twice > unit || (twice == unit && quotient % 2 != 0),
        };
        let adjusted = if round_away {
            quotient as i128 + remainder.signum() as i128
        } else {
            quotient as i128
        };
        let raw = (adjusted * unit as i128).clamp(i64::MIN as i128, i64::MAX as i128);
        Ok(Self { raw: raw as i64 })
    }

    /// Converts from a double by formatting it as a decimal string and
    /// reparsing, never by floating-point multiplication, so the binary
    /// fraction closest to e.g. `0.1` lands on exactly `100000` raw units.
    ///
    /// NaN converts to zero; infinities and out-of-range magnitudes
    /// saturate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_core::scaled::Scaled64;
    /// assert_eq!(Scaled64::from_f64(0.1).to_raw(), 100_000);
    /// assert_eq!(Scaled64::from_f64(f64::NAN), Scaled64::ZERO);
    /// assert_eq!(Scaled64::from_f64(f64::INFINITY), Scaled64::MAX);
    /// ```
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        if value.is_infinite() {
            return if value > 0.0 { Self::MAX } else { Self::MIN };
        }
        // Display for f64 is the shortest decimal that round-trips and
        // never uses scientific notation, so the string is always parseable
        // here; the truncating parse drops digits past the sixth.
        format!("{}", value).parse().unwrap_or(Self::ZERO)
    }

    /// Converts to a double through the decimal-string representation,
    /// the inverse boundary crossing of [`Scaled64::from_f64`].
    pub fn to_f64(self) -> f64 {
        self.to_string().parse().unwrap_or(0.0)
    }
}

impl fmt::Display for Scaled64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.raw < 0 { "-" } else { "" };
        let magnitude = self.raw.unsigned_abs();
        let whole = magnitude / Self::SCALE as u64;
        let fraction = magnitude % Self::SCALE as u64;
        if fraction == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let mut digits = format!("{:06}", fraction);
            while digits.ends_with('0') {
                digits.pop();
            }
            write!(f, "{}{}.{}", sign, whole, digits)
        }
    }
}

impl FromStr for Scaled64 {
    type Err = FormatError;

    /// Parses `[sign] digits [. digits]`.
    ///
    /// Fractional digits past the sixth are truncated, not rounded; this
    /// asymmetry is deliberate and round-trip tests depend on it.
    /// Magnitudes beyond the representable range saturate; only malformed
    /// text fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let (negative, rest) = match bytes.first() {
            Some(b'+') => (false, &bytes[1..]),
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };
        let (whole, fraction) = match rest.iter().position(|&b| b == b'.') {
            Some(dot) => (&rest[..dot], &rest[dot + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(FormatError::new(s));
        }
        if whole.iter().chain(fraction).any(|b| !b.is_ascii_digit()) {
            return Err(FormatError::new(s));
        }

        let mut whole_units: u128 = 0;
        let mut saturated = false;
        for &digit in whole {
            whole_units = whole_units * 10 + u128::from(digit - b'0');
            if whole_units > u64::MAX as u128 {
                saturated = true;
                break;
            }
        }

        let mut frac_units: u128 = 0;
        for (index, &digit) in fraction.iter().take(Self::DECIMALS as usize).enumerate() {
            let place = 10u128.pow(Self::DECIMALS - 1 - index as u32);
            frac_units += u128::from(digit - b'0') * place;
        }

        let limit = if negative {
            i64::MIN.unsigned_abs() as u128
        } else {
            i64::MAX as u128
        };
        let magnitude = if saturated {
            limit
        } else {
            (whole_units * Self::SCALE as u128 + frac_units).min(limit)
        };
        let raw = if negative {
            (-(magnitude as i128)) as i64
        } else {
            magnitude as i64
        };
        Ok(Self { raw })
    }
}

impl Add for Scaled64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_raw(arith::add(self.raw, rhs.raw))
    }
}

impl Sub for Scaled64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(arith::sub(self.raw, rhs.raw))
    }
}

impl Mul for Scaled64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(arith::scaled_mul(self.raw, rhs.raw, Scale::MICRO))
    }
}

impl Div for Scaled64 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::from_raw(arith::scaled_div(self.raw, rhs.raw, Scale::MICRO))
    }
}

impl Rem for Scaled64 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        Self::from_raw(arith::rem(self.raw, rhs.raw))
    }
}

impl Neg for Scaled64 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(self.raw.checked_neg().unwrap_or(i64::MAX))
    }
}

fn micro() -> Decimal {
    Decimal::from(Scaled64::SCALE)
}

fn decimal_to_raw(value: Decimal) -> Option<i128> {
    value.checked_mul(micro())?.trunc().to_i128()
}

impl NumericKernel for Scaled64 {
    const KIND: NumericKind = NumericKind::Scaled64;

    fn min_value() -> Self {
        Self::MIN
    }

    fn max_value() -> Self {
        Self::MAX
    }

    // The raw store at scale 6 is exactly a 96-bit decimal mantissa.
    fn to_wide(self) -> Wide {
        Wide::Decimal(Decimal::from_i128_with_scale(
            self.raw as i128,
            Self::DECIMALS,
        ))
    }

    // No native reinterpretation cast exists for the fixed-point kind, so
    // the default policy saturates like the clamped one.
    fn from_wide_default(wide: Wide) -> Self {
        Self::from_wide_clamped(wide)
    }

    fn from_wide_clamped(wide: Wide) -> Self {
        match wide {
            Wide::Int(v) => {
                let raw = (v * Self::SCALE as i128).clamp(i64::MIN as i128, i64::MAX as i128);
                Self::from_raw(raw as i64)
            }
            Wide::Float(v) => Self::from_f64(v),
            Wide::Decimal(v) => match decimal_to_raw(v) {
                Some(raw) => {
                    Self::from_raw(raw.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
                }
                None if v.is_sign_negative() => Self::MIN,
                None => Self::MAX,
            },
        }
    }

    fn wide_in_range(wide: Wide) -> bool {
        let fits = |raw: i128| raw >= i64::MIN as i128 && raw <= i64::MAX as i128;
        match wide {
            Wide::Int(v) => fits(v * Self::SCALE as i128),
            Wide::Float(v) => {
                v.is_finite()
                    && Decimal::from_f64(v)
                        .and_then(decimal_to_raw)
                        .is_some_and(fits)
            }
            Wide::Decimal(v) => decimal_to_raw(v).is_some_and(fits),
        }
    }
}
