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

//! # Wide Intermediate
//!
//! The canonical wide representation every conversion and arithmetic
//! operation passes through. Instead of a literal N-by-N conversion matrix
//! over the twelve numeric kinds, each kind widens into [`Wide`] and narrows
//! back out, collapsing the combinatorial surface to one leg per kind.
//!
//! `Int(i128)` holds every integer kind exactly (operands are at most 64
//! bits wide, so sums and differences cannot overflow the intermediate).
//! `Float(f64)` is both the float representation and the fallback when an
//! `i128` product would overflow. `Decimal(..)` carries the 96-bit decimal
//! kind and the exact form of the 10^-6 fixed-point kind.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

/// The canonical wide intermediate for conversions and arithmetic.
///
/// Arithmetic on `Wide` saturates at the intermediate's own bounds in the
/// rare cases the intermediate cannot hold the true result (an `i128`
/// product of two 64-bit operands, or a decimal operation past the 96-bit
/// mantissa). Narrowing back to a concrete kind clamps again at that kind's
/// bounds, so intermediate saturation is never observable below 64 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wide {
    /// Exact integer form; holds every integer kind's full range.
    Int(i128),
    /// Floating-point form; also the overflow fallback for `Int` products.
    Float(f64),
    /// 96-bit decimal form; also the exact form of the fixed-point kind.
    Decimal(Decimal),
}

impl Wide {
    /// Returns `true` if the value is zero (including negative float zero).
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Float(v) => v == 0.0,
            Self::Decimal(v) => v.is_zero(),
        }
    }

    /// Returns the sign of the value: `1`, `-1`, or `0` (NaN counts as `0`).
    pub fn signum(self) -> i32 {
        match self {
            Self::Int(v) => v.signum() as i32,
            Self::Float(v) => {
                if v > 0.0 {
                    1
                } else if v < 0.0 {
                    -1
                } else {
                    0
                }
            }
            Self::Decimal(v) => {
                if v.is_zero() {
                    0
                } else if v.is_sign_negative() {
                    -1
                } else {
                    1
                }
            }
        }
    }

    /// Converts the value to `f64`, losing precision where `f64` cannot
    /// represent it exactly.
    pub fn to_f64_lossy(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
            Self::Decimal(v) => v.to_f64().unwrap_or(0.0),
        }
    }

    /// Saturating wide addition.
    pub fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => match a.checked_add(b) {
                Some(v) => Self::Int(v),
                None => Self::Float(a as f64 + b as f64),
            },
            (Self::Decimal(a), Self::Decimal(b)) => match a.checked_add(b) {
                Some(v) => Self::Decimal(v),
                None => Self::Decimal(saturated_decimal(a.is_sign_negative())),
            },
            (a, b) => Self::Float(a.to_f64_lossy() + b.to_f64_lossy()),
        }
    }

    /// Saturating wide subtraction.
    pub fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => match a.checked_sub(b) {
                Some(v) => Self::Int(v),
                None => Self::Float(a as f64 - b as f64),
            },
            (Self::Decimal(a), Self::Decimal(b)) => match a.checked_sub(b) {
                Some(v) => Self::Decimal(v),
                None => Self::Decimal(saturated_decimal(a.is_sign_negative())),
            },
            (a, b) => Self::Float(a.to_f64_lossy() - b.to_f64_lossy()),
        }
    }

    /// Saturating wide multiplication.
    ///
    /// An `i128` product of two 64-bit operands can overflow only when both
    /// operands are near `u64::MAX`; that case falls back to `f64`, which is
    /// already far outside every narrow kind's range, so the eventual clamp
    /// is unaffected by the lost precision.
    pub fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => match a.checked_mul(b) {
                Some(v) => Self::Int(v),
                None => Self::Float(a as f64 * b as f64),
            },
            (Self::Decimal(a), Self::Decimal(b)) => match a.checked_mul(b) {
                Some(v) => Self::Decimal(v),
                None => Self::Decimal(saturated_decimal(
                    a.is_sign_negative() != b.is_sign_negative(),
                )),
            },
            (a, b) => Self::Float(a.to_f64_lossy() * b.to_f64_lossy()),
        }
    }

    /// Saturating wide division.
    ///
    /// The divisor must be non-zero; callers resolve zero divisors with the
    /// saturating-divide convention before reaching this point.
    pub fn div(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => match a.checked_div(b) {
                Some(v) => Self::Int(v),
                None => Self::Float(a as f64 / b as f64),
            },
            (Self::Decimal(a), Self::Decimal(b)) => match a.checked_div(b) {
                Some(v) => Self::Decimal(v),
                None => Self::Decimal(saturated_decimal(
                    a.is_sign_negative() != b.is_sign_negative(),
                )),
            },
            (a, b) => Self::Float(a.to_f64_lossy() / b.to_f64_lossy()),
        }
    }

    /// Wide remainder; the sign follows the dividend.
    ///
    /// The divisor must be non-zero, as with [`Wide::div`].
    pub fn rem(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => match a.checked_rem(b) {
                Some(v) => Self::Int(v),
                None => Self::Int(0),
            },
            (Self::Decimal(a), Self::Decimal(b)) => match a.checked_rem(b) {
                Some(v) => Self::Decimal(v),
                None => Self::Decimal(Decimal::ZERO),
            },
            (a, b) => Self::Float(a.to_f64_lossy() % b.to_f64_lossy()),
        }
    }
}

impl fmt::Display for Wide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// The decimal bound with the requested sign.
fn saturated_decimal(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}
