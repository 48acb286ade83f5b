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

//! # Checked Arithmetic
//!
//! Overflow-detecting arithmetic over any [`NumericKernel`]. Every
//! operation computes its true result in the [`Wide`](crate::wide::Wide)
//! intermediate, where it is always representable, and narrows back under
//! the clamping rule. The result is saturation on overflow and exact
//! arithmetic everywhere else; these functions never panic and never wrap.
//!
//! The `try_*` variants narrow strictly instead, surfacing an
//! [`OverflowError`] when the true result does not fit the operand kind.
//!
//! ## Division by zero
//!
//! Division by zero does not trap and does not error, under either variant:
//! it saturates to the kind's maximum for a positive dividend, the minimum
//! for a negative dividend, and zero for a zero dividend. Downstream value
//! types rely on this operation surface being total; do not "fix" it to
//! match native integer division.

use crate::convert::NumericKernel;
use crate::error::{OverflowError, RangeError};
use crate::wide::Wide;

fn zero<T: NumericKernel>() -> T {
    T::from_wide_clamped(Wide::Int(0))
}

fn saturated_by_sign<T: NumericKernel>(sign: i32) -> T {
    match sign {
        s if s > 0 => T::max_value(),
        s if s < 0 => T::min_value(),
        _ => zero(),
    }
}

/// Clamped narrowing for arithmetic results. Unlike a plain `Clamp`
/// conversion (where an infinite float source is a representable float
/// value), an arithmetic result that escaped to infinity is an overflow of
/// the finite range and clamps to the finite bound.
fn narrow_saturating<T: NumericKernel>(wide: Wide) -> T {
    if T::KIND.is_float() {
        if let Wide::Float(v) = wide {
            if v.is_infinite() {
                return if v > 0.0 { T::max_value() } else { T::min_value() };
            }
        }
    }
    T::from_wide_clamped(wide)
}

fn narrow_strict<T: NumericKernel>(wide: Wide) -> Result<T, OverflowError> {
    if T::wide_in_range(wide) {
        Ok(T::from_wide_default(wide))
    } else {
        Err(OverflowError::new(wide.to_string(), T::KIND))
    }
}

/// Saturating addition: exact when the true sum is in range, clamped to the
/// nearest bound otherwise.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::add(120i8, 5i8), 125);
/// assert_eq!(arith::add(127i8, 1i8), 127);
/// assert_eq!(arith::add(-128i8, -1i8), -128);
/// ```
pub fn add<T: NumericKernel>(a: T, b: T) -> T {
    narrow_saturating(a.to_wide().add(b.to_wide()))
}

/// Saturating subtraction.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::sub(5u8, 10u8), 0);
/// assert_eq!(arith::sub(127i8, -1i8), 127);
/// ```
pub fn sub<T: NumericKernel>(a: T, b: T) -> T {
    narrow_saturating(a.to_wide().sub(b.to_wide()))
}

/// Saturating multiplication.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::mul(20i8, 5i8), 100);
/// assert_eq!(arith::mul(20i8, 10i8), 127);
/// assert_eq!(arith::mul(u64::MAX, u64::MAX), u64::MAX);
/// ```
pub fn mul<T: NumericKernel>(a: T, b: T) -> T {
    narrow_saturating(a.to_wide().mul(b.to_wide()))
}

/// Saturating division with the saturating-divide convention for zero
/// divisors (see the module docs).
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::div(100i32, 4i32), 25);
/// assert_eq!(arith::div(7i32, 0i32), i32::MAX);
/// assert_eq!(arith::div(-7i32, 0i32), i32::MIN);
/// assert_eq!(arith::div(0i32, 0i32), 0);
/// ```
pub fn div<T: NumericKernel>(a: T, b: T) -> T {
    let divisor = b.to_wide();
    if divisor.is_zero() {
        return saturated_by_sign(a.to_wide().signum());
    }
    narrow_saturating(a.to_wide().div(divisor))
}

/// Truncating remainder; the sign follows the dividend. A zero divisor
/// yields zero, keeping the arithmetic surface total alongside [`div`].
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::rem(7i32, 3i32), 1);
/// assert_eq!(arith::rem(-7i32, 3i32), -1);
/// assert_eq!(arith::rem(7i32, 0i32), 0);
/// ```
pub fn rem<T: NumericKernel>(a: T, b: T) -> T {
    let divisor = b.to_wide();
    if divisor.is_zero() {
        return zero();
    }
    narrow_saturating(a.to_wide().rem(divisor))
}

/// Saturating exponentiation.
///
/// Non-negative exponents on integer kinds use exponentiation by squaring
/// with checked wide multiplies; negative exponents (and float kinds) route
/// through floating-point `powi` and saturate back, so `2^-1` truncates to
/// zero on integer kinds.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::pow(2i32, 10), 1024);
/// assert_eq!(arith::pow(2i8, 7), 127);
/// assert_eq!(arith::pow(-2i8, 9), -128);
/// assert_eq!(arith::pow(2i32, -1), 0);
/// assert_eq!(arith::pow(2.0f64, -1), 0.5);
/// ```
pub fn pow<T: NumericKernel>(base: T, exp: i32) -> T {
    narrow_saturating(pow_wide(base, exp))
}

/// Strict addition: errors when the true sum is outside the kind's range.
pub fn try_add<T: NumericKernel>(a: T, b: T) -> Result<T, OverflowError> {
    narrow_strict(a.to_wide().add(b.to_wide()))
}

/// Strict subtraction.
pub fn try_sub<T: NumericKernel>(a: T, b: T) -> Result<T, OverflowError> {
    narrow_strict(a.to_wide().sub(b.to_wide()))
}

/// Strict multiplication.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith;
/// assert_eq!(arith::try_mul(20i8, 5i8), Ok(100));
/// assert!(arith::try_mul(20i8, 10i8).is_err());
/// ```
pub fn try_mul<T: NumericKernel>(a: T, b: T) -> Result<T, OverflowError> {
    narrow_strict(a.to_wide().mul(b.to_wide()))
}

/// Strict division. Zero divisors still saturate (the convention is a
/// deliberate non-error); the only failure is an out-of-range quotient,
/// which exists only at the signed-minimum negation corner.
pub fn try_div<T: NumericKernel>(a: T, b: T) -> Result<T, OverflowError> {
    let divisor = b.to_wide();
    if divisor.is_zero() {
        return Ok(saturated_by_sign(a.to_wide().signum()));
    }
    narrow_strict(a.to_wide().div(divisor))
}

/// Strict remainder; a zero divisor yields zero.
pub fn try_rem<T: NumericKernel>(a: T, b: T) -> Result<T, OverflowError> {
    let divisor = b.to_wide();
    if divisor.is_zero() {
        return Ok(zero());
    }
    narrow_strict(a.to_wide().rem(divisor))
}

/// Strict exponentiation.
pub fn try_pow<T: NumericKernel>(base: T, exp: i32) -> Result<T, OverflowError> {
    narrow_strict(pow_wide(base, exp))
}

fn pow_wide<T: NumericKernel>(base: T, exp: i32) -> Wide {
    match base.to_wide() {
        Wide::Int(b) if exp >= 0 => int_pow_wide(b, exp as u32),
        wide => Wide::Float(wide.to_f64_lossy().powi(exp)),
    }
}

/// Exponentiation by squaring on the wide integer; saturates the wide
/// intermediate when even `i128` cannot hold the result (the eventual
/// narrowing clamps either way).
fn int_pow_wide(base: i128, exp: u32) -> Wide {
    let negative = base < 0 && exp % 2 == 1;
    let saturated = if negative { i128::MIN } else { i128::MAX };
    let mut acc: i128 = 1;
    let mut b = base;
    let mut e = exp;
    loop {
        if e & 1 == 1 {
            acc = match acc.checked_mul(b) {
                Some(v) => v,
                None => return Wide::Int(saturated),
            };
        }
        e >>= 1;
        if e == 0 {
            break;
        }
        b = match b.checked_mul(b) {
            Some(v) => v,
            None => return Wide::Int(saturated),
        };
    }
    Wide::Int(acc)
}

/// A validated positive scale factor for [`scaled_mul`] and [`scaled_div`].
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith::Scale;
/// assert_eq!(Scale::MICRO.get(), 1_000_000);
/// assert!(Scale::new(100).is_ok());
/// assert!(Scale::new(0).is_err());
/// assert!(Scale::new(-10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale(i64);

impl Scale {
    /// The 10^6 factor used by the fixed-point kind.
    pub const MICRO: Self = Self(1_000_000);

    /// Creates a scale factor; the factor must be strictly positive.
    pub fn new(factor: i64) -> Result<Self, RangeError> {
        if factor > 0 {
            Ok(Self(factor))
        } else {
            Err(RangeError {
                argument: "factor",
                value: factor,
            })
        }
    }

    /// Returns the raw factor.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Multiplies two pre-scaled values: `(a * b) / scale`, truncating toward
/// zero. The product is formed in a 128-bit intermediate, so it cannot
/// overflow even for operands near the 64-bit bounds; only the rescaled
/// result is clamped.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith::{scaled_mul, Scale};
/// // 2.5 * 4.0 at scale 10^6.
/// assert_eq!(scaled_mul(2_500_000i64, 4_000_000i64, Scale::MICRO), 10_000_000);
/// ```
pub fn scaled_mul<T: NumericKernel>(a: T, b: T, scale: Scale) -> T {
    let factor = scale.get() as i128;
    match (a.to_wide(), b.to_wide()) {
        (Wide::Int(x), Wide::Int(y)) => match x.checked_mul(y) {
            Some(product) => T::from_wide_clamped(Wide::Int(product / factor)),
            // Both operands near u64::MAX; the rescaled result is still far
            // past every kind's bounds, so saturate by the product's sign.
            None => saturated_by_sign((x.signum() * y.signum()) as i32),
        },
        (x, y) => T::from_wide_clamped(Wide::Float(
            x.to_f64_lossy() * y.to_f64_lossy() / factor as f64,
        )),
    }
}

/// Divides two pre-scaled values: `(a * scale) / b`, truncating toward
/// zero, with the saturating zero-divisor convention of [`div`].
///
/// Together with [`scaled_mul`] this satisfies the round-trip law
/// `scaled_div(scaled_mul(a, b, s), b, s) == a` whenever no truncation or
/// saturation occurs.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::arith::{scaled_div, Scale};
/// // 10.0 / 4.0 at scale 10^6.
/// assert_eq!(scaled_div(10_000_000i64, 4_000_000i64, Scale::MICRO), 2_500_000);
/// assert_eq!(scaled_div(1_000_000i64, 0i64, Scale::MICRO), i64::MAX);
/// ```
pub fn scaled_div<T: NumericKernel>(a: T, b: T, scale: Scale) -> T {
    let divisor = b.to_wide();
    if divisor.is_zero() {
        return saturated_by_sign(a.to_wide().signum());
    }
    let factor = scale.get() as i128;
    match (a.to_wide(), divisor) {
        (Wide::Int(x), Wide::Int(y)) => match x.checked_mul(factor) {
            Some(scaled) => T::from_wide_clamped(Wide::Int(scaled / y)),
            None => T::from_wide_clamped(Wide::Float(
                x as f64 * factor as f64 / y as f64,
            )),
        },
        (x, y) => T::from_wide_clamped(Wide::Float(
            x.to_f64_lossy() * factor as f64 / y.to_f64_lossy(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_saturates() {
        assert_eq!(add(127i8, 1i8), 127);
        assert_eq!(add(-128i8, -1i8), -128);
        assert_eq!(add(250u8, 10u8), 255);
        assert_eq!(add(100i8, 20i8), 120);
        assert_eq!(add(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_sub_saturates() {
        assert_eq!(sub(0u8, 1u8), 0);
        assert_eq!(sub(-128i8, 1i8), -128);
        assert_eq!(sub(10i8, 20i8), -10);
        assert_eq!(sub(0u64, u64::MAX), 0);
    }

    #[test]
    fn test_mul_saturates() {
        assert_eq!(mul(64u8, 10u8), 255);
        assert_eq!(mul(-30i8, 10i8), -128);
        assert_eq!(mul(11i8, 11i8), 121);
        assert_eq!(mul(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(mul(i64::MIN, i64::MAX), i64::MIN);
    }

    #[test]
    fn test_div_by_zero_saturates() {
        assert_eq!(div(7i32, 0i32), i32::MAX);
        assert_eq!(div(-7i32, 0i32), i32::MIN);
        assert_eq!(div(0i32, 0i32), 0);
        assert_eq!(div(7u32, 0u32), u32::MAX);
        assert_eq!(div(1.0f64, 0.0f64), f64::MAX);
        assert_eq!(div(-1.0f64, 0.0f64), f64::MIN);
    }

    #[test]
    fn test_div_signed_minimum_corner() {
        // i8::MIN / -1 is 128 in true arithmetic; saturates to 127.
        assert_eq!(div(i8::MIN, -1i8), 127);
        assert!(try_div(i8::MIN, -1i8).is_err());
    }

    #[test]
    fn test_rem_sign_and_zero() {
        assert_eq!(rem(7i32, 3i32), 1);
        assert_eq!(rem(-7i32, 3i32), -1);
        assert_eq!(rem(7i32, -3i32), 1);
        assert_eq!(rem(7i32, 0i32), 0);
        assert_eq!(try_rem(-9i64, 0i64), Ok(0));
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(2i32, 10), 1024);
        assert_eq!(pow(3u8, 5), 243);
        assert_eq!(pow(2i8, 7), 127);
        assert_eq!(pow(-2i8, 9), -128);
        assert_eq!(pow(-2i8, 8), 127);
        assert_eq!(pow(5i32, 0), 1);
        assert_eq!(pow(0i32, 0), 1);
        assert_eq!(pow(0i32, 3), 0);
        assert_eq!(pow(2i32, -1), 0);
        assert_eq!(pow(2.0f64, -2), 0.25);
        assert_eq!(pow(10u64, 19), 10_000_000_000_000_000_000u64);
    }

    #[test]
    fn test_pow_deep_saturation() {
        // The squaring chain overflows i128 well before the exponent is
        // consumed; sign parity must still be respected.
        assert_eq!(pow(3i64, 1_000), i64::MAX);
        assert_eq!(pow(-3i64, 999), i64::MIN);
        assert_eq!(pow(-3i64, 1_000), i64::MAX);
    }

    #[test]
    fn test_try_variants() {
        assert_eq!(try_add(100i8, 20i8), Ok(120));
        assert!(try_add(127i8, 1i8).is_err());
        assert!(try_sub(0u8, 1u8).is_err());
        assert_eq!(try_mul(16u8, 15u8), Ok(240));
        assert!(try_mul(16u8, 16u8).is_err());
        assert_eq!(try_div(7i32, 0i32), Ok(i32::MAX));
        assert!(try_pow(2i8, 8).is_err());
        let err = try_add(127i8, 1i8).unwrap_err();
        assert_eq!(err.value, "128");
    }

    #[test]
    fn test_scaled_round_trip() {
        let s = Scale::MICRO;
        let a = 7_250_000i64; // 7.25
        let b = 3_000_000i64; // 3.0
        let product = scaled_mul(a, b, s);
        assert_eq!(product, 21_750_000); // 21.75
        assert_eq!(scaled_div(product, b, s), a);
    }

    #[test]
    fn test_scaled_mul_near_bounds() {
        let s = Scale::MICRO;
        // Both operands near i64::MAX: the i128 product is exact and the
        // rescaled result saturates.
        assert_eq!(scaled_mul(i64::MAX, i64::MAX, s), i64::MAX);
        assert_eq!(scaled_mul(i64::MAX, i64::MIN, s), i64::MIN);
        assert_eq!(scaled_mul(u64::MAX, u64::MAX, s), u64::MAX);
    }

    #[test]
    fn test_scaled_div_by_zero() {
        let s = Scale::MICRO;
        assert_eq!(scaled_div(5i64, 0i64, s), i64::MAX);
        assert_eq!(scaled_div(-5i64, 0i64, s), i64::MIN);
        assert_eq!(scaled_div(0i64, 0i64, s), 0);
    }

    #[test]
    fn test_scale_validation() {
        assert!(Scale::new(1).is_ok());
        let err = Scale::new(-3).unwrap_err();
        assert_eq!(err.argument, "factor");
        assert_eq!(err.value, -3);
    }

    #[test]
    fn test_float_arithmetic_clamps() {
        assert_eq!(add(f64::MAX, f64::MAX), f64::MAX);
        assert_eq!(mul(f32::MAX, 2.0f32), f32::MAX);
        assert_eq!(add(1.5f64, 2.25f64), 3.75);
    }
}
