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

//! # Numeric Conversion
//!
//! Policy-driven conversion between any two supported numeric kinds. Each
//! kind implements [`NumericKernel`] once, describing how it widens into
//! the canonical [`Wide`] intermediate and how it narrows back out under
//! each resolution strategy. [`convert`] composes the two legs, so the
//! twelve-kind matrix needs twelve kernels instead of 144 pairwise
//! functions.
//!
//! ## Special values
//!
//! When the target kind has no concept of them, `NaN` narrows to `0`,
//! positive infinity to the target maximum, and negative infinity to the
//! target minimum (under the saturating policies; under
//! [`ConversionPolicy::Throw`] a non-finite source to such a target is an
//! overflow). Floating-point targets keep their own non-finite values.

use crate::error::OverflowError;
use crate::kind::NumericKind;
use crate::policy::ConversionPolicy;
use crate::wide::Wide;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// The per-kind capability set behind the conversion matrix.
///
/// Implemented exactly once for every supported primitive representation.
/// A kernel knows its own bounds, how to widen into [`Wide`], and how to
/// narrow a wide value back under each of the two non-failing strategies;
/// [`convert`] layers the per-call policy (including `Throw`) on top.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::convert::NumericKernel;
/// # use capstan_core::wide::Wide;
/// assert_eq!(i8::from_wide_clamped(Wide::Int(300)), 127);
/// assert_eq!(i8::from_wide_default(Wide::Int(300)), 44);
/// assert!(!i8::wide_in_range(Wide::Int(300)));
/// ```
pub trait NumericKernel: Copy + PartialOrd + std::fmt::Debug {
    /// The kind this kernel represents.
    const KIND: NumericKind;

    /// The smallest representable value (smallest finite value for floats).
    fn min_value() -> Self;

    /// The largest representable value (largest finite value for floats).
    fn max_value() -> Self;

    /// Widens the value into the canonical intermediate. Exact for every
    /// kind: integers widen into `Wide::Int`, floats into `Wide::Float`,
    /// and the decimal and fixed-point kinds into `Wide::Decimal`.
    fn to_wide(self) -> Wide;

    /// Narrows like a native cast: integer narrowing keeps the low bits,
    /// float-to-integer truncates toward zero and then wraps. Kinds with no
    /// native reinterpretation (the decimal family) saturate instead.
    fn from_wide_default(wide: Wide) -> Self;

    /// Narrows by comparing against the kind's bounds and saturating.
    /// Never loses more than the out-of-range excess; in-range values
    /// convert exactly (floats to integers truncate toward zero).
    fn from_wide_clamped(wide: Wide) -> Self;

    /// Returns `true` if the wide value is exactly representable after the
    /// kind's narrowing rule (truncation toward zero for integer targets).
    /// Used by the `Throw` policy; the comparison is precision-safe at the
    /// 64-bit boundaries.
    fn wide_in_range(wide: Wide) -> bool;
}

/// Converts `value` to the target kind under the given policy.
///
/// This is the single entry point behind every cast the wrapper layer
/// exposes. Only [`ConversionPolicy::Throw`] can fail; the other policies
/// resolve out-of-range values silently per their documented rule.
///
/// Round-tripping an in-range value through `convert` under `Clamp` is
/// idempotent: the second conversion is a no-op.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::convert::convert;
/// # use capstan_core::policy::ConversionPolicy;
/// let v: u32 = convert(-1.0f64, ConversionPolicy::Clamp).unwrap();
/// assert_eq!(v, 0);
///
/// let v: i32 = convert(f64::INFINITY, ConversionPolicy::Clamp).unwrap();
/// assert_eq!(v, i32::MAX);
///
/// let v: i16 = convert(70_000i64, ConversionPolicy::Clamp).unwrap();
/// assert_eq!(v, i16::MAX);
/// ```
pub fn convert<S, T>(value: S, policy: ConversionPolicy) -> Result<T, OverflowError>
where
    S: NumericKernel,
    T: NumericKernel,
{
    let wide = value.to_wide();
    match policy {
        ConversionPolicy::Default => Ok(T::from_wide_default(wide)),
        ConversionPolicy::Clamp => Ok(T::from_wide_clamped(wide)),
        ConversionPolicy::CastClamp => {
            // Cast-then-saturate: reinterpret first, then clamp whatever
            // the reinterpretation produced.
            let cast = T::from_wide_default(wide);
            Ok(T::from_wide_clamped(cast.to_wide()))
        }
        ConversionPolicy::Throw => {
            if T::wide_in_range(wide) {
                Ok(T::from_wide_default(wide))
            } else {
                Err(OverflowError::new(wide.to_string(), T::KIND))
            }
        }
    }
}

macro_rules! integer_kernel {
    ($t:ty, $kind:expr) => {
        impl NumericKernel for $t {
            const KIND: NumericKind = $kind;

            #[inline]
            fn min_value() -> Self {
                <$t>::MIN
            }

            #[inline]
            fn max_value() -> Self {
                <$t>::MAX
            }

            #[inline]
            fn to_wide(self) -> Wide {
                Wide::Int(self as i128)
            }

            fn from_wide_default(wide: Wide) -> Self {
                match wide {
                    Wide::Int(v) => v as $t,
                    Wide::Float(v) => {
                        if v.is_nan() {
                            0
                        } else {
                            (v as i128) as $t
                        }
                    }
                    Wide::Decimal(v) => v.trunc().to_i128().unwrap_or(0) as $t,
                }
            }

            fn from_wide_clamped(wide: Wide) -> Self {
                match wide {
                    Wide::Int(v) => v.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t,
                    // Float-to-integer `as` already implements the clamped
                    // contract: truncation toward zero, saturation at the
                    // bounds, NaN to zero, infinities to the bounds.
                    Wide::Float(v) => v as $t,
                    Wide::Decimal(v) => v
                        .trunc()
                        .to_i128()
                        .unwrap_or(0)
                        .clamp(<$t>::MIN as i128, <$t>::MAX as i128)
                        as $t,
                }
            }

            fn wide_in_range(wide: Wide) -> bool {
                const LOW: i128 = <$t>::MIN as i128;
                const HIGH: i128 = <$t>::MAX as i128;
                match wide {
                    Wide::Int(v) => v >= LOW && v <= HIGH,
                    Wide::Float(v) => {
                        // `LOW as f64` and `(HIGH + 1) as f64` are exact
                        // (zero or a power of two), so the half-open test
                        // is safe even at the 64-bit boundary where
                        // `HIGH as f64` rounds up.
                        v.is_finite() && {
                            let t = v.trunc();
                            t >= LOW as f64 && t < (HIGH + 1) as f64
                        }
                    }
                    Wide::Decimal(v) => match v.trunc().to_i128() {
                        Some(t) => t >= LOW && t <= HIGH,
                        None => false,
                    },
                }
            }
        }
    };
}

integer_kernel!(i8, NumericKind::Int8);
integer_kernel!(u8, NumericKind::UInt8);
integer_kernel!(i16, NumericKind::Int16);
integer_kernel!(u16, NumericKind::UInt16);
integer_kernel!(i32, NumericKind::Int32);
integer_kernel!(u32, NumericKind::UInt32);
integer_kernel!(i64, NumericKind::Int64);
integer_kernel!(u64, NumericKind::UInt64);

fn wide_to_f64(wide: Wide) -> f64 {
    match wide {
        Wide::Int(v) => v as f64,
        Wide::Float(v) => v,
        Wide::Decimal(v) => v.to_f64().unwrap_or(0.0),
    }
}

impl NumericKernel for f64 {
    const KIND: NumericKind = NumericKind::Float64;

    #[inline]
    fn min_value() -> Self {
        f64::MIN
    }

    #[inline]
    fn max_value() -> Self {
        f64::MAX
    }

    #[inline]
    fn to_wide(self) -> Wide {
        Wide::Float(self)
    }

    fn from_wide_default(wide: Wide) -> Self {
        wide_to_f64(wide)
    }

    // Every wide value fits in f64 (a 96-bit decimal tops out near 7.9e28),
    // so clamped narrowing coincides with the native conversion.
    fn from_wide_clamped(wide: Wide) -> Self {
        wide_to_f64(wide)
    }

    fn wide_in_range(_wide: Wide) -> bool {
        true
    }
}

impl NumericKernel for f32 {
    const KIND: NumericKind = NumericKind::Float32;

    #[inline]
    fn min_value() -> Self {
        f32::MIN
    }

    #[inline]
    fn max_value() -> Self {
        f32::MAX
    }

    #[inline]
    fn to_wide(self) -> Wide {
        Wide::Float(self as f64)
    }

    fn from_wide_default(wide: Wide) -> Self {
        // Native narrowing: finite doubles outside the f32 range become
        // infinities, exactly as `as` does.
        wide_to_f64(wide) as f32
    }

    fn from_wide_clamped(wide: Wide) -> Self {
        let v = wide_to_f64(wide);
        if v.is_finite() {
            v.clamp(f32::MIN as f64, f32::MAX as f64) as f32
        } else {
            // NaN and infinities are representable concepts for a float
            // target and pass through unchanged.
            v as f32
        }
    }

    fn wide_in_range(wide: Wide) -> bool {
        let v = wide_to_f64(wide);
        !v.is_finite() || v.abs() <= f32::MAX as f64
    }
}

impl NumericKernel for Decimal {
    const KIND: NumericKind = NumericKind::Decimal96;

    #[inline]
    fn min_value() -> Self {
        Decimal::MIN
    }

    #[inline]
    fn max_value() -> Self {
        Decimal::MAX
    }

    #[inline]
    fn to_wide(self) -> Wide {
        Wide::Decimal(self)
    }

    // The decimal kind has no native reinterpretation cast, so the default
    // policy saturates like the clamped one.
    fn from_wide_default(wide: Wide) -> Self {
        Self::from_wide_clamped(wide)
    }

    fn from_wide_clamped(wide: Wide) -> Self {
        match wide {
            Wide::Int(v) => match Decimal::from_i128(v) {
                Some(d) => d,
                None if v < 0 => Decimal::MIN,
                None => Decimal::MAX,
            },
            Wide::Float(v) => {
                if v.is_nan() {
                    Decimal::ZERO
                } else {
                    match Decimal::from_f64(v) {
                        Some(d) => d,
                        None if v.is_sign_negative() => Decimal::MIN,
                        None => Decimal::MAX,
                    }
                }
            }
            Wide::Decimal(v) => v,
        }
    }

    fn wide_in_range(wide: Wide) -> bool {
        match wide {
            Wide::Int(v) => Decimal::from_i128(v).is_some(),
            Wide::Float(v) => v.is_finite() && Decimal::from_f64(v).is_some(),
            Wide::Decimal(_) => true,
        }
    }
}
