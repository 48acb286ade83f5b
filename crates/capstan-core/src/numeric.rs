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

//! # Numeric Trait Bundle
//!
//! A convenience alias that bundles the capabilities generic callers need
//! from a numeric kind, so signatures name one bound instead of repeating
//! the full list.

use crate::codec::BitCodec;
use crate::convert::NumericKernel;
use std::fmt::Display;

/// The full capability bundle of a numeric kind: conversion kernel, binary
/// codec, display, and thread safety.
///
/// This is a trait alias; it carries no items of its own and is implemented
/// blanket-wise for every type that satisfies the bounds. Bounded-uniform
/// sampling is deliberately not part of the bundle because the 96-bit
/// decimal kind does not support it.
///
/// # Examples
///
/// ```rust
/// use capstan_core::numeric::SafeNumeric;
///
/// fn describe<T: SafeNumeric>(value: T) -> String {
///     format!("{} ({})", value, T::KIND)
/// }
///
/// assert_eq!(describe(42u8), "42 (UInt8)");
/// ```
pub trait SafeNumeric: NumericKernel + BitCodec + Display + Copy + Send + Sync {}

impl<T> SafeNumeric for T where T: NumericKernel + BitCodec + Display + Copy + Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaled::Scaled64;
    use rust_decimal::Decimal;

    fn assert_safe_numeric<T: SafeNumeric>() {}

    #[test]
    fn test_all_kinds_satisfy_the_bundle() {
        assert_safe_numeric::<i8>();
        assert_safe_numeric::<u8>();
        assert_safe_numeric::<i16>();
        assert_safe_numeric::<u16>();
        assert_safe_numeric::<i32>();
        assert_safe_numeric::<u32>();
        assert_safe_numeric::<i64>();
        assert_safe_numeric::<u64>();
        assert_safe_numeric::<f32>();
        assert_safe_numeric::<f64>();
        assert_safe_numeric::<Decimal>();
        assert_safe_numeric::<Scaled64>();
    }
}
