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

//! # Numeric Kinds
//!
//! The closed set of primitive representations the core operates on. Every
//! value handled by conversion, arithmetic, sampling, or the codec belongs
//! to exactly one [`NumericKind`]; the enum is metadata only (bit width,
//! signedness) and shows up primarily in error payloads.

use std::fmt;

/// The closed set of primitive numeric representations supported by the core.
///
/// Each kind has a fixed bit width and signedness. `Scaled64` is a signed
/// 64-bit integer store with an implicit base-10 scale factor of 1,000,000;
/// `Decimal96` is the 96-bit decimal format (three 32-bit mantissa words plus
/// a flags word carrying sign and scale).
///
/// # Examples
///
/// ```rust
/// # use capstan_core::kind::NumericKind;
/// assert_eq!(NumericKind::Int8.bit_width(), 8);
/// assert!(NumericKind::Int8.is_signed());
/// assert!(!NumericKind::UInt64.is_signed());
/// assert!(NumericKind::Float32.is_float());
/// assert_eq!(NumericKind::Decimal96.to_string(), "Decimal96");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// IEEE 754 single-precision float.
    Float32,
    /// IEEE 754 double-precision float.
    Float64,
    /// 96-bit decimal (lo/mid/high mantissa words plus sign-and-scale flags).
    Decimal96,
    /// Signed 64-bit integer with an implicit 10^6 scale factor.
    Scaled64,
}

impl NumericKind {
    /// Returns the width in bits of the kind's value representation.
    ///
    /// For `Decimal96` this is the mantissa-plus-flags payload width (128);
    /// the mantissa itself is 96 bits.
    pub const fn bit_width(self) -> u32 {
        match self {
            Self::Int8 | Self::UInt8 => 8,
            Self::Int16 | Self::UInt16 => 16,
            Self::Int32 | Self::UInt32 | Self::Float32 => 32,
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::Scaled64 => 64,
            Self::Decimal96 => 128,
        }
    }

    /// Returns `true` if the kind can represent negative values.
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    /// Returns `true` for the IEEE 754 floating-point kinds.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns the kind's canonical name (same text as its `Display` output).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Decimal96 => "Decimal96",
            Self::Scaled64 => "Scaled64",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_widths() {
        assert_eq!(NumericKind::Int8.bit_width(), 8);
        assert_eq!(NumericKind::UInt16.bit_width(), 16);
        assert_eq!(NumericKind::Float32.bit_width(), 32);
        assert_eq!(NumericKind::Scaled64.bit_width(), 64);
        assert_eq!(NumericKind::Decimal96.bit_width(), 128);
    }

    #[test]
    fn test_signedness() {
        assert!(NumericKind::Int8.is_signed());
        assert!(NumericKind::Float64.is_signed());
        assert!(NumericKind::Decimal96.is_signed());
        assert!(NumericKind::Scaled64.is_signed());
        assert!(!NumericKind::UInt8.is_signed());
        assert!(!NumericKind::UInt64.is_signed());
    }

    #[test]
    fn test_display_matches_name() {
        for kind in [
            NumericKind::Int8,
            NumericKind::UInt32,
            NumericKind::Float64,
            NumericKind::Decimal96,
            NumericKind::Scaled64,
        ] {
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}
