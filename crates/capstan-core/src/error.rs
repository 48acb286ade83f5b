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

//! # Error Types
//!
//! The failure taxonomy of the numeric core. Under the saturating policies
//! used throughout the library, overflow is never surfaced as an error; it
//! is resolved to a saturated bound. The types here cover the only paths
//! that do fail: strict (`Throw`) conversions and arithmetic, malformed
//! numeric strings, invalid scale/digits arguments, and codec decoding.

use crate::kind::NumericKind;

/// A value fell outside the target range under strict (`Throw`) semantics.
///
/// Produced only by [`convert`](crate::convert::convert) with
/// [`ConversionPolicy::Throw`](crate::policy::ConversionPolicy::Throw) and by
/// the `try_*` arithmetic functions. The saturating surfaces never construct
/// this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowError {
    /// Rendered form of the offending value.
    pub value: String,
    /// The kind whose range was exceeded.
    pub target: NumericKind,
}

impl OverflowError {
    /// Creates an overflow error for `value` against `target`'s range.
    pub fn new(value: impl Into<String>, target: NumericKind) -> Self {
        Self {
            value: value.into(),
            target,
        }
    }
}

impl std::fmt::Display for OverflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Value '{}' is outside the representable range of {}",
            self.value, self.target
        )
    }
}

impl std::error::Error for OverflowError {}

/// A numeric string could not be parsed.
///
/// Reserved for malformed text; out-of-range but well-formed input saturates
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The string token that failed to parse.
    pub token: String,
}

impl FormatError {
    /// Creates a format error for the offending `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as a scaled decimal",
            self.token
        )
    }
}

impl std::error::Error for FormatError {}

/// An argument was outside its valid domain (e.g. a non-positive scale
/// factor, or a negative rounding-digits count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError {
    /// The name of the offending argument.
    pub argument: &'static str,
    /// The value that was rejected.
    pub value: i64,
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Argument '{}' has invalid value {}",
            self.argument, self.value
        )
    }
}

impl std::error::Error for RangeError {}

/// The error type for fixed-width binary decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input slice length does not match the kind's encoded width.
    UnexpectedLength {
        /// The encoded width the kind requires.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },
    /// A decimal flags word carries a scale above 28 or sets reserved bits.
    InvalidDecimalFlags(u32),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedLength { expected, actual } => {
                write!(
                    f,
                    "Expected {} encoded bytes but received {}",
                    expected, actual
                )
            }
            Self::InvalidDecimalFlags(flags) => {
                write!(f, "Decimal flags word {:#010x} is not valid", flags)
            }
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_error_display() {
        let err = OverflowError::new("300", NumericKind::Int8);
        assert_eq!(
            err.to_string(),
            "Value '300' is outside the representable range of Int8"
        );
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::UnexpectedLength {
            expected: 8,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Expected 8 encoded bytes but received 3");
    }
}
