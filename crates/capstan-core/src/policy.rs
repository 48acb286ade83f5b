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

//! # Conversion Policies
//!
//! How an out-of-range numeric conversion is resolved. The policy is
//! attached per call, not per type: the same source value may be converted
//! under different policies at different call sites.

use std::fmt;

/// The rule governing how an out-of-range numeric conversion is resolved.
///
/// `Clamp` is the policy the rest of the crate builds on: saturating
/// arithmetic narrows its wide intermediate under `Clamp`, which is what
/// makes overflow impossible to observe on that surface.
///
/// # Examples
///
/// ```rust
/// # use capstan_core::convert::convert;
/// # use capstan_core::policy::ConversionPolicy;
/// // 300 does not fit an i8. Each policy resolves that differently.
/// let clamped: i8 = convert(300i32, ConversionPolicy::Clamp).unwrap();
/// assert_eq!(clamped, 127);
///
/// let wrapped: i8 = convert(300i32, ConversionPolicy::Default).unwrap();
/// assert_eq!(wrapped, 44); // low 8 bits of 300, like a native cast
///
/// let strict: Result<i8, _> = convert(300i32, ConversionPolicy::Throw);
/// assert!(strict.is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConversionPolicy {
    /// Reinterpret like a native cast: narrowing keeps the low bits,
    /// float-to-integer truncates toward zero and then wraps. This is the
    /// one policy that can silently lose data; it exists to reproduce
    /// platform-cast semantics.
    Default,
    /// Compare against the target bounds first and saturate: values above
    /// the target maximum become the maximum, values below the minimum
    /// become the minimum.
    #[default]
    Clamp,
    /// Reinterpret first (as `Default` would), then saturate the
    /// reinterpreted value. Cast-then-saturate keeps a wrapped in-range
    /// reinterpretation where compare-then-saturate would clamp to a bound.
    CastClamp,
    /// Raise an [`OverflowError`](crate::error::OverflowError) when the
    /// value is outside the target range.
    Throw,
}

impl fmt::Display for ConversionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "Default",
            Self::Clamp => "Clamp",
            Self::CastClamp => "CastClamp",
            Self::Throw => "Throw",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_clamp() {
        assert_eq!(ConversionPolicy::default(), ConversionPolicy::Clamp);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConversionPolicy::Default.to_string(), "Default");
        assert_eq!(ConversionPolicy::CastClamp.to_string(), "CastClamp");
    }
}
