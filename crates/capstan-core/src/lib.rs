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

//! # Capstan Core
//!
//! Overflow-safe numeric primitives: policy-driven conversions between
//! twelve numeric kinds, saturating and strict arithmetic through wide
//! intermediates, a 10^-6 fixed-point decimal, bias-free bounded random
//! sampling, and a fixed-width little-endian binary codec.
//!
//! The guiding rule is that the saturating surfaces never panic, wrap, or
//! return an error: out-of-range results land on the nearest representable
//! bound. Strict behavior is always a separate, explicitly chosen surface
//! (the `Throw` conversion policy and the `try_*` arithmetic functions).
//!
//! ## Modules
//!
//! - [`kind`]: The [`NumericKind`](kind::NumericKind) taxonomy.
//! - [`policy`]: Out-of-range conversion policies.
//! - [`wide`]: The canonical wide intermediate.
//! - [`convert`]: The cross-kind conversion kernel.
//! - [`arith`]: Saturating and strict arithmetic.
//! - [`scaled`]: The [`Scaled64`](scaled::Scaled64) fixed-point decimal.
//! - [`random`]: Bias-free bounded uniform sampling.
//! - [`codec`]: Fixed-width little-endian binary encoding.
//! - [`numeric`]: The [`SafeNumeric`](numeric::SafeNumeric) trait bundle.
//! - [`error`]: The failure taxonomy.
//!
//! ## Example
//!
//! ```rust
//! use capstan_core::{arith, convert::convert, policy::ConversionPolicy};
//!
//! // Saturating conversion and arithmetic never leave the target range.
//! let clamped: i16 = convert(100_000i32, ConversionPolicy::Clamp).unwrap();
//! assert_eq!(clamped, i16::MAX);
//! assert_eq!(arith::add(i8::MAX, 1i8), i8::MAX);
//!
//! // Strict surfaces report the overflow instead.
//! assert!(convert::<_, i16>(100_000i32, ConversionPolicy::Throw).is_err());
//! assert!(arith::try_add(i8::MAX, 1i8).is_err());
//! ```

pub mod arith;
pub mod codec;
pub mod convert;
pub mod error;
pub mod kind;
pub mod numeric;
pub mod policy;
pub mod random;
pub mod scaled;
pub mod wide;

pub use arith::Scale;
pub use codec::BitCodec;
pub use convert::{convert, NumericKernel};
pub use error::{CodecError, FormatError, OverflowError, RangeError};
pub use kind::NumericKind;
pub use numeric::SafeNumeric;
pub use policy::ConversionPolicy;
pub use random::BoundedUniform;
pub use scaled::{RoundingMode, Scaled64};
pub use wide::Wide;

// The 96-bit decimal kind is rust_decimal's type; re-export it so callers
// need not depend on the crate directly.
pub use rust_decimal::Decimal;
