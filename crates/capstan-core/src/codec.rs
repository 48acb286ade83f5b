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

//! # Fixed-Width Binary Codec
//!
//! Little-endian binary encoding with a compile-time width per kind.
//! Integers and the fixed-point kind serialize their two's-complement
//! store; floats serialize their IEEE 754 bit pattern; the 96-bit decimal
//! serializes as four little-endian `u32` words (`lo`, `mid`, `hi`,
//! `flags`), the layout portable across runtimes that share the 96-bit
//! decimal format.
//!
//! Decoding validates the slice length against the kind's width and, for
//! decimals, rejects flags words with reserved bits set or a scale above
//! the 28 the mantissa supports.

use crate::error::CodecError;
use crate::scaled::Scaled64;
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// The decimal flags bits that carry meaning: sign and an 8-bit scale.
const DECIMAL_SIGN_BIT: u32 = 0x8000_0000;
const DECIMAL_SCALE_MASK: u32 = 0x00FF_0000;
const DECIMAL_MAX_SCALE: u32 = 28;

/// Fixed-width little-endian binary encoding.
///
/// Every value of a kind encodes to exactly [`BitCodec::ENCODED_WIDTH`]
/// bytes, and decoding is the exact inverse: `decode(v.encode()) == v` for
/// every representable value, including NaN bit patterns.
///
/// # Examples
///
/// ```rust
/// use capstan_core::codec::BitCodec;
///
/// let bytes = 0x0102_0304u32.encode();
/// assert_eq!(bytes.as_slice(), &[0x04, 0x03, 0x02, 0x01]);
/// assert_eq!(u32::decode(&bytes).unwrap(), 0x0102_0304);
/// assert!(u32::decode(&bytes[..3]).is_err());
/// ```
pub trait BitCodec: Sized {
    /// The exact number of bytes every encoded value occupies.
    const ENCODED_WIDTH: usize;

    /// Encodes the value as little-endian bytes.
    fn encode(self) -> SmallVec<[u8; 16]>;

    /// Encodes into a caller-provided buffer, which must be exactly
    /// [`BitCodec::ENCODED_WIDTH`] bytes long.
    fn encode_into(self, buf: &mut [u8]) -> Result<(), CodecError> {
        if buf.len() != Self::ENCODED_WIDTH {
            return Err(CodecError::UnexpectedLength {
                expected: Self::ENCODED_WIDTH,
                actual: buf.len(),
            });
        }
        buf.copy_from_slice(&self.encode());
        Ok(())
    }

    /// Decodes a value from exactly [`BitCodec::ENCODED_WIDTH`] bytes.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

/// Checks the slice length and returns it as a fixed-size array.
fn take_exact<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    match bytes.try_into() {
        Ok(array) => Ok(array),
        Err(_) => Err(CodecError::UnexpectedLength {
            expected: N,
            actual: bytes.len(),
        }),
    }
}

macro_rules! bit_codec_int {
    ($($t:ty),*) => {
        $(
            impl BitCodec for $t {
                const ENCODED_WIDTH: usize = std::mem::size_of::<$t>();

                fn encode(self) -> SmallVec<[u8; 16]> {
                    SmallVec::from_slice(&self.to_le_bytes())
                }

                fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
                    Ok(<$t>::from_le_bytes(take_exact(bytes)?))
                }
            }
        )*
    };
}

bit_codec_int!(i8, u8, i16, u16, i32, u32, i64, u64);

macro_rules! bit_codec_float {
    ($($t:ty => $bits:ty),*) => {
        $(
            impl BitCodec for $t {
                const ENCODED_WIDTH: usize = std::mem::size_of::<$t>();

                fn encode(self) -> SmallVec<[u8; 16]> {
                    SmallVec::from_slice(&self.to_bits().to_le_bytes())
                }

                fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
                    Ok(<$t>::from_bits(<$bits>::from_le_bytes(take_exact(bytes)?)))
                }
            }
        )*
    };
}

bit_codec_float!(f32 => u32, f64 => u64);

impl BitCodec for Scaled64 {
    const ENCODED_WIDTH: usize = 8;

    // The fixed-point kind serializes its raw store; the scale factor is
    // part of the kind, not of the payload.
    fn encode(self) -> SmallVec<[u8; 16]> {
        self.to_raw().encode()
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(Self::from_raw(i64::decode(bytes)?))
    }
}

impl BitCodec for Decimal {
    const ENCODED_WIDTH: usize = 16;

    /// Four little-endian `u32` words: the 96-bit magnitude split into
    /// `lo`, `mid`, `hi`, followed by the flags word (sign in bit 31,
    /// scale in bits 16..24, everything else zero).
    fn encode(self) -> SmallVec<[u8; 16]> {
        let magnitude = self.mantissa().unsigned_abs();
        let lo = magnitude as u32;
        let mid = (magnitude >> 32) as u32;
        let hi = (magnitude >> 64) as u32;
        let mut flags = self.scale() << 16;
        if self.is_sign_negative() {
            flags |= DECIMAL_SIGN_BIT;
        }
        let mut bytes = SmallVec::new();
        for word in [lo, mid, hi, flags] {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: [u8; 16] = take_exact(bytes)?;
        let word = |i: usize| {
            u32::from_le_bytes([raw[4 * i], raw[4 * i + 1], raw[4 * i + 2], raw[4 * i + 3]])
        };
        let (lo, mid, hi, flags) = (word(0), word(1), word(2), word(3));
        let scale = (flags & DECIMAL_SCALE_MASK) >> 16;
        if flags & !(DECIMAL_SIGN_BIT | DECIMAL_SCALE_MASK) != 0 || scale > DECIMAL_MAX_SCALE {
            return Err(CodecError::InvalidDecimalFlags(flags));
        }
        Ok(Decimal::from_parts(
            lo,
            mid,
            hi,
            flags & DECIMAL_SIGN_BIT != 0,
            scale,
        ))
    }
}
