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

//! # Bounded Uniform Sampling
//!
//! Uniform sampling over inclusive ranges of any numeric kind, free of
//! modulo bias. Every kind maps its values onto a contiguous unsigned index
//! space with an order-preserving transform, a rejection sampler draws an
//! offset into that space, and the inverse transform maps back. For floats
//! the transform is the standard sign-magnitude bit flip, so the sampler is
//! uniform over the *representable* values in the range rather than over the
//! real interval.
//!
//! ## Rejection sampling
//!
//! [`sample_offset`] draws only as many bytes as the range needs, masks the
//! top byte down to the range's bit width, and retries on overshoot. Because
//! `2^bits <= 2 * (range + 1)`, each draw is accepted with probability above
//! one half and the expected number of draws is below two, independent of
//! how adversarial the range is (e.g. `2^k` ranges that a modulo reduction
//! would bias hardest).

use crate::scaled::Scaled64;
use rand::RngCore;

/// Uniform sampling between two inclusive bounds.
///
/// The bounds may be given in either order; they are normalized before
/// sampling. Both bounds are themselves possible results.
///
/// # Examples
///
/// ```rust
/// use capstan_core::random::BoundedUniform;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let v = i32::sample_between(&mut rng, 10, -10);
/// assert!((-10..=10).contains(&v));
/// ```
pub trait BoundedUniform: Sized {
    /// Draws a value uniformly from the inclusive range spanned by the two
    /// bounds.
    fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self;

    /// Draws a value uniformly from the kind's full representable range.
    fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self;
}

/// Draws a uniform offset in `0..=range` by rejection.
///
/// Only `ceil(bits / 8)` bytes are consumed per attempt, where `bits` is the
/// bit width of `range`, and the top byte is masked to that width before the
/// acceptance test. At most half of the masked space overshoots the range,
/// so fewer than two attempts are needed on average.
pub fn sample_offset<R: RngCore + ?Sized>(rng: &mut R, range: u64) -> u64 {
    if range == 0 {
        return 0;
    }
    let bits = 64 - range.leading_zeros();
    let nbytes = ((bits + 7) / 8) as usize;
    let mask: u8 = if bits % 8 == 0 {
        0xFF
    } else {
        (1u8 << (bits % 8)) - 1
    };
    let mut buf = [0u8; 8];
    loop {
        buf = [0u8; 8];
        rng.fill_bytes(&mut buf[..nbytes]);
        buf[nbytes - 1] &= mask;
        let candidate = u64::from_le_bytes(buf);
        if candidate <= range {
            return candidate;
        }
    }
}

/// Implements [`BoundedUniform`] for an integer kind through an
/// order-preserving map into `u64` index space. Unsigned kinds map
/// identically; signed kinds flip the sign bit so the index order matches
/// the numeric order.
macro_rules! bounded_uniform_int {
    ($t:ty, unsigned) => {
        impl BoundedUniform for $t {
            fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self {
                let lo = bound1.min(bound2) as u64;
                let hi = bound1.max(bound2) as u64;
                (lo + sample_offset(rng, hi - lo)) as $t
            }

            fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self {
                Self::sample_between(rng, <$t>::MIN, <$t>::MAX)
            }
        }
    };
    ($t:ty, signed, $ut:ty) => {
        impl BoundedUniform for $t {
            fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self {
                const FLIP: $ut = 1 << (<$t>::BITS - 1);
                let to_index = |v: $t| ((v as $ut) ^ FLIP) as u64;
                let from_index = |i: u64| ((i as $ut) ^ FLIP) as $t;
                let lo = to_index(bound1.min(bound2));
                let hi = to_index(bound1.max(bound2));
                from_index(lo + sample_offset(rng, hi - lo))
            }

            fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self {
                Self::sample_between(rng, <$t>::MIN, <$t>::MAX)
            }
        }
    };
}

bounded_uniform_int!(u8, unsigned);
bounded_uniform_int!(u16, unsigned);
bounded_uniform_int!(u32, unsigned);
bounded_uniform_int!(u64, unsigned);
bounded_uniform_int!(i8, signed, u8);
bounded_uniform_int!(i16, signed, u16);
bounded_uniform_int!(i32, signed, u32);
bounded_uniform_int!(i64, signed, u64);

/// Maps an `f64` onto `u64` index space so that bit order matches numeric
/// order: negative values have their bits inverted, non-negative values get
/// the sign bit set. Adjacent indices are adjacent representable doubles.
fn f64_to_index(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits | (1 << 63)
    }
}

/// The inverse of [`f64_to_index`].
fn f64_from_index(index: u64) -> f64 {
    if index & (1 << 63) != 0 {
        f64::from_bits(index & !(1 << 63))
    } else {
        f64::from_bits(!index)
    }
}

fn f32_to_index(value: f32) -> u32 {
    let bits = value.to_bits();
    if bits & (1 << 31) != 0 {
        !bits
    } else {
        bits | (1 << 31)
    }
}

fn f32_from_index(index: u32) -> f32 {
    if index & (1 << 31) != 0 {
        f32::from_bits(index & !(1 << 31))
    } else {
        f32::from_bits(!index)
    }
}

impl BoundedUniform for f64 {
    /// Uniform over the representable doubles in the range, not over the
    /// real interval: half of all doubles lie in `(-1, 1)`.
    fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self {
        let lo = f64_to_index(bound1.min(bound2));
        let hi = f64_to_index(bound1.max(bound2));
        f64_from_index(lo + sample_offset(rng, hi - lo))
    }

    fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::sample_between(rng, f64::MIN, f64::MAX)
    }
}

impl BoundedUniform for f32 {
    fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self {
        let lo = f32_to_index(bound1.min(bound2)) as u64;
        let hi = f32_to_index(bound1.max(bound2)) as u64;
        f32_from_index((lo + sample_offset(rng, hi - lo)) as u32)
    }

    fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::sample_between(rng, f32::MIN, f32::MAX)
    }
}

impl BoundedUniform for Scaled64 {
    fn sample_between<R: RngCore + ?Sized>(rng: &mut R, bound1: Self, bound2: Self) -> Self {
        Self::from_raw(i64::sample_between(rng, bound1.to_raw(), bound2.to_raw()))
    }

    fn sample_full<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::from_raw(i64::sample_full(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_offset_zero_range_consumes_nothing() {
        let mut r = rng(0);
        assert_eq!(sample_offset(&mut r, 0), 0);
    }

    #[test]
    fn test_offset_stays_within_range() {
        let mut r = rng(1);
        // Ranges straddling byte and mask boundaries.
        for range in [1, 2, 127, 128, 255, 256, 1023, u32::MAX as u64, u64::MAX] {
            for _ in 0..200 {
                assert!(sample_offset(&mut r, range) <= range);
            }
        }
    }

    #[test]
    fn test_offset_reaches_both_ends() {
        let mut r = rng(2);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[sample_offset(&mut r, 3) as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_signed_bounds_inclusive() {
        let mut r = rng(3);
        let mut hit_lo = false;
        let mut hit_hi = false;
        for _ in 0..500 {
            let v = i8::sample_between(&mut r, -3, 3);
            assert!((-3..=3).contains(&v));
            hit_lo |= v == -3;
            hit_hi |= v == 3;
        }
        assert!(hit_lo && hit_hi);
    }

    #[test]
    fn test_bound_order_is_irrelevant() {
        let mut a = rng(4);
        let mut b = rng(4);
        for _ in 0..100 {
            assert_eq!(
                i32::sample_between(&mut a, -50, 1000),
                i32::sample_between(&mut b, 1000, -50)
            );
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut r = rng(5);
        assert_eq!(u16::sample_between(&mut r, 42, 42), 42);
        assert_eq!(f64::sample_between(&mut r, -1.5, -1.5), -1.5);
    }

    #[test]
    fn test_full_range_is_well_defined() {
        let mut r = rng(6);
        // The full i64 range has a span of u64::MAX; this must not overflow.
        for _ in 0..50 {
            let _ = i64::sample_full(&mut r);
            let _ = u64::sample_full(&mut r);
            let v = f64::sample_full(&mut r);
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_float_values_stay_in_bounds() {
        let mut r = rng(7);
        for _ in 0..500 {
            let v = f64::sample_between(&mut r, -2.5, 7.25);
            assert!((-2.5..=7.25).contains(&v));
            let v = f32::sample_between(&mut r, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_float_index_transform_is_monotonic() {
        let samples = [
            f64::MIN,
            -1.0e10,
            -1.0,
            -f64::MIN_POSITIVE,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            1.0,
            1.0e10,
            f64::MAX,
        ];
        for pair in samples.windows(2) {
            assert!(f64_to_index(pair[0]) <= f64_to_index(pair[1]));
        }
        for &v in &samples {
            assert_eq!(f64_from_index(f64_to_index(v)).to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_scaled_sampling() {
        let mut r = rng(8);
        let lo: Scaled64 = "-1.5".parse().unwrap();
        let hi: Scaled64 = "2.25".parse().unwrap();
        for _ in 0..500 {
            let v = Scaled64::sample_between(&mut r, lo, hi);
            assert!(v >= lo && v <= hi);
        }
    }

    #[test]
    fn test_seeded_determinism() {
        let mut a = rng(99);
        let mut b = rng(99);
        for _ in 0..100 {
            assert_eq!(u64::sample_full(&mut a), u64::sample_full(&mut b));
        }
    }
}
