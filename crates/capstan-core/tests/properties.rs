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

//! Cross-module properties exercised with seeded randomized inputs: the
//! saturating surfaces agree with exact 128-bit reference arithmetic, the
//! codec is an exact inverse, the fixed-point algebra round-trips, and the
//! bounded sampler is statistically uniform.

use capstan_core::arith::{self, Scale};
use capstan_core::codec::BitCodec;
use capstan_core::convert::convert;
use capstan_core::policy::ConversionPolicy;
use capstan_core::random::{sample_offset, BoundedUniform};
use capstan_core::scaled::Scaled64;
use capstan_core::Decimal;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn saturating_add_matches_wide_reference() {
    let mut r = rng(11);
    for _ in 0..10_000 {
        let a: i32 = r.random();
        let b: i32 = r.random();
        let expected = (a as i128 + b as i128).clamp(i32::MIN as i128, i32::MAX as i128) as i32;
        assert_eq!(arith::add(a, b), expected, "add({}, {})", a, b);
    }
}

#[test]
fn saturating_mul_matches_wide_reference() {
    let mut r = rng(12);
    for _ in 0..10_000 {
        let a: i16 = r.random();
        let b: i16 = r.random();
        let expected = (a as i128 * b as i128).clamp(i16::MIN as i128, i16::MAX as i128) as i16;
        assert_eq!(arith::mul(a, b), expected, "mul({}, {})", a, b);
    }
}

#[test]
fn strict_arithmetic_agrees_with_saturation() {
    // try_* succeeds exactly when the saturating result equals the exact
    // result; when it fails the saturating result sits on a bound.
    let mut r = rng(13);
    for _ in 0..10_000 {
        let a: i8 = r.random();
        let b: i8 = r.random();
        let saturated = arith::mul(a, b);
        match arith::try_mul::<i8>(a, b) {
            Ok(v) => assert_eq!(v, saturated),
            Err(_) => assert!(saturated == i8::MIN || saturated == i8::MAX),
        }
    }
}

#[test]
fn clamped_conversions_never_leave_the_target_range() {
    let mut r = rng(14);
    for _ in 0..10_000 {
        let v: i64 = r.random();
        let as_u8: u8 = convert(v, ConversionPolicy::Clamp).unwrap();
        let as_i16: i16 = convert(v, ConversionPolicy::Clamp).unwrap();
        assert_eq!(as_u8 as i64, v.clamp(0, u8::MAX as i64));
        assert_eq!(as_i16 as i64, v.clamp(i16::MIN as i64, i16::MAX as i64));
    }
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0e300, 0.5] {
        let out: u32 = convert(v, ConversionPolicy::Clamp).unwrap();
        let expected = if v.is_nan() {
            0
        } else {
            v.clamp(0.0, u32::MAX as f64).trunc() as u32
        };
        assert_eq!(out, expected);
    }
}

#[test]
fn throw_policy_accepts_exactly_the_in_range_values() {
    let mut r = rng(15);
    for _ in 0..10_000 {
        let v: i32 = r.random();
        let strict = convert::<i32, i16>(v, ConversionPolicy::Throw);
        let in_range = v >= i16::MIN as i32 && v <= i16::MAX as i32;
        assert_eq!(strict.is_ok(), in_range, "value {}", v);
    }
}

#[test]
fn codec_is_an_exact_inverse() {
    let mut r = rng(16);
    for _ in 0..5_000 {
        let v: i64 = r.random();
        assert_eq!(i64::decode(&v.encode()).unwrap(), v);
        let v: u32 = r.random();
        assert_eq!(u32::decode(&v.encode()).unwrap(), v);
        let v: f64 = f64::from_bits(r.random());
        let decoded = f64::decode(&v.encode()).unwrap();
        assert_eq!(decoded.to_bits(), v.to_bits());
    }
    for _ in 0..5_000 {
        let raw: i64 = r.random();
        let v = Scaled64::from_raw(raw);
        assert_eq!(Scaled64::decode(&v.encode()).unwrap(), v);
        // Random but valid decimal: 96-bit magnitude with scale 0..=28.
        let d = Decimal::from_parts(r.random(), r.random(), r.random(), r.random(), r.random_range(0..=28));
        assert_eq!(Decimal::decode(&d.encode()).unwrap(), d);
    }
}

#[test]
fn scaled_multiply_then_divide_round_trips() {
    let mut r = rng(17);
    for _ in 0..5_000 {
        // Keep operands small enough that the product is exact in raw units.
        let a: i64 = r.random_range(-1_000_000_000..=1_000_000_000);
        let b: i64 = r.random_range(1..=1_000_000) * 1_000_000;
        let product = arith::scaled_mul(a, b, Scale::MICRO);
        assert_eq!(arith::scaled_div(product, b, Scale::MICRO), a);
    }
}

#[test]
fn scaled_parse_format_round_trips() {
    let mut r = rng(18);
    for _ in 0..5_000 {
        let v = Scaled64::from_raw(r.random());
        let reparsed: Scaled64 = v.to_string().parse().unwrap();
        assert_eq!(reparsed, v);
    }
}

#[test]
fn sampler_is_uniform_over_a_small_range() {
    let mut r = rng(19);
    let mut counts = [0u32; 3];
    for _ in 0..300_000 {
        counts[u32::sample_between(&mut r, 0, 2) as usize] += 1;
    }
    // Each bucket expects 100,000 draws with a standard deviation near 258;
    // a 1,500 tolerance is close to six sigma.
    for (value, &count) in counts.iter().enumerate() {
        assert!(
            (count as i64 - 100_000).abs() < 1_500,
            "value {} drawn {} times",
            value,
            count
        );
    }
}

#[test]
fn sampler_handles_adversarial_ranges() {
    let mut r = rng(20);
    // Ranges of the form 2^k - 1 saturate the bit mask, and 2^k ranges
    // force a retry loop with acceptance barely above one half.
    for k in [1u32, 7, 8, 15, 31, 63] {
        let range = if k == 63 { u64::MAX } else { (1u64 << k) - 1 };
        for _ in 0..1_000 {
            assert!(sample_offset(&mut r, range) <= range);
        }
        if k < 63 {
            let range = 1u64 << k;
            for _ in 0..1_000 {
                assert!(sample_offset(&mut r, range) <= range);
            }
        }
    }
}

#[test]
fn sampled_integers_convert_cleanly_across_kinds() {
    // A pipeline a caller would actually run: sample, convert, encode.
    let mut r = rng(21);
    for _ in 0..2_000 {
        let v = i64::sample_between(&mut r, -5_000, 5_000);
        let narrowed: i16 = convert(v, ConversionPolicy::Throw).unwrap();
        assert_eq!(narrowed as i64, v);
        let scaled: Scaled64 = convert(v, ConversionPolicy::Clamp).unwrap();
        assert_eq!(scaled, Scaled64::from_int(v));
        assert_eq!(Scaled64::decode(&scaled.encode()).unwrap(), scaled);
    }
}
