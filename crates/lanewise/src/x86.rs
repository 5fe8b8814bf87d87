//! Emulated x86 instructions
//!
//! Register-level replacements for instructions a tier's baseline lacks.
//! Each one returns exactly what the missing instruction would.
//!
//! # Safety
//!
//! All functions require the tier's baseline features (SSE2 for the `_128`
//! helpers, AVX2 for the `_256` helpers).

#![allow(clippy::missing_safety_doc)]

use core::arch::x86_64::*;

/// `(~mask & if_false) | (mask & if_true)`
#[inline(always)]
pub(crate) unsafe fn select_128(if_false: __m128i, if_true: __m128i, mask: __m128i) -> __m128i {
    _mm_or_si128(_mm_andnot_si128(mask, if_false), _mm_and_si128(mask, if_true))
}

/// `pmulld` from SSE2: multiply even and odd lanes separately, then
/// interleave the low halves.
#[inline(always)]
pub(crate) unsafe fn mullo_epi32_128(a: __m128i, b: __m128i) -> __m128i {
    let even = _mm_mul_epu32(a, b);
    let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(a), _mm_srli_epi64::<32>(b));
    _mm_unpacklo_epi32(
        _mm_shuffle_epi32::<0b00_00_10_00>(even),
        _mm_shuffle_epi32::<0b00_00_10_00>(odd),
    )
}

/// Low 64 bits of a 64x64 product.
///
/// With `a = 2^32 a_hi + a_lo` and `b = 2^32 b_hi + b_lo`:
/// `a * b mod 2^64 = a_lo b_lo + 2^32 (a_lo b_hi + a_hi b_lo)`.
/// The `2^64 a_hi b_hi` term vanishes. Valid for signed and unsigned lanes.
#[inline(always)]
pub(crate) unsafe fn mullo_epi64_128(a: __m128i, b: __m128i) -> __m128i {
    let lo = _mm_mul_epu32(a, b);
    let cross = _mm_add_epi64(
        _mm_mul_epu32(a, _mm_srli_epi64::<32>(b)),
        _mm_mul_epu32(_mm_srli_epi64::<32>(a), b),
    );
    _mm_add_epi64(lo, _mm_slli_epi64::<32>(cross))
}

#[inline(always)]
pub(crate) unsafe fn mullo_epi64_256(a: __m256i, b: __m256i) -> __m256i {
    let lo = _mm256_mul_epu32(a, b);
    let cross = _mm256_add_epi64(
        _mm256_mul_epu32(a, _mm256_srli_epi64::<32>(b)),
        _mm256_mul_epu32(_mm256_srli_epi64::<32>(a), b),
    );
    _mm256_add_epi64(lo, _mm256_slli_epi64::<32>(cross))
}

/// `pcmpeqq` from SSE2: both 32-bit halves must match.
#[inline(always)]
pub(crate) unsafe fn cmpeq_epi64_128(a: __m128i, b: __m128i) -> __m128i {
    let eq = _mm_cmpeq_epi32(a, b);
    _mm_and_si128(eq, _mm_shuffle_epi32::<0b10_11_00_01>(eq))
}

/// `pcmpgtq` from SSE2: compare the high halves signed and, where they tie,
/// the low halves unsigned.
#[inline(always)]
pub(crate) unsafe fn cmpgt_epi64_128(a: __m128i, b: __m128i) -> __m128i {
    if cfg!(target_feature = "sse4.2") {
        return _mm_cmpgt_epi64(a, b);
    }
    let hi_gt = _mm_cmpgt_epi32(a, b);
    let hi_eq = _mm_cmpeq_epi32(a, b);
    let lo_gt = _mm_cmpgt_epi32(flip_epi32_128(a), flip_epi32_128(b));
    let gt = _mm_or_si128(hi_gt, _mm_and_si128(hi_eq, _mm_shuffle_epi32::<0b10_11_00_01>(lo_gt)));
    _mm_shuffle_epi32::<0b11_11_01_01>(gt)
}

/// Sign mask of each 64-bit lane (all-ones where negative).
#[inline(always)]
pub(crate) unsafe fn sign_epi64_128(a: __m128i) -> __m128i {
    _mm_shuffle_epi32::<0b11_11_01_01>(_mm_srai_epi32::<31>(a))
}

/// `vpsraq` with a uniform count: logical shift, then sign-extend from the
/// shifted-down sign bit.
#[inline(always)]
pub(crate) unsafe fn sra_epi64_128(x: __m128i, n: u32) -> __m128i {
    let n = n.min(63);
    let shifted = _mm_srl_epi64(x, _mm_cvtsi64_si128(i64::from(n)));
    let sign = _mm_set1_epi64x((1u64 << (63 - n)) as i64);
    _mm_sub_epi64(_mm_xor_si128(shifted, sign), sign)
}

#[inline(always)]
pub(crate) unsafe fn sra_epi64_256(x: __m256i, n: u32) -> __m256i {
    let n = n.min(63);
    let shifted = _mm256_srl_epi64(x, _mm_cvtsi64_si128(i64::from(n)));
    let sign = _mm256_set1_epi64x((1u64 << (63 - n)) as i64);
    _mm256_sub_epi64(_mm256_xor_si256(shifted, sign), sign)
}

/// Flip the sign bit of 32-bit lanes so signed compares order unsigned values.
#[inline(always)]
pub(crate) unsafe fn flip_epi32_128(a: __m128i) -> __m128i {
    _mm_xor_si128(a, _mm_set1_epi32(i32::MIN))
}

#[inline(always)]
pub(crate) unsafe fn flip_epi32_256(a: __m256i) -> __m256i {
    _mm256_xor_si256(a, _mm256_set1_epi32(i32::MIN))
}

#[inline(always)]
pub(crate) unsafe fn flip_epi64_128(a: __m128i) -> __m128i {
    _mm_xor_si128(a, _mm_set1_epi64x(i64::MIN))
}

#[inline(always)]
pub(crate) unsafe fn flip_epi64_256(a: __m256i) -> __m256i {
    _mm256_xor_si256(a, _mm256_set1_epi64x(i64::MIN))
}

/// `vcvtudq2ps` from SSE2. Both 16-bit halves convert exactly, so the
/// final add is the only rounding step.
#[inline(always)]
pub(crate) unsafe fn cvtepu32_ps_128(x: __m128i) -> __m128 {
    let hi = _mm_cvtepi32_ps(_mm_srli_epi32::<16>(x));
    let lo = _mm_cvtepi32_ps(_mm_and_si128(x, _mm_set1_epi32(0xffff)));
    _mm_add_ps(_mm_mul_ps(hi, _mm_set1_ps(65536.0)), lo)
}

#[inline(always)]
pub(crate) unsafe fn cvtepu32_ps_256(x: __m256i) -> __m256 {
    let hi = _mm256_cvtepi32_ps(_mm256_srli_epi32::<16>(x));
    let lo = _mm256_cvtepi32_ps(_mm256_and_si256(x, _mm256_set1_epi32(0xffff)));
    _mm256_add_ps(_mm256_mul_ps(hi, _mm256_set1_ps(65536.0)), lo)
}

/// Shift count register for the `sll`/`srl`/`sra` family. Counts at or
/// above the lane width are passed through so the hardware clears (or
/// sign-fills) the lane.
#[inline(always)]
pub(crate) unsafe fn count(n: u32) -> __m128i {
    _mm_cvtsi64_si128(i64::from(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes32(v: __m128i) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), v) };
        out
    }

    fn lanes64(v: __m128i) -> [i64; 2] {
        let mut out = [0i64; 2];
        unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), v) };
        out
    }

    #[test]
    fn test_mullo_epi32_matches_wrapping_mul() {
        let a = [7, -3, i32::MAX, 65_537];
        let b = [6, 11, 3, 65_539];
        let got = lanes32(unsafe {
            mullo_epi32_128(
                _mm_setr_epi32(a[0], a[1], a[2], a[3]),
                _mm_setr_epi32(b[0], b[1], b[2], b[3]),
            )
        });
        for i in 0..4 {
            assert_eq!(got[i], a[i].wrapping_mul(b[i]));
        }
    }

    #[test]
    fn test_mullo_epi64_matches_wrapping_mul() {
        let a = [-123_456_789_012i64, 0x1234_5678_9abc_def0];
        let b = [987_654_321i64, -0x0fed_cba9_8765_4321];
        let got = lanes64(unsafe {
            mullo_epi64_128(_mm_set_epi64x(a[1], a[0]), _mm_set_epi64x(b[1], b[0]))
        });
        assert_eq!(got, [a[0].wrapping_mul(b[0]), a[1].wrapping_mul(b[1])]);
    }

    #[test]
    fn test_sra_epi64_sign_extends() {
        let x = unsafe { _mm_set_epi64x(i64::MIN + 5, 1 << 40) };
        for n in [0u32, 1, 17, 63, 64, 200] {
            let got = lanes64(unsafe { sra_epi64_128(x, n) });
            let m = u64::from(n).min(63);
            assert_eq!(got, [(1i64 << 40) >> m, (i64::MIN + 5) >> m]);
        }
    }

    #[test]
    fn test_cmpeq_epi64_needs_both_halves() {
        let a = unsafe { _mm_set_epi64x(5, 1 << 32) };
        let b = unsafe { _mm_set_epi64x(5, 1) };
        assert_eq!(lanes64(unsafe { cmpeq_epi64_128(a, b) }), [0, -1]);
    }

    #[test]
    fn test_cmpgt_epi64_orders_both_halves() {
        let pairs = [
            (1i64 << 32, 1i64),
            (-1, 0),
            (0xffff_ffff, 0x1_0000_0000),
            (i64::MIN, i64::MAX),
            (i64::MAX, i64::MAX - 1),
            (-5, -6),
        ];
        for pair in pairs.chunks(2) {
            let (a, b) = (pair[0], pair[1]);
            let got = lanes64(unsafe {
                cmpgt_epi64_128(_mm_set_epi64x(b.0, a.0), _mm_set_epi64x(b.1, a.1))
            });
            assert_eq!(got, [-((a.0 > a.1) as i64), -((b.0 > b.1) as i64)]);
        }
    }

    #[test]
    fn test_unsigned_conversion_rounds_once() {
        let x = [0u32, 1, 16_777_217, u32::MAX];
        let v = unsafe {
            cvtepu32_ps_128(_mm_setr_epi32(x[0] as i32, x[1] as i32, x[2] as i32, x[3] as i32))
        };
        let mut out = [0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
        for i in 0..4 {
            assert_eq!(out[i], x[i] as f32);
        }
    }
}
