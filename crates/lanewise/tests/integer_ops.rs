//! Integer semantics on every tier
//!
//! Wrapping arithmetic, the emulated 64-bit multiply, lane-wise division,
//! shift counts at and past the lane width, unsigned ordering and rotates.


use lanewise::{
    I32x1, Simd, SimdBits, SimdCapability, SimdCompareOps, SimdInt32, SimdInt64, SimdMask,
    SimdSigned, SimdUInt, SimdUInt32, SimdUInt64,
};
use test_utils::*;

const SHIFT_COUNTS: [u32; 9] = [0, 1, 7, 31, 32, 33, 63, 64, 1000];

/// Pair every sample with every other sample, `lanes` pairs at a time.
fn pairs<T: Copy>(samples: &[T], lanes: usize) -> Vec<(Vec<T>, Vec<T>)> {
    let mut lhs = Vec::new();
    let mut rhs = Vec::new();
    for &a in samples {
        for &b in samples {
            lhs.push(a);
            rhs.push(b);
        }
    }
    blocks(&lhs, lanes).into_iter().zip(blocks(&rhs, lanes)).collect()
}

fn int64_arithmetic<V: SimdInt64>() {
    for (a, b) in pairs(&I64_SAMPLES, V::LANES) {
        let (va, vb) = (V::load(&a), V::load(&b));
        let (sum, diff, prod) = (va + vb, va - vb, va * vb);
        for i in 0..V::LANES {
            assert_eq!(sum.element(i), a[i].wrapping_add(b[i]), "{}", V::NAME);
            assert_eq!(diff.element(i), a[i].wrapping_sub(b[i]), "{}", V::NAME);
            assert_eq!(
                prod.element(i),
                a[i].wrapping_mul(b[i]),
                "{}: {} * {}",
                V::NAME,
                a[i],
                b[i]
            );
        }
    }
}

fn uint64_multiply<V: SimdUInt64>() {
    let samples = I64_SAMPLES.map(|x| x as u64);
    for (a, b) in pairs(&samples, V::LANES) {
        let prod = V::load(&a) * V::load(&b);
        for i in 0..V::LANES {
            assert_eq!(prod.element(i), a[i].wrapping_mul(b[i]), "{}", V::NAME);
        }
    }
}

#[test]
fn test_64bit_multiply_keeps_low_bits() {
    each_int64_tier!(int64_arithmetic);
    each_uint64_tier!(uint64_multiply);
}

fn int32_division<V: SimdInt32>() {
    let samples = [0, 1, -1, 7, -7, 100, i32::MAX, i32::MIN + 1, 3, -2];
    for (a, b) in pairs(&samples, V::LANES) {
        // Zero divisors are covered separately.
        let b: Vec<i32> = b.iter().map(|&d| if d == 0 { 5 } else { d }).collect();
        let q = V::load(&a) / V::load(&b);
        for i in 0..V::LANES {
            assert_eq!(q.element(i), a[i] / b[i], "{}: {} / {}", V::NAME, a[i], b[i]);
        }
    }
}

fn uint32_division<V: SimdUInt32>() {
    for (a, b) in pairs(&U32_SAMPLES, V::LANES) {
        let b: Vec<u32> = b.iter().map(|&d| d.max(1)).collect();
        let q = V::load(&a) / V::load(&b);
        for i in 0..V::LANES {
            assert_eq!(q.element(i), a[i] / b[i], "{}", V::NAME);
        }
    }
}

#[test]
fn test_division_truncates_toward_zero() {
    each_int32_tier!(int32_division);
    each_uint32_tier!(uint32_division);
}

#[test]
#[should_panic]
fn test_division_by_zero_panics() {
    let _ = I32x1(1) / I32x1(0);
}

fn shl_u32(x: u32, n: u32) -> u32 {
    x.checked_shl(n).unwrap_or(0)
}

fn shr_u32(x: u32, n: u32) -> u32 {
    x.checked_shr(n).unwrap_or(0)
}

fn int32_uniform_shifts<V: SimdInt32>() {
    let samples = [1, -1, i32::MIN, i32::MAX, 0x1234_5678, -0x1234_5678, 0, 42];
    for block in blocks(&samples, V::LANES) {
        let v = V::load(&block);
        for n in SHIFT_COUNTS {
            let (left, right) = (v << n, v >> n);
            for i in 0..V::LANES {
                let x = block[i];
                assert_eq!(left.element(i), shl_u32(x as u32, n) as i32, "{}: {x} << {n}", V::NAME);
                assert_eq!(right.element(i), x >> n.min(31), "{}: {x} >> {n}", V::NAME);
            }
        }
    }
}

fn uint32_uniform_shifts<V: SimdUInt32>() {
    for block in blocks(&U32_SAMPLES, V::LANES) {
        let v = V::load(&block);
        for n in SHIFT_COUNTS {
            let (left, right) = (v << n, v >> n);
            for i in 0..V::LANES {
                assert_eq!(left.element(i), shl_u32(block[i], n), "{}", V::NAME);
                assert_eq!(right.element(i), shr_u32(block[i], n), "{}", V::NAME);
            }
        }
    }
}

fn int64_uniform_shifts<V: SimdInt64>() {
    for block in blocks(&I64_SAMPLES, V::LANES) {
        let v = V::load(&block);
        for n in SHIFT_COUNTS {
            let (left, right) = (v << n, v >> n);
            for i in 0..V::LANES {
                let x = block[i];
                let want_left = (x as u64).checked_shl(n).unwrap_or(0) as i64;
                assert_eq!(left.element(i), want_left, "{}: {x} << {n}", V::NAME);
                assert_eq!(right.element(i), x >> n.min(63), "{}: {x} >> {n}", V::NAME);
            }
        }
    }
}

#[test]
fn test_uniform_shift_counts_past_lane_width() {
    each_int32_tier!(int32_uniform_shifts);
    each_uint32_tier!(uint32_uniform_shifts);
    each_int64_tier!(int64_uniform_shifts);
}

fn int32_per_lane_shifts<V: SimdInt32>() {
    let counts = [0, 3, 31, 32, 40, -1, 16, 1];
    let values = [-8, -8, -8, -8, 0x0f0f_0f0f, i32::MIN, 0x7fff_0000, 5];
    for (c, x) in blocks(&counts, V::LANES).iter().zip(blocks(&values, V::LANES)) {
        let (vc, vx) = (V::load(c), V::load(&x));
        let (left, right) = (vx << vc, vx >> vc);
        for i in 0..V::LANES {
            let n = c[i] as u32;
            assert_eq!(left.element(i), shl_u32(x[i] as u32, n) as i32, "{}", V::NAME);
            assert_eq!(right.element(i), x[i] >> n.min(31), "{}", V::NAME);
        }
    }
}

fn uint64_per_lane_shifts<V: SimdUInt64>() {
    let counts = [0u64, 1, 63, 64, 65, u64::MAX, 32, 12];
    let values = [u64::MAX, 1, u64::MAX, u64::MAX, 7, 7, 0xdead_beef_0000_0001, 1 << 40];
    for (c, x) in blocks(&counts, V::LANES).iter().zip(blocks(&values, V::LANES)) {
        let (vc, vx) = (V::load(c), V::load(&x));
        let (left, right) = (vx << vc, vx >> vc);
        for i in 0..V::LANES {
            let n = u32::try_from(c[i]).unwrap_or(u32::MAX);
            assert_eq!(left.element(i), x[i].checked_shl(n).unwrap_or(0), "{}", V::NAME);
            assert_eq!(right.element(i), x[i].checked_shr(n).unwrap_or(0), "{}", V::NAME);
        }
    }
}

#[test]
fn test_per_lane_shift_counts() {
    each_int32_tier!(int32_per_lane_shifts);
    each_uint64_tier!(uint64_per_lane_shifts);
}

fn rotates<V: SimdUInt32>() {
    for block in blocks(&U32_SAMPLES, V::LANES) {
        let v = V::load(&block);
        for n in [0, 1, 5, 31, 32, 37] {
            for i in 0..V::LANES {
                assert_eq!(v.rotl(n).element(i), block[i].rotate_left(n), "{}", V::NAME);
                assert_eq!(v.rotr(n).element(i), block[i].rotate_right(n), "{}", V::NAME);
            }
        }
    }
}

fn rotates64<V: SimdUInt64>() {
    let samples = I64_SAMPLES.map(|x| x as u64);
    for block in blocks(&samples, V::LANES) {
        let v = V::load(&block);
        for n in [0, 1, 13, 63, 64, 100] {
            for i in 0..V::LANES {
                assert_eq!(v.rotl(n).element(i), block[i].rotate_left(n), "{}", V::NAME);
                assert_eq!(v.rotr(n).element(i), block[i].rotate_right(n), "{}", V::NAME);
            }
        }
    }
}

#[test]
fn test_rotate_counts_wrap() {
    each_uint32_tier!(rotates);
    each_uint64_tier!(rotates64);
}

fn unsigned_ordering<V: SimdUInt32>() {
    for (a, b) in pairs(&U32_SAMPLES, V::LANES) {
        let (va, vb) = (V::load(&a), V::load(&b));
        let (lt, le, gt, ge) = (
            va.compare_lt(vb),
            va.compare_le(vb),
            va.compare_gt(vb),
            va.compare_ge(vb),
        );
        for i in 0..V::LANES {
            assert_eq!(lt.test(i), a[i] < b[i], "{}: {} < {}", V::NAME, a[i], b[i]);
            assert_eq!(le.test(i), a[i] <= b[i], "{}", V::NAME);
            assert_eq!(gt.test(i), a[i] > b[i], "{}", V::NAME);
            assert_eq!(ge.test(i), a[i] >= b[i], "{}", V::NAME);
        }
    }
}

fn unsigned_ordering64<V: SimdUInt64>() {
    let samples = I64_SAMPLES.map(|x| x as u64);
    for (a, b) in pairs(&samples, V::LANES) {
        let gt = V::load(&a).compare_gt(V::load(&b));
        let eq = V::load(&a).compare_eq(V::load(&b));
        for i in 0..V::LANES {
            assert_eq!(gt.test(i), a[i] > b[i], "{}: {} > {}", V::NAME, a[i], b[i]);
            assert_eq!(eq.test(i), a[i] == b[i], "{}", V::NAME);
        }
    }
}

fn signed_ordering64<V: SimdInt64>() {
    for (a, b) in pairs(&I64_SAMPLES, V::LANES) {
        let (lt, ne) = (V::load(&a).compare_lt(V::load(&b)), V::load(&a).compare_neq(V::load(&b)));
        for i in 0..V::LANES {
            assert_eq!(lt.test(i), a[i] < b[i], "{}: {} < {}", V::NAME, a[i], b[i]);
            assert_eq!(ne.test(i), a[i] != b[i], "{}", V::NAME);
        }
    }
}

#[test]
fn test_ordering_uses_lane_signedness() {
    each_uint32_tier!(unsigned_ordering);
    each_uint64_tier!(unsigned_ordering64);
    each_int64_tier!(signed_ordering64);
}

fn wrapping_sign_ops32<V: SimdInt32>() {
    let v = V::make_set1(i32::MIN);
    assert_eq!(v.abs().element(0), i32::MIN, "{}", V::NAME);
    assert_eq!((-v).element(0), i32::MIN, "{}", V::NAME);
    assert_eq!(V::make_set1(-5).abs().element(V::LANES - 1), 5);
    assert_eq!((V::make_set1(i32::MAX) + V::make_set1(1)).element(0), i32::MIN);
}

fn wrapping_sign_ops64<V: SimdInt64>() {
    let v = V::make_set1(i64::MIN);
    assert_eq!(v.abs().element(0), i64::MIN, "{}", V::NAME);
    assert_eq!((-v).element(0), i64::MIN, "{}", V::NAME);
    for block in blocks(&I64_SAMPLES, V::LANES) {
        let abs = V::load(&block).abs();
        for i in 0..V::LANES {
            assert_eq!(abs.element(i), block[i].wrapping_abs(), "{}", V::NAME);
        }
    }
}

#[test]
fn test_abs_and_neg_wrap_at_min() {
    each_int32_tier!(wrapping_sign_ops32);
    each_int64_tier!(wrapping_sign_ops64);
}

fn bitwise<V: SimdUInt32>() {
    let (a, b) = (V::make_set1(0b1100), V::make_set1(0b1010));
    assert_eq!((a & b).element(0), 0b1000);
    assert_eq!((a | b).element(0), 0b1110);
    assert_eq!((a ^ b).element(0), 0b0110);
    assert_eq!((!a).element(V::LANES - 1), !0b1100u32, "{}", V::NAME);
    let mut c = a;
    c &= b;
    c |= V::make_set1(1);
    c <<= 2;
    assert_eq!(c.element(0), 0b100100, "{}", V::NAME);
}

#[test]
fn test_bitwise_operators() {
    each_uint32_tier!(bitwise);
}

/// Written against `SimdBits` alone, so every integer family must be a member.
fn toggle_masked<V: SimdBits>(v: V, mask: V) -> V {
    let mut out = v & mask;
    out ^= mask;
    !(out | (v >> 31u32))
}

fn bits_lattice_i32<V: SimdInt32>() {
    let got = toggle_masked(V::make_set1(0b1010), V::make_set1(0b0110));
    assert_eq!(got.element(V::LANES - 1), !0b0100, "{}", V::NAME);
}

fn bits_lattice_i64<V: SimdInt64>() {
    let got = toggle_masked(V::make_set1(-2), V::make_set1(0b0110));
    // -2 & 6 == 6 cancels the toggle; the arithmetic shift fills with ones.
    assert_eq!(got.element(0), 0, "{}", V::NAME);
}

fn bits_lattice_u32<V: SimdUInt32>() {
    let got = toggle_masked(V::make_set1(u32::MAX), V::make_set1(0b0110));
    assert_eq!(got.element(0), !1, "{}", V::NAME);
}

fn bits_lattice_u64<V: SimdUInt64>() {
    let got = toggle_masked(V::make_set1(1 << 40), V::make_set1(0b0110));
    assert_eq!(got.element(0), !(0b0110 | 1 << 9), "{}", V::NAME);
}

#[test]
fn test_every_integer_family_has_bit_ops() {
    each_int32_tier!(bits_lattice_i32);
    each_int64_tier!(bits_lattice_i64);
    each_uint32_tier!(bits_lattice_u32);
    each_uint64_tier!(bits_lattice_u64);
}

#[test]
fn test_mask_drives_integer_blend() {
    fn check<V: SimdInt32>() {
        let seq = V::make_sequential(0);
        let odd = (seq & V::make_set1(1)).compare_eq(V::make_set1(1));
        let picked = V::blend(V::make_set1(-1), seq, odd);
        for i in 0..V::LANES {
            let want = if i % 2 == 1 { i as i32 } else { -1 };
            assert_eq!(picked.element(i), want, "{}", V::NAME);
        }
        assert_eq!(odd.any(), V::LANES > 1);
    }
    each_int32_tier!(check);
}

#[test]
fn test_capability_constants() {
    assert_eq!(<lanewise::I64x1 as SimdCapability>::NAME, "I64x1");
    assert!(<lanewise::U32x1 as SimdCapability>::compiler_supported());
}
