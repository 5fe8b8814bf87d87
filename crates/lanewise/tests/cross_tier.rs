//! Cross-tier consistency
//!
//! Every tier must agree lane for lane with the 1-wide fallback: rounding,
//! comparisons, min/max NaN handling, conversions and the libm-backed
//! transcendentals all produce identical bits. Tiers the host cannot run are
//! skipped.


use approx::assert_relative_eq;
use lanewise::{
    F32x1, F64x1, Simd, SimdCapability, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloat64,
    SimdInt32, SimdInt64, SimdMask, SimdMath, SimdReal, SimdSigned, SimdUInt32, SimdUInt64,
};
use test_utils::*;

fn rounding_matches_fallback_f32<V: SimdFloat32>() {
    for block in blocks(&F32_ROUNDING_SAMPLES, V::LANES) {
        let v = V::load(&block);
        let (floor, ceil, trunc, round) = (v.floor(), v.ceil(), v.trunc(), v.round());
        let ints = v.to_int_trunc();
        for (i, &x) in block.iter().enumerate() {
            let s = F32x1::make_set1(x);
            let name = V::NAME;
            assert!(same_f32(floor.element(i), s.floor().0), "{name}: floor({x})");
            assert!(same_f32(ceil.element(i), s.ceil().0), "{name}: ceil({x})");
            assert!(same_f32(trunc.element(i), s.trunc().0), "{name}: trunc({x})");
            assert!(same_f32(round.element(i), s.round().0), "{name}: round({x})");
            assert_eq!(ints.element(i), s.to_int_trunc().0, "{name}: to_int_trunc({x})");
        }
    }
}

fn rounding_matches_fallback_f64<V: SimdFloat64>() {
    for block in blocks(&F64_ROUNDING_SAMPLES, V::LANES) {
        let v = V::load(&block);
        let (floor, ceil, trunc, round) = (v.floor(), v.ceil(), v.trunc(), v.round());
        let ints = v.to_int_trunc();
        for (i, &x) in block.iter().enumerate() {
            let s = F64x1::make_set1(x);
            let name = V::NAME;
            assert!(same_f64(floor.element(i), s.floor().0), "{name}: floor({x})");
            assert!(same_f64(ceil.element(i), s.ceil().0), "{name}: ceil({x})");
            assert!(same_f64(trunc.element(i), s.trunc().0), "{name}: trunc({x})");
            assert!(same_f64(round.element(i), s.round().0), "{name}: round({x})");
            assert_eq!(ints.element(i), s.to_int_trunc().0, "{name}: to_int_trunc({x})");
        }
    }
}

#[test]
fn test_rounding_is_bit_exact_across_tiers() {
    each_float32_tier!(rounding_matches_fallback_f32);
    each_float64_tier!(rounding_matches_fallback_f64);
}

#[test]
fn test_round_is_half_to_even() {
    fn check<V: SimdFloat32>() {
        let v = V::make_set1(2.5);
        assert_eq!(v.round().element(0), 2.0, "{}", V::NAME);
        assert_eq!(V::make_set1(-3.5).round().element(V::LANES - 1), -4.0, "{}", V::NAME);
        assert!(V::make_set1(-0.4).round().element(0).is_sign_negative());
    }
    each_float32_tier!(check);
}

fn blend_takes_false_first<V: SimdFloat32>() {
    let seq = V::make_sequential(0.0);
    let mask = seq.compare_lt(V::make_set1(2.0));
    let picked = V::blend(V::make_set1(-1.0), seq, mask);
    for i in 0..V::LANES {
        let want = if i < 2 { i as f32 } else { -1.0 };
        assert_eq!(picked.element(i), want, "{} lane {i}", V::NAME);
    }
    assert_eq!(seq.if_less(V::make_set1(2.0), seq, V::make_set1(-1.0)), picked);
}

#[test]
fn test_blend_argument_order() {
    each_float32_tier!(blend_takes_false_first);
}

fn clamp_to_unit<V: SimdFloat32>() {
    let input = [-1.0f32, 0.5, 2.0, 5.0];
    let want = [0.0f32, 0.5, 1.0, 1.0];
    for (inputs, wants) in blocks(&input, V::LANES).iter().zip(blocks(&want, V::LANES)) {
        let got = V::load(inputs).clamp(V::make_set1(0.0), V::make_set1(1.0));
        let mut out = vec![0.0f32; V::LANES];
        got.store(&mut out);
        assert_eq!(out, wants, "{}", V::NAME);
    }
}

#[test]
fn test_clamp_to_unit_interval() {
    each_float32_tier!(clamp_to_unit);
}

fn nan_handling<V: SimdFloat32>() {
    let nan = V::make_set1(f32::NAN);
    let one = V::make_set1(1.0);
    assert!(nan.compare_eq(nan).none(), "{}", V::NAME);
    assert!(nan.compare_neq(nan).all(), "{}", V::NAME);
    assert!(nan.compare_lt(one).none() && nan.compare_ge(one).none());
    // NaN in either operand yields the second operand.
    assert_eq!(nan.min(one).element(0), 1.0);
    assert_eq!(nan.max(one).element(0), 1.0);
    assert!(one.min(nan).element(0).is_nan());
    assert!(one.max(nan).element(0).is_nan());
}

#[test]
fn test_nan_compares_and_min_max() {
    each_float32_tier!(nan_handling);
}

fn compare_masks<V: SimdFloat64>() {
    let seq = V::make_sequential(0.0);
    let pivot = V::make_set1(1.0);
    let full = (1u64 << V::LANES) - 1;
    let below = 0b1u64;
    let at_or_below = if V::LANES > 1 { 0b11 } else { 0b1 };
    assert_eq!(seq.compare_lt(pivot).bitmask(), below, "{}", V::NAME);
    assert_eq!(seq.compare_le(pivot).bitmask(), at_or_below, "{}", V::NAME);
    assert_eq!(seq.compare_gt(pivot).bitmask(), full & !at_or_below);
    assert_eq!(seq.compare_ge(pivot).bitmask(), full & !below);
    assert_eq!(seq.compare_eq(pivot).bitmask(), at_or_below & !below);
    assert_eq!(seq.compare_neq(pivot).bitmask(), full & !(at_or_below & !below));
}

#[test]
fn test_compare_bitmasks() {
    each_float64_tier!(compare_masks);
}

fn fused_ops<V: SimdFloat64>() {
    let (a, b, c) = (V::make_set1(3.0), V::make_set1(4.0), V::make_set1(5.0));
    assert_eq!(a.fma(b, c).element(0), 17.0, "{}", V::NAME);
    assert_eq!(a.fms(b, c).element(0), 7.0, "{}", V::NAME);
    assert_eq!(a.fnma(b, c).element(0), -7.0, "{}", V::NAME);
    assert_eq!(a.fnms(b, c).element(0), -17.0, "{}", V::NAME);
}

#[test]
fn test_fused_multiply_variants() {
    each_float64_tier!(fused_ops);
}

fn fused_cancellation_f32<V: SimdFloat32>() {
    // a * a = 1 + 2^-12 + 2^-26; the last term only survives a single rounding.
    let a = 1.0 + f32::powi(2.0, -13);
    let va = V::make_set1(a);
    let one = V::make_set1(1.0);
    let name = V::NAME;
    assert_eq!(va.fma(va, -one).element(0), libm::fmaf(a, a, -1.0), "{name}");
    assert_eq!(va.fms(va, one).element(0), libm::fmaf(a, a, -1.0), "{name}");
    assert_eq!(va.fnma(va, one).element(0), libm::fmaf(-a, a, 1.0), "{name}");
    assert_eq!(va.fnms(va, -one).element(0), libm::fmaf(-a, a, 1.0), "{name}");
    assert_eq!(va.fma(va, -one).element(0), f32::powi(2.0, -12) + f32::powi(2.0, -26));
}

fn fused_cancellation_f64<V: SimdFloat64>() {
    let a = 1.0 + f64::powi(2.0, -30);
    let va = V::make_set1(a);
    let one = V::make_set1(1.0);
    let name = V::NAME;
    assert_eq!(va.fma(va, -one).element(0), libm::fma(a, a, -1.0), "{name}");
    assert_eq!(va.fnma(va, one).element(0), libm::fma(-a, a, 1.0), "{name}");
    assert_eq!(va.fma(va, -one).element(0), f64::powi(2.0, -29) + f64::powi(2.0, -60));
}

#[test]
fn test_fma_rounds_once_on_every_tier() {
    each_float32_tier!(fused_cancellation_f32);
    each_float64_tier!(fused_cancellation_f64);
}

fn reciprocal<V: SimdFloat32>() {
    for x in [0.1f32, 1.0, 3.0, -7.5, 1234.5] {
        let got = V::make_set1(x).reciprocal_approx().element(0);
        assert_relative_eq!(got, 1.0 / x, max_relative = 1.0 / 2048.0);
    }
}

#[test]
fn test_reciprocal_approx_error_bound() {
    each_float32_tier!(reciprocal);
}

fn transcendentals_match_fallback<V: SimdFloat32>() {
    let inputs: Vec<f32> = (0..V::LANES).map(|i| 0.3 + i as f32 * 0.7).collect();
    let v = V::load(&inputs);
    let two = V::make_set1(2.0);
    let results: [(V, fn(F32x1) -> F32x1); 8] = [
        (v.sqrt(), F32x1::sqrt),
        (v.sin(), F32x1::sin),
        (v.cos(), F32x1::cos),
        (v.exp(), F32x1::exp),
        (v.ln(), F32x1::ln),
        (v.log2(), F32x1::log2),
        (v.tanh(), F32x1::tanh),
        (v.cbrt(), F32x1::cbrt),
    ];
    for (got, scalar) in results {
        for (i, &x) in inputs.iter().enumerate() {
            assert!(same_f32(got.element(i), scalar(F32x1(x)).0), "{} at {x}", V::NAME);
        }
    }
    for (i, &x) in inputs.iter().enumerate() {
        assert_eq!(v.pow(two).element(i), F32x1(x).pow(F32x1(2.0)).0);
        assert_eq!(v.atan2(two).element(i), F32x1(x).atan2(F32x1(2.0)).0);
    }
}

#[test]
fn test_transcendentals_identical_across_tiers() {
    each_float32_tier!(transcendentals_match_fallback);
}

fn sequential_u32<V: SimdUInt32>() {
    let v = V::make_sequential(10);
    for i in 0..V::LANES {
        assert_eq!(v.element(i), 10 + i as u32, "{}", V::NAME);
    }
    let wrapped = V::make_sequential(u32::MAX);
    assert_eq!(wrapped.element(0), u32::MAX);
    if V::LANES > 1 {
        assert_eq!(wrapped.element(1), 0, "{}", V::NAME);
    }
}

#[test]
fn test_make_sequential_wraps() {
    each_uint32_tier!(sequential_u32);
}

fn int32_to_float<V: SimdInt32>() {
    let samples = [0, 1, -1, i32::MAX, i32::MIN, 16_777_217, -16_777_219, 123_456_789];
    for block in blocks(&samples, V::LANES) {
        let f = V::load(&block).to_float();
        for (i, &x) in block.iter().enumerate() {
            assert_eq!(f.element(i), x as f32, "{}: {x}", V::NAME);
        }
    }
}

fn uint32_to_float<V: SimdUInt32>() {
    for block in blocks(&U32_SAMPLES, V::LANES) {
        let f = V::load(&block).to_float();
        for (i, &x) in block.iter().enumerate() {
            assert_eq!(f.element(i), x as f32, "{}: {x}", V::NAME);
        }
    }
}

fn int64_to_float<V: SimdInt64>() {
    for block in blocks(&I64_SAMPLES, V::LANES) {
        let f = V::load(&block).to_float();
        for (i, &x) in block.iter().enumerate() {
            assert_eq!(f.element(i), x as f64, "{}: {x}", V::NAME);
        }
    }
}

fn uint64_to_float<V: SimdUInt64>() {
    let samples = [0u64, 1, u64::MAX, 1 << 63, (1 << 53) + 1, 0xdead_beef_cafe_f00d];
    for block in blocks(&samples, V::LANES) {
        let f = V::load(&block).to_float();
        for (i, &x) in block.iter().enumerate() {
            assert_eq!(f.element(i), x as f64, "{}: {x}", V::NAME);
        }
    }
}

#[test]
fn test_integer_to_float_rounds_to_nearest() {
    each_int32_tier!(int32_to_float);
    each_uint32_tier!(uint32_to_float);
    each_int64_tier!(int64_to_float);
    each_uint64_tier!(uint64_to_float);
}

fn bitcast_round_trip<V>()
where
    V: SimdFloat32,
    V::UInt: Simd<Element = u32>,
{
    let v = V::make_sequential(-2.0);
    let bits = v.bitcast_to_uint();
    for i in 0..V::LANES {
        assert_eq!(bits.element(i), v.element(i).to_bits(), "{}", V::NAME);
    }
    assert_eq!(V::bitcast_from_uint(bits), v);
    assert_eq!(v.abs().element(0), 2.0);
}

#[test]
fn test_bitcast_preserves_bits() {
    each_float32_tier!(bitcast_round_trip);
}

fn unorm8<V: SimdFloat32>() {
    assert_eq!(V::make_unorm8(0).element(0), 0.0);
    assert_eq!(V::make_unorm8(255).element(V::LANES - 1), 1.0);
    assert_eq!(V::make_unorm8(51).element(0), 0.2);
}

#[test]
fn test_make_unorm8() {
    each_float32_tier!(unorm8);
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_widen_and_narrow_between_precisions() {
    use lanewise::{F32x4, F64x2};

    let v = F32x4::from_array([0.1, -2.5, 3.0e38, f32::MIN_POSITIVE]);
    let (lo, hi) = (v.widen_low(), v.widen_high());
    assert_eq!(lo.to_array(), [f64::from(0.1f32), -2.5]);
    assert_eq!(hi.to_array(), [3.0e38f32 as f64, f32::MIN_POSITIVE as f64]);
    assert_eq!(F64x2::narrow(lo, hi), v);

    let overflow = F64x2::from_array([1.0e300, -1.0e-300]);
    let narrowed = F64x2::narrow(overflow, overflow).to_array();
    assert_eq!(narrowed[0], f32::INFINITY);
    assert!(narrowed[1] == 0.0 && narrowed[1].is_sign_negative());

    assert_eq!(F32x1(1.5).widen().narrow(), F32x1(1.5));
}

#[test]
fn test_capability_names_are_type_names() {
    assert_eq!(F32x1::NAME, "F32x1");
    assert_eq!(<lanewise::U64x1 as SimdCapability>::NAME, "U64x1");
    assert!(F64x1::cpu_supported(None));
    assert!(F64x1::compiler_supported());
}
