//! Scalar `f32` fallback
//!
//! One lane, no instruction-set requirements. Lane semantics match the
//! vector tiers exactly (see [`crate::scalar`]).

use crate::capability::Portable;
use crate::float64::F64x1;
use crate::int32::I32x1;
use crate::layout::impl_vector_layout;
use crate::scalar;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint32::U32x1;

/// One `f32` lane.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x1(pub f32);

impl_vector_layout!(F32x1, f32, 1);
impl_capability!(F32x1, Fallback, []);
impl Portable for F32x1 {}

impl F32x1 {
    /// Widen to `f64` (exact).
    #[inline(always)]
    pub fn widen(self) -> F64x1 {
        F64x1(f64::from(self.0))
    }
}

impl Simd for F32x1 {
    type Element = f32;
    const LANES: usize = 1;

    #[inline(always)]
    fn make_set1(value: f32) -> Self {
        F32x1(value)
    }

    #[inline(always)]
    fn make_sequential(first: f32) -> Self {
        F32x1(first)
    }
}

impl_binop!(F32x1,
    Add::add(Self) => |a, b| F32x1(a.0 + b.0),
    Sub::sub(Self) => |a, b| F32x1(a.0 - b.0),
    Mul::mul(Self) => |a, b| F32x1(a.0 * b.0),
    Div::div(Self) => |a, b| F32x1(a.0 / b.0),
);
impl_unop!(F32x1, Neg::neg => |a| F32x1(-a.0));
impl_arith_assign!(F32x1);

impl SimdSigned for F32x1 {
    #[inline(always)]
    fn abs(self) -> Self {
        F32x1(f32::from_bits(self.0.to_bits() & 0x7fff_ffff))
    }
}

impl SimdReal for F32x1 {
    #[inline(always)]
    fn floor(self) -> Self {
        F32x1(libm::floorf(self.0))
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F32x1(libm::ceilf(self.0))
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F32x1(libm::truncf(self.0))
    }

    #[inline(always)]
    fn round(self) -> Self {
        F32x1(scalar::round_even_f32(self.0))
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F32x1(scalar::min_f32(self.0, rhs.0))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F32x1(scalar::max_f32(self.0, rhs.0))
    }
}

impl_simd_math!(F32x1, f32_lanes, sqrt => |a| F32x1(libm::sqrtf(a.0)));

impl SimdCompareOps for F32x1 {
    type Mask = bool;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> bool {
        self.0 == rhs.0
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> bool {
        self.0 != rhs.0
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> bool {
        self.0 < rhs.0
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> bool {
        self.0 <= rhs.0
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> bool {
        self.0 > rhs.0
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> bool {
        self.0 >= rhs.0
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: bool) -> Self {
        if mask {
            if_true
        } else {
            if_false
        }
    }
}

impl SimdFloat for F32x1 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F32x1(1.0 / self.0)
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F32x1(libm::fmaf(self.0, b.0, c.0))
    }
}

impl SimdFloatToInt for F32x1 {
    type UInt = U32x1;
}

impl SimdFloat32 for F32x1 {
    type Int = I32x1;

    #[inline(always)]
    fn to_int_trunc(self) -> I32x1 {
        I32x1(scalar::trunc_f32_to_i32(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SimdMath;

    #[test]
    fn test_floor_ceil_of_three_and_a_half() {
        let v = F32x1::make_set1(3.5);
        assert_eq!(v.floor().0, 3.0);
        assert_eq!(v.ceil().0, 4.0);
        assert_eq!(v.round().0, 4.0);
        assert_eq!(F32x1(2.5).round().0, 2.0);
        assert_eq!(v.fract().0, 0.5);
    }

    #[test]
    fn test_blend_takes_if_false_first() {
        let a = F32x1(1.0);
        let b = F32x1(2.0);
        assert_eq!(F32x1::blend(a, b, true), b);
        assert_eq!(F32x1::blend(a, b, false), a);
        assert_eq!(a.if_less(b, F32x1(10.0), F32x1(20.0)).0, 10.0);
    }

    #[test]
    fn test_nan_comparisons() {
        let nan = F32x1(f32::NAN);
        assert!(!nan.compare_eq(nan));
        assert!(nan.compare_neq(nan));
        assert!(!nan.compare_lt(F32x1(0.0)));
    }

    #[test]
    fn test_fused_ops() {
        let (a, b, c) = (F32x1(2.0), F32x1(3.0), F32x1(1.0));
        assert_eq!(a.fma(b, c).0, 7.0);
        assert_eq!(a.fms(b, c).0, 5.0);
        assert_eq!(a.fnma(b, c).0, -5.0);
        assert_eq!(a.fnms(b, c).0, -7.0);
    }

    #[test]
    fn test_abs_clears_sign_of_negative_zero() {
        assert_eq!(F32x1(-0.0).abs().0.to_bits(), 0);
        assert_eq!(F32x1(-4.0).abs().0, 4.0);
    }

    #[test]
    fn test_bitcast_round_trip() {
        let v = F32x1(-1.5);
        assert_eq!(v.bitcast_to_uint().0, (-1.5f32).to_bits());
        assert_eq!(F32x1::bitcast_from_uint(v.bitcast_to_uint()), v);
    }

    #[test]
    fn test_math_forwards_to_libm() {
        assert_eq!(F32x1(16.0).sqrt().0, 4.0);
        assert_eq!(F32x1(8.0).cbrt().0, libm::cbrtf(8.0));
        assert_eq!(F32x1(2.0).pow(F32x1(10.0)).0, 1024.0);
    }

    #[test]
    fn test_unorm8_and_conversion() {
        assert_eq!(F32x1::make_unorm8(255).0, 1.0);
        assert_eq!(F32x1::make_unorm8(0).0, 0.0);
        assert_eq!(F32x1(-7.9).to_int_trunc().0, -7);
        assert_eq!(F32x1(0.1).widen().narrow().0, 0.1);
    }
}
