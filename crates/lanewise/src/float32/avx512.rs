//! 512-bit `f32` tier (AVX-512F)
//!
//! Comparisons produce a [`Mask16`] opmask. Rounding goes through
//! `vrndscaleps` with the rounding mode in the immediate.

use core::arch::x86_64::*;

use crate::float64::F64x8;
use crate::int32::I32x16;
use crate::layout::impl_vector_layout;
use crate::mask::Mask16;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint32::U32x16;

// vrndscale immediates: suppress exceptions, scale 0.
const ROUND_NEAREST: i32 = 0x08;
const ROUND_DOWN: i32 = 0x09;
const ROUND_UP: i32 = 0x0A;
const ROUND_ZERO: i32 = 0x0B;

/// Sixteen `f32` lanes in an `__m512`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x16(pub(crate) __m512);

impl_vector_layout!(F32x16, f32, 16);
impl_capability!(F32x16, Avx512, [Avx512F]);

impl F32x16 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512) -> Self {
        F32x16(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512 {
        self.0
    }

    /// Lanes 0-7 as `f64` (exact).
    #[inline(always)]
    pub fn widen_low(self) -> F64x8 {
        F64x8(unsafe { _mm512_cvtps_pd(_mm512_castps512_ps256(self.0)) })
    }

    /// Lanes 8-15 as `f64` (exact).
    #[inline(always)]
    pub fn widen_high(self) -> F64x8 {
        F64x8(unsafe {
            let high = _mm512_extractf64x4_pd::<1>(_mm512_castps_pd(self.0));
            _mm512_cvtps_pd(_mm256_castpd_ps(high))
        })
    }
}

impl Simd for F32x16 {
    type Element = f32;
    const LANES: usize = 16;

    #[inline(always)]
    fn make_set1(value: f32) -> Self {
        F32x16(unsafe { _mm512_set1_ps(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f32) -> Self {
        F32x16(unsafe {
            _mm512_add_ps(
                _mm512_set1_ps(first),
                _mm512_setr_ps(
                    0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0,
                    14.0, 15.0,
                ),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= 16, "slice too short for F32x16 load");
        F32x16(unsafe { _mm512_loadu_ps(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= 16, "slice too short for F32x16 store");
        unsafe { _mm512_storeu_ps(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F32x16,
    Add::add(Self) => |a, b| F32x16(unsafe { _mm512_add_ps(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F32x16(unsafe { _mm512_sub_ps(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F32x16(unsafe { _mm512_mul_ps(a.0, b.0) }),
    Div::div(Self) => |a, b| F32x16(unsafe { _mm512_div_ps(a.0, b.0) }),
);
impl_unop!(F32x16, Neg::neg => |a| F32x16(unsafe {
    _mm512_castsi512_ps(_mm512_xor_si512(_mm512_castps_si512(a.0), _mm512_set1_epi32(i32::MIN)))
}));
impl_arith_assign!(F32x16);

impl SimdSigned for F32x16 {
    #[inline(always)]
    fn abs(self) -> Self {
        F32x16(unsafe { _mm512_abs_ps(self.0) })
    }
}

impl SimdReal for F32x16 {
    #[inline(always)]
    fn floor(self) -> Self {
        F32x16(unsafe { _mm512_roundscale_ps::<ROUND_DOWN>(self.0) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F32x16(unsafe { _mm512_roundscale_ps::<ROUND_UP>(self.0) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F32x16(unsafe { _mm512_roundscale_ps::<ROUND_ZERO>(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        F32x16(unsafe { _mm512_roundscale_ps::<ROUND_NEAREST>(self.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F32x16(unsafe { _mm512_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F32x16(unsafe { _mm512_max_ps(self.0, rhs.0) })
    }
}

impl_simd_math!(F32x16, f32_lanes, sqrt => |a| F32x16(unsafe { _mm512_sqrt_ps(a.0) }));

impl SimdCompareOps for F32x16 {
    type Mask = Mask16;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_EQ_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_NEQ_UQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_LT_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_LE_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_GT_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmp_ps_mask::<_CMP_GE_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask16) -> Self {
        F32x16(unsafe { _mm512_mask_blend_ps(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdFloat for F32x16 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F32x16(unsafe { _mm512_rcp14_ps(self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F32x16(unsafe { _mm512_fmadd_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        F32x16(unsafe { _mm512_fmsub_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        F32x16(unsafe { _mm512_fnmadd_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        F32x16(unsafe { _mm512_fnmsub_ps(self.0, b.0, c.0) })
    }
}

impl SimdFloatToInt for F32x16 {
    type UInt = U32x16;
}

impl SimdFloat32 for F32x16 {
    type Int = I32x16;

    #[inline(always)]
    fn to_int_trunc(self) -> I32x16 {
        I32x16(unsafe { _mm512_cvttps_epi32(self.0) })
    }
}
