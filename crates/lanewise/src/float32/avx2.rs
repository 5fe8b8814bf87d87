//! 256-bit `f32` tier (AVX2 + FMA)

use core::arch::x86_64::*;

use crate::float64::F64x4;
use crate::int32::I32x8;
use crate::layout::impl_vector_layout;
use crate::mask::M32x8;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint32::U32x8;

/// Eight `f32` lanes in an `__m256`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x8(pub(crate) __m256);

impl_vector_layout!(F32x8, f32, 8);
impl_capability!(F32x8, Avx2, [Avx, Avx2, Fma]);

impl F32x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256) -> Self {
        F32x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256 {
        self.0
    }

    /// Lanes 0-3 as `f64` (exact).
    #[inline(always)]
    pub fn widen_low(self) -> F64x4 {
        F64x4(unsafe { _mm256_cvtps_pd(_mm256_castps256_ps128(self.0)) })
    }

    /// Lanes 4-7 as `f64` (exact).
    #[inline(always)]
    pub fn widen_high(self) -> F64x4 {
        F64x4(unsafe { _mm256_cvtps_pd(_mm256_extractf128_ps::<1>(self.0)) })
    }
}

impl Simd for F32x8 {
    type Element = f32;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: f32) -> Self {
        F32x8(unsafe { _mm256_set1_ps(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f32) -> Self {
        F32x8(unsafe {
            _mm256_add_ps(
                _mm256_set1_ps(first),
                _mm256_setr_ps(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= 8, "slice too short for F32x8 load");
        F32x8(unsafe { _mm256_loadu_ps(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= 8, "slice too short for F32x8 store");
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F32x8,
    Add::add(Self) => |a, b| F32x8(unsafe { _mm256_add_ps(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F32x8(unsafe { _mm256_sub_ps(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F32x8(unsafe { _mm256_mul_ps(a.0, b.0) }),
    Div::div(Self) => |a, b| F32x8(unsafe { _mm256_div_ps(a.0, b.0) }),
);
impl_unop!(F32x8, Neg::neg => |a| F32x8(unsafe { _mm256_xor_ps(a.0, _mm256_set1_ps(-0.0)) }));
impl_arith_assign!(F32x8);

impl SimdSigned for F32x8 {
    #[inline(always)]
    fn abs(self) -> Self {
        F32x8(unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0) })
    }
}

impl SimdReal for F32x8 {
    #[inline(always)]
    fn floor(self) -> Self {
        F32x8(unsafe { _mm256_floor_ps(self.0) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F32x8(unsafe { _mm256_ceil_ps(self.0) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F32x8(unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        F32x8(unsafe {
            _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)
        })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F32x8(unsafe { _mm256_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F32x8(unsafe { _mm256_max_ps(self.0, rhs.0) })
    }
}

impl_simd_math!(F32x8, f32_lanes, sqrt => |a| F32x8(unsafe { _mm256_sqrt_ps(a.0) }));

impl SimdCompareOps for F32x8 {
    type Mask = M32x8;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x8) -> Self {
        F32x8(unsafe { _mm256_blendv_ps(if_false.0, if_true.0, _mm256_castsi256_ps(mask.0)) })
    }
}

impl SimdFloat for F32x8 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F32x8(unsafe { _mm256_rcp_ps(self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F32x8(unsafe { _mm256_fmadd_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        F32x8(unsafe { _mm256_fmsub_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        F32x8(unsafe { _mm256_fnmadd_ps(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        F32x8(unsafe { _mm256_fnmsub_ps(self.0, b.0, c.0) })
    }
}

impl SimdFloatToInt for F32x8 {
    type UInt = U32x8;
}

impl SimdFloat32 for F32x8 {
    type Int = I32x8;

    #[inline(always)]
    fn to_int_trunc(self) -> I32x8 {
        I32x8(unsafe { _mm256_cvttps_epi32(self.0) })
    }
}
