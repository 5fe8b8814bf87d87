//! 256-bit `f64` tier (AVX2 + FMA)

use core::arch::x86_64::*;

use crate::float32::F32x8;
use crate::int64::I64x4;
use crate::layout::impl_vector_layout;
use crate::mask::M64x4;
use crate::scalar;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat64, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint64::U64x4;

/// Four `f64` lanes in an `__m256d`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x4(pub(crate) __m256d);

impl_vector_layout!(F64x4, f64, 4);
impl_capability!(F64x4, Avx2, [Avx, Avx2, Fma]);

impl F64x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256d) -> Self {
        F64x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256d {
        self.0
    }

    /// Round both halves to `f32` and pack them: `lo` fills lanes 0-3,
    /// `hi` lanes 4-7.
    #[inline(always)]
    pub fn narrow(lo: Self, hi: Self) -> F32x8 {
        F32x8(unsafe { _mm256_set_m128(_mm256_cvtpd_ps(hi.0), _mm256_cvtpd_ps(lo.0)) })
    }
}

impl Simd for F64x4 {
    type Element = f64;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: f64) -> Self {
        F64x4(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f64) -> Self {
        F64x4(unsafe { _mm256_add_pd(_mm256_set1_pd(first), _mm256_setr_pd(0.0, 1.0, 2.0, 3.0)) })
    }

    #[inline(always)]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= 4, "slice too short for F64x4 load");
        F64x4(unsafe { _mm256_loadu_pd(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= 4, "slice too short for F64x4 store");
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F64x4,
    Add::add(Self) => |a, b| F64x4(unsafe { _mm256_add_pd(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F64x4(unsafe { _mm256_sub_pd(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F64x4(unsafe { _mm256_mul_pd(a.0, b.0) }),
    Div::div(Self) => |a, b| F64x4(unsafe { _mm256_div_pd(a.0, b.0) }),
);
impl_unop!(F64x4, Neg::neg => |a| F64x4(unsafe { _mm256_xor_pd(a.0, _mm256_set1_pd(-0.0)) }));
impl_arith_assign!(F64x4);

impl SimdSigned for F64x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        F64x4(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0) })
    }
}

impl SimdReal for F64x4 {
    #[inline(always)]
    fn floor(self) -> Self {
        F64x4(unsafe { _mm256_floor_pd(self.0) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F64x4(unsafe { _mm256_ceil_pd(self.0) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F64x4(unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        F64x4(unsafe {
            _mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)
        })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F64x4(unsafe { _mm256_min_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F64x4(unsafe { _mm256_max_pd(self.0, rhs.0) })
    }
}

impl_simd_math!(F64x4, f64_lanes, sqrt => |a| F64x4(unsafe { _mm256_sqrt_pd(a.0) }));

impl SimdCompareOps for F64x4 {
    type Mask = M64x4;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_EQ_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_NEQ_UQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_LT_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_LE_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_GE_OQ>(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M64x4) -> Self {
        F64x4(unsafe { _mm256_blendv_pd(if_false.0, if_true.0, _mm256_castsi256_pd(mask.0)) })
    }
}

impl SimdFloat for F64x4 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F64x4(unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F64x4(unsafe { _mm256_fmadd_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        F64x4(unsafe { _mm256_fmsub_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        F64x4(unsafe { _mm256_fnmadd_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        F64x4(unsafe { _mm256_fnmsub_pd(self.0, b.0, c.0) })
    }
}

impl SimdFloatToInt for F64x4 {
    type UInt = U64x4;
}

impl SimdFloat64 for F64x4 {
    type Int = I64x4;

    /// AVX2 has no `f64` to `i64` conversion; runs per lane.
    #[inline(always)]
    fn to_int_trunc(self) -> I64x4 {
        I64x4::from_array(self.to_array().map(scalar::trunc_f64_to_i64))
    }
}
