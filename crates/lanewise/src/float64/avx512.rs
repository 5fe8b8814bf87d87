//! 512-bit `f64` tier (AVX-512F + AVX-512DQ)
//!
//! DQ is required so that `to_int_trunc` and the paired `I64x8` / `U64x8`
//! types all run on the same machines.

use core::arch::x86_64::*;

use crate::float32::F32x16;
use crate::int64::I64x8;
use crate::layout::impl_vector_layout;
use crate::mask::Mask8;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat64, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint64::U64x8;

const ROUND_NEAREST: i32 = 0x08;
const ROUND_DOWN: i32 = 0x09;
const ROUND_UP: i32 = 0x0A;
const ROUND_ZERO: i32 = 0x0B;

/// Eight `f64` lanes in an `__m512d`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x8(pub(crate) __m512d);

impl_vector_layout!(F64x8, f64, 8);
impl_capability!(F64x8, Avx512, [Avx512F, Avx512Dq]);

impl F64x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512d) -> Self {
        F64x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512d {
        self.0
    }

    /// Round both halves to `f32` and pack them: `lo` fills lanes 0-7,
    /// `hi` lanes 8-15.
    #[inline(always)]
    pub fn narrow(lo: Self, hi: Self) -> F32x16 {
        F32x16(unsafe {
            let lo = _mm256_castps_pd(_mm512_cvtpd_ps(lo.0));
            let hi = _mm256_castps_pd(_mm512_cvtpd_ps(hi.0));
            _mm512_castpd_ps(_mm512_insertf64x4::<1>(_mm512_castpd256_pd512(lo), hi))
        })
    }
}

impl Simd for F64x8 {
    type Element = f64;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: f64) -> Self {
        F64x8(unsafe { _mm512_set1_pd(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f64) -> Self {
        F64x8(unsafe {
            _mm512_add_pd(
                _mm512_set1_pd(first),
                _mm512_setr_pd(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= 8, "slice too short for F64x8 load");
        F64x8(unsafe { _mm512_loadu_pd(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= 8, "slice too short for F64x8 store");
        unsafe { _mm512_storeu_pd(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F64x8,
    Add::add(Self) => |a, b| F64x8(unsafe { _mm512_add_pd(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F64x8(unsafe { _mm512_sub_pd(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F64x8(unsafe { _mm512_mul_pd(a.0, b.0) }),
    Div::div(Self) => |a, b| F64x8(unsafe { _mm512_div_pd(a.0, b.0) }),
);
impl_unop!(F64x8, Neg::neg => |a| F64x8(unsafe {
    _mm512_castsi512_pd(_mm512_xor_si512(_mm512_castpd_si512(a.0), _mm512_set1_epi64(i64::MIN)))
}));
impl_arith_assign!(F64x8);

impl SimdSigned for F64x8 {
    #[inline(always)]
    fn abs(self) -> Self {
        F64x8(unsafe { _mm512_abs_pd(self.0) })
    }
}

impl SimdReal for F64x8 {
    #[inline(always)]
    fn floor(self) -> Self {
        F64x8(unsafe { _mm512_roundscale_pd::<ROUND_DOWN>(self.0) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F64x8(unsafe { _mm512_roundscale_pd::<ROUND_UP>(self.0) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F64x8(unsafe { _mm512_roundscale_pd::<ROUND_ZERO>(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        F64x8(unsafe { _mm512_roundscale_pd::<ROUND_NEAREST>(self.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F64x8(unsafe { _mm512_min_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F64x8(unsafe { _mm512_max_pd(self.0, rhs.0) })
    }
}

impl_simd_math!(F64x8, f64_lanes, sqrt => |a| F64x8(unsafe { _mm512_sqrt_pd(a.0) }));

impl SimdCompareOps for F64x8 {
    type Mask = Mask8;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_EQ_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_NEQ_UQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_LT_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_LE_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_GT_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmp_pd_mask::<_CMP_GE_OQ>(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask8) -> Self {
        F64x8(unsafe { _mm512_mask_blend_pd(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdFloat for F64x8 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F64x8(unsafe { _mm512_rcp14_pd(self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F64x8(unsafe { _mm512_fmadd_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        F64x8(unsafe { _mm512_fmsub_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        F64x8(unsafe { _mm512_fnmadd_pd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        F64x8(unsafe { _mm512_fnmsub_pd(self.0, b.0, c.0) })
    }
}

impl SimdFloatToInt for F64x8 {
    type UInt = U64x8;
}

impl SimdFloat64 for F64x8 {
    type Int = I64x8;

    #[inline(always)]
    fn to_int_trunc(self) -> I64x8 {
        I64x8(unsafe { _mm512_cvttpd_epi64(self.0) })
    }
}
