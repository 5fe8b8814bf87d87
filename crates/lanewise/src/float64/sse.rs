//! 128-bit `f64` tier (SSE2 baseline)
//!
//! Rounding falls back to per-lane `libm` without SSE4.1, and `fma` to
//! per-lane `libm::fma` without FMA, exactly as in the `f32` tier.
//! SSE2 has no `f64` to `i64` conversion; `to_int_trunc` runs per lane.

use core::arch::x86_64::*;

use crate::float32::F32x4;
use crate::int64::I64x2;
use crate::layout::impl_vector_layout;
use crate::mask::M64x2;
use crate::scalar;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat64, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint64::U64x2;
use crate::x86;

/// Two `f64` lanes in an `__m128d`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x2(pub(crate) __m128d);

impl_vector_layout!(F64x2, f64, 2);
impl_capability!(F64x2, Sse2, [Sse, Sse2]);

impl F64x2 {
    #[inline(always)]
    pub const fn from_raw(raw: __m128d) -> Self {
        F64x2(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m128d {
        self.0
    }

    /// Round both halves to `f32` and pack them: `lo` fills lanes 0-1,
    /// `hi` lanes 2-3.
    #[inline(always)]
    pub fn narrow(lo: Self, hi: Self) -> F32x4 {
        F32x4(unsafe { _mm_movelh_ps(_mm_cvtpd_ps(lo.0), _mm_cvtpd_ps(hi.0)) })
    }
}

impl Simd for F64x2 {
    type Element = f64;
    const LANES: usize = 2;

    #[inline(always)]
    fn make_set1(value: f64) -> Self {
        F64x2(unsafe { _mm_set1_pd(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f64) -> Self {
        F64x2(unsafe { _mm_add_pd(_mm_set1_pd(first), _mm_setr_pd(0.0, 1.0)) })
    }

    #[inline(always)]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= 2, "slice too short for F64x2 load");
        F64x2(unsafe { _mm_loadu_pd(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= 2, "slice too short for F64x2 store");
        unsafe { _mm_storeu_pd(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F64x2,
    Add::add(Self) => |a, b| F64x2(unsafe { _mm_add_pd(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F64x2(unsafe { _mm_sub_pd(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F64x2(unsafe { _mm_mul_pd(a.0, b.0) }),
    Div::div(Self) => |a, b| F64x2(unsafe { _mm_div_pd(a.0, b.0) }),
);
impl_unop!(F64x2, Neg::neg => |a| F64x2(unsafe { _mm_xor_pd(a.0, _mm_set1_pd(-0.0)) }));
impl_arith_assign!(F64x2);

impl SimdSigned for F64x2 {
    #[inline(always)]
    fn abs(self) -> Self {
        F64x2(unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), self.0) })
    }
}

impl SimdReal for F64x2 {
    #[inline(always)]
    fn floor(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F64x2(unsafe { _mm_floor_pd(self.0) })
        } else {
            self.map_lanes(libm::floor)
        }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F64x2(unsafe { _mm_ceil_pd(self.0) })
        } else {
            self.map_lanes(libm::ceil)
        }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F64x2(unsafe { _mm_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
        } else {
            self.map_lanes(libm::trunc)
        }
    }

    #[inline(always)]
    fn round(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F64x2(unsafe {
                _mm_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)
            })
        } else {
            self.map_lanes(scalar::round_even_f64)
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F64x2(unsafe { _mm_min_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F64x2(unsafe { _mm_max_pd(self.0, rhs.0) })
    }
}

impl_simd_math!(F64x2, f64_lanes, sqrt => |a| F64x2(unsafe { _mm_sqrt_pd(a.0) }));

impl SimdCompareOps for F64x2 {
    type Mask = M64x2;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmpeq_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmpneq_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmplt_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmple_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmpgt_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M64x2 {
        M64x2(unsafe { _mm_castpd_si128(_mm_cmpge_pd(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M64x2) -> Self {
        unsafe {
            if cfg!(target_feature = "sse4.1") {
                F64x2(_mm_blendv_pd(if_false.0, if_true.0, _mm_castsi128_pd(mask.0)))
            } else {
                F64x2(_mm_castsi128_pd(x86::select_128(
                    _mm_castpd_si128(if_false.0),
                    _mm_castpd_si128(if_true.0),
                    mask.0,
                )))
            }
        }
    }
}

impl SimdFloat for F64x2 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F64x2(unsafe { _mm_div_pd(_mm_set1_pd(1.0), self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        if cfg!(target_feature = "fma") {
            F64x2(unsafe { _mm_fmadd_pd(self.0, b.0, c.0) })
        } else {
            let (a, b, c) = (self.to_array(), b.to_array(), c.to_array());
            F64x2::from_array(core::array::from_fn(|i| libm::fma(a[i], b[i], c[i])))
        }
    }
}

impl SimdFloatToInt for F64x2 {
    type UInt = U64x2;
}

impl SimdFloat64 for F64x2 {
    type Int = I64x2;

    #[inline(always)]
    fn to_int_trunc(self) -> I64x2 {
        let [a, b] = self.to_array();
        I64x2::from_array([scalar::trunc_f64_to_i64(a), scalar::trunc_f64_to_i64(b)])
    }
}
