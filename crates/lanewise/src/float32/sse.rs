//! 128-bit `f32` tier (SSE2 baseline)
//!
//! Rounding uses SSE4.1 `roundps` when the build enables SSE4.1 and
//! per-lane `libm` otherwise; both give identical bits. `fma` uses `vfmadd`
//! when the build enables FMA and per-lane `libm::fmaf` otherwise, so it is
//! fused with a single rounding either way.

use core::arch::x86_64::*;

use crate::float64::F64x2;
use crate::int32::I32x4;
use crate::layout::impl_vector_layout;
use crate::mask::M32x4;
use crate::scalar;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint32::U32x4;
use crate::x86;

/// Four `f32` lanes in an `__m128`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(pub(crate) __m128);

impl_vector_layout!(F32x4, f32, 4);
impl_capability!(F32x4, Sse2, [Sse, Sse2]);

impl F32x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m128) -> Self {
        F32x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m128 {
        self.0
    }

    /// Lanes 0-1 as `f64` (exact).
    #[inline(always)]
    pub fn widen_low(self) -> F64x2 {
        F64x2(unsafe { _mm_cvtps_pd(self.0) })
    }

    /// Lanes 2-3 as `f64` (exact).
    #[inline(always)]
    pub fn widen_high(self) -> F64x2 {
        F64x2(unsafe { _mm_cvtps_pd(_mm_movehl_ps(self.0, self.0)) })
    }
}

impl Simd for F32x4 {
    type Element = f32;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: f32) -> Self {
        F32x4(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn make_sequential(first: f32) -> Self {
        F32x4(unsafe { _mm_add_ps(_mm_set1_ps(first), _mm_setr_ps(0.0, 1.0, 2.0, 3.0)) })
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= 4, "slice too short for F32x4 load");
        F32x4(unsafe { _mm_loadu_ps(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= 4, "slice too short for F32x4 store");
        unsafe { _mm_storeu_ps(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(F32x4,
    Add::add(Self) => |a, b| F32x4(unsafe { _mm_add_ps(a.0, b.0) }),
    Sub::sub(Self) => |a, b| F32x4(unsafe { _mm_sub_ps(a.0, b.0) }),
    Mul::mul(Self) => |a, b| F32x4(unsafe { _mm_mul_ps(a.0, b.0) }),
    Div::div(Self) => |a, b| F32x4(unsafe { _mm_div_ps(a.0, b.0) }),
);
impl_unop!(F32x4, Neg::neg => |a| F32x4(unsafe { _mm_xor_ps(a.0, _mm_set1_ps(-0.0)) }));
impl_arith_assign!(F32x4);

impl SimdSigned for F32x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        F32x4(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.0) })
    }
}

impl SimdReal for F32x4 {
    #[inline(always)]
    fn floor(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F32x4(unsafe { _mm_floor_ps(self.0) })
        } else {
            self.map_lanes(libm::floorf)
        }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F32x4(unsafe { _mm_ceil_ps(self.0) })
        } else {
            self.map_lanes(libm::ceilf)
        }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F32x4(unsafe { _mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
        } else {
            self.map_lanes(libm::truncf)
        }
    }

    #[inline(always)]
    fn round(self) -> Self {
        if cfg!(target_feature = "sse4.1") {
            F32x4(unsafe {
                _mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)
            })
        } else {
            self.map_lanes(scalar::round_even_f32)
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F32x4(unsafe { _mm_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F32x4(unsafe { _mm_max_ps(self.0, rhs.0) })
    }
}

impl_simd_math!(F32x4, f32_lanes, sqrt => |a| F32x4(unsafe { _mm_sqrt_ps(a.0) }));

impl SimdCompareOps for F32x4 {
    type Mask = M32x4;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmpeq_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmpneq_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmplt_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmple_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmpgt_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_castps_si128(_mm_cmpge_ps(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x4) -> Self {
        unsafe {
            if cfg!(target_feature = "sse4.1") {
                F32x4(_mm_blendv_ps(if_false.0, if_true.0, _mm_castsi128_ps(mask.0)))
            } else {
                F32x4(_mm_castsi128_ps(x86::select_128(
                    _mm_castps_si128(if_false.0),
                    _mm_castps_si128(if_true.0),
                    mask.0,
                )))
            }
        }
    }
}

impl SimdFloat for F32x4 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F32x4(unsafe { _mm_rcp_ps(self.0) })
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        if cfg!(target_feature = "fma") {
            F32x4(unsafe { _mm_fmadd_ps(self.0, b.0, c.0) })
        } else {
            let (a, b, c) = (self.to_array(), b.to_array(), c.to_array());
            F32x4::from_array(core::array::from_fn(|i| libm::fmaf(a[i], b[i], c[i])))
        }
    }
}

impl SimdFloatToInt for F32x4 {
    type UInt = U32x4;
}

impl SimdFloat32 for F32x4 {
    type Int = I32x4;

    #[inline(always)]
    fn to_int_trunc(self) -> I32x4 {
        I32x4(unsafe { _mm_cvttps_epi32(self.0) })
    }
}
