//! 128-bit `i32` tier (SSE2 baseline)
//!
//! `pmulld`, `pabsd` and `pblendvb` come from later SSE revisions; without
//! them the emulations in [`crate::x86`] are used. Per-lane shift counts
//! need AVX2 and otherwise run lane by lane. There is no integer divide
//! instruction at any tier, so `/` always runs per lane.

use core::arch::x86_64::*;

use crate::float32::F32x4;
use crate::layout::impl_vector_layout;
use crate::mask::{M32x4, SimdMask};
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt32, SimdSigned};
use crate::uint32::U32x4;
use crate::x86;

/// Four `i32` lanes in an `__m128i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I32x4(pub(crate) __m128i);

impl_vector_layout!(I32x4, i32, 4);
impl_capability!(I32x4, Sse2, [Sse, Sse2]);

impl I32x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m128i) -> Self {
        I32x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m128i {
        self.0
    }
}

impl Simd for I32x4 {
    type Element = i32;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: i32) -> Self {
        I32x4(unsafe { _mm_set1_epi32(value) })
    }

    #[inline(always)]
    fn make_sequential(first: i32) -> Self {
        I32x4(unsafe { _mm_add_epi32(_mm_set1_epi32(first), _mm_setr_epi32(0, 1, 2, 3)) })
    }

    #[inline(always)]
    fn load(src: &[i32]) -> Self {
        assert!(src.len() >= 4, "slice too short for I32x4 load");
        I32x4(unsafe { _mm_loadu_si128(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [i32]) {
        assert!(dst.len() >= 4, "slice too short for I32x4 store");
        unsafe { _mm_storeu_si128(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(I32x4,
    Add::add(Self) => |a, b| I32x4(unsafe { _mm_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| I32x4(unsafe { _mm_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| I32x4(unsafe {
        if cfg!(target_feature = "sse4.1") {
            _mm_mullo_epi32(a.0, b.0)
        } else {
            x86::mullo_epi32_128(a.0, b.0)
        }
    }),
    Div::div(Self) => |a, b| a.zip_lanes(b, i32::wrapping_div),
    BitAnd::bitand(Self) => |a, b| I32x4(unsafe { _mm_and_si128(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| I32x4(unsafe { _mm_or_si128(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| I32x4(unsafe { _mm_xor_si128(a.0, b.0) }),
    Shl::shl(u32) => |a, n| I32x4(unsafe { _mm_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| I32x4(unsafe { _mm_sra_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            I32x4(unsafe { _mm_sllv_epi32(a.0, n.0) })
        } else {
            a.zip_lanes(n, |x, k| scalar::shl_i32(x, k as u32))
        }
    },
    Shr::shr(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            I32x4(unsafe { _mm_srav_epi32(a.0, n.0) })
        } else {
            a.zip_lanes(n, |x, k| scalar::sra_i32(x, k as u32))
        }
    },
);
impl_unop!(I32x4,
    Neg::neg => |a| I32x4(unsafe { _mm_sub_epi32(_mm_setzero_si128(), a.0) }),
    Not::not => |a| I32x4(unsafe { _mm_xor_si128(a.0, _mm_set1_epi32(-1)) }),
);
impl_arith_assign!(I32x4);
impl_bit_assign!(I32x4);

impl SimdSigned for I32x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        I32x4(unsafe {
            if cfg!(target_feature = "ssse3") {
                _mm_abs_epi32(self.0)
            } else {
                let sign = _mm_srai_epi32::<31>(self.0);
                _mm_sub_epi32(_mm_xor_si128(self.0, sign), sign)
            }
        })
    }
}

impl SimdCompareOps for I32x4 {
    type Mask = M32x4;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_cmpeq_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M32x4 {
        self.compare_eq(rhs).not()
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_cmplt_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M32x4 {
        self.compare_gt(rhs).not()
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_cmpgt_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x4 {
        self.compare_lt(rhs).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x4) -> Self {
        I32x4(unsafe {
            if cfg!(target_feature = "sse4.1") {
                _mm_blendv_epi8(if_false.0, if_true.0, mask.0)
            } else {
                x86::select_128(if_false.0, if_true.0, mask.0)
            }
        })
    }
}

impl SimdInt for I32x4 {}

impl SimdFloatToInt for I32x4 {
    type UInt = U32x4;
}

impl SimdInt32 for I32x4 {
    type Float = F32x4;

    #[inline(always)]
    fn to_float(self) -> F32x4 {
        F32x4(unsafe { _mm_cvtepi32_ps(self.0) })
    }
}
