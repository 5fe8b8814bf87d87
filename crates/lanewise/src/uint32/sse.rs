//! 128-bit `u32` tier (SSE2 baseline)
//!
//! SSE has only signed 32-bit compares; unsigned order is recovered by
//! flipping the sign bit of both operands first.

use core::arch::x86_64::*;

use crate::float32::F32x4;
use crate::layout::impl_vector_layout;
use crate::mask::{M32x4, SimdMask};
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt32};
use crate::x86;

/// Four `u32` lanes in an `__m128i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U32x4(pub(crate) __m128i);

impl_vector_layout!(U32x4, u32, 4);
impl_capability!(U32x4, Sse2, [Sse, Sse2]);

impl U32x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m128i) -> Self {
        U32x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m128i {
        self.0
    }
}

impl Simd for U32x4 {
    type Element = u32;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: u32) -> Self {
        U32x4(unsafe { _mm_set1_epi32(value as i32) })
    }

    #[inline(always)]
    fn make_sequential(first: u32) -> Self {
        U32x4(unsafe { _mm_add_epi32(_mm_set1_epi32(first as i32), _mm_setr_epi32(0, 1, 2, 3)) })
    }

    #[inline(always)]
    fn load(src: &[u32]) -> Self {
        assert!(src.len() >= 4, "slice too short for U32x4 load");
        U32x4(unsafe { _mm_loadu_si128(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u32]) {
        assert!(dst.len() >= 4, "slice too short for U32x4 store");
        unsafe { _mm_storeu_si128(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U32x4,
    Add::add(Self) => |a, b| U32x4(unsafe { _mm_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U32x4(unsafe { _mm_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U32x4(unsafe {
        if cfg!(target_feature = "sse4.1") {
            _mm_mullo_epi32(a.0, b.0)
        } else {
            x86::mullo_epi32_128(a.0, b.0)
        }
    }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U32x4(unsafe { _mm_and_si128(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U32x4(unsafe { _mm_or_si128(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U32x4(unsafe { _mm_xor_si128(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U32x4(unsafe { _mm_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U32x4(unsafe { _mm_srl_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            U32x4(unsafe { _mm_sllv_epi32(a.0, n.0) })
        } else {
            a.zip_lanes(n, scalar::shl_u32)
        }
    },
    Shr::shr(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            U32x4(unsafe { _mm_srlv_epi32(a.0, n.0) })
        } else {
            a.zip_lanes(n, scalar::shr_u32)
        }
    },
);
impl_unop!(U32x4, Not::not => |a| U32x4(unsafe { _mm_xor_si128(a.0, _mm_set1_epi32(-1)) }));
impl_arith_assign!(U32x4);
impl_bit_assign!(U32x4);

impl SimdCompareOps for U32x4 {
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
        rhs.compare_gt(self)
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M32x4 {
        self.compare_gt(rhs).not()
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M32x4 {
        M32x4(unsafe { _mm_cmpgt_epi32(x86::flip_epi32_128(self.0), x86::flip_epi32_128(rhs.0)) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x4 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x4) -> Self {
        U32x4(unsafe {
            if cfg!(target_feature = "sse4.1") {
                _mm_blendv_epi8(if_false.0, if_true.0, mask.0)
            } else {
                x86::select_128(if_false.0, if_true.0, mask.0)
            }
        })
    }
}

impl SimdUInt for U32x4 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        let k = n & 31;
        U32x4(unsafe {
            _mm_or_si128(
                _mm_sll_epi32(self.0, x86::count(k)),
                _mm_srl_epi32(self.0, x86::count(32 - k)),
            )
        })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        let k = n & 31;
        U32x4(unsafe {
            _mm_or_si128(
                _mm_srl_epi32(self.0, x86::count(k)),
                _mm_sll_epi32(self.0, x86::count(32 - k)),
            )
        })
    }
}

impl SimdFloatToInt for U32x4 {
    type UInt = Self;
}

impl SimdUInt32 for U32x4 {
    type Float = F32x4;

    #[inline(always)]
    fn to_float(self) -> F32x4 {
        F32x4(unsafe { x86::cvtepu32_ps_128(self.0) })
    }
}
