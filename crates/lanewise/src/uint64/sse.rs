//! 128-bit `u64` tier (SSE2 baseline)

use core::arch::x86_64::*;

use crate::float64::F64x2;
use crate::layout::impl_vector_layout;
use crate::mask::{M64x2, SimdMask};
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt64};
use crate::x86;

/// Two `u64` lanes in an `__m128i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U64x2(pub(crate) __m128i);

impl_vector_layout!(U64x2, u64, 2);
impl_capability!(U64x2, Sse2, [Sse, Sse2]);

impl U64x2 {
    #[inline(always)]
    pub const fn from_raw(raw: __m128i) -> Self {
        U64x2(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m128i {
        self.0
    }
}

impl Simd for U64x2 {
    type Element = u64;
    const LANES: usize = 2;

    #[inline(always)]
    fn make_set1(value: u64) -> Self {
        U64x2(unsafe { _mm_set1_epi64x(value as i64) })
    }

    #[inline(always)]
    fn make_sequential(first: u64) -> Self {
        U64x2(unsafe { _mm_add_epi64(_mm_set1_epi64x(first as i64), _mm_set_epi64x(1, 0)) })
    }

    #[inline(always)]
    fn load(src: &[u64]) -> Self {
        assert!(src.len() >= 2, "slice too short for U64x2 load");
        U64x2(unsafe { _mm_loadu_si128(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u64]) {
        assert!(dst.len() >= 2, "slice too short for U64x2 store");
        unsafe { _mm_storeu_si128(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U64x2,
    Add::add(Self) => |a, b| U64x2(unsafe { _mm_add_epi64(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U64x2(unsafe { _mm_sub_epi64(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U64x2(unsafe { x86::mullo_epi64_128(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U64x2(unsafe { _mm_and_si128(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U64x2(unsafe { _mm_or_si128(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U64x2(unsafe { _mm_xor_si128(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U64x2(unsafe { _mm_sll_epi64(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U64x2(unsafe { _mm_srl_epi64(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            U64x2(unsafe { _mm_sllv_epi64(a.0, n.0) })
        } else {
            a.zip_lanes(n, scalar::shl_u64)
        }
    },
    Shr::shr(Self) => |a, n| {
        if cfg!(target_feature = "avx2") {
            U64x2(unsafe { _mm_srlv_epi64(a.0, n.0) })
        } else {
            a.zip_lanes(n, scalar::shr_u64)
        }
    },
);
impl_unop!(U64x2, Not::not => |a| U64x2(unsafe { _mm_xor_si128(a.0, _mm_set1_epi32(-1)) }));
impl_arith_assign!(U64x2);
impl_bit_assign!(U64x2);

impl SimdCompareOps for U64x2 {
    type Mask = M64x2;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M64x2 {
        M64x2(unsafe {
            if cfg!(target_feature = "sse4.1") {
                _mm_cmpeq_epi64(self.0, rhs.0)
            } else {
                x86::cmpeq_epi64_128(self.0, rhs.0)
            }
        })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M64x2 {
        self.compare_eq(rhs).not()
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M64x2 {
        rhs.compare_gt(self)
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M64x2 {
        self.compare_gt(rhs).not()
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M64x2 {
        M64x2(unsafe {
            x86::cmpgt_epi64_128(x86::flip_epi64_128(self.0), x86::flip_epi64_128(rhs.0))
        })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M64x2 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M64x2) -> Self {
        U64x2(unsafe {
            if cfg!(target_feature = "sse4.1") {
                _mm_blendv_epi8(if_false.0, if_true.0, mask.0)
            } else {
                x86::select_128(if_false.0, if_true.0, mask.0)
            }
        })
    }
}

impl SimdUInt for U64x2 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        let k = n & 63;
        U64x2(unsafe {
            _mm_or_si128(
                _mm_sll_epi64(self.0, x86::count(k)),
                _mm_srl_epi64(self.0, x86::count(64 - k)),
            )
        })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        let k = n & 63;
        U64x2(unsafe {
            _mm_or_si128(
                _mm_srl_epi64(self.0, x86::count(k)),
                _mm_sll_epi64(self.0, x86::count(64 - k)),
            )
        })
    }
}

impl SimdFloatToInt for U64x2 {
    type UInt = Self;
}

impl SimdUInt64 for U64x2 {
    type Float = F64x2;

    #[inline(always)]
    fn to_float(self) -> F64x2 {
        F64x2::from_array(self.to_array().map(|x| x as f64))
    }
}
