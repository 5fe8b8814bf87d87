//! 512-bit `u64` tier (AVX-512F + AVX-512DQ)

use core::arch::x86_64::*;

use crate::float64::F64x8;
use crate::layout::impl_vector_layout;
use crate::mask::Mask8;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt64};
use crate::x86;

/// Eight `u64` lanes in an `__m512i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U64x8(pub(crate) __m512i);

impl_vector_layout!(U64x8, u64, 8);
impl_capability!(U64x8, Avx512, [Avx512F, Avx512Dq]);

impl U64x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512i) -> Self {
        U64x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512i {
        self.0
    }
}

impl Simd for U64x8 {
    type Element = u64;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: u64) -> Self {
        U64x8(unsafe { _mm512_set1_epi64(value as i64) })
    }

    #[inline(always)]
    fn make_sequential(first: u64) -> Self {
        U64x8(unsafe {
            _mm512_add_epi64(
                _mm512_set1_epi64(first as i64),
                _mm512_setr_epi64(0, 1, 2, 3, 4, 5, 6, 7),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[u64]) -> Self {
        assert!(src.len() >= 8, "slice too short for U64x8 load");
        U64x8(unsafe { _mm512_loadu_epi64(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u64]) {
        assert!(dst.len() >= 8, "slice too short for U64x8 store");
        unsafe { _mm512_storeu_epi64(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U64x8,
    Add::add(Self) => |a, b| U64x8(unsafe { _mm512_add_epi64(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U64x8(unsafe { _mm512_sub_epi64(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U64x8(unsafe { _mm512_mullo_epi64(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U64x8(unsafe { _mm512_and_si512(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U64x8(unsafe { _mm512_or_si512(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U64x8(unsafe { _mm512_xor_si512(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U64x8(unsafe { _mm512_sll_epi64(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U64x8(unsafe { _mm512_srl_epi64(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| U64x8(unsafe { _mm512_sllv_epi64(a.0, n.0) }),
    Shr::shr(Self) => |a, n| U64x8(unsafe { _mm512_srlv_epi64(a.0, n.0) }),
);
impl_unop!(U64x8, Not::not => |a| U64x8(unsafe { _mm512_xor_si512(a.0, _mm512_set1_epi64(-1)) }));
impl_arith_assign!(U64x8);
impl_bit_assign!(U64x8);

impl SimdCompareOps for U64x8 {
    type Mask = Mask8;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpeq_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpneq_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmplt_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmple_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpgt_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpge_epu64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask8) -> Self {
        U64x8(unsafe { _mm512_mask_blend_epi64(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdUInt for U64x8 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        U64x8(unsafe { _mm512_rolv_epi64(self.0, _mm512_set1_epi64(i64::from(n))) })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        U64x8(unsafe { _mm512_rorv_epi64(self.0, _mm512_set1_epi64(i64::from(n))) })
    }
}

impl SimdFloatToInt for U64x8 {
    type UInt = Self;
}

impl SimdUInt64 for U64x8 {
    type Float = F64x8;

    #[inline(always)]
    fn to_float(self) -> F64x8 {
        F64x8(unsafe { _mm512_cvtepu64_pd(self.0) })
    }
}
