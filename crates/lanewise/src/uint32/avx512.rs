//! 512-bit `u32` tier (AVX-512F)

use core::arch::x86_64::*;

use crate::float32::F32x16;
use crate::layout::impl_vector_layout;
use crate::mask::Mask16;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt32};
use crate::x86;

/// Sixteen `u32` lanes in an `__m512i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U32x16(pub(crate) __m512i);

impl_vector_layout!(U32x16, u32, 16);
impl_capability!(U32x16, Avx512, [Avx512F]);

impl U32x16 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512i) -> Self {
        U32x16(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512i {
        self.0
    }
}

impl Simd for U32x16 {
    type Element = u32;
    const LANES: usize = 16;

    #[inline(always)]
    fn make_set1(value: u32) -> Self {
        U32x16(unsafe { _mm512_set1_epi32(value as i32) })
    }

    #[inline(always)]
    fn make_sequential(first: u32) -> Self {
        U32x16(unsafe {
            _mm512_add_epi32(
                _mm512_set1_epi32(first as i32),
                _mm512_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[u32]) -> Self {
        assert!(src.len() >= 16, "slice too short for U32x16 load");
        U32x16(unsafe { _mm512_loadu_epi32(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u32]) {
        assert!(dst.len() >= 16, "slice too short for U32x16 store");
        unsafe { _mm512_storeu_epi32(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U32x16,
    Add::add(Self) => |a, b| U32x16(unsafe { _mm512_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U32x16(unsafe { _mm512_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U32x16(unsafe { _mm512_mullo_epi32(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U32x16(unsafe { _mm512_and_si512(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U32x16(unsafe { _mm512_or_si512(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U32x16(unsafe { _mm512_xor_si512(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U32x16(unsafe { _mm512_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U32x16(unsafe { _mm512_srl_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| U32x16(unsafe { _mm512_sllv_epi32(a.0, n.0) }),
    Shr::shr(Self) => |a, n| U32x16(unsafe { _mm512_srlv_epi32(a.0, n.0) }),
);
impl_unop!(U32x16, Not::not => |a| U32x16(unsafe { _mm512_xor_si512(a.0, _mm512_set1_epi32(-1)) }));
impl_arith_assign!(U32x16);
impl_bit_assign!(U32x16);

impl SimdCompareOps for U32x16 {
    type Mask = Mask16;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpeq_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpneq_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmplt_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmple_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpgt_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpge_epu32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask16) -> Self {
        U32x16(unsafe { _mm512_mask_blend_epi32(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdUInt for U32x16 {
    /// `vprolvd` takes the count modulo 32.
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        U32x16(unsafe { _mm512_rolv_epi32(self.0, _mm512_set1_epi32(n as i32)) })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        U32x16(unsafe { _mm512_rorv_epi32(self.0, _mm512_set1_epi32(n as i32)) })
    }
}

impl SimdFloatToInt for U32x16 {
    type UInt = Self;
}

impl SimdUInt32 for U32x16 {
    type Float = F32x16;

    #[inline(always)]
    fn to_float(self) -> F32x16 {
        F32x16(unsafe { _mm512_cvtepu32_ps(self.0) })
    }
}
