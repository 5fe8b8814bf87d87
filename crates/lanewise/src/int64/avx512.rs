//! 512-bit `i64` tier (AVX-512F + AVX-512DQ)
//!
//! The 64-bit multiply and `i64` to `f64` conversion are DQ instructions,
//! so this tier requires DQ in addition to the foundation set.

use core::arch::x86_64::*;

use crate::float64::F64x8;
use crate::layout::impl_vector_layout;
use crate::mask::Mask8;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt64, SimdSigned};
use crate::uint64::U64x8;
use crate::x86;

/// Eight `i64` lanes in an `__m512i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I64x8(pub(crate) __m512i);

impl_vector_layout!(I64x8, i64, 8);
impl_capability!(I64x8, Avx512, [Avx512F, Avx512Dq]);

impl I64x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512i) -> Self {
        I64x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512i {
        self.0
    }
}

impl Simd for I64x8 {
    type Element = i64;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: i64) -> Self {
        I64x8(unsafe { _mm512_set1_epi64(value) })
    }

    #[inline(always)]
    fn make_sequential(first: i64) -> Self {
        I64x8(unsafe {
            _mm512_add_epi64(_mm512_set1_epi64(first), _mm512_setr_epi64(0, 1, 2, 3, 4, 5, 6, 7))
        })
    }

    #[inline(always)]
    fn load(src: &[i64]) -> Self {
        assert!(src.len() >= 8, "slice too short for I64x8 load");
        I64x8(unsafe { _mm512_loadu_epi64(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [i64]) {
        assert!(dst.len() >= 8, "slice too short for I64x8 store");
        unsafe { _mm512_storeu_epi64(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(I64x8,
    Add::add(Self) => |a, b| I64x8(unsafe { _mm512_add_epi64(a.0, b.0) }),
    Sub::sub(Self) => |a, b| I64x8(unsafe { _mm512_sub_epi64(a.0, b.0) }),
    Mul::mul(Self) => |a, b| I64x8(unsafe { _mm512_mullo_epi64(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, i64::wrapping_div),
    BitAnd::bitand(Self) => |a, b| I64x8(unsafe { _mm512_and_si512(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| I64x8(unsafe { _mm512_or_si512(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| I64x8(unsafe { _mm512_xor_si512(a.0, b.0) }),
    Shl::shl(u32) => |a, n| I64x8(unsafe { _mm512_sll_epi64(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| I64x8(unsafe { _mm512_sra_epi64(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| I64x8(unsafe { _mm512_sllv_epi64(a.0, n.0) }),
    Shr::shr(Self) => |a, n| I64x8(unsafe { _mm512_srav_epi64(a.0, n.0) }),
);
impl_unop!(I64x8,
    Neg::neg => |a| I64x8(unsafe { _mm512_sub_epi64(_mm512_setzero_si512(), a.0) }),
    Not::not => |a| I64x8(unsafe { _mm512_xor_si512(a.0, _mm512_set1_epi64(-1)) }),
);
impl_arith_assign!(I64x8);
impl_bit_assign!(I64x8);

impl SimdSigned for I64x8 {
    #[inline(always)]
    fn abs(self) -> Self {
        I64x8(unsafe { _mm512_abs_epi64(self.0) })
    }
}

impl SimdCompareOps for I64x8 {
    type Mask = Mask8;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpeq_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpneq_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmplt_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmple_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpgt_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask8 {
        Mask8(unsafe { _mm512_cmpge_epi64_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask8) -> Self {
        I64x8(unsafe { _mm512_mask_blend_epi64(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdInt for I64x8 {}

impl SimdFloatToInt for I64x8 {
    type UInt = U64x8;
}

impl SimdInt64 for I64x8 {
    type Float = F64x8;

    #[inline(always)]
    fn to_float(self) -> F64x8 {
        F64x8(unsafe { _mm512_cvtepi64_pd(self.0) })
    }
}
