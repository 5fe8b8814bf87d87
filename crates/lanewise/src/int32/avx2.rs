//! 256-bit `i32` tier (AVX2 + FMA)

use core::arch::x86_64::*;

use crate::float32::F32x8;
use crate::layout::impl_vector_layout;
use crate::mask::{M32x8, SimdMask};
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt32, SimdSigned};
use crate::uint32::U32x8;
use crate::x86;

/// Eight `i32` lanes in an `__m256i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I32x8(pub(crate) __m256i);

impl_vector_layout!(I32x8, i32, 8);
impl_capability!(I32x8, Avx2, [Avx, Avx2, Fma]);

impl I32x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256i) -> Self {
        I32x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256i {
        self.0
    }
}

impl Simd for I32x8 {
    type Element = i32;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: i32) -> Self {
        I32x8(unsafe { _mm256_set1_epi32(value) })
    }

    #[inline(always)]
    fn make_sequential(first: i32) -> Self {
        I32x8(unsafe {
            _mm256_add_epi32(_mm256_set1_epi32(first), _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7))
        })
    }

    #[inline(always)]
    fn load(src: &[i32]) -> Self {
        assert!(src.len() >= 8, "slice too short for I32x8 load");
        I32x8(unsafe { _mm256_loadu_si256(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [i32]) {
        assert!(dst.len() >= 8, "slice too short for I32x8 store");
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(I32x8,
    Add::add(Self) => |a, b| I32x8(unsafe { _mm256_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| I32x8(unsafe { _mm256_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| I32x8(unsafe { _mm256_mullo_epi32(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, i32::wrapping_div),
    BitAnd::bitand(Self) => |a, b| I32x8(unsafe { _mm256_and_si256(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| I32x8(unsafe { _mm256_or_si256(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| I32x8(unsafe { _mm256_xor_si256(a.0, b.0) }),
    Shl::shl(u32) => |a, n| I32x8(unsafe { _mm256_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| I32x8(unsafe { _mm256_sra_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| I32x8(unsafe { _mm256_sllv_epi32(a.0, n.0) }),
    Shr::shr(Self) => |a, n| I32x8(unsafe { _mm256_srav_epi32(a.0, n.0) }),
);
impl_unop!(I32x8,
    Neg::neg => |a| I32x8(unsafe { _mm256_sub_epi32(_mm256_setzero_si256(), a.0) }),
    Not::not => |a| I32x8(unsafe { _mm256_xor_si256(a.0, _mm256_set1_epi32(-1)) }),
);
impl_arith_assign!(I32x8);
impl_bit_assign!(I32x8);

impl SimdSigned for I32x8 {
    #[inline(always)]
    fn abs(self) -> Self {
        I32x8(unsafe { _mm256_abs_epi32(self.0) })
    }
}

impl SimdCompareOps for I32x8 {
    type Mask = M32x8;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_cmpeq_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M32x8 {
        self.compare_eq(rhs).not()
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M32x8 {
        rhs.compare_gt(self)
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M32x8 {
        self.compare_gt(rhs).not()
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M32x8 {
        M32x8(unsafe { _mm256_cmpgt_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x8 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x8) -> Self {
        I32x8(unsafe { _mm256_blendv_epi8(if_false.0, if_true.0, mask.0) })
    }
}

impl SimdInt for I32x8 {}

impl SimdFloatToInt for I32x8 {
    type UInt = U32x8;
}

impl SimdInt32 for I32x8 {
    type Float = F32x8;

    #[inline(always)]
    fn to_float(self) -> F32x8 {
        F32x8(unsafe { _mm256_cvtepi32_ps(self.0) })
    }
}
