//! 512-bit `i32` tier (AVX-512F)

use core::arch::x86_64::*;

use crate::float32::F32x16;
use crate::layout::impl_vector_layout;
use crate::mask::Mask16;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt32, SimdSigned};
use crate::uint32::U32x16;
use crate::x86;

/// Sixteen `i32` lanes in an `__m512i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I32x16(pub(crate) __m512i);

impl_vector_layout!(I32x16, i32, 16);
impl_capability!(I32x16, Avx512, [Avx512F]);

impl I32x16 {
    #[inline(always)]
    pub const fn from_raw(raw: __m512i) -> Self {
        I32x16(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m512i {
        self.0
    }
}

impl Simd for I32x16 {
    type Element = i32;
    const LANES: usize = 16;

    #[inline(always)]
    fn make_set1(value: i32) -> Self {
        I32x16(unsafe { _mm512_set1_epi32(value) })
    }

    #[inline(always)]
    fn make_sequential(first: i32) -> Self {
        I32x16(unsafe {
            _mm512_add_epi32(
                _mm512_set1_epi32(first),
                _mm512_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[i32]) -> Self {
        assert!(src.len() >= 16, "slice too short for I32x16 load");
        I32x16(unsafe { _mm512_loadu_epi32(src.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [i32]) {
        assert!(dst.len() >= 16, "slice too short for I32x16 store");
        unsafe { _mm512_storeu_epi32(dst.as_mut_ptr(), self.0) }
    }
}

impl_binop!(I32x16,
    Add::add(Self) => |a, b| I32x16(unsafe { _mm512_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| I32x16(unsafe { _mm512_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| I32x16(unsafe { _mm512_mullo_epi32(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, i32::wrapping_div),
    BitAnd::bitand(Self) => |a, b| I32x16(unsafe { _mm512_and_si512(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| I32x16(unsafe { _mm512_or_si512(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| I32x16(unsafe { _mm512_xor_si512(a.0, b.0) }),
    Shl::shl(u32) => |a, n| I32x16(unsafe { _mm512_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| I32x16(unsafe { _mm512_sra_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| I32x16(unsafe { _mm512_sllv_epi32(a.0, n.0) }),
    Shr::shr(Self) => |a, n| I32x16(unsafe { _mm512_srav_epi32(a.0, n.0) }),
);
impl_unop!(I32x16,
    Neg::neg => |a| I32x16(unsafe { _mm512_sub_epi32(_mm512_setzero_si512(), a.0) }),
    Not::not => |a| I32x16(unsafe { _mm512_xor_si512(a.0, _mm512_set1_epi32(-1)) }),
);
impl_arith_assign!(I32x16);
impl_bit_assign!(I32x16);

impl SimdSigned for I32x16 {
    #[inline(always)]
    fn abs(self) -> Self {
        I32x16(unsafe { _mm512_abs_epi32(self.0) })
    }
}

impl SimdCompareOps for I32x16 {
    type Mask = Mask16;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpeq_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpneq_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmplt_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmple_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpgt_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> Mask16 {
        Mask16(unsafe { _mm512_cmpge_epi32_mask(self.0, rhs.0) })
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: Mask16) -> Self {
        I32x16(unsafe { _mm512_mask_blend_epi32(mask.0, if_false.0, if_true.0) })
    }
}

impl SimdInt for I32x16 {}

impl SimdFloatToInt for I32x16 {
    type UInt = U32x16;
}

impl SimdInt32 for I32x16 {
    type Float = F32x16;

    #[inline(always)]
    fn to_float(self) -> F32x16 {
        F32x16(unsafe { _mm512_cvtepi32_ps(self.0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::SimdMask;

    #[test]
    fn test_sequential_compare_blend() {
        require_cpu!(I32x16);
        let v = I32x16::make_sequential(-8);
        let zero = I32x16::default();
        let mask = v.compare_ge(zero);
        assert_eq!(mask.bitmask(), 0xff00);
        let r = I32x16::blend(zero, v, mask);
        assert_eq!(r.element(7), 0);
        assert_eq!(r.element(8), 0);
        assert_eq!(r.element(15), 7);
    }

    #[test]
    fn test_shifts_and_division() {
        require_cpu!(I32x16);
        let v = I32x16::make_set1(-100);
        assert_eq!((v / I32x16::make_set1(7)).to_array(), [-14; 16]);
        assert_eq!((v >> 40).to_array(), [-1; 16]);
        assert_eq!((v << I32x16::make_set1(33)).to_array(), [0; 16]);
        assert_eq!((v >> I32x16::make_set1(2)).to_array(), [-25; 16]);
    }

    #[test]
    fn test_abs_and_to_float() {
        require_cpu!(I32x16);
        let v = I32x16::make_sequential(-8).abs();
        assert_eq!(v.element(0), 8);
        assert_eq!(v.element(15), 7);
        assert_eq!(v.to_float().element(3), 5.0);
    }
}
