//! 256-bit `u32` tier (AVX2 + FMA)

use core::arch::x86_64::*;

use crate::float32::F32x8;
use crate::layout::impl_vector_layout;
use crate::mask::{M32x8, SimdMask};
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt32};
use crate::x86;

/// Eight `u32` lanes in an `__m256i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U32x8(pub(crate) __m256i);

impl_vector_layout!(U32x8, u32, 8);
impl_capability!(U32x8, Avx2, [Avx, Avx2, Fma]);

impl U32x8 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256i) -> Self {
        U32x8(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256i {
        self.0
    }
}

impl Simd for U32x8 {
    type Element = u32;
    const LANES: usize = 8;

    #[inline(always)]
    fn make_set1(value: u32) -> Self {
        U32x8(unsafe { _mm256_set1_epi32(value as i32) })
    }

    #[inline(always)]
    fn make_sequential(first: u32) -> Self {
        U32x8(unsafe {
            _mm256_add_epi32(
                _mm256_set1_epi32(first as i32),
                _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
            )
        })
    }

    #[inline(always)]
    fn load(src: &[u32]) -> Self {
        assert!(src.len() >= 8, "slice too short for U32x8 load");
        U32x8(unsafe { _mm256_loadu_si256(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u32]) {
        assert!(dst.len() >= 8, "slice too short for U32x8 store");
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U32x8,
    Add::add(Self) => |a, b| U32x8(unsafe { _mm256_add_epi32(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U32x8(unsafe { _mm256_sub_epi32(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U32x8(unsafe { _mm256_mullo_epi32(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U32x8(unsafe { _mm256_and_si256(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U32x8(unsafe { _mm256_or_si256(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U32x8(unsafe { _mm256_xor_si256(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U32x8(unsafe { _mm256_sll_epi32(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U32x8(unsafe { _mm256_srl_epi32(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| U32x8(unsafe { _mm256_sllv_epi32(a.0, n.0) }),
    Shr::shr(Self) => |a, n| U32x8(unsafe { _mm256_srlv_epi32(a.0, n.0) }),
);
impl_unop!(U32x8, Not::not => |a| U32x8(unsafe { _mm256_xor_si256(a.0, _mm256_set1_epi32(-1)) }));
impl_arith_assign!(U32x8);
impl_bit_assign!(U32x8);

impl SimdCompareOps for U32x8 {
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
        M32x8(unsafe {
            _mm256_cmpgt_epi32(x86::flip_epi32_256(self.0), x86::flip_epi32_256(rhs.0))
        })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M32x8 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M32x8) -> Self {
        U32x8(unsafe { _mm256_blendv_epi8(if_false.0, if_true.0, mask.0) })
    }
}

impl SimdUInt for U32x8 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        let k = n & 31;
        U32x8(unsafe {
            _mm256_or_si256(
                _mm256_sll_epi32(self.0, x86::count(k)),
                _mm256_srl_epi32(self.0, x86::count(32 - k)),
            )
        })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        let k = n & 31;
        U32x8(unsafe {
            _mm256_or_si256(
                _mm256_srl_epi32(self.0, x86::count(k)),
                _mm256_sll_epi32(self.0, x86::count(32 - k)),
            )
        })
    }
}

impl SimdFloatToInt for U32x8 {
    type UInt = Self;
}

impl SimdUInt32 for U32x8 {
    type Float = F32x8;

    #[inline(always)]
    fn to_float(self) -> F32x8 {
        F32x8(unsafe { x86::cvtepu32_ps_256(self.0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_sequential_from_ten() {
        require_cpu!(U32x8);
        assert_eq!(
            U32x8::make_sequential(10).to_array(),
            [10, 11, 12, 13, 14, 15, 16, 17]
        );
        assert_eq!(U32x8::make_sequential(u32::MAX).element(1), 0);
    }

    #[test]
    fn test_rotl_identity_at_width() {
        require_cpu!(U32x8);
        let v = U32x8::make_sequential(0xf0);
        assert_eq!(v.rotl(32), v);
        assert_eq!(v.rotl(8).rotr(8), v);
        assert_eq!(v.rotl(28).element(0), 0x0000_000f);
    }

    #[test]
    fn test_compares_and_blend() {
        require_cpu!(U32x8);
        let v = U32x8::from_array([0, 1, 2, 3, u32::MAX, 0x8000_0000, 7, 9]);
        let three = U32x8::make_set1(3);
        let mask = v.compare_gt(three);
        assert_eq!(mask.bitmask(), 0b1111_0000);
        assert_eq!(U32x8::blend(v, three, mask).to_array(), [0, 1, 2, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_per_lane_shift_and_to_float() {
        require_cpu!(U32x8);
        let v = U32x8::make_set1(1);
        let n = U32x8::make_sequential(29);
        assert_eq!((v << n).to_array(), [1 << 29, 1 << 30, 1 << 31, 0, 0, 0, 0, 0]);
        assert_eq!(U32x8::make_set1(u32::MAX).to_float().element(0), 4_294_967_296.0);
    }
}
