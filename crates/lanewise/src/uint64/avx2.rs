//! 256-bit `u64` tier (AVX2 + FMA)

use core::arch::x86_64::*;

use crate::float64::F64x4;
use crate::layout::impl_vector_layout;
use crate::mask::{M64x4, SimdMask};
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt64};
use crate::x86;

/// Four `u64` lanes in an `__m256i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U64x4(pub(crate) __m256i);

impl_vector_layout!(U64x4, u64, 4);
impl_capability!(U64x4, Avx2, [Avx, Avx2, Fma]);

impl U64x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256i) -> Self {
        U64x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256i {
        self.0
    }
}

impl Simd for U64x4 {
    type Element = u64;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: u64) -> Self {
        U64x4(unsafe { _mm256_set1_epi64x(value as i64) })
    }

    #[inline(always)]
    fn make_sequential(first: u64) -> Self {
        U64x4(unsafe {
            _mm256_add_epi64(_mm256_set1_epi64x(first as i64), _mm256_setr_epi64x(0, 1, 2, 3))
        })
    }

    #[inline(always)]
    fn load(src: &[u64]) -> Self {
        assert!(src.len() >= 4, "slice too short for U64x4 load");
        U64x4(unsafe { _mm256_loadu_si256(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [u64]) {
        assert!(dst.len() >= 4, "slice too short for U64x4 store");
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(U64x4,
    Add::add(Self) => |a, b| U64x4(unsafe { _mm256_add_epi64(a.0, b.0) }),
    Sub::sub(Self) => |a, b| U64x4(unsafe { _mm256_sub_epi64(a.0, b.0) }),
    Mul::mul(Self) => |a, b| U64x4(unsafe { x86::mullo_epi64_256(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, |x, y| x / y),
    BitAnd::bitand(Self) => |a, b| U64x4(unsafe { _mm256_and_si256(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| U64x4(unsafe { _mm256_or_si256(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| U64x4(unsafe { _mm256_xor_si256(a.0, b.0) }),
    Shl::shl(u32) => |a, n| U64x4(unsafe { _mm256_sll_epi64(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| U64x4(unsafe { _mm256_srl_epi64(a.0, x86::count(n)) }),
    Shl::shl(Self) => |a, n| U64x4(unsafe { _mm256_sllv_epi64(a.0, n.0) }),
    Shr::shr(Self) => |a, n| U64x4(unsafe { _mm256_srlv_epi64(a.0, n.0) }),
);
impl_unop!(U64x4, Not::not => |a| U64x4(unsafe { _mm256_xor_si256(a.0, _mm256_set1_epi32(-1)) }));
impl_arith_assign!(U64x4);
impl_bit_assign!(U64x4);

impl SimdCompareOps for U64x4 {
    type Mask = M64x4;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> M64x4 {
        M64x4(unsafe { _mm256_cmpeq_epi64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> M64x4 {
        self.compare_eq(rhs).not()
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> M64x4 {
        rhs.compare_gt(self)
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> M64x4 {
        self.compare_gt(rhs).not()
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> M64x4 {
        M64x4(unsafe {
            _mm256_cmpgt_epi64(x86::flip_epi64_256(self.0), x86::flip_epi64_256(rhs.0))
        })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M64x4 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M64x4) -> Self {
        U64x4(unsafe { _mm256_blendv_epi8(if_false.0, if_true.0, mask.0) })
    }
}

impl SimdUInt for U64x4 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        let k = n & 63;
        U64x4(unsafe {
            _mm256_or_si256(
                _mm256_sll_epi64(self.0, x86::count(k)),
                _mm256_srl_epi64(self.0, x86::count(64 - k)),
            )
        })
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        let k = n & 63;
        U64x4(unsafe {
            _mm256_or_si256(
                _mm256_srl_epi64(self.0, x86::count(k)),
                _mm256_sll_epi64(self.0, x86::count(64 - k)),
            )
        })
    }
}

impl SimdFloatToInt for U64x4 {
    type UInt = Self;
}

impl SimdUInt64 for U64x4 {
    type Float = F64x4;

    #[inline(always)]
    fn to_float(self) -> F64x4 {
        F64x4::from_array(self.to_array().map(|x| x as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_and_blend() {
        require_cpu!(U64x4);
        let v = U64x4::from_array([0, 1 << 63, u64::MAX, 42]);
        let mid = U64x4::make_set1(1 << 62);
        let mask = v.compare_gt(mid);
        assert_eq!(mask.bitmask(), 0b0110);
        assert_eq!(U64x4::blend(v, mid, mask).to_array(), [0, 1 << 62, 1 << 62, 42]);
    }

    #[test]
    fn test_multiply_and_rotate() {
        require_cpu!(U64x4);
        let v = U64x4::make_sequential(u64::MAX - 1);
        assert_eq!(v.to_array(), [u64::MAX - 1, u64::MAX, 0, 1]);
        assert_eq!((v * v).to_array(), [4, 1, 0, 1]);
        assert_eq!(v.rotl(1).element(0), u64::MAX - 2);
        assert_eq!(v.rotr(65), v.rotr(1));
    }

    #[test]
    fn test_per_lane_shifts() {
        require_cpu!(U64x4);
        let v = U64x4::make_set1(u64::MAX);
        let n = U64x4::from_array([0, 1, 63, 64]);
        assert_eq!((v >> n).to_array(), [u64::MAX, u64::MAX >> 1, 1, 0]);
        assert_eq!((v << n).to_array(), [u64::MAX, u64::MAX << 1, 1 << 63, 0]);
    }
}
