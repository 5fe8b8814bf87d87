//! 256-bit `i64` tier (AVX2 + FMA)
//!
//! AVX2 still has no 64-bit multiply or arithmetic shift; both use the
//! [`crate::x86`] emulations. Per-lane arithmetic shifts and conversion to
//! `f64` run lane by lane.

use core::arch::x86_64::*;

use crate::float64::F64x4;
use crate::layout::impl_vector_layout;
use crate::mask::{M64x4, SimdMask};
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt64, SimdSigned};
use crate::uint64::U64x4;
use crate::x86;

/// Four `i64` lanes in an `__m256i`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I64x4(pub(crate) __m256i);

impl_vector_layout!(I64x4, i64, 4);
impl_capability!(I64x4, Avx2, [Avx, Avx2, Fma]);

impl I64x4 {
    #[inline(always)]
    pub const fn from_raw(raw: __m256i) -> Self {
        I64x4(raw)
    }

    #[inline(always)]
    pub const fn into_raw(self) -> __m256i {
        self.0
    }
}

impl Simd for I64x4 {
    type Element = i64;
    const LANES: usize = 4;

    #[inline(always)]
    fn make_set1(value: i64) -> Self {
        I64x4(unsafe { _mm256_set1_epi64x(value) })
    }

    #[inline(always)]
    fn make_sequential(first: i64) -> Self {
        I64x4(unsafe { _mm256_add_epi64(_mm256_set1_epi64x(first), _mm256_setr_epi64x(0, 1, 2, 3)) })
    }

    #[inline(always)]
    fn load(src: &[i64]) -> Self {
        assert!(src.len() >= 4, "slice too short for I64x4 load");
        I64x4(unsafe { _mm256_loadu_si256(src.as_ptr().cast()) })
    }

    #[inline(always)]
    fn store(self, dst: &mut [i64]) {
        assert!(dst.len() >= 4, "slice too short for I64x4 store");
        unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), self.0) }
    }
}

impl_binop!(I64x4,
    Add::add(Self) => |a, b| I64x4(unsafe { _mm256_add_epi64(a.0, b.0) }),
    Sub::sub(Self) => |a, b| I64x4(unsafe { _mm256_sub_epi64(a.0, b.0) }),
    Mul::mul(Self) => |a, b| I64x4(unsafe { x86::mullo_epi64_256(a.0, b.0) }),
    Div::div(Self) => |a, b| a.zip_lanes(b, i64::wrapping_div),
    BitAnd::bitand(Self) => |a, b| I64x4(unsafe { _mm256_and_si256(a.0, b.0) }),
    BitOr::bitor(Self) => |a, b| I64x4(unsafe { _mm256_or_si256(a.0, b.0) }),
    BitXor::bitxor(Self) => |a, b| I64x4(unsafe { _mm256_xor_si256(a.0, b.0) }),
    Shl::shl(u32) => |a, n| I64x4(unsafe { _mm256_sll_epi64(a.0, x86::count(n)) }),
    Shr::shr(u32) => |a, n| I64x4(unsafe { x86::sra_epi64_256(a.0, n) }),
    Shl::shl(Self) => |a, n| I64x4(unsafe { _mm256_sllv_epi64(a.0, n.0) }),
    Shr::shr(Self) => |a, n| a.zip_lanes(n, |x, k| scalar::sra_i64(x, k as u64)),
);
impl_unop!(I64x4,
    Neg::neg => |a| I64x4(unsafe { _mm256_sub_epi64(_mm256_setzero_si256(), a.0) }),
    Not::not => |a| I64x4(unsafe { _mm256_xor_si256(a.0, _mm256_set1_epi32(-1)) }),
);
impl_arith_assign!(I64x4);
impl_bit_assign!(I64x4);

impl SimdSigned for I64x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        I64x4(unsafe {
            let sign = _mm256_cmpgt_epi64(_mm256_setzero_si256(), self.0);
            _mm256_sub_epi64(_mm256_xor_si256(self.0, sign), sign)
        })
    }
}

impl SimdCompareOps for I64x4 {
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
        M64x4(unsafe { _mm256_cmpgt_epi64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> M64x4 {
        rhs.compare_gt(self).not()
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: M64x4) -> Self {
        I64x4(unsafe { _mm256_blendv_epi8(if_false.0, if_true.0, mask.0) })
    }
}

impl SimdInt for I64x4 {}

impl SimdFloatToInt for I64x4 {
    type UInt = U64x4;
}

impl SimdInt64 for I64x4 {
    type Float = F64x4;

    #[inline(always)]
    fn to_float(self) -> F64x4 {
        F64x4::from_array(self.to_array().map(|x| x as f64))
    }
}
