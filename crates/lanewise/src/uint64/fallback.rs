//! Scalar `u64` fallback

use crate::capability::Portable;
use crate::float64::F64x1;
use crate::layout::impl_vector_layout;
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdUInt, SimdUInt64};

/// One `u64` lane.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U64x1(pub u64);

impl_vector_layout!(U64x1, u64, 1);
impl_capability!(U64x1, Fallback, []);
impl Portable for U64x1 {}

impl Simd for U64x1 {
    type Element = u64;
    const LANES: usize = 1;

    #[inline(always)]
    fn make_set1(value: u64) -> Self {
        U64x1(value)
    }

    #[inline(always)]
    fn make_sequential(first: u64) -> Self {
        U64x1(first)
    }
}

impl_binop!(U64x1,
    Add::add(Self) => |a, b| U64x1(a.0.wrapping_add(b.0)),
    Sub::sub(Self) => |a, b| U64x1(a.0.wrapping_sub(b.0)),
    Mul::mul(Self) => |a, b| U64x1(a.0.wrapping_mul(b.0)),
    Div::div(Self) => |a, b| U64x1(a.0 / b.0),
    BitAnd::bitand(Self) => |a, b| U64x1(a.0 & b.0),
    BitOr::bitor(Self) => |a, b| U64x1(a.0 | b.0),
    BitXor::bitxor(Self) => |a, b| U64x1(a.0 ^ b.0),
    Shl::shl(u32) => |a, n| U64x1(scalar::shl_u64(a.0, u64::from(n))),
    Shr::shr(u32) => |a, n| U64x1(scalar::shr_u64(a.0, u64::from(n))),
    Shl::shl(Self) => |a, n| U64x1(scalar::shl_u64(a.0, n.0)),
    Shr::shr(Self) => |a, n| U64x1(scalar::shr_u64(a.0, n.0)),
);
impl_unop!(U64x1, Not::not => |a| U64x1(!a.0));
impl_arith_assign!(U64x1);
impl_bit_assign!(U64x1);

impl SimdCompareOps for U64x1 {
    type Mask = bool;

    #[inline(always)]
    fn compare_eq(self, rhs: Self) -> bool {
        self.0 == rhs.0
    }

    #[inline(always)]
    fn compare_neq(self, rhs: Self) -> bool {
        self.0 != rhs.0
    }

    #[inline(always)]
    fn compare_lt(self, rhs: Self) -> bool {
        self.0 < rhs.0
    }

    #[inline(always)]
    fn compare_le(self, rhs: Self) -> bool {
        self.0 <= rhs.0
    }

    #[inline(always)]
    fn compare_gt(self, rhs: Self) -> bool {
        self.0 > rhs.0
    }

    #[inline(always)]
    fn compare_ge(self, rhs: Self) -> bool {
        self.0 >= rhs.0
    }

    #[inline(always)]
    fn blend(if_false: Self, if_true: Self, mask: bool) -> Self {
        if mask {
            if_true
        } else {
            if_false
        }
    }
}

impl SimdUInt for U64x1 {
    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        U64x1(self.0.rotate_left(n))
    }

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        U64x1(self.0.rotate_right(n))
    }
}

impl SimdFloatToInt for U64x1 {
    type UInt = Self;
}

impl SimdUInt64 for U64x1 {
    type Float = F64x1;

    #[inline(always)]
    fn to_float(self) -> F64x1 {
        F64x1(self.0 as f64)
    }
}
