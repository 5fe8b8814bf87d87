//! Scalar `i64` fallback

use crate::capability::Portable;
use crate::float64::F64x1;
use crate::layout::impl_vector_layout;
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt64, SimdSigned};
use crate::uint64::U64x1;

/// One `i64` lane.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I64x1(pub i64);

impl_vector_layout!(I64x1, i64, 1);
impl_capability!(I64x1, Fallback, []);
impl Portable for I64x1 {}

impl Simd for I64x1 {
    type Element = i64;
    const LANES: usize = 1;

    #[inline(always)]
    fn make_set1(value: i64) -> Self {
        I64x1(value)
    }

    #[inline(always)]
    fn make_sequential(first: i64) -> Self {
        I64x1(first)
    }
}

impl_binop!(I64x1,
    Add::add(Self) => |a, b| I64x1(a.0.wrapping_add(b.0)),
    Sub::sub(Self) => |a, b| I64x1(a.0.wrapping_sub(b.0)),
    Mul::mul(Self) => |a, b| I64x1(a.0.wrapping_mul(b.0)),
    Div::div(Self) => |a, b| I64x1(a.0.wrapping_div(b.0)),
    BitAnd::bitand(Self) => |a, b| I64x1(a.0 & b.0),
    BitOr::bitor(Self) => |a, b| I64x1(a.0 | b.0),
    BitXor::bitxor(Self) => |a, b| I64x1(a.0 ^ b.0),
    Shl::shl(u32) => |a, n| I64x1(scalar::shl_i64(a.0, u64::from(n))),
    Shr::shr(u32) => |a, n| I64x1(scalar::sra_i64(a.0, u64::from(n))),
    Shl::shl(Self) => |a, n| I64x1(scalar::shl_i64(a.0, n.0 as u64)),
    Shr::shr(Self) => |a, n| I64x1(scalar::sra_i64(a.0, n.0 as u64)),
);
impl_unop!(I64x1,
    Neg::neg => |a| I64x1(a.0.wrapping_neg()),
    Not::not => |a| I64x1(!a.0),
);
impl_arith_assign!(I64x1);
impl_bit_assign!(I64x1);

impl SimdSigned for I64x1 {
    #[inline(always)]
    fn abs(self) -> Self {
        I64x1(self.0.wrapping_abs())
    }
}

impl SimdCompareOps for I64x1 {
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

impl SimdInt for I64x1 {}

impl SimdFloatToInt for I64x1 {
    type UInt = U64x1;
}

impl SimdInt64 for I64x1 {
    type Float = F64x1;

    #[inline(always)]
    fn to_float(self) -> F64x1 {
        F64x1(self.0 as f64)
    }
}
