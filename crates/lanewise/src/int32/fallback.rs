//! Scalar `i32` fallback

use crate::capability::Portable;
use crate::float32::F32x1;
use crate::layout::impl_vector_layout;
use crate::scalar;
use crate::traits::{Simd, SimdCompareOps, SimdFloatToInt, SimdInt, SimdInt32, SimdSigned};
use crate::uint32::U32x1;

/// One `i32` lane.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I32x1(pub i32);

impl_vector_layout!(I32x1, i32, 1);
impl_capability!(I32x1, Fallback, []);
impl Portable for I32x1 {}

impl Simd for I32x1 {
    type Element = i32;
    const LANES: usize = 1;

    #[inline(always)]
    fn make_set1(value: i32) -> Self {
        I32x1(value)
    }

    #[inline(always)]
    fn make_sequential(first: i32) -> Self {
        I32x1(first)
    }
}

impl_binop!(I32x1,
    Add::add(Self) => |a, b| I32x1(a.0.wrapping_add(b.0)),
    Sub::sub(Self) => |a, b| I32x1(a.0.wrapping_sub(b.0)),
    Mul::mul(Self) => |a, b| I32x1(a.0.wrapping_mul(b.0)),
    Div::div(Self) => |a, b| I32x1(a.0.wrapping_div(b.0)),
    BitAnd::bitand(Self) => |a, b| I32x1(a.0 & b.0),
    BitOr::bitor(Self) => |a, b| I32x1(a.0 | b.0),
    BitXor::bitxor(Self) => |a, b| I32x1(a.0 ^ b.0),
    Shl::shl(u32) => |a, n| I32x1(scalar::shl_i32(a.0, n)),
    Shr::shr(u32) => |a, n| I32x1(scalar::sra_i32(a.0, n)),
    Shl::shl(Self) => |a, n| I32x1(scalar::shl_i32(a.0, n.0 as u32)),
    Shr::shr(Self) => |a, n| I32x1(scalar::sra_i32(a.0, n.0 as u32)),
);
impl_unop!(I32x1,
    Neg::neg => |a| I32x1(a.0.wrapping_neg()),
    Not::not => |a| I32x1(!a.0),
);
impl_arith_assign!(I32x1);
impl_bit_assign!(I32x1);

impl SimdSigned for I32x1 {
    #[inline(always)]
    fn abs(self) -> Self {
        I32x1(self.0.wrapping_abs())
    }
}

impl SimdCompareOps for I32x1 {
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

impl SimdInt for I32x1 {}

impl SimdFloatToInt for I32x1 {
    type UInt = U32x1;
}

impl SimdInt32 for I32x1 {
    type Float = F32x1;

    #[inline(always)]
    fn to_float(self) -> F32x1 {
        F32x1(self.0 as f32)
    }
}
