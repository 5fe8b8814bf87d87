//! Scalar `f64` fallback

use crate::capability::Portable;
use crate::float32::F32x1;
use crate::int64::I64x1;
use crate::layout::impl_vector_layout;
use crate::scalar;
use crate::traits::{
    Simd, SimdCompareOps, SimdFloat, SimdFloat64, SimdFloatToInt, SimdReal, SimdSigned,
};
use crate::uint64::U64x1;

/// One `f64` lane.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x1(pub f64);

impl_vector_layout!(F64x1, f64, 1);
impl_capability!(F64x1, Fallback, []);
impl Portable for F64x1 {}

impl F64x1 {
    /// Narrow to `f32`, rounding to nearest.
    #[inline(always)]
    pub fn narrow(self) -> F32x1 {
        F32x1(self.0 as f32)
    }
}

impl Simd for F64x1 {
    type Element = f64;
    const LANES: usize = 1;

    #[inline(always)]
    fn make_set1(value: f64) -> Self {
        F64x1(value)
    }

    #[inline(always)]
    fn make_sequential(first: f64) -> Self {
        F64x1(first)
    }
}

impl_binop!(F64x1,
    Add::add(Self) => |a, b| F64x1(a.0 + b.0),
    Sub::sub(Self) => |a, b| F64x1(a.0 - b.0),
    Mul::mul(Self) => |a, b| F64x1(a.0 * b.0),
    Div::div(Self) => |a, b| F64x1(a.0 / b.0),
);
impl_unop!(F64x1, Neg::neg => |a| F64x1(-a.0));
impl_arith_assign!(F64x1);

impl SimdSigned for F64x1 {
    #[inline(always)]
    fn abs(self) -> Self {
        F64x1(f64::from_bits(self.0.to_bits() & !(1 << 63)))
    }
}

impl SimdReal for F64x1 {
    #[inline(always)]
    fn floor(self) -> Self {
        F64x1(libm::floor(self.0))
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        F64x1(libm::ceil(self.0))
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        F64x1(libm::trunc(self.0))
    }

    #[inline(always)]
    fn round(self) -> Self {
        F64x1(scalar::round_even_f64(self.0))
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        F64x1(scalar::min_f64(self.0, rhs.0))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        F64x1(scalar::max_f64(self.0, rhs.0))
    }
}

impl_simd_math!(F64x1, f64_lanes, sqrt => |a| F64x1(libm::sqrt(a.0)));

impl SimdCompareOps for F64x1 {
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

impl SimdFloat for F64x1 {
    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        F64x1(1.0 / self.0)
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        F64x1(libm::fma(self.0, b.0, c.0))
    }
}

impl SimdFloatToInt for F64x1 {
    type UInt = U64x1;
}

impl SimdFloat64 for F64x1 {
    type Int = I64x1;

    #[inline(always)]
    fn to_int_trunc(self) -> I64x1 {
        I64x1(scalar::trunc_f64_to_i64(self.0))
    }
}
