//! Capability lattice
//!
//! Generic numeric code is written against these traits and bound to a
//! concrete vector type later. The traits compose additively:
//!
//! ```text
//! Simd ─┬─ SimdSigned ── SimdReal ── SimdMath ─┐
//!       ├─ SimdCompareOps ─────────────────────┴─ SimdFloat ── SimdFloat32 / SimdFloat64
//!       ├─ SimdBits ─┬─ SimdInt  ── SimdInt32 / SimdInt64
//!       │            └─ SimdUInt ── SimdUInt32 / SimdUInt64
//!       └─ SimdFloatToInt
//! ```
//!
//! Every concrete vector type implements [`SimdCapability`], which tells the
//! caller where the type may run. Calling any operation of a type whose
//! `cpu_supported()` is false for the executing machine is undefined
//! behaviour (an illegal-instruction fault); [`Capability`](crate::Capability)
//! turns that precondition into a value.
//!
//! # Example
//!
//! ```rust
//! use lanewise::{F32x1, Simd, SimdFloat32, SimdReal};
//!
//! fn saturate<V: SimdFloat32>(x: V) -> V {
//!     x.clamp_to(V::make_set1(1.0))
//! }
//!
//! let v = F32x1::make_set1(3.5);
//! assert_eq!(v.floor().element(0), 3.0);
//! assert_eq!(saturate(v).element(0), 1.0);
//! ```

use core::fmt::Debug;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use bytemuck::Pod;

use crate::cpu::CpuCapabilityProbe;
use crate::features::{FeatureSet, Level};
use crate::layout;
use crate::mask::SimdMask;

/// Where a vector type may run.
///
/// Two independent axes: the compile target (`compiler_*`, constant for the
/// life of the binary) and the executing CPU (`cpu_*`).
pub trait SimdCapability {
    /// Microarchitecture level of this type's tier.
    const LEVEL: Level;

    /// Type name for diagnostics.
    const NAME: &'static str;

    /// Whether the compile target enables every feature the type uses.
    fn compiler_supported() -> bool;

    /// Whether the compile target reaches this type's level.
    #[inline]
    fn compiler_level_supported() -> bool {
        FeatureSet::LEVEL >= Self::LEVEL
    }

    /// Whether the executing CPU has every feature the type uses.
    ///
    /// Pass a probe in hot loops; `None` uses the process-wide probe.
    fn cpu_supported(probe: Option<&CpuCapabilityProbe>) -> bool;

    /// Whether the executing CPU reaches this type's level.
    #[inline]
    fn cpu_level_supported(probe: Option<&CpuCapabilityProbe>) -> bool {
        CpuCapabilityProbe::resolve(probe).level() >= Self::LEVEL
    }
}

/// Fixed-width vector of `LANES` elements with elementwise arithmetic.
///
/// `size_of::<Self>() == LANES * size_of::<Element>()`: a vector can be
/// reinterpreted as a packed element buffer without copying.
pub trait Simd:
    SimdCapability
    + Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + Pod
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Lane type
    type Element: Pod + Debug + Default + PartialEq + PartialOrd + Send + Sync;

    /// Number of lanes
    const LANES: usize;

    #[inline(always)]
    fn number_of_elements() -> usize {
        Self::LANES
    }

    #[inline(always)]
    fn size_of_element() -> usize {
        core::mem::size_of::<Self::Element>()
    }

    /// Broadcast `value` to every lane.
    fn make_set1(value: Self::Element) -> Self;

    /// Lane `i` holds `first + i` (wrapping for integers).
    fn make_sequential(first: Self::Element) -> Self;

    /// Load the first `LANES` elements of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` has fewer than `LANES` elements.
    #[inline]
    fn load(src: &[Self::Element]) -> Self {
        assert!(
            src.len() >= Self::LANES,
            "slice too short for a {}-lane load",
            Self::LANES
        );
        let mut v = <Self as bytemuck::Zeroable>::zeroed();
        layout::lanes_mut(&mut v).copy_from_slice(&src[..Self::LANES]);
        v
    }

    /// Store into the first `LANES` elements of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` has fewer than `LANES` elements.
    #[inline]
    fn store(self, dst: &mut [Self::Element]) {
        assert!(
            dst.len() >= Self::LANES,
            "slice too short for a {}-lane store",
            Self::LANES
        );
        dst[..Self::LANES].copy_from_slice(layout::lanes(&self));
    }

    /// Read lane `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= LANES`.
    #[inline]
    fn element(self, i: usize) -> Self::Element {
        layout::lanes(&self)[i]
    }

    /// Overwrite lane `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= LANES`.
    #[inline]
    fn set_element(&mut self, i: usize, value: Self::Element) {
        layout::lanes_mut(self)[i] = value;
    }

    /// Apply `f` to every lane in scalar code.
    #[inline]
    fn map_lanes(self, mut f: impl FnMut(Self::Element) -> Self::Element) -> Self {
        let mut out = self;
        for lane in layout::lanes_mut(&mut out) {
            *lane = f(*lane);
        }
        out
    }

    /// Combine corresponding lanes of `self` and `other` in scalar code.
    #[inline]
    fn zip_lanes(
        self,
        other: Self,
        mut f: impl FnMut(Self::Element, Self::Element) -> Self::Element,
    ) -> Self {
        let mut out = self;
        for (lane, rhs) in layout::lanes_mut(&mut out).iter_mut().zip(layout::lanes(&other)) {
            *lane = f(*lane, *rhs);
        }
        out
    }
}

/// Negation and absolute value.
///
/// Integer negation and `abs` wrap: `abs(MIN) == MIN`.
pub trait SimdSigned: Simd + Neg<Output = Self> {
    fn abs(self) -> Self;
}

/// Rounding, min/max and clamping.
///
/// `round` rounds half to even. All four rounding operations give the same
/// bits on every tier, including for `-0.0`, infinities and NaN.
pub trait SimdReal: SimdSigned {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;
    fn round(self) -> Self;

    /// `self` where `self < rhs`, else `rhs` (NaN in either lane gives `rhs`).
    fn min(self, rhs: Self) -> Self;

    /// `self` where `self > rhs`, else `rhs` (NaN in either lane gives `rhs`).
    fn max(self, rhs: Self) -> Self;

    /// `self - floor(self)`
    #[inline(always)]
    fn fract(self) -> Self {
        self - self.floor()
    }

    /// Clamp every lane into `[lo, hi]`.
    #[inline(always)]
    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Clamp every lane into `[0, hi]`.
    #[inline(always)]
    fn clamp_to(self, hi: Self) -> Self {
        self.clamp(Self::default(), hi)
    }
}

/// Transcendental functions.
pub trait SimdMath: SimdReal {
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn atan2(self, x: Self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;
    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    fn exp10(self) -> Self;
    /// `e^x - 1`
    fn exp_m1(self) -> Self;
    /// Natural logarithm
    fn ln(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    /// `ln(1 + x)`
    fn ln_1p(self) -> Self;
    fn pow(self, exponent: Self) -> Self;
    fn hypot(self, other: Self) -> Self;
    fn cbrt(self) -> Self;
}

/// Per-lane comparisons and mask-driven selection.
///
/// The mask type depends on the tier: `bool` for the fallback, an
/// all-bits-set/clear vector for 128/256-bit tiers, an `__mmask` bitmask for
/// AVX-512.
///
/// Float comparisons are ordered (false when either lane is NaN) except
/// `compare_neq`, which is true for NaN.
pub trait SimdCompareOps: Simd {
    type Mask: SimdMask;

    fn compare_eq(self, rhs: Self) -> Self::Mask;
    fn compare_neq(self, rhs: Self) -> Self::Mask;
    fn compare_lt(self, rhs: Self) -> Self::Mask;
    fn compare_le(self, rhs: Self) -> Self::Mask;
    fn compare_gt(self, rhs: Self) -> Self::Mask;
    fn compare_ge(self, rhs: Self) -> Self::Mask;

    /// Lane `i` is `if_true[i]` where mask lane `i` is set, `if_false[i]`
    /// otherwise.
    ///
    /// Note the argument order: the *false* operand comes first.
    fn blend(if_false: Self, if_true: Self, mask: Self::Mask) -> Self;

    #[inline(always)]
    fn if_equal(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_eq(rhs))
    }

    #[inline(always)]
    fn if_not_equal(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_neq(rhs))
    }

    #[inline(always)]
    fn if_less(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_lt(rhs))
    }

    #[inline(always)]
    fn if_less_equal(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_le(rhs))
    }

    #[inline(always)]
    fn if_greater(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_gt(rhs))
    }

    #[inline(always)]
    fn if_greater_equal(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Self::blend(if_false, if_true, self.compare_ge(rhs))
    }
}

/// Floating-point vectors.
///
/// `fma` and friends round once on every tier: with FMA hardware where the
/// build enables it, with per-lane `libm` otherwise. Results are bit-identical
/// across tiers.
pub trait SimdFloat: SimdReal + SimdMath + SimdCompareOps {
    /// Approximate `1 / x`.
    ///
    /// Relative error is at most 1.5 * 2^-12 on the 128/256-bit `f32`
    /// tiers and 2^-14 on AVX-512; exact division elsewhere.
    fn reciprocal_approx(self) -> Self;

    /// `self * b + c`
    fn fma(self, b: Self, c: Self) -> Self;

    /// `self * b - c`
    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        self.fma(b, -c)
    }

    /// `-(self * b) + c`
    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        (-self).fma(b, c)
    }

    /// `-(self * b) - c`
    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        (-self).fma(b, -c)
    }
}

/// Bitwise operations and shifts.
///
/// Shifts take either a uniform `u32` count or a per-lane count vector
/// (lanes read as unsigned). Counts at or above the lane width produce 0 for
/// logical shifts and the sign fill for arithmetic shifts.
pub trait SimdBits:
    Simd
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Shl<Self, Output = Self>
    + Shr<Self, Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + ShlAssign<u32>
    + ShrAssign<u32>
    + ShlAssign<Self>
    + ShrAssign<Self>
{
}

/// Signed integers; `>>` is arithmetic. Arithmetic wraps.
///
/// Division truncates toward zero and panics on a zero divisor;
/// `MIN / -1` wraps to `MIN`.
pub trait SimdInt: SimdBits + SimdSigned + SimdCompareOps {}

/// Unsigned integers; `>>` is logical. Arithmetic wraps.
pub trait SimdUInt: SimdBits + SimdCompareOps {
    /// Rotate every lane left by `n` bits (mod the lane width).
    fn rotl(self, n: u32) -> Self;

    /// Rotate every lane right by `n` bits (mod the lane width).
    fn rotr(self, n: u32) -> Self;
}

/// Reinterpretation as the unsigned vector of the same shape.
pub trait SimdFloatToInt: Simd {
    type UInt: SimdUInt;

    /// Same bits, unsigned lanes.
    #[inline(always)]
    fn bitcast_to_uint(self) -> Self::UInt {
        layout::bitcast(self)
    }

    /// Inverse of [`bitcast_to_uint`](Self::bitcast_to_uint).
    #[inline(always)]
    fn bitcast_from_uint(bits: Self::UInt) -> Self {
        layout::bitcast(bits)
    }
}

/// `f32` lanes.
pub trait SimdFloat32: SimdFloat<Element = f32> + SimdFloatToInt {
    /// Signed vector with the same lane count; converts back to `Self`.
    type Int: SimdInt32<Float = Self>;

    /// Truncate toward zero; NaN and out-of-range lanes give `i32::MIN`.
    fn to_int_trunc(self) -> Self::Int;

    /// Broadcast an 8-bit channel value rescaled to `0..=1`.
    #[inline(always)]
    fn make_unorm8(value: u8) -> Self {
        Self::make_set1(f32::from(value) / 255.0)
    }
}

/// `f64` lanes.
pub trait SimdFloat64: SimdFloat<Element = f64> + SimdFloatToInt {
    /// Signed vector with the same lane count; converts back to `Self`.
    type Int: SimdInt64<Float = Self>;

    /// Truncate toward zero; NaN and out-of-range lanes give `i64::MIN`.
    fn to_int_trunc(self) -> Self::Int;

    /// Broadcast an 8-bit channel value rescaled to `0..=1`.
    #[inline(always)]
    fn make_unorm8(value: u8) -> Self {
        Self::make_set1(f64::from(value) / 255.0)
    }
}

/// `i32` lanes.
pub trait SimdInt32: SimdInt<Element = i32> + SimdFloatToInt {
    type Float: SimdFloat32;

    /// Convert each lane to the nearest `f32`.
    fn to_float(self) -> Self::Float;
}

/// `i64` lanes.
pub trait SimdInt64: SimdInt<Element = i64> + SimdFloatToInt {
    type Float: SimdFloat64;

    fn to_float(self) -> Self::Float;
}

/// `u32` lanes.
pub trait SimdUInt32: SimdUInt<Element = u32> + SimdFloatToInt {
    type Float: SimdFloat32;

    fn to_float(self) -> Self::Float;
}

/// `u64` lanes.
pub trait SimdUInt64: SimdUInt<Element = u64> + SimdFloatToInt {
    type Float: SimdFloat64;

    fn to_float(self) -> Self::Float;
}

/// Compile-time membership checks for a family of vector types.
macro_rules! assert_lattice {
    ($bound:ident: $($ty:ty),+ $(,)?) => {
        const _: fn() = || {
            fn check<T: $crate::traits::$bound>() {}
            $(check::<$ty>();)+
        };
    };
}

pub(crate) use assert_lattice;
