//! Operator boilerplate shared by every vector type.
//!
//! Each tier writes its intrinsic bodies once; these macros stamp out the
//! `core::ops` impls around them.

/// Implement binary operators from a two-argument body.
///
/// ```ignore
/// impl_binop!(F32x4, Add::add(Self) => |a, b| Self(unsafe { _mm_add_ps(a.0, b.0) }));
/// ```
macro_rules! impl_binop {
    ($ty:ty, $($trait:ident :: $method:ident ($rhs:ty) => |$a:ident, $b:ident| $body:expr),+ $(,)?) => {
        $(
            impl core::ops::$trait<$rhs> for $ty {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: $rhs) -> Self {
                    let ($a, $b) = (self, rhs);
                    $body
                }
            }
        )+
    };
}

/// Implement unary operators from a one-argument body.
macro_rules! impl_unop {
    ($ty:ty, $($trait:ident :: $method:ident => |$a:ident| $body:expr),+ $(,)?) => {
        $(
            impl core::ops::$trait for $ty {
                type Output = Self;

                #[inline(always)]
                fn $method(self) -> Self {
                    let $a = self;
                    $body
                }
            }
        )+
    };
}

/// Compound assignment in terms of the matching binary operator.
macro_rules! impl_assign_ops {
    ($ty:ty, $($assign:ident :: $assign_method:ident => $op:ident :: $method:ident ($rhs:ty)),+ $(,)?) => {
        $(
            impl core::ops::$assign<$rhs> for $ty {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: $rhs) {
                    *self = core::ops::$op::$method(*self, rhs);
                }
            }
        )+
    };
}

/// `+= -= *= /=`
macro_rules! impl_arith_assign {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl_assign_ops!($ty,
                AddAssign::add_assign => Add::add(Self),
                SubAssign::sub_assign => Sub::sub(Self),
                MulAssign::mul_assign => Mul::mul(Self),
                DivAssign::div_assign => Div::div(Self),
            );
        )+
    };
}

/// `&= |= ^= <<= >>=`, shifts by a uniform `u32` and by a per-lane vector.
///
/// Also marks the type as [`SimdBits`](crate::traits::SimdBits), which is
/// exactly the operator set above plus the binary operators.
macro_rules! impl_bit_assign {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl_assign_ops!($ty,
                BitAndAssign::bitand_assign => BitAnd::bitand(Self),
                BitOrAssign::bitor_assign => BitOr::bitor(Self),
                BitXorAssign::bitxor_assign => BitXor::bitxor(Self),
                ShlAssign::shl_assign => Shl::shl(u32),
                ShrAssign::shr_assign => Shr::shr(u32),
                ShlAssign::shl_assign => Shl::shl(Self),
                ShrAssign::shr_assign => Shr::shr(Self),
            );

            impl $crate::traits::SimdBits for $ty {}
        )+
    };
}

/// Compile-time and run-time capability predicates for one vector type.
///
/// The feature list is what the type's instructions need; an empty list
/// means the type runs everywhere.
macro_rules! impl_capability {
    ($ty:ident, $level:ident, [$($feature:ident),* $(,)?]) => {
        impl $crate::traits::SimdCapability for $ty {
            const LEVEL: $crate::features::Level = $crate::features::Level::$level;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn compiler_supported() -> bool {
                true $(&& $crate::features::FeatureSet::has($crate::features::Feature::$feature))*
            }

            #[inline]
            #[allow(unused_variables)]
            fn cpu_supported(probe: Option<&$crate::cpu::CpuCapabilityProbe>) -> bool {
                let probe = $crate::cpu::CpuCapabilityProbe::resolve(probe);
                true $(&& probe.has($crate::features::Feature::$feature))*
            }
        }
    };
}

/// Transcendentals evaluated lane by lane through `libm`.
///
/// `sqrt` is passed in separately so each tier can use its hardware
/// square root.
macro_rules! impl_simd_math {
    ($ty:ty, $lanes:ident, sqrt => |$a:ident| $sqrt:expr) => {
        impl $crate::traits::SimdMath for $ty {
            #[inline(always)]
            fn sqrt(self) -> Self {
                let $a = self;
                $sqrt
            }

            fn sin(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::sin)
            }
            fn cos(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::cos)
            }
            fn tan(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::tan)
            }
            fn asin(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::asin)
            }
            fn acos(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::acos)
            }
            fn atan(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::atan)
            }
            fn atan2(self, x: Self) -> Self {
                $crate::traits::Simd::zip_lanes(self, x, $crate::math::$lanes::atan2)
            }
            fn sinh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::sinh)
            }
            fn cosh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::cosh)
            }
            fn tanh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::tanh)
            }
            fn asinh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::asinh)
            }
            fn acosh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::acosh)
            }
            fn atanh(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::atanh)
            }
            fn exp(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::exp)
            }
            fn exp2(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::exp2)
            }
            fn exp10(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::exp10)
            }
            fn exp_m1(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::expm1)
            }
            fn ln(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::log)
            }
            fn log2(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::log2)
            }
            fn log10(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::log10)
            }
            fn ln_1p(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::log1p)
            }
            fn pow(self, exponent: Self) -> Self {
                $crate::traits::Simd::zip_lanes(self, exponent, $crate::math::$lanes::pow)
            }
            fn hypot(self, other: Self) -> Self {
                $crate::traits::Simd::zip_lanes(self, other, $crate::math::$lanes::hypot)
            }
            fn cbrt(self) -> Self {
                $crate::traits::Simd::map_lanes(self, $crate::math::$lanes::cbrt)
            }
        }
    };
}

/// Bail out of a test when the host CPU cannot run `$ty`.
#[cfg(test)]
macro_rules! require_cpu {
    ($ty:ty) => {
        if !<$ty as $crate::traits::SimdCapability>::cpu_supported(None) {
            eprintln!("skipping: {} not supported on this CPU", stringify!($ty));
            return;
        }
    };
}
