//! Comparison masks
//!
//! Each tier represents a per-lane boolean the way its hardware does:
//!
//! | Tier      | 32-bit lanes | 64-bit lanes |
//! |-----------|--------------|--------------|
//! | fallback  | `bool`       | `bool`       |
//! | 128-bit   | [`M32x4`]    | [`M64x2`]    |
//! | 256-bit   | [`M32x8`]    | [`M64x4`]    |
//! | 512-bit   | [`Mask16`]   | [`Mask8`]    |
//!
//! The wide masks hold all-ones or all-zeros per lane. Masks are shared by
//! every element kind with the same lane shape, so a mask from comparing
//! `I32x4` values can drive a blend of `F32x4` values.

use core::fmt;

/// Per-lane boolean produced by `compare_*`.
pub trait SimdMask: Copy + fmt::Debug + PartialEq + Send + Sync {
    /// Number of lanes
    const LANES: usize;

    /// Every lane set to `value`.
    fn splat(value: bool) -> Self;

    /// Lane `i` set where bit `i` of `bits` is set.
    fn from_bitmask(bits: u64) -> Self;

    /// Bit `i` set where lane `i` is set.
    fn bitmask(self) -> u64;

    /// Whether lane `i` is set.
    ///
    /// # Panics
    ///
    /// Panics if `i >= LANES`.
    #[inline]
    fn test(self, i: usize) -> bool {
        assert!(i < Self::LANES, "lane {i} out of range");
        self.bitmask() >> i & 1 != 0
    }

    #[inline]
    fn all(self) -> bool {
        self.bitmask() == (1u64 << Self::LANES) - 1
    }

    #[inline]
    fn any(self) -> bool {
        self.bitmask() != 0
    }

    #[inline]
    fn none(self) -> bool {
        self.bitmask() == 0
    }

    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;
}

impl SimdMask for bool {
    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        value
    }

    #[inline(always)]
    fn from_bitmask(bits: u64) -> Self {
        bits & 1 != 0
    }

    #[inline(always)]
    fn bitmask(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self & rhs
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self | rhs
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self ^ rhs
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

macro_rules! impl_bit_mask {
    ($(#[$doc:meta])* $name:ident, $bits:ty, $lanes:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub $bits);

        impl SimdMask for $name {
            const LANES: usize = $lanes;

            #[inline(always)]
            fn splat(value: bool) -> Self {
                $name(if value { <$bits>::MAX } else { 0 })
            }

            #[inline(always)]
            fn from_bitmask(bits: u64) -> Self {
                $name(bits as $bits)
            }

            #[inline(always)]
            fn bitmask(self) -> u64 {
                u64::from(self.0)
            }

            #[inline(always)]
            fn and(self, rhs: Self) -> Self {
                $name(self.0 & rhs.0)
            }

            #[inline(always)]
            fn or(self, rhs: Self) -> Self {
                $name(self.0 | rhs.0)
            }

            #[inline(always)]
            fn xor(self, rhs: Self) -> Self {
                $name(self.0 ^ rhs.0)
            }

            #[inline(always)]
            fn not(self) -> Self {
                $name(!self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:#0width$b})", stringify!($name), self.0, width = $lanes + 2)
            }
        }
    };
}

impl_bit_mask!(
    /// AVX-512 opmask for 8 lanes (`__mmask8`).
    Mask8, u8, 8
);
impl_bit_mask!(
    /// AVX-512 opmask for 16 lanes (`__mmask16`).
    Mask16, u16, 16
);

#[cfg(target_arch = "x86_64")]
pub use wide::{M32x4, M32x8, M64x2, M64x4};

#[cfg(target_arch = "x86_64")]
mod wide {
    use core::arch::x86_64::*;
    use core::fmt;

    use super::SimdMask;

    macro_rules! impl_wide_mask {
        (
            $(#[$doc:meta])* $name:ident($reg:ty), $lanes:literal,
            movemask: |$m:ident| $movemask:expr,
            from_bits: |$b:ident| $from_bits:expr,
            and: $and:path, or: $or:path, xor: $xor:path, ones: $ones:expr, zero: $zero:expr $(,)?
        ) => {
            $(#[$doc])*
            #[derive(Clone, Copy)]
            #[repr(transparent)]
            pub struct $name(pub(crate) $reg);

            impl $name {
                /// Wrap raw register bits. Every lane must be all-ones or all-zeros.
                #[inline(always)]
                pub const fn from_raw(raw: $reg) -> Self {
                    $name(raw)
                }

                #[inline(always)]
                pub const fn into_raw(self) -> $reg {
                    self.0
                }
            }

            impl SimdMask for $name {
                const LANES: usize = $lanes;

                #[inline(always)]
                fn splat(value: bool) -> Self {
                    $name(unsafe { if value { $ones } else { $zero } })
                }

                #[inline(always)]
                fn from_bitmask(bits: u64) -> Self {
                    let $b = bits;
                    $name(unsafe { $from_bits })
                }

                #[inline(always)]
                fn bitmask(self) -> u64 {
                    let $m = self.0;
                    (unsafe { $movemask }) as u32 as u64
                }

                #[inline(always)]
                fn and(self, rhs: Self) -> Self {
                    $name(unsafe { $and(self.0, rhs.0) })
                }

                #[inline(always)]
                fn or(self, rhs: Self) -> Self {
                    $name(unsafe { $or(self.0, rhs.0) })
                }

                #[inline(always)]
                fn xor(self, rhs: Self) -> Self {
                    $name(unsafe { $xor(self.0, rhs.0) })
                }

                #[inline(always)]
                fn not(self) -> Self {
                    $name(unsafe { $xor(self.0, $ones) })
                }
            }

            impl PartialEq for $name {
                fn eq(&self, other: &Self) -> bool {
                    self.bitmask() == other.bitmask()
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({:#0width$b})", stringify!($name), self.bitmask(), width = $lanes + 2)
                }
            }
        };
    }

    impl_wide_mask!(
        /// 128-bit mask over four 32-bit lanes.
        M32x4(__m128i), 4,
        movemask: |m| _mm_movemask_ps(_mm_castsi128_ps(m)),
        from_bits: |b| {
            let lanes = _mm_setr_epi32(1, 2, 4, 8);
            _mm_cmpeq_epi32(_mm_and_si128(_mm_set1_epi32(b as i32), lanes), lanes)
        },
        and: _mm_and_si128, or: _mm_or_si128, xor: _mm_xor_si128,
        ones: _mm_set1_epi32(-1), zero: _mm_setzero_si128(),
    );

    impl_wide_mask!(
        /// 128-bit mask over two 64-bit lanes.
        M64x2(__m128i), 2,
        movemask: |m| _mm_movemask_pd(_mm_castsi128_pd(m)),
        from_bits: |b| _mm_set_epi64x(-((b >> 1 & 1) as i64), -((b & 1) as i64)),
        and: _mm_and_si128, or: _mm_or_si128, xor: _mm_xor_si128,
        ones: _mm_set1_epi32(-1), zero: _mm_setzero_si128(),
    );

    impl_wide_mask!(
        /// 256-bit mask over eight 32-bit lanes.
        M32x8(__m256i), 8,
        movemask: |m| _mm256_movemask_ps(_mm256_castsi256_ps(m)),
        from_bits: |b| {
            let lanes = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
            _mm256_cmpeq_epi32(_mm256_and_si256(_mm256_set1_epi32(b as i32), lanes), lanes)
        },
        and: _mm256_and_si256, or: _mm256_or_si256, xor: _mm256_xor_si256,
        ones: _mm256_set1_epi32(-1), zero: _mm256_setzero_si256(),
    );

    impl_wide_mask!(
        /// 256-bit mask over four 64-bit lanes.
        M64x4(__m256i), 4,
        movemask: |m| _mm256_movemask_pd(_mm256_castsi256_pd(m)),
        from_bits: |b| {
            let lanes = _mm256_setr_epi64x(1, 2, 4, 8);
            _mm256_cmpeq_epi64(_mm256_and_si256(_mm256_set1_epi64x(b as i64), lanes), lanes)
        },
        and: _mm256_and_si256, or: _mm256_or_si256, xor: _mm256_xor_si256,
        ones: _mm256_set1_epi32(-1), zero: _mm256_setzero_si256(),
    );
}
