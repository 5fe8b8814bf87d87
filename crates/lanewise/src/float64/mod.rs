//! `f64` vector family
//!
//! | Type       | Lanes | Requires       |
//! |------------|-------|----------------|
//! | [`F64x1`]  | 1     | nothing        |
//! | `F64x2`    | 2     | SSE2           |
//! | `F64x4`    | 4     | AVX2 + FMA     |
//! | `F64x8`    | 8     | AVX-512F + DQ  |
//!
//! Each tier can narrow to the `f32` tier of the same register width; the
//! `f32` types widen back with `widen_low` / `widen_high`.

mod fallback;

pub use fallback::F64x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::F64x4;
#[cfg(target_arch = "x86_64")]
pub use avx512::F64x8;
#[cfg(target_arch = "x86_64")]
pub use sse::F64x2;

crate::traits::assert_lattice!(SimdFloat64: F64x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdFloat64: F64x2, F64x4, F64x8);
