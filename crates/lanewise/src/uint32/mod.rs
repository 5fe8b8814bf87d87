//! `u32` vector family
//!
//! | Type       | Lanes | Requires       |
//! |------------|-------|----------------|
//! | [`U32x1`]  | 1     | nothing        |
//! | `U32x4`    | 4     | SSE2           |
//! | `U32x8`    | 8     | AVX2 + FMA     |
//! | `U32x16`   | 16    | AVX-512F       |
//!
//! These are also the `bitcast_to_uint` targets of the `f32` and `i32`
//! types with the same lane count.

mod fallback;

pub use fallback::U32x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::U32x8;
#[cfg(target_arch = "x86_64")]
pub use avx512::U32x16;
#[cfg(target_arch = "x86_64")]
pub use sse::U32x4;

crate::traits::assert_lattice!(SimdUInt32: U32x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdUInt32: U32x4, U32x8, U32x16);
