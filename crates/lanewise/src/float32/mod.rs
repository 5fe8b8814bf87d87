//! `f32` vector family
//!
//! | Type       | Lanes | Requires       |
//! |------------|-------|----------------|
//! | [`F32x1`]  | 1     | nothing        |
//! | `F32x4`    | 4     | SSE2           |
//! | `F32x8`    | 8     | AVX2 + FMA     |
//! | `F32x16`   | 16    | AVX-512F       |

mod fallback;

pub use fallback::F32x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::F32x8;
#[cfg(target_arch = "x86_64")]
pub use avx512::F32x16;
#[cfg(target_arch = "x86_64")]
pub use sse::F32x4;

crate::traits::assert_lattice!(SimdFloat32: F32x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdFloat32: F32x4, F32x8, F32x16);
