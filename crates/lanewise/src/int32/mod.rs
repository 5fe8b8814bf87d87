//! `i32` vector family
//!
//! | Type       | Lanes | Requires       |
//! |------------|-------|----------------|
//! | [`I32x1`]  | 1     | nothing        |
//! | `I32x4`    | 4     | SSE2           |
//! | `I32x8`    | 8     | AVX2 + FMA     |
//! | `I32x16`   | 16    | AVX-512F       |
//!
//! Arithmetic wraps. Division truncates toward zero and runs lane by lane
//! on every tier, since x86 has no vector integer divide.

mod fallback;

pub use fallback::I32x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::I32x8;
#[cfg(target_arch = "x86_64")]
pub use avx512::I32x16;
#[cfg(target_arch = "x86_64")]
pub use sse::I32x4;

crate::traits::assert_lattice!(SimdInt32: I32x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdInt32: I32x4, I32x8, I32x16);
