//! `i64` vector family
//!
//! | Type       | Lanes | Requires             |
//! |------------|-------|----------------------|
//! | [`I64x1`]  | 1     | nothing              |
//! | `I64x2`    | 2     | SSE2                 |
//! | `I64x4`    | 4     | AVX2 + FMA           |
//! | `I64x8`    | 8     | AVX-512F + AVX-512DQ |
//!
//! Below AVX-512DQ the 64-bit multiply is assembled from 32-bit partial
//! products (the high-by-high term vanishes modulo 2^64), so every tier
//! returns the same wrapped product.

mod fallback;

pub use fallback::I64x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::I64x4;
#[cfg(target_arch = "x86_64")]
pub use avx512::I64x8;
#[cfg(target_arch = "x86_64")]
pub use sse::I64x2;

crate::traits::assert_lattice!(SimdInt64: I64x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdInt64: I64x2, I64x4, I64x8);
