//! `u64` vector family
//!
//! | Type       | Lanes | Requires             |
//! |------------|-------|----------------------|
//! | [`U64x1`]  | 1     | nothing              |
//! | `U64x2`    | 2     | SSE2                 |
//! | `U64x4`    | 4     | AVX2 + FMA           |
//! | `U64x8`    | 8     | AVX-512F + AVX-512DQ |

mod fallback;

pub use fallback::U64x1;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::U64x4;
#[cfg(target_arch = "x86_64")]
pub use avx512::U64x8;
#[cfg(target_arch = "x86_64")]
pub use sse::U64x2;

crate::traits::assert_lattice!(SimdUInt64: U64x1);
#[cfg(target_arch = "x86_64")]
crate::traits::assert_lattice!(SimdUInt64: U64x2, U64x4, U64x8);
