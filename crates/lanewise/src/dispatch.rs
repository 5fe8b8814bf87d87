//! Runtime tier dispatch
//!
//! A kernel is written once, generically over a capability trait, and the
//! dispatcher binds it to the widest vector type the probe allows. Tiers are
//! tried in priority order AVX-512 → AVX2 → SSE → fallback; the chosen tier
//! runs inside a `#[target_feature]` trampoline so the vector methods inline
//! into code compiled for that instruction set.
//!
//! ```rust
//! use lanewise::dispatch::{dispatch_float32, Float32Kernel};
//! use lanewise::{Capability, CpuCapabilityProbe, Simd, SimdFloat32};
//!
//! struct Scale<'a>(&'a mut [f32], f32);
//!
//! impl Float32Kernel for Scale<'_> {
//!     type Output = ();
//!
//!     fn run<V: SimdFloat32>(self, _cap: Capability<V>) {
//!         let factor = V::make_set1(self.1);
//!         let mut chunks = self.0.chunks_exact_mut(V::LANES);
//!         for chunk in &mut chunks {
//!             (V::load(chunk) * factor).store(chunk);
//!         }
//!         for x in chunks.into_remainder() {
//!             *x *= self.1;
//!         }
//!     }
//! }
//!
//! let mut data = [1.0f32; 37];
//! dispatch_float32(CpuCapabilityProbe::get(), Scale(&mut data, 2.0));
//! assert!(data.iter().all(|&x| x == 2.0));
//! ```

use core::fmt;

use log::{debug, trace};

use crate::capability::Capability;
use crate::cpu::CpuCapabilityProbe;
use crate::traits::{
    SimdCapability, SimdFloat32, SimdFloat64, SimdInt32, SimdInt64, SimdUInt32, SimdUInt64,
};
use crate::{F32x1, F64x1, I32x1, I64x1, U32x1, U64x1};

#[cfg(target_arch = "x86_64")]
use crate::{
    F32x16, F32x4, F32x8, F64x2, F64x4, F64x8, I32x16, I32x4, I32x8, I64x2, I64x4, I64x8,
    U32x16, U32x4, U32x8, U64x2, U64x4, U64x8,
};

/// Register width a kernel was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// One lane, no extensions
    Fallback,
    /// 128-bit
    Sse,
    /// 256-bit
    Avx2,
    /// 512-bit
    Avx512,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Fallback, Tier::Sse, Tier::Avx2, Tier::Avx512];

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Fallback => "fallback",
            Tier::Sse => "sse",
            Tier::Avx2 => "avx2",
            Tier::Avx512 => "avx512",
        }
    }

    /// Register width in bits (32 for the single-lane fallback).
    pub const fn bits(self) -> usize {
        match self {
            Tier::Fallback => 32,
            Tier::Sse => 128,
            Tier::Avx2 => 256,
            Tier::Avx512 => 512,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `V` may be used with `probe`; logs the rejection otherwise.
fn accepts<V: SimdCapability>(probe: &CpuCapabilityProbe) -> bool {
    match Capability::<V>::new(probe) {
        Ok(_) => true,
        Err(err) => {
            trace!("skipping {}: {err}", V::NAME);
            false
        }
    }
}

macro_rules! dispatcher {
    (
        $(#[$kernel_doc:meta])*
        kernel $kernel:ident: $bound:ident;
        $(#[$tier_doc:meta])*
        tier $tier_fn:ident;
        $(#[$dispatch_doc:meta])*
        dispatch $dispatch_fn:ident;
        fallback: $fallback:ident,
        sse: $sse:ident,
        avx2: $avx2:ident,
        avx512: $avx512:ident = $avx512_features:literal $(,)?
    ) => {
        $(#[$kernel_doc])*
        pub trait $kernel {
            type Output;

            /// Body of the kernel for one concrete vector type.
            fn run<V: $bound>(self, cap: Capability<V>) -> Self::Output;
        }

        $(#[$tier_doc])*
        pub fn $tier_fn(probe: &CpuCapabilityProbe) -> Tier {
            #[cfg(target_arch = "x86_64")]
            {
                if accepts::<$avx512>(probe) {
                    return Tier::Avx512;
                }
                if accepts::<$avx2>(probe) {
                    return Tier::Avx2;
                }
                if accepts::<$sse>(probe) {
                    return Tier::Sse;
                }
            }
            #[cfg(not(target_arch = "x86_64"))]
            let _ = probe;
            Tier::Fallback
        }

        $(#[$dispatch_doc])*
        pub fn $dispatch_fn<K: $kernel>(probe: &CpuCapabilityProbe, kernel: K) -> K::Output {
            let tier = $tier_fn(probe);
            debug!(
                "{}: binding {} to the {tier} tier",
                stringify!($dispatch_fn),
                core::any::type_name::<K>()
            );
            match tier {
                #[cfg(target_arch = "x86_64")]
                Tier::Avx512 => {
                    #[target_feature(enable = $avx512_features)]
                    unsafe fn trampoline<K: $kernel>(kernel: K, cap: Capability<$avx512>) -> K::Output {
                        kernel.run(cap)
                    }
                    // SAFETY: the tier was chosen because `Capability::<$avx512>::new`
                    // accepted this CPU.
                    unsafe { trampoline(kernel, Capability::new_unchecked()) }
                }
                #[cfg(target_arch = "x86_64")]
                Tier::Avx2 => {
                    #[target_feature(enable = "avx,avx2,fma")]
                    unsafe fn trampoline<K: $kernel>(kernel: K, cap: Capability<$avx2>) -> K::Output {
                        kernel.run(cap)
                    }
                    // SAFETY: as above, for the AVX2 tier.
                    unsafe { trampoline(kernel, Capability::new_unchecked()) }
                }
                #[cfg(target_arch = "x86_64")]
                Tier::Sse => {
                    #[target_feature(enable = "sse,sse2")]
                    unsafe fn trampoline<K: $kernel>(kernel: K, cap: Capability<$sse>) -> K::Output {
                        kernel.run(cap)
                    }
                    // SAFETY: as above, for the SSE tier.
                    unsafe { trampoline(kernel, Capability::new_unchecked()) }
                }
                _ => kernel.run(Capability::<$fallback>::always()),
            }
        }
    };
}

dispatcher! {
    /// Kernel over `f32` lanes.
    kernel Float32Kernel: SimdFloat32;
    /// Tier [`dispatch_float32`] would pick for `probe`.
    tier float32_tier;
    /// Run `kernel` on the widest `f32` vector `probe` supports.
    dispatch dispatch_float32;
    fallback: F32x1,
    sse: F32x4,
    avx2: F32x8,
    avx512: F32x16 = "avx512f",
}

dispatcher! {
    /// Kernel over `f64` lanes.
    kernel Float64Kernel: SimdFloat64;
    /// Tier [`dispatch_float64`] would pick for `probe`.
    tier float64_tier;
    /// Run `kernel` on the widest `f64` vector `probe` supports.
    dispatch dispatch_float64;
    fallback: F64x1,
    sse: F64x2,
    avx2: F64x4,
    avx512: F64x8 = "avx512f,avx512dq",
}

dispatcher! {
    /// Kernel over `i32` lanes.
    kernel Int32Kernel: SimdInt32;
    /// Tier [`dispatch_int32`] would pick for `probe`.
    tier int32_tier;
    /// Run `kernel` on the widest `i32` vector `probe` supports.
    dispatch dispatch_int32;
    fallback: I32x1,
    sse: I32x4,
    avx2: I32x8,
    avx512: I32x16 = "avx512f",
}

dispatcher! {
    /// Kernel over `i64` lanes.
    kernel Int64Kernel: SimdInt64;
    /// Tier [`dispatch_int64`] would pick for `probe`.
    tier int64_tier;
    /// Run `kernel` on the widest `i64` vector `probe` supports.
    dispatch dispatch_int64;
    fallback: I64x1,
    sse: I64x2,
    avx2: I64x4,
    avx512: I64x8 = "avx512f,avx512dq",
}

dispatcher! {
    /// Kernel over `u32` lanes.
    kernel UInt32Kernel: SimdUInt32;
    /// Tier [`dispatch_uint32`] would pick for `probe`.
    tier uint32_tier;
    /// Run `kernel` on the widest `u32` vector `probe` supports.
    dispatch dispatch_uint32;
    fallback: U32x1,
    sse: U32x4,
    avx2: U32x8,
    avx512: U32x16 = "avx512f",
}

dispatcher! {
    /// Kernel over `u64` lanes.
    kernel UInt64Kernel: SimdUInt64;
    /// Tier [`dispatch_uint64`] would pick for `probe`.
    tier uint64_tier;
    /// Run `kernel` on the widest `u64` vector `probe` supports.
    dispatch dispatch_uint64;
    fallback: U64x1,
    sse: U64x2,
    avx2: U64x4,
    avx512: U64x8 = "avx512f,avx512dq",
}
