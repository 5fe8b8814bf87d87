#![doc = include_str!("../README.md")]
#![warn(clippy::all)]

//! # Crate layout
//!
//! - [`features`] / [`cpu`]: compile-target and executing-CPU feature sets,
//!   classified into a [`Level`].
//! - [`traits`]: the capability lattice generic code is written against.
//! - One module per element kind, each with a fallback, 128-bit, 256-bit and
//!   512-bit type.
//! - [`native`]: aliases for the widest type the compile target runs.
//! - [`capability`] / [`dispatch`]: runtime selection of a tier.
//!
//! # No horizontal reductions
//!
//! Every operation is lane-wise. There is no sum, product, min or max across
//! the lanes of one vector; callers that need one store the vector with
//! [`Simd::store`] or [`Simd::element`] and reduce in scalar code.

#[macro_use]
mod macros;

pub mod capability;
pub mod color;
pub mod cpu;
pub mod dispatch;
pub mod error;
pub mod features;
pub mod float32;
pub mod float64;
pub mod int32;
pub mod int64;
mod layout;
// SSE/SSE2 intrinsics are safe to call on the x86_64 baseline.
#[allow(unused_unsafe)]
pub mod mask;
mod math;
pub mod native;
mod scalar;
pub mod traits;
pub mod uint32;
pub mod uint64;
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
mod x86;

pub use capability::{Capability, Portable};
pub use color::{pack_channels, unpack_channel, Channel};
pub use cpu::{CpuCapabilityProbe, CpuidRegisters};
pub use dispatch::{
    dispatch_float32, dispatch_float64, dispatch_int32, dispatch_int64, dispatch_uint32,
    dispatch_uint64, Float32Kernel, Float64Kernel, Int32Kernel, Int64Kernel, Tier,
    UInt32Kernel, UInt64Kernel,
};
pub use error::{Error, Result};
pub use features::{Feature, FeatureSet, Level};
pub use mask::{Mask16, Mask8, SimdMask};
pub use native::{
    NativeFloat32, NativeFloat64, NativeInt32, NativeInt64, NativeUInt32, NativeUInt64,
    NATIVE_LEVEL,
};
pub use traits::{
    Simd, SimdBits, SimdCapability, SimdCompareOps, SimdFloat, SimdFloat32, SimdFloat64,
    SimdFloatToInt, SimdInt, SimdInt32, SimdInt64, SimdMath, SimdReal, SimdSigned, SimdUInt,
    SimdUInt32, SimdUInt64,
};

pub use float32::F32x1;
pub use float64::F64x1;
pub use int32::I32x1;
pub use int64::I64x1;
pub use uint32::U32x1;
pub use uint64::U64x1;

#[cfg(target_arch = "x86_64")]
pub use float32::{F32x16, F32x4, F32x8};
#[cfg(target_arch = "x86_64")]
pub use float64::{F64x2, F64x4, F64x8};
#[cfg(target_arch = "x86_64")]
pub use int32::{I32x16, I32x4, I32x8};
#[cfg(target_arch = "x86_64")]
pub use int64::{I64x2, I64x4, I64x8};
#[cfg(target_arch = "x86_64")]
pub use mask::{M32x4, M32x8, M64x2, M64x4};
#[cfg(target_arch = "x86_64")]
pub use uint32::{U32x16, U32x4, U32x8};
#[cfg(target_arch = "x86_64")]
pub use uint64::{U64x2, U64x4, U64x8};
