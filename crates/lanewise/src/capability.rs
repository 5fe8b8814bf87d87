//! Capability tokens
//!
//! A [`Capability<V>`] records that a runtime check found the executing CPU
//! able to run vector type `V`. It is zero-sized and can only be obtained from
//! a successful check (or `unsafe`).
//!
//! The token does not gate the vector types themselves: `F32x16::make_set1`
//! and the operators are ordinary safe functions, and calling them on a CPU
//! without AVX-512 faults. What a token guarantees is narrower. A function
//! that receives a `Capability<V>`, such as a dispatched kernel, may use `V`
//! without checking again. Code that names a wide type directly has to do the
//! check itself, with [`Capability::new`] or `V::cpu_supported`.
//!
//! ```rust
//! use lanewise::{Capability, CpuCapabilityProbe, F32x1, Level};
//!
//! let probe = CpuCapabilityProbe::get();
//! let cap = Capability::<F32x1>::new(probe).expect("fallback always runs");
//! assert_eq!(cap, Capability::<F32x1>::always());
//!
//! let capped = probe.with_max_level(Level::Sse4);
//! #[cfg(target_arch = "x86_64")]
//! assert!(Capability::<lanewise::F32x8>::new(&capped).is_err());
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::cpu::CpuCapabilityProbe;
use crate::error::{Error, Result};
use crate::traits::SimdCapability;

/// Proof that `V` may execute on this machine.
pub struct Capability<V> {
    _vector: PhantomData<fn() -> V>,
}

impl<V: SimdCapability> Capability<V> {
    /// Check `probe` for every feature `V` uses.
    ///
    /// The executing CPU is checked as well, so a probe built from
    /// synthetic registers can narrow the result but never widen it.
    pub fn new(probe: &CpuCapabilityProbe) -> Result<Self> {
        if V::cpu_supported(Some(probe)) && V::cpu_supported(None) {
            Ok(Self {
                _vector: PhantomData,
            })
        } else {
            Err(Error::UnsupportedCpu {
                vector: V::NAME,
                required: V::LEVEL,
                detected: probe.level(),
            })
        }
    }

    /// Check the process-wide probe.
    pub fn detect() -> Result<Self> {
        Self::new(CpuCapabilityProbe::get())
    }

    /// Token without a check.
    ///
    /// # Safety
    ///
    /// The executing CPU must support every feature `V` uses, i.e.
    /// `V::cpu_supported(None)` must be true.
    pub const unsafe fn new_unchecked() -> Self {
        Self {
            _vector: PhantomData,
        }
    }
}

/// Vector types that run on every CPU.
pub trait Portable: SimdCapability {}

impl<V: Portable> Capability<V> {
    /// Token for a type that needs no instruction-set extensions.
    pub const fn always() -> Self {
        Self {
            _vector: PhantomData,
        }
    }
}

impl<V> Clone for Capability<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Capability<V> {}

impl<V> PartialEq for Capability<V> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<V> Eq for Capability<V> {}

impl<V: SimdCapability> fmt::Debug for Capability<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability<{}>", V::NAME)
    }
}
