//! Native aliases
//!
//! The widest vector type of each family that the compile target can run
//! without a runtime check. `build.rs` classifies the enabled target features
//! and sets `lanewise_native`; building with
//! `RUSTFLAGS="-C target-cpu=native"` therefore picks the host's tier.
//!
//! The `force-fallback` feature pins every alias to the 1-wide types.

use crate::features::Level;

macro_rules! native_aliases {
    ($tier:literal, $level:ident: $f32:ident, $f64:ident, $i32:ident, $i64:ident, $u32:ident, $u64:ident) => {
        #[cfg(lanewise_native = $tier)]
        mod selected {
            pub use crate::{
                $f32 as NativeFloat32, $f64 as NativeFloat64, $i32 as NativeInt32,
                $i64 as NativeInt64, $u32 as NativeUInt32, $u64 as NativeUInt64,
            };

            pub const NATIVE_LEVEL: crate::features::Level = crate::features::Level::$level;
        }
    };
}

native_aliases!("fallback", Fallback: F32x1, F64x1, I32x1, I64x1, U32x1, U64x1);
native_aliases!("sse", Sse2: F32x4, F64x2, I32x4, I64x2, U32x4, U64x2);
native_aliases!("avx2", Avx2: F32x8, F64x4, I32x8, I64x4, U32x8, U64x4);
native_aliases!("avx512", Avx512: F32x16, F64x8, I32x16, I64x8, U32x16, U64x8);

pub use selected::{
    NativeFloat32, NativeFloat64, NativeInt32, NativeInt64, NativeUInt32, NativeUInt64,
    NATIVE_LEVEL,
};

/// Whether the native aliases are wider than one lane.
pub const fn native_is_vectorized() -> bool {
    !matches!(NATIVE_LEVEL, Level::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSet;
    use crate::traits::{Simd, SimdCapability};

    #[test]
    fn test_native_types_compile_everywhere() {
        assert!(NativeFloat32::compiler_supported());
        assert!(NativeFloat64::compiler_supported());
        assert!(NativeInt32::compiler_supported());
        assert!(NativeInt64::compiler_supported());
        assert!(NativeUInt32::compiler_supported());
        assert!(NativeUInt64::compiler_supported());
    }

    #[test]
    fn test_native_level_within_target() {
        assert!(NATIVE_LEVEL <= FeatureSet::LEVEL);
        assert_eq!(NativeFloat32::LANES, NativeInt32::LANES);
        assert_eq!(NativeFloat64::LANES, NativeUInt64::LANES);
        assert_eq!(NativeFloat32::LANES == 1, !native_is_vectorized());
    }

    #[test]
    #[cfg(feature = "force-fallback")]
    fn test_forced_fallback() {
        assert_eq!(NATIVE_LEVEL, Level::Fallback);
        assert_eq!(NativeFloat64::LANES, 1);
    }
}
