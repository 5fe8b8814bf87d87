//! Compile-time feature flags
//!
//! `FeatureSet` answers "was this artifact compiled with instruction-set
//! extension X enabled?". Every query is a `const fn` over `cfg!(target_feature)`
//! and costs nothing at run time. The answers are fixed for the life of the
//! binary; use [`CpuCapabilityProbe`](crate::CpuCapabilityProbe) to ask the
//! executing CPU instead.

use core::fmt;

use crate::error::{Error, Result};

/// Instruction-set extensions tracked by both `FeatureSet` and the CPU probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// SSE
    Sse,
    /// SSE2
    Sse2,
    /// SSE3
    Sse3,
    /// Supplemental SSE3
    Ssse3,
    /// SSE4.1
    Sse41,
    /// SSE4.2
    Sse42,
    /// POPCNT
    Popcnt,
    /// AVX
    Avx,
    /// AVX2
    Avx2,
    /// Fused multiply-add (FMA3)
    Fma,
    /// Half-precision conversions
    F16c,
    /// AVX-VNNI (leaf 7 sub-leaf 1)
    AvxVnni,
    /// AVX-512 Foundation
    Avx512F,
    /// AVX-512 Byte and Word
    Avx512Bw,
    /// AVX-512 Conflict Detection
    Avx512Cd,
    /// AVX-512 Doubleword and Quadword
    Avx512Dq,
    /// AVX-512 Vector Length
    Avx512Vl,
    /// AVX-512 BFloat16 (leaf 7 sub-leaf 1)
    Avx512Bf16,
}

impl Feature {
    /// Every tracked feature, in level order.
    pub const ALL: [Feature; 18] = [
        Feature::Sse,
        Feature::Sse2,
        Feature::Sse3,
        Feature::Ssse3,
        Feature::Sse41,
        Feature::Sse42,
        Feature::Popcnt,
        Feature::Avx,
        Feature::Avx2,
        Feature::Fma,
        Feature::F16c,
        Feature::AvxVnni,
        Feature::Avx512F,
        Feature::Avx512Bw,
        Feature::Avx512Cd,
        Feature::Avx512Dq,
        Feature::Avx512Vl,
        Feature::Avx512Bf16,
    ];

    /// Lowest level this feature belongs to.
    ///
    /// Features outside the level definitions (POPCNT, AVX-VNNI, BF16) are
    /// attached to the level that introduced them on shipping hardware.
    pub const fn level(self) -> Level {
        match self {
            Feature::Sse | Feature::Sse2 => Level::Sse2,
            Feature::Sse3
            | Feature::Ssse3
            | Feature::Sse41
            | Feature::Sse42
            | Feature::Popcnt => Level::Sse4,
            Feature::Avx | Feature::Avx2 | Feature::Fma | Feature::F16c | Feature::AvxVnni => {
                Level::Avx2
            }
            Feature::Avx512F
            | Feature::Avx512Bw
            | Feature::Avx512Cd
            | Feature::Avx512Dq
            | Feature::Avx512Vl
            | Feature::Avx512Bf16 => Level::Avx512,
        }
    }

    /// Lower-case name as used by `target_feature`.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Sse => "sse",
            Feature::Sse2 => "sse2",
            Feature::Sse3 => "sse3",
            Feature::Ssse3 => "ssse3",
            Feature::Sse41 => "sse4.1",
            Feature::Sse42 => "sse4.2",
            Feature::Popcnt => "popcnt",
            Feature::Avx => "avx",
            Feature::Avx2 => "avx2",
            Feature::Fma => "fma",
            Feature::F16c => "f16c",
            Feature::AvxVnni => "avxvnni",
            Feature::Avx512F => "avx512f",
            Feature::Avx512Bw => "avx512bw",
            Feature::Avx512Cd => "avx512cd",
            Feature::Avx512Dq => "avx512dq",
            Feature::Avx512Vl => "avx512vl",
            Feature::Avx512Bf16 => "avx512bf16",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordinal microarchitecture level.
///
/// Membership is strictly nested:
/// - level 1: SSE, SSE2
/// - level 2: level 1 + SSE3, SSSE3, SSE4.1, SSE4.2
/// - level 3: level 2 + AVX, AVX2, FMA, F16C
/// - level 4: level 3 + AVX-512 F, BW, CD, DQ, VL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// No vector extensions; only the 1-wide fallback types are usable.
    #[default]
    Fallback = 0,
    /// SSE/SSE2 baseline (128-bit tier).
    Sse2 = 1,
    /// SSE3 through SSE4.2 (128-bit tier with hardware rounding).
    Sse4 = 2,
    /// AVX2 + FMA (256-bit tier).
    Avx2 = 3,
    /// AVX-512 F/BW/CD/DQ/VL (512-bit tier).
    Avx512 = 4,
}

impl Level {
    /// All levels, lowest first.
    pub const ALL: [Level; 5] = [
        Level::Fallback,
        Level::Sse2,
        Level::Sse4,
        Level::Avx2,
        Level::Avx512,
    ];

    /// Ordinal value in `0..=4`.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Level name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Fallback => "fallback",
            Level::Sse2 => "sse2",
            Level::Sse4 => "sse4",
            Level::Avx2 => "avx2",
            Level::Avx512 => "avx512",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Level::Fallback),
            1 => Ok(Level::Sse2),
            2 => Ok(Level::Sse4),
            3 => Ok(Level::Avx2),
            4 => Ok(Level::Avx512),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_u8(), self.name())
    }
}

/// Instruction-set extensions enabled for the compile target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet;

impl FeatureSet {
    /// Level of the compile target, classified with the nested rule.
    pub const LEVEL: Level = Self::level();

    /// Whether `feature` is enabled for the compile target.
    pub const fn has(feature: Feature) -> bool {
        match feature {
            Feature::Sse => cfg!(target_feature = "sse"),
            Feature::Sse2 => cfg!(target_feature = "sse2"),
            Feature::Sse3 => cfg!(target_feature = "sse3"),
            Feature::Ssse3 => cfg!(target_feature = "ssse3"),
            Feature::Sse41 => cfg!(target_feature = "sse4.1"),
            Feature::Sse42 => cfg!(target_feature = "sse4.2"),
            Feature::Popcnt => cfg!(target_feature = "popcnt"),
            Feature::Avx => cfg!(target_feature = "avx"),
            Feature::Avx2 => cfg!(target_feature = "avx2"),
            Feature::Fma => cfg!(target_feature = "fma"),
            Feature::F16c => cfg!(target_feature = "f16c"),
            Feature::AvxVnni => cfg!(target_feature = "avxvnni"),
            Feature::Avx512F => cfg!(target_feature = "avx512f"),
            Feature::Avx512Bw => cfg!(target_feature = "avx512bw"),
            Feature::Avx512Cd => cfg!(target_feature = "avx512cd"),
            Feature::Avx512Dq => cfg!(target_feature = "avx512dq"),
            Feature::Avx512Vl => cfg!(target_feature = "avx512vl"),
            Feature::Avx512Bf16 => cfg!(target_feature = "avx512bf16"),
        }
    }

    pub const fn has_sse() -> bool {
        Self::has(Feature::Sse)
    }
    pub const fn has_sse2() -> bool {
        Self::has(Feature::Sse2)
    }
    pub const fn has_sse3() -> bool {
        Self::has(Feature::Sse3)
    }
    pub const fn has_ssse3() -> bool {
        Self::has(Feature::Ssse3)
    }
    pub const fn has_sse41() -> bool {
        Self::has(Feature::Sse41)
    }
    pub const fn has_sse42() -> bool {
        Self::has(Feature::Sse42)
    }
    pub const fn has_popcnt() -> bool {
        Self::has(Feature::Popcnt)
    }
    pub const fn has_avx() -> bool {
        Self::has(Feature::Avx)
    }
    pub const fn has_avx2() -> bool {
        Self::has(Feature::Avx2)
    }
    pub const fn has_fma() -> bool {
        Self::has(Feature::Fma)
    }
    pub const fn has_f16c() -> bool {
        Self::has(Feature::F16c)
    }
    pub const fn has_avx512f() -> bool {
        Self::has(Feature::Avx512F)
    }
    pub const fn has_avx512bw() -> bool {
        Self::has(Feature::Avx512Bw)
    }
    pub const fn has_avx512cd() -> bool {
        Self::has(Feature::Avx512Cd)
    }
    pub const fn has_avx512dq() -> bool {
        Self::has(Feature::Avx512Dq)
    }
    pub const fn has_avx512vl() -> bool {
        Self::has(Feature::Avx512Vl)
    }

    /// Classify the compile target.
    ///
    /// Never returns a level whose prerequisites are missing; non-x86_64
    /// targets are always [`Level::Fallback`].
    pub const fn level() -> Level {
        if !cfg!(target_arch = "x86_64") {
            return Level::Fallback;
        }
        let l1 = Self::has_sse() && Self::has_sse2();
        let l2 = l1
            && Self::has_sse3()
            && Self::has_ssse3()
            && Self::has_sse41()
            && Self::has_sse42();
        let l3 = l2 && Self::has_avx() && Self::has_avx2() && Self::has_fma() && Self::has_f16c();
        let l4 = l3
            && Self::has_avx512f()
            && Self::has_avx512bw()
            && Self::has_avx512cd()
            && Self::has_avx512dq()
            && Self::has_avx512vl();

        if l4 {
            Level::Avx512
        } else if l3 {
            Level::Avx2
        } else if l2 {
            Level::Sse4
        } else if l1 {
            Level::Sse2
        } else {
            Level::Fallback
        }
    }

    /// Whether the compile target reaches at least `level`.
    pub const fn is_level(level: Level) -> bool {
        Self::level() as u8 >= level as u8
    }
}
