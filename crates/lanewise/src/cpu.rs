//! CPU capability probe
//!
//! Runtime query of the executing CPU's instruction-set support. The probe
//! decodes CPUID leaves 1, 7.0 and 7.1 with `raw_cpuid`, reads `XGETBV` once,
//! and answers every later `has_*` question with a bit test.
//!
//! AVX-class features are only reported when the operating system saves the
//! YMM state (XCR0 bits 1-2), AVX-512 features only when it also saves the
//! opmask and ZMM state (XCR0 bits 5-7). A CPU that advertises AVX2 under an
//! OS that does not enable it is therefore classified below level 3.
//!
//! # Usage
//!
//! ```rust
//! use lanewise::CpuCapabilityProbe;
//!
//! let probe = CpuCapabilityProbe::get();
//! if probe.is_level_3() {
//!     assert!(probe.has_avx2() && probe.has_fma());
//! }
//! ```

use std::fmt;
use std::sync::OnceLock;

use raw_cpuid::{CpuId, CpuIdReader, CpuIdResult, ExtendedFeatures, FeatureInfo};

use crate::features::{Feature, Level};

static PROBE: OnceLock<CpuCapabilityProbe> = OnceLock::new();

// XCR0 state components
const XCR0_SSE_AVX: u64 = 0b0000_0110;
const XCR0_AVX512: u64 = 0b1110_0000;

/// Raw register values for a CPU other than the one executing.
///
/// [`CpuCapabilityProbe::from_registers`] answers CPUID queries from these
/// fields and decodes them exactly as it would the live instruction. Leaves
/// the snapshot does not carry read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuidRegisters {
    /// Highest standard leaf (leaf 0 EAX)
    pub max_leaf: u32,
    /// Leaf 1 ECX
    pub leaf1_ecx: u32,
    /// Leaf 1 EDX
    pub leaf1_edx: u32,
    /// Leaf 7 sub-leaf 0 EBX
    pub leaf7_ebx: u32,
    /// Leaf 7 sub-leaf 0 ECX
    pub leaf7_ecx: u32,
    /// Leaf 7 sub-leaf 0 EDX
    pub leaf7_edx: u32,
    /// Leaf 7 sub-leaf 1 EAX
    pub leaf7_1_eax: u32,
    /// Extended control register 0 (0 when OSXSAVE is clear)
    pub xcr0: u64,
}

impl CpuidRegisters {
    fn query(&self, leaf: u32, sub_leaf: u32) -> CpuIdResult {
        let zero = CpuIdResult {
            eax: 0,
            ebx: 0,
            ecx: 0,
            edx: 0,
        };
        match (leaf, sub_leaf) {
            (0, _) => CpuIdResult {
                eax: self.max_leaf,
                ..zero
            },
            (1, _) => CpuIdResult {
                ecx: self.leaf1_ecx,
                edx: self.leaf1_edx,
                ..zero
            },
            // EAX of sub-leaf 0 is the highest sub-leaf.
            (7, 0) => CpuIdResult {
                eax: 1,
                ebx: self.leaf7_ebx,
                ecx: self.leaf7_ecx,
                edx: self.leaf7_edx,
            },
            (7, 1) => CpuIdResult {
                eax: self.leaf7_1_eax,
                ..zero
            },
            _ => zero,
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "xsave")]
unsafe fn read_xcr0() -> u64 {
    core::arch::x86_64::_xgetbv(0)
}

/// Set of detected features, one bit per [`Feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Detected(u32);

impl Detected {
    const NONE: Detected = Detected(0);

    const fn mask(feature: Feature) -> u32 {
        1 << feature as u32
    }

    fn contains(self, feature: Feature) -> bool {
        self.0 & Self::mask(feature) != 0
    }

    /// Decode leaves 1, 7.0 and 7.1 and mask by what the OS saves in `xcr0`.
    fn decode<R: CpuIdReader>(cpuid: &CpuId<R>, xcr0: u64) -> Self {
        let info = cpuid.get_feature_info();
        let extended = cpuid.get_extended_feature_info();
        let leaf1 = |has: fn(&FeatureInfo) -> bool| info.as_ref().is_some_and(has);
        let leaf7 = |has: fn(&ExtendedFeatures) -> bool| extended.as_ref().is_some_and(has);

        let ymm = leaf1(FeatureInfo::has_oxsave) && xcr0 & XCR0_SSE_AVX == XCR0_SSE_AVX;
        let zmm = ymm && xcr0 & XCR0_AVX512 == XCR0_AVX512;

        let found = [
            (Feature::Sse, leaf1(FeatureInfo::has_sse)),
            (Feature::Sse2, leaf1(FeatureInfo::has_sse2)),
            (Feature::Sse3, leaf1(FeatureInfo::has_sse3)),
            (Feature::Ssse3, leaf1(FeatureInfo::has_ssse3)),
            (Feature::Sse41, leaf1(FeatureInfo::has_sse41)),
            (Feature::Sse42, leaf1(FeatureInfo::has_sse42)),
            (Feature::Popcnt, leaf1(FeatureInfo::has_popcnt)),
            (Feature::Avx, ymm && leaf1(FeatureInfo::has_avx)),
            (Feature::Avx2, ymm && leaf7(ExtendedFeatures::has_avx2)),
            (Feature::Fma, ymm && leaf1(FeatureInfo::has_fma)),
            (Feature::F16c, ymm && leaf1(FeatureInfo::has_f16c)),
            (Feature::AvxVnni, ymm && leaf7(ExtendedFeatures::has_avx_vnni)),
            (Feature::Avx512F, zmm && leaf7(ExtendedFeatures::has_avx512f)),
            (Feature::Avx512Bw, zmm && leaf7(ExtendedFeatures::has_avx512bw)),
            (Feature::Avx512Cd, zmm && leaf7(ExtendedFeatures::has_avx512cd)),
            (Feature::Avx512Dq, zmm && leaf7(ExtendedFeatures::has_avx512dq)),
            (Feature::Avx512Vl, zmm && leaf7(ExtendedFeatures::has_avx512vl)),
            (Feature::Avx512Bf16, zmm && leaf7(ExtendedFeatures::has_avx512_bf16)),
        ];

        Detected(
            found
                .iter()
                .filter(|(_, present)| *present)
                .fold(0, |bits, (feature, _)| bits | Self::mask(*feature)),
        )
    }
}

/// Immutable snapshot of the executing CPU's SIMD capabilities.
///
/// Build one with [`CpuCapabilityProbe::new`] (issues CPUID) or borrow the
/// process-wide instance with [`CpuCapabilityProbe::get`], which is initialised
/// at most once. Pass a probe into `cpu_supported()` in hot loops to avoid
/// touching the shared instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCapabilityProbe {
    detected: Detected,
    max_level: Level,
}

impl Default for CpuCapabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuCapabilityProbe {
    /// Query the executing CPU.
    ///
    /// Reports nothing on non-x86_64 targets.
    pub fn new() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            let cpuid = CpuId::new();
            let osxsave = cpuid
                .get_feature_info()
                .is_some_and(|info| info.has_oxsave());
            // SAFETY: OSXSAVE set means XGETBV is enabled.
            let xcr0 = if osxsave { unsafe { read_xcr0() } } else { 0 };
            Self::with_detected(Detected::decode(&cpuid, xcr0))
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            Self::with_detected(Detected::NONE)
        }
    }

    /// Classify an arbitrary register snapshot.
    pub fn from_registers(regs: CpuidRegisters) -> Self {
        let cpuid = CpuId::with_cpuid_reader(move |leaf: u32, sub_leaf: u32| {
            regs.query(leaf, sub_leaf)
        });
        Self::with_detected(Detected::decode(&cpuid, regs.xcr0))
    }

    const fn with_detected(detected: Detected) -> Self {
        Self {
            detected,
            max_level: Level::Avx512,
        }
    }

    /// A probe that reports no extensions at all.
    pub const fn fallback() -> Self {
        Self {
            detected: Detected::NONE,
            max_level: Level::Fallback,
        }
    }

    /// Process-wide probe, created on first use.
    pub fn get() -> &'static CpuCapabilityProbe {
        PROBE.get_or_init(|| {
            let probe = Self::new();
            log::debug!("cpu capability probe initialised: {probe}");
            probe
        })
    }

    /// Use `probe` when given, the process-wide probe otherwise.
    #[inline]
    pub fn resolve(probe: Option<&CpuCapabilityProbe>) -> &CpuCapabilityProbe {
        match probe {
            Some(probe) => probe,
            None => Self::get(),
        }
    }

    /// Copy of this probe that hides every feature above `level`.
    ///
    /// Lets a caller exercise lower tiers on capable hardware.
    pub fn with_max_level(self, level: Level) -> Self {
        Self {
            detected: self.detected,
            max_level: if level < self.max_level {
                level
            } else {
                self.max_level
            },
        }
    }

    /// Highest level this probe is allowed to report.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Whether the CPU (and OS) support `feature`.
    pub fn has(&self, feature: Feature) -> bool {
        feature.level() <= self.max_level && self.detected.contains(feature)
    }

    pub fn has_sse(&self) -> bool {
        self.has(Feature::Sse)
    }
    pub fn has_sse2(&self) -> bool {
        self.has(Feature::Sse2)
    }
    pub fn has_sse3(&self) -> bool {
        self.has(Feature::Sse3)
    }
    pub fn has_ssse3(&self) -> bool {
        self.has(Feature::Ssse3)
    }
    pub fn has_sse41(&self) -> bool {
        self.has(Feature::Sse41)
    }
    pub fn has_sse42(&self) -> bool {
        self.has(Feature::Sse42)
    }
    pub fn has_popcnt(&self) -> bool {
        self.has(Feature::Popcnt)
    }
    pub fn has_avx(&self) -> bool {
        self.has(Feature::Avx)
    }
    pub fn has_avx2(&self) -> bool {
        self.has(Feature::Avx2)
    }
    pub fn has_fma(&self) -> bool {
        self.has(Feature::Fma)
    }
    pub fn has_f16c(&self) -> bool {
        self.has(Feature::F16c)
    }
    pub fn has_avx_vnni(&self) -> bool {
        self.has(Feature::AvxVnni)
    }
    pub fn has_avx512f(&self) -> bool {
        self.has(Feature::Avx512F)
    }
    pub fn has_avx512bw(&self) -> bool {
        self.has(Feature::Avx512Bw)
    }
    pub fn has_avx512cd(&self) -> bool {
        self.has(Feature::Avx512Cd)
    }
    pub fn has_avx512dq(&self) -> bool {
        self.has(Feature::Avx512Dq)
    }
    pub fn has_avx512vl(&self) -> bool {
        self.has(Feature::Avx512Vl)
    }
    pub fn has_avx512_bf16(&self) -> bool {
        self.has(Feature::Avx512Bf16)
    }

    /// Classify the CPU with the nested level rule.
    pub fn level(&self) -> Level {
        let l1 = self.has_sse() && self.has_sse2();
        let l2 = l1 && self.has_sse3() && self.has_ssse3() && self.has_sse41() && self.has_sse42();
        let l3 = l2 && self.has_avx() && self.has_avx2() && self.has_fma() && self.has_f16c();
        let l4 = l3
            && self.has_avx512f()
            && self.has_avx512bw()
            && self.has_avx512cd()
            && self.has_avx512dq()
            && self.has_avx512vl();

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

    pub fn is_level_1(&self) -> bool {
        self.level() >= Level::Sse2
    }
    pub fn is_level_2(&self) -> bool {
        self.level() >= Level::Sse4
    }
    pub fn is_level_3(&self) -> bool {
        self.level() >= Level::Avx2
    }
    pub fn is_level_4(&self) -> bool {
        self.level() >= Level::Avx512
    }

    /// Comma-separated list of supported features.
    pub fn describe(&self) -> String {
        let names: Vec<&str> = Feature::ALL
            .iter()
            .filter(|f| self.has(**f))
            .map(|f| f.name())
            .collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}

impl fmt::Display for CpuCapabilityProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}: {}", self.level(), self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Leaf 1 EDX
    const SSE: u32 = 25;
    const SSE2: u32 = 26;
    // Leaf 1 ECX
    const SSE3: u32 = 0;
    const SSSE3: u32 = 9;
    const FMA: u32 = 12;
    const SSE41: u32 = 19;
    const SSE42: u32 = 20;
    const OSXSAVE: u32 = 27;
    const AVX: u32 = 28;
    const F16C: u32 = 29;
    // Leaf 7.0 EBX
    const AVX2: u32 = 5;
    const AVX512F: u32 = 16;
    const AVX512DQ: u32 = 17;
    const AVX512CD: u32 = 28;
    const AVX512BW: u32 = 30;
    const AVX512VL: u32 = 31;
    // Leaf 7.1 EAX
    const AVX_VNNI: u32 = 4;
    const AVX512_BF16: u32 = 5;

    fn with_bits(level: Level) -> CpuidRegisters {
        let mut regs = CpuidRegisters {
            max_leaf: 7,
            ..CpuidRegisters::default()
        };
        if level >= Level::Sse2 {
            regs.leaf1_edx |= 1 << SSE | 1 << SSE2;
        }
        if level >= Level::Sse4 {
            regs.leaf1_ecx |= 1 << SSE3 | 1 << SSSE3 | 1 << SSE41 | 1 << SSE42;
        }
        if level >= Level::Avx2 {
            regs.leaf1_ecx |= 1 << OSXSAVE | 1 << AVX | 1 << FMA | 1 << F16C;
            regs.leaf7_ebx |= 1 << AVX2;
            regs.xcr0 |= XCR0_SSE_AVX;
        }
        if level >= Level::Avx512 {
            regs.leaf7_ebx |=
                1 << AVX512F | 1 << AVX512BW | 1 << AVX512CD | 1 << AVX512DQ | 1 << AVX512VL;
            regs.xcr0 |= XCR0_AVX512;
        }
        regs
    }

    #[test]
    fn test_synthetic_levels_classify_exactly() {
        for level in Level::ALL {
            let probe = CpuCapabilityProbe::from_registers(with_bits(level));
            assert_eq!(probe.level(), level);
        }
    }

    #[test]
    fn test_missing_os_support_hides_avx() {
        let mut regs = with_bits(Level::Avx512);
        regs.xcr0 = 0;
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(!probe.has_avx2());
        assert!(!probe.has_avx512f());
        assert_eq!(probe.level(), Level::Sse4);
    }

    #[test]
    fn test_missing_zmm_state_hides_avx512() {
        let mut regs = with_bits(Level::Avx512);
        regs.xcr0 = XCR0_SSE_AVX;
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(probe.has_avx2());
        assert!(!probe.has_avx512f());
        assert_eq!(probe.level(), Level::Avx2);
    }

    #[test]
    fn test_single_missing_feature_drops_level() {
        let mut regs = with_bits(Level::Avx512);
        regs.leaf7_ebx &= !(1 << AVX512CD);
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(probe.has_avx512f());
        assert_eq!(probe.level(), Level::Avx2);
    }

    #[test]
    fn test_cap_hides_higher_features() {
        let probe = CpuCapabilityProbe::from_registers(with_bits(Level::Avx512))
            .with_max_level(Level::Sse4);
        assert_eq!(probe.level(), Level::Sse4);
        assert!(probe.has_sse42());
        assert!(!probe.has_avx());
        assert!(!probe.has_avx512f());

        // Raising the cap again is not possible.
        let probe = probe.with_max_level(Level::Avx512);
        assert_eq!(probe.level(), Level::Sse4);
    }

    #[test]
    fn test_global_probe_is_initialised_once() {
        let a = CpuCapabilityProbe::get() as *const _;
        let b = CpuCapabilityProbe::get() as *const _;
        assert_eq!(a, b);
        assert_eq!(*CpuCapabilityProbe::get(), CpuCapabilityProbe::new());
    }

    #[test]
    fn test_describe_lists_features() {
        let probe = CpuCapabilityProbe::from_registers(with_bits(Level::Sse2));
        assert_eq!(probe.describe(), "sse, sse2");
        assert_eq!(CpuCapabilityProbe::fallback().describe(), "none");
    }

    #[test]
    fn test_leaf_7_1_features_follow_os_state() {
        let mut regs = with_bits(Level::Avx512);
        regs.leaf7_1_eax = 1 << AVX_VNNI | 1 << AVX512_BF16;
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(probe.has_avx_vnni() && probe.has_avx512_bf16());

        regs.xcr0 = XCR0_SSE_AVX;
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(probe.has_avx_vnni());
        assert!(!probe.has_avx512_bf16());
    }

    #[test]
    fn test_max_leaf_below_7_hides_extended_features() {
        let mut regs = with_bits(Level::Avx512);
        regs.max_leaf = 1;
        let probe = CpuCapabilityProbe::from_registers(regs);
        assert!(probe.has_avx() && probe.has_fma());
        assert!(!probe.has_avx2() && !probe.has_avx512f());
        assert_eq!(probe.level(), Level::Sse4);
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_live_probe_agrees_with_std_detection() {
        let probe = CpuCapabilityProbe::new();
        assert_eq!(probe.has_sse2(), is_x86_feature_detected!("sse2"));
        assert_eq!(probe.has_sse42(), is_x86_feature_detected!("sse4.2"));
        assert_eq!(probe.has_avx2(), is_x86_feature_detected!("avx2"));
        assert_eq!(probe.has_fma(), is_x86_feature_detected!("fma"));
        assert_eq!(probe.has_avx512f(), is_x86_feature_detected!("avx512f"));
        assert_eq!(probe.has_avx512dq(), is_x86_feature_detected!("avx512dq"));
    }
}
