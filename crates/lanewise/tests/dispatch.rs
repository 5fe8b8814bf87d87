//! Runtime dispatch
//!
//! The same kernel bound to every tier a probe allows must produce the same
//! output, and the chosen tier must never exceed the probe.

use lanewise::dispatch::{float64_tier, int32_tier, uint64_tier};
use lanewise::{
    dispatch_float32, dispatch_float64, dispatch_int32, dispatch_uint64, pack_channels,
    unpack_channel, Capability, Channel, CpuCapabilityProbe, Float32Kernel, Float64Kernel,
    Int32Kernel, Level, Simd, SimdCapability, SimdFloat, SimdFloat32, SimdFloat64, SimdInt32,
    SimdReal, SimdUInt, SimdUInt64, Tier, UInt64Kernel,
};

fn capped_probes() -> Vec<CpuCapabilityProbe> {
    let host = *CpuCapabilityProbe::get();
    Level::ALL.iter().map(|&l| host.with_max_level(l)).collect()
}

/// `y = a * x + y` over a buffer, with a scalar tail.
struct Saxpy<'a> {
    a: f32,
    x: &'a [f32],
    y: &'a mut [f32],
}

impl Float32Kernel for Saxpy<'_> {
    type Output = &'static str;

    fn run<V: SimdFloat32>(self, _: Capability<V>) -> &'static str {
        let a = V::make_set1(self.a);
        let mut xs = self.x.chunks_exact(V::LANES);
        let mut ys = self.y.chunks_exact_mut(V::LANES);
        for (x, y) in (&mut xs).zip(&mut ys) {
            a.fma(V::load(x), V::load(y)).store(y);
        }
        for (x, y) in xs.remainder().iter().zip(ys.into_remainder()) {
            *y = libm::fmaf(self.a, *x, *y);
        }
        V::NAME
    }
}

#[test]
fn test_saxpy_agrees_on_every_tier() {
    let x: Vec<f32> = (0..53).map(|i| i as f32 * 0.25).collect();
    let mut reference: Option<Vec<f32>> = None;
    for probe in capped_probes() {
        let mut y: Vec<f32> = (0..53).map(|i| 100.0 - i as f32).collect();
        let name = dispatch_float32(&probe, Saxpy { a: 2.0, x: &x, y: &mut y });
        assert!(!name.is_empty());
        match &reference {
            None => reference = Some(y),
            Some(want) => assert_eq!(&y, want, "{name}"),
        }
    }
}

struct Tiered;

impl Float64Kernel for Tiered {
    type Output = usize;

    fn run<V: SimdFloat64>(self, _: Capability<V>) -> usize {
        V::LANES
    }
}

impl Int32Kernel for Tiered {
    type Output = usize;

    fn run<V: SimdInt32>(self, _: Capability<V>) -> usize {
        V::LANES
    }
}

#[test]
fn test_chosen_tier_never_exceeds_probe() {
    for probe in capped_probes() {
        let tier = float64_tier(&probe);
        let lanes = dispatch_float64(&probe, Tiered);
        assert_eq!(lanes * 64, tier.bits().max(64));
        match tier {
            Tier::Fallback => {}
            Tier::Sse => assert!(probe.has_sse2()),
            Tier::Avx2 => assert!(probe.has_avx2() && probe.has_fma()),
            Tier::Avx512 => assert!(probe.has_avx512f() && probe.has_avx512dq()),
        }
        assert!(int32_tier(&probe) >= tier);
        assert_eq!(dispatch_int32(&probe, Tiered) * 32, int32_tier(&probe).bits());
    }
}

#[test]
fn test_fallback_probe_selects_one_lane() {
    let probe = CpuCapabilityProbe::fallback();
    assert_eq!(float64_tier(&probe), Tier::Fallback);
    assert_eq!(uint64_tier(&probe), Tier::Fallback);
    assert_eq!(dispatch_float64(&probe, Tiered), 1);
}

#[test]
fn test_host_gets_its_widest_tier() {
    let host = CpuCapabilityProbe::get();
    let tier = int32_tier(host);
    if cfg!(target_arch = "x86_64") {
        let expected = if host.has_avx512f() {
            Tier::Avx512
        } else if host.has_avx2() && host.has_fma() {
            Tier::Avx2
        } else if host.has_sse2() {
            Tier::Sse
        } else {
            Tier::Fallback
        };
        assert_eq!(tier, expected);
    } else {
        assert_eq!(tier, Tier::Fallback);
    }
}

/// Sum of rotated words; exercises the unsigned 64-bit family.
struct RotateSum<'a>(&'a [u64]);

impl UInt64Kernel for RotateSum<'_> {
    type Output = u64;

    fn run<V: SimdUInt64>(self, _: Capability<V>) -> u64 {
        let mut acc = V::make_set1(0);
        let mut chunks = self.0.chunks_exact(V::LANES);
        for chunk in &mut chunks {
            acc += V::load(chunk).rotl(17);
        }
        let mut lanes = vec![0u64; V::LANES];
        acc.store(&mut lanes);
        chunks
            .remainder()
            .iter()
            .map(|x| x.rotate_left(17))
            .chain(lanes)
            .fold(0u64, u64::wrapping_add)
    }
}

#[test]
fn test_unsigned_kernel_agrees_on_every_tier() {
    let data: Vec<u64> = (0..37u64).map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect();
    let want = data
        .iter()
        .map(|x| x.rotate_left(17))
        .fold(0u64, u64::wrapping_add);
    for probe in capped_probes() {
        assert_eq!(dispatch_uint64(&probe, RotateSum(&data)), want);
    }
}

/// Brightens packed pixels: unpack, scale, clamp, pack.
struct Brighten<'a>(&'a mut [u32]);

impl Float32Kernel for Brighten<'_> {
    type Output = ();

    fn run<V: SimdFloat32>(self, _: Capability<V>) {
        let gain = V::make_set1(1.5);
        for chunk in self.0.chunks_exact_mut(V::LANES) {
            let [r, g, b, a] = Channel::ALL.map(|c| unpack_channel::<V>(chunk, c));
            pack_channels((r * gain).clamp_to(V::make_set1(1.0)), g * gain, b, a, chunk);
        }
    }
}

#[test]
fn test_color_kernel_agrees_on_every_tier() {
    let original: Vec<u32> = (0..64u32).map(|i| i.wrapping_mul(0x0101_0407) | 0xff00_0000).collect();
    let mut reference: Option<Vec<u32>> = None;
    for probe in capped_probes() {
        let mut pixels = original.clone();
        dispatch_float32(&probe, Brighten(&mut pixels));
        for (before, after) in original.iter().zip(&pixels) {
            assert_eq!(after >> 16, before >> 16, "blue and alpha untouched");
            assert!((after & 0xff) >= (before & 0xff), "red never darkens");
        }
        match &reference {
            None => reference = Some(pixels),
            Some(want) => assert_eq!(&pixels, want),
        }
    }
}

#[test]
fn test_tier_names() {
    let names: Vec<&str> = Tier::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["fallback", "sse", "avx2", "avx512"]);
}
