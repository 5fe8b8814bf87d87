//! 8-bit color channel marshalling
//!
//! Pixels are packed RGBA8 words, red in the low byte. A channel is unpacked
//! into float lanes in `0..=1` and packed back with clamping and
//! round-half-to-even, so `pack(unpack(p)) == p` for every pixel.

use crate::traits::{Simd, SimdFloat32, SimdInt32};

/// One byte of a packed RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];

    /// Bit offset of the channel within the pixel word.
    #[inline(always)]
    pub const fn shift(self) -> u32 {
        match self {
            Channel::R => 0,
            Channel::G => 8,
            Channel::B => 16,
            Channel::A => 24,
        }
    }
}

/// Read `channel` of the first `V::LANES` pixels as floats in `0..=1`.
///
/// Lane `i` equals `V::make_unorm8` of pixel `i`'s channel byte.
///
/// # Panics
///
/// Panics if `pixels` holds fewer than `V::LANES` pixels.
#[inline]
pub fn unpack_channel<V: SimdFloat32>(pixels: &[u32], channel: Channel) -> V {
    let words: &[i32] = bytemuck::cast_slice(pixels);
    let bytes = (V::Int::load(words) >> channel.shift()) & V::Int::make_set1(0xff);
    SimdInt32::to_float(bytes) / V::make_set1(255.0)
}

/// Pack four channel vectors into the first `V::LANES` pixels of `dst`.
///
/// Lanes are clamped to `0..=1` (NaN packs as 0), scaled by 255 and rounded
/// half to even.
///
/// # Panics
///
/// Panics if `dst` holds fewer than `V::LANES` pixels.
#[inline]
pub fn pack_channels<V>(r: V, g: V, b: V, a: V, dst: &mut [u32])
where
    V: SimdFloat32,
{
    let one = V::make_set1(1.0);
    let scale = V::make_set1(255.0);
    let quantize = |v: V, channel: Channel| {
        (v.clamp_to(one) * scale).round().to_int_trunc() << channel.shift()
    };

    let packed = quantize(r, Channel::R)
        | quantize(g, Channel::G)
        | quantize(b, Channel::B)
        | quantize(a, Channel::A);
    packed.store(bytemuck::cast_slice_mut(dst));
}
