//! Memory layout boundary
//!
//! Every reinterpretation of a vector's bytes goes through this module.
//! Vector types are `bytemuck::Pod`: the impls are asserted here together
//! with compile-time checks that the type is exactly
//! `lanes * size_of::<element>()` bytes and at least element-aligned, so the
//! casts below can never fail on a size mismatch.

use bytemuck::Pod;

use crate::traits::Simd;

/// View a vector's lanes as a slice.
#[inline(always)]
pub(crate) fn lanes<V: Simd>(v: &V) -> &[V::Element] {
    bytemuck::cast_slice(core::slice::from_ref(v))
}

/// Mutable view of a vector's lanes.
#[inline(always)]
pub(crate) fn lanes_mut<V: Simd>(v: &mut V) -> &mut [V::Element] {
    bytemuck::cast_slice_mut(core::slice::from_mut(v))
}

/// Reinterpret the bits of one vector as another of identical size.
#[inline(always)]
pub(crate) fn bitcast<A: Pod, B: Pod>(a: A) -> B {
    bytemuck::cast(a)
}

/// Layout plumbing for a vector type: `Pod`, size assertions, array
/// conversions, `Debug`, `PartialEq`, `Default` and slice casts.
macro_rules! impl_vector_layout {
    ($ty:ident, $elem:ty, $lanes:literal) => {
        // SAFETY: `$ty` is `repr(transparent)` over a register or scalar with
        // no padding and no invalid bit patterns; the size is checked below.
        unsafe impl bytemuck::Zeroable for $ty {}
        unsafe impl bytemuck::Pod for $ty {}

        const _: () = assert!(core::mem::size_of::<$ty>() == $lanes * core::mem::size_of::<$elem>());
        const _: () = assert!(core::mem::align_of::<$ty>() >= core::mem::align_of::<$elem>());

        impl $ty {
            /// Copy the lanes out into an array.
            #[inline(always)]
            pub fn to_array(self) -> [$elem; $lanes] {
                bytemuck::cast(self)
            }

            /// Build a vector from an array of lanes.
            #[inline(always)]
            pub fn from_array(lanes: [$elem; $lanes]) -> Self {
                bytemuck::cast(lanes)
            }

            /// View a slice of vectors as a flat slice of elements.
            #[inline]
            pub fn as_elements(vectors: &[Self]) -> &[$elem] {
                bytemuck::cast_slice(vectors)
            }

            /// Mutable flat view of a slice of vectors.
            #[inline]
            pub fn as_elements_mut(vectors: &mut [Self]) -> &mut [$elem] {
                bytemuck::cast_slice_mut(vectors)
            }

            /// View a flat element buffer as vectors without copying.
            ///
            /// Fails when the buffer is not aligned for `Self` or its length
            /// is not a multiple of the lane count.
            #[inline]
            pub fn try_as_vectors(elements: &[$elem]) -> Result<&[Self], bytemuck::PodCastError> {
                bytemuck::try_cast_slice(elements)
            }
        }

        impl From<[$elem; $lanes]> for $ty {
            #[inline(always)]
            fn from(lanes: [$elem; $lanes]) -> Self {
                Self::from_array(lanes)
            }
        }

        impl From<$ty> for [$elem; $lanes] {
            #[inline(always)]
            fn from(v: $ty) -> Self {
                v.to_array()
            }
        }

        impl core::fmt::Debug for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.to_array()).finish()
            }
        }

        impl PartialEq for $ty {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.to_array() == other.to_array()
            }
        }

        impl Default for $ty {
            #[inline(always)]
            fn default() -> Self {
                bytemuck::Zeroable::zeroed()
            }
        }
    };
}

pub(crate) use impl_vector_layout;
