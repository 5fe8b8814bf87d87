//! Memory layout guarantees
//!
//! A vector is exactly its lanes: no padding, lane 0 at the lowest address.

use std::mem::{align_of, size_of};

use lanewise::{F32x1, F64x1, I32x1, I64x1, Simd, U32x1, U64x1};

#[test]
fn test_fallback_sizes() {
    assert_eq!(size_of::<F32x1>(), 4);
    assert_eq!(size_of::<F64x1>(), 8);
    assert_eq!(size_of::<I32x1>(), 4);
    assert_eq!(size_of::<I64x1>(), 8);
    assert_eq!(size_of::<U32x1>(), 4);
    assert_eq!(size_of::<U64x1>(), 8);
    assert_eq!(F64x1::number_of_elements(), 1);
    assert_eq!(U32x1::size_of_element(), 4);
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_vector_sizes_and_alignment() {
    use lanewise::*;

    macro_rules! check {
        ($($ty:ident: $bytes:literal),+ $(,)?) => {$(
            assert_eq!(size_of::<$ty>(), $bytes, stringify!($ty));
            assert_eq!(align_of::<$ty>(), $bytes, stringify!($ty));
            assert_eq!(
                $ty::LANES * <$ty as Simd>::size_of_element(),
                $bytes,
                stringify!($ty)
            );
        )+};
    }

    check!(
        F32x4: 16, F64x2: 16, I32x4: 16, I64x2: 16, U32x4: 16, U64x2: 16,
        F32x8: 32, F64x4: 32, I32x8: 32, I64x4: 32, U32x8: 32, U64x4: 32,
        F32x16: 64, F64x8: 64, I32x16: 64, I64x8: 64, U32x16: 64, U64x8: 64,
    );
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_lane_order_in_memory() {
    use lanewise::{F32x4, U64x2};

    let v = F32x4::make_sequential(1.0);
    let bytes: [u8; 16] = bytemuck::cast(v);
    assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
    assert_eq!(&bytes[12..], &4.0f32.to_le_bytes());

    let u = U64x2::from_array([7, 9]);
    assert_eq!(u.element(0), 7);
    assert_eq!(<[u64; 2]>::from(u), [7, 9]);
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_buffers_of_vectors_view_as_elements() {
    use lanewise::I32x4;

    let mut vectors = vec![I32x4::make_sequential(0), I32x4::make_sequential(4)];
    assert_eq!(I32x4::as_elements(&vectors), &[0, 1, 2, 3, 4, 5, 6, 7]);

    I32x4::as_elements_mut(&mut vectors)[5] = -1;
    assert_eq!(vectors[1].to_array(), [4, -1, 6, 7]);

    let flat = I32x4::as_elements(&vectors).to_vec();
    match I32x4::try_as_vectors(&flat) {
        Ok(view) => assert_eq!(view, &vectors[..]),
        // `Vec<i32>` only guarantees 4-byte alignment.
        Err(err) => assert_eq!(err, bytemuck::PodCastError::TargetAlignmentGreaterAndInputNotAligned),
    }
    assert!(I32x4::try_as_vectors(&I32x4::as_elements(&vectors)[..6]).is_err());
}

#[test]
fn test_load_and_store_use_leading_elements() {
    let src = [3.5f64, 9.0, 10.0];
    let v = F64x1::load(&src[1..]);
    assert_eq!(v.element(0), 9.0);

    let mut dst = [0.0f64; 2];
    v.store(&mut dst);
    assert_eq!(dst, [9.0, 0.0]);
}

#[test]
#[should_panic(expected = "slice too short")]
#[cfg(target_arch = "x86_64")]
fn test_short_load_panics() {
    let _ = lanewise::F32x8::load(&[1.0; 7]);
}

#[test]
fn test_default_is_zero_and_set_element() {
    let mut v = I64x1::default();
    assert_eq!(v.element(0), 0);
    v.set_element(0, -3);
    assert_eq!(v, I64x1::make_set1(-3));
    assert_eq!(format!("{v:?}"), "I64x1([-3])");
}
