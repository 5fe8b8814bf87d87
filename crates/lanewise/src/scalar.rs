//! Scalar lane semantics
//!
//! One-lane versions of the operations whose hardware behaviour differs from
//! Rust's scalar operators. The fallback tier is built on these, and the
//! vector tiers use them when an instruction is missing, so that every tier
//! agrees lane for lane.

/// Round half to even, as the hardware `round` instructions do.
#[inline(always)]
pub(crate) fn round_even_f32(x: f32) -> f32 {
    libm::rintf(x)
}

#[inline(always)]
pub(crate) fn round_even_f64(x: f64) -> f64 {
    libm::rint(x)
}

/// `minps` semantics: `b` unless `a < b` (so NaN in either yields `b`).
#[inline(always)]
pub(crate) fn min_f32(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

#[inline(always)]
pub(crate) fn max_f32(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

#[inline(always)]
pub(crate) fn min_f64(a: f64, b: f64) -> f64 {
    if a < b {
        a
    } else {
        b
    }
}

#[inline(always)]
pub(crate) fn max_f64(a: f64, b: f64) -> f64 {
    if a > b {
        a
    } else {
        b
    }
}

/// `cvttps2dq` semantics: NaN and out-of-range inputs give `i32::MIN`.
#[inline(always)]
pub(crate) fn trunc_f32_to_i32(x: f32) -> i32 {
    if x.is_nan() || !(-2_147_483_648.0..2_147_483_648.0).contains(&x) {
        i32::MIN
    } else {
        x as i32
    }
}

/// `cvttpd2qq` semantics: NaN and out-of-range inputs give `i64::MIN`.
#[inline(always)]
pub(crate) fn trunc_f64_to_i64(x: f64) -> i64 {
    if x.is_nan() || !(-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&x) {
        i64::MIN
    } else {
        x as i64
    }
}

// Shifts: counts at or above the lane width clear the lane (logical) or
// fill it with the sign bit (arithmetic).

#[inline(always)]
pub(crate) fn shl_u32(x: u32, n: u32) -> u32 {
    x.checked_shl(n).unwrap_or(0)
}

#[inline(always)]
pub(crate) fn shr_u32(x: u32, n: u32) -> u32 {
    x.checked_shr(n).unwrap_or(0)
}

#[inline(always)]
pub(crate) fn sra_i32(x: i32, n: u32) -> i32 {
    x >> n.min(31)
}

#[inline(always)]
pub(crate) fn shl_u64(x: u64, n: u64) -> u64 {
    if n >= 64 {
        0
    } else {
        x << n
    }
}

#[inline(always)]
pub(crate) fn shr_u64(x: u64, n: u64) -> u64 {
    if n >= 64 {
        0
    } else {
        x >> n
    }
}

#[inline(always)]
pub(crate) fn sra_i64(x: i64, n: u64) -> i64 {
    x >> n.min(63)
}

/// Signed shift left: bit pattern of the unsigned shift.
#[inline(always)]
pub(crate) fn shl_i32(x: i32, n: u32) -> i32 {
    shl_u32(x as u32, n) as i32
}

#[inline(always)]
pub(crate) fn shl_i64(x: i64, n: u64) -> i64 {
    shl_u64(x as u64, n) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_even_ties() {
        assert_eq!(round_even_f32(2.5), 2.0);
        assert_eq!(round_even_f32(3.5), 4.0);
        assert_eq!(round_even_f32(-2.5), -2.0);
        assert!(round_even_f32(-0.5).is_sign_negative());
        assert_eq!(round_even_f64(0.5), 0.0);
    }

    #[test]
    fn test_trunc_conversions_saturate_to_min() {
        assert_eq!(trunc_f32_to_i32(f32::NAN), i32::MIN);
        assert_eq!(trunc_f32_to_i32(3.0e9), i32::MIN);
        assert_eq!(trunc_f32_to_i32(-2_147_483_648.0), i32::MIN);
        assert_eq!(trunc_f32_to_i32(-7.9), -7);
        assert_eq!(trunc_f64_to_i64(f64::INFINITY), i64::MIN);
        assert_eq!(trunc_f64_to_i64(1.0e12 + 0.5), 1_000_000_000_000);
    }

    #[test]
    fn test_oversized_shift_counts() {
        assert_eq!(shl_u32(1, 32), 0);
        assert_eq!(shr_u32(u32::MAX, 40), 0);
        assert_eq!(sra_i32(-8, 100), -1);
        assert_eq!(sra_i32(8, 100), 0);
        assert_eq!(shl_u64(1, 64), 0);
        assert_eq!(sra_i64(i64::MIN, 64), -1);
    }

    #[test]
    fn test_min_max_return_second_operand_on_nan() {
        assert_eq!(min_f32(f32::NAN, 1.0), 1.0);
        assert!(min_f32(1.0, f32::NAN).is_nan());
        assert_eq!(max_f64(f64::NAN, 2.0), 2.0);
        assert_eq!(min_f32(-0.0, 0.0).to_bits(), 0.0f32.to_bits());
    }
}
