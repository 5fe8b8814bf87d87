//! Per-lane transcendental functions.
//!
//! No tier has hardware instructions for the transcendental set, so every
//! tier evaluates them lane by lane with `libm`. Results are therefore
//! identical across tiers. `sqrt` is the exception and uses the hardware
//! square root where one exists (correctly rounded on every tier).

/// `f32` lane functions.
pub(crate) mod f32_lanes {
    pub(crate) use libm::{
        acosf as acos, acoshf as acosh, asinf as asin, asinhf as asinh, atan2f as atan2,
        atanf as atan, atanhf as atanh, cbrtf as cbrt, cosf as cos, coshf as cosh,
        exp10f as exp10, exp2f as exp2, expf as exp, expm1f as expm1, hypotf as hypot,
        log10f as log10, log1pf as log1p, log2f as log2, logf as log, powf as pow, sinf as sin,
        sinhf as sinh, tanf as tan, tanhf as tanh,
    };
}

/// `f64` lane functions.
pub(crate) mod f64_lanes {
    pub(crate) use libm::{
        acos, acosh, asin, asinh, atan, atan2, atanh, cbrt, cos, cosh, exp, exp10, exp2, expm1,
        hypot, log, log10, log1p, log2, pow, sin, sinh, tan, tanh,
    };
}
