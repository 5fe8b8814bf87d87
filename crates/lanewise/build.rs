//! Build script for lanewise.
//!
//! Classifies the compile target's enabled target features into a
//! microarchitecture level and emits `lanewise_native = "<tier>"`, which the
//! native aliases in `src/native.rs` select on.

use std::env;

/// Features required per level; each level also requires every level below it.
const LEVELS: [&[&str]; 4] = [
    &["sse", "sse2"],
    &["sse3", "ssse3", "sse4.1", "sse4.2"],
    &["avx", "avx2", "fma", "f16c"],
    &["avx512f", "avx512bw", "avx512cd", "avx512dq", "avx512vl"],
];

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!(
        "cargo::rustc-check-cfg=cfg(lanewise_native, values(\"fallback\", \"sse\", \"avx2\", \"avx512\"))"
    );

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let enabled: Vec<&str> = features.split(',').collect();
    let forced = env::var_os("CARGO_FEATURE_FORCE_FALLBACK").is_some();

    let level = if arch == "x86_64" && !forced {
        LEVELS
            .iter()
            .take_while(|required| required.iter().all(|f| enabled.contains(f)))
            .count()
    } else {
        0
    };

    let tier = match level {
        4 => "avx512",
        3 => "avx2",
        1 | 2 => "sse",
        _ => "fallback",
    };

    println!("cargo::rustc-cfg=lanewise_native=\"{tier}\"");
}
