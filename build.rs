// build.rs

// Turns the compile target's vector extensions into cumulative cfg flags.
// cfg(lanes_avx2) implies cfg(lanes_avx) and cfg(lanes_sse), so type
// selection in src/types.rs only ever has to test a single flag.
//
// CARGO_CFG_TARGET_FEATURE describes the target being compiled for, not the
// machine running the build, so cross builds pick the right storage.

const TIERS: [(&str, &str); 4] = [
    ("sse2", "lanes_sse"),
    ("avx", "lanes_avx"),
    ("avx2", "lanes_avx2"),
    ("avx512f", "lanes_avx512f"),
];

fn tier_index(name: &str) -> Option<usize> {
    match name {
        "none" => Some(0),
        "sse" => Some(1),
        "avx" => Some(2),
        "avx2" => Some(3),
        "avx512f" => Some(4),
        _ => None,
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=LANES_MAX_FEATURE_SET");
    for (_, cfg) in TIERS {
        println!("cargo:rustc-check-cfg=cfg({})", cfg);
    }

    // Checked before the arch test so a mistyped cap fails on every target.
    let cap = std::env::var("LANES_MAX_FEATURE_SET").ok().map(|value| {
        tier_index(&value.trim().to_ascii_lowercase()).unwrap_or_else(|| {
            panic!(
                "Invalid LANES_MAX_FEATURE_SET value '{}' (expected none, sse, avx, avx2 or avx512f)",
                value
            )
        })
    });

    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if arch != "x86_64" && arch != "x86" {
        // No x86 vector tiers: every resolution takes the scalar fallback.
        return;
    }

    let features = std::env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let enabled: Vec<&str> = features.split(',').map(str::trim).collect();

    // "sse" alone still counts; sse2 is what __m128i needs but x86_64 always has both.
    let mut tier = 0;
    if enabled.contains(&"sse") || enabled.contains(&"sse2") {
        tier = 1;
    }
    for (i, (feature, _)) in TIERS.iter().enumerate().skip(1) {
        if enabled.contains(feature) {
            tier = i + 1;
        }
    }

    if let Some(max) = cap {
        tier = tier.min(max);
    }

    for (_, cfg) in TIERS.iter().take(tier) {
        println!("cargo:rustc-cfg={}", cfg);
    }
}
