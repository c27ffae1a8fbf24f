// src/features.rs

//! Feature model: which vector instruction tier the build targets.
//!
//! The tier is fixed when the crate is compiled. `build.rs` reads the
//! compile target's features and emits cumulative `lanes_*` cfg flags;
//! [`FeatureSet::BUILD`] folds those flags back into a value. Everything else
//! in the crate takes the tier as an argument, so the same rules can be
//! evaluated against any tier in tests.

use bitflags::bitflags;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tier of the vector extensions enabled for a build.
///
/// Ordered: a higher tier can use everything a lower tier can.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FeatureSet {
    /// No vector extensions; every vector is a scalar array.
    #[default]
    None = 0,
    /// 128-bit SSE/SSE2 registers.
    Sse = 1,
    /// 256-bit float arithmetic; 256-bit integer registers exist as storage.
    Avx = 2,
    /// 256-bit integer arithmetic.
    Avx2 = 3,
    /// 512-bit registers plus `k` mask registers.
    Avx512F = 4,
}

bitflags! {
    /// Target features relevant to tier selection.
    ///
    /// Built from `target_feature` names as rustc and Cargo spell them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FeatureFlags: u8 {
        const SSE     = 1 << 0;
        const SSE2    = 1 << 1;
        const AVX     = 1 << 2;
        const AVX2    = 1 << 3;
        const AVX512F = 1 << 4;
    }
}

impl FeatureSet {
    /// Every tier, least capable first.
    pub const ALL: [FeatureSet; 5] = [
        FeatureSet::None,
        FeatureSet::Sse,
        FeatureSet::Avx,
        FeatureSet::Avx2,
        FeatureSet::Avx512F,
    ];

    /// The tier this crate was compiled for.
    pub const BUILD: FeatureSet = if cfg!(lanes_avx512f) {
        FeatureSet::Avx512F
    } else if cfg!(lanes_avx2) {
        FeatureSet::Avx2
    } else if cfg!(lanes_avx) {
        FeatureSet::Avx
    } else if cfg!(lanes_sse) {
        FeatureSet::Sse
    } else {
        FeatureSet::None
    };

    /// Whether a candidate needing `required` may be used at this tier.
    #[inline]
    pub const fn enables(self, required: FeatureSet) -> bool {
        required as u8 <= self as u8
    }

    /// The highest tier whose defining feature is present.
    ///
    /// Target features imply their predecessors, so `avx2` on its own still
    /// selects `Avx2`.
    pub const fn from_flags(flags: FeatureFlags) -> FeatureSet {
        if flags.contains(FeatureFlags::AVX512F) {
            FeatureSet::Avx512F
        } else if flags.contains(FeatureFlags::AVX2) {
            FeatureSet::Avx2
        } else if flags.contains(FeatureFlags::AVX) {
            FeatureSet::Avx
        } else if flags.intersects(FeatureFlags::SSE.union(FeatureFlags::SSE2)) {
            FeatureSet::Sse
        } else {
            FeatureSet::None
        }
    }

    /// Widest register this tier provides, in bits (0 for `None`).
    pub const fn register_bits(self) -> u32 {
        match self {
            FeatureSet::None => 0,
            FeatureSet::Sse => 128,
            FeatureSet::Avx | FeatureSet::Avx2 => 256,
            FeatureSet::Avx512F => 512,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FeatureSet::None => "none",
            FeatureSet::Sse => "sse",
            FeatureSet::Avx => "avx",
            FeatureSet::Avx2 => "avx2",
            FeatureSet::Avx512F => "avx512f",
        }
    }
}

/// The single tier active for this build. Constant for the whole program.
#[inline]
pub const fn active_feature_set() -> FeatureSet {
    FeatureSet::BUILD
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureSet::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown feature set '{}'", s))
    }
}

impl FeatureFlags {
    /// Parses one `target_feature` name. Names unrelated to tier selection
    /// (`fxsr`, `fma`, ...) yield `None`.
    pub fn from_feature_name(name: &str) -> Option<FeatureFlags> {
        match name.trim() {
            "sse" => Some(FeatureFlags::SSE),
            "sse2" => Some(FeatureFlags::SSE2),
            "avx" => Some(FeatureFlags::AVX),
            "avx2" => Some(FeatureFlags::AVX2),
            "avx512f" => Some(FeatureFlags::AVX512F),
            _ => None,
        }
    }

    /// Collects the relevant flags out of a list of feature names.
    pub fn from_target_features<'a, I>(names: I) -> FeatureFlags
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .fold(FeatureFlags::empty(), |flags, name| {
                match FeatureFlags::from_feature_name(name) {
                    Some(flag) => flags | flag,
                    None => {
                        debug!("ignoring target feature '{}' for tier selection", name);
                        flags
                    }
                }
            })
    }
}
