// src/config.rs

//! Build configuration feeding the feature model.
//!
//! A `BuildConfig` describes a compile target the way Cargo does: its
//! architecture and its enabled target features, plus an optional cap on the
//! tier. It can be deserialized from JSON (e.g. a checked-in target profile),
//! read from the environment Cargo gives build scripts, or taken from the
//! current compilation. [`BuildConfig::resolver`] then injects the derived
//! tier into a [`Resolver`], so code generators and tests can resolve for a
//! target other than the one being compiled.

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::features::{FeatureFlags, FeatureSet};
use crate::resolve::Resolver;

/// Environment variable capping the tier, honoured by `build.rs` too.
pub const MAX_FEATURE_SET_ENV: &str = "LANES_MAX_FEATURE_SET";

/// Describes the target a set of resolutions is computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Missing fields fall back to the current compile target.
pub struct BuildConfig {
    /// `target_arch` value, e.g. "x86_64".
    pub target_arch: String,
    /// Enabled `target_feature` names, e.g. ["sse2", "avx", "avx2"].
    pub target_features: Vec<String>,
    /// Upper bound on the tier, regardless of what the features allow.
    pub max_feature_set: Option<FeatureSet>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig::current()
    }
}

impl BuildConfig {
    /// The target this crate was compiled for.
    ///
    /// The feature list is reconstructed from the tier `build.rs` selected,
    /// so a tier cap applied at build time is already reflected in it.
    pub fn current() -> Self {
        BuildConfig {
            target_arch: std::env::consts::ARCH.to_string(),
            target_features: tier_features(FeatureSet::BUILD)
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_feature_set: None,
        }
    }

    /// Parses a JSON target profile.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse build configuration JSON")
    }

    /// Reads the target description Cargo exports to build scripts.
    pub fn from_cargo_env() -> anyhow::Result<Self> {
        BuildConfig::from_env_with(|name| std::env::var(name).ok())
    }

    /// Like [`BuildConfig::from_cargo_env`], with variables looked up through `var`.
    ///
    /// An invalid `LANES_MAX_FEATURE_SET` is an error here and a build failure
    /// in `build.rs`.
    pub fn from_env_with<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target_arch = var("CARGO_CFG_TARGET_ARCH")
            .context("CARGO_CFG_TARGET_ARCH is not set (not running under a build script?)")?;
        let target_features = var("CARGO_CFG_TARGET_FEATURE")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let max_feature_set = match var(MAX_FEATURE_SET_ENV) {
            Some(value) => Some(
                value
                    .parse::<FeatureSet>()
                    .with_context(|| format!("Invalid {} value '{}'", MAX_FEATURE_SET_ENV, value))?,
            ),
            None => None,
        };

        Ok(BuildConfig {
            target_arch,
            target_features,
            max_feature_set,
        })
    }

    pub fn is_x86(&self) -> bool {
        matches!(self.target_arch.as_str(), "x86" | "x86_64")
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags::from_target_features(self.target_features.iter().map(String::as_str))
    }

    /// The tier this configuration selects.
    pub fn feature_set(&self) -> FeatureSet {
        if !self.is_x86() {
            if !self.target_features.is_empty() {
                warn!(
                    "target arch '{}' has no vector tiers, using scalar storage",
                    self.target_arch
                );
            }
            return FeatureSet::None;
        }

        let tier = FeatureSet::from_flags(self.feature_flags());
        match self.max_feature_set {
            Some(max) if tier > max => {
                warn!("Capping feature set {} to {}", tier, max);
                max
            }
            _ => {
                debug!("Feature set for {}: {}", self.target_arch, tier);
                tier
            }
        }
    }

    /// A resolver bound to this configuration's tier.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.feature_set())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build configuration")
    }
}

/// Feature names that select `tier`, least capable first.
pub fn tier_features(tier: FeatureSet) -> &'static [&'static str] {
    static ALL: [&str; 5] = ["sse", "sse2", "avx", "avx2", "avx512f"];
    match tier {
        FeatureSet::None => &[],
        FeatureSet::Sse => &ALL[..2],
        FeatureSet::Avx => &ALL[..3],
        FeatureSet::Avx2 => &ALL[..4],
        FeatureSet::Avx512F => &ALL,
    }
}
