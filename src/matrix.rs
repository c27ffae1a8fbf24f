// src/matrix.rs

//! The full support matrix for one feature tier.
//!
//! Enumerates every (kind, width) pair with its storage, cast-partner and
//! half-width resolution, so gaps in the tables can be reviewed (or diffed
//! between tiers) without writing code against each pair.

use anyhow::Context;
use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::features::FeatureSet;
use crate::kind::ElementKind;
use crate::resolve::Resolver;
use crate::storage::StorageSpec;
use crate::width::Width;

static ACTIVE: Lazy<SupportMatrix> = Lazy::new(|| SupportMatrix::for_features(FeatureSet::BUILD));

/// Resolutions of one (kind, width) pair. `None` marks an unsupported combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub kind: ElementKind,
    pub width: Width,
    pub storage: Option<StorageSpec>,
    pub cast_partner: Option<StorageSpec>,
    pub half: Option<StorageSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskEntry {
    pub kind: ElementKind,
    pub mask: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportMatrix {
    pub feature_set: FeatureSet,
    pub entries: Vec<MatrixEntry>,
    pub masks: Vec<MaskEntry>,
}

impl SupportMatrix {
    pub fn for_features(features: FeatureSet) -> Self {
        let resolver = Resolver::new(features);
        let mut entries = Vec::with_capacity(ElementKind::ALL.len() * Width::ALL.len());

        for kind in ElementKind::ALL {
            for width in Width::ALL {
                let lanes = width.lanes();
                entries.push(MatrixEntry {
                    kind,
                    width,
                    storage: resolver.storage(kind, lanes).ok(),
                    cast_partner: resolver.cast_partner(kind, lanes).ok(),
                    half: resolver.half(kind, lanes).ok(),
                });
            }
        }

        let masks = ElementKind::ALL
            .into_iter()
            .map(|kind| MaskEntry {
                kind,
                mask: resolver.mask_kind(kind),
            })
            .collect();

        let matrix = SupportMatrix {
            feature_set: features,
            entries,
            masks,
        };
        debug!(
            "Support matrix for {}: {} of {} pairs have storage",
            features,
            matrix.entries.iter().filter(|e| e.storage.is_some()).count(),
            matrix.entries.len()
        );
        matrix
    }

    /// The matrix for the tier this crate was compiled for.
    pub fn active() -> &'static SupportMatrix {
        &ACTIVE
    }

    pub fn get(&self, kind: ElementKind, width: Width) -> Option<&MatrixEntry> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.width == width)
    }

    /// Pairs that have storage but no cast partner or no half.
    pub fn partial(&self) -> impl Iterator<Item = &MatrixEntry> {
        self.entries.iter().filter(|entry| {
            entry.storage.is_some() && (entry.cast_partner.is_none() || entry.half.is_none())
        })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize support matrix")
    }
}
