// src/resolve.rs

//! Storage, cast-partner, half-width and mask-kind resolution.
//!
//! Two layers:
//!
//! - `lookup_*` are raw table walks. They are `const fn` and report gaps as
//!   [`StorageSpec::Undefined`], which lets `const` items and the type-level
//!   bindings in `types.rs` evaluate them during compilation.
//! - `resolve_*` and [`Resolver`] turn gaps into [`ResolveError`]s. The
//!   `Resolver` carries its tier explicitly so any tier can be queried from
//!   a single build.

use log::trace;

use crate::error::{Resolution, ResolveError};
use crate::features::FeatureSet;
use crate::kind::ElementKind;
use crate::rules::{self, CAST_SUPPORT, HALF_SUPPORT, MASK_RULES, STORAGE_RULES};
use crate::storage::StorageSpec;
use crate::width::Width;

/// Storage for `width` lanes of `kind` at tier `features`.
pub const fn lookup_storage(kind: ElementKind, width: Width, features: FeatureSet) -> StorageSpec {
    if width.is(Width::W1) {
        return StorageSpec::scalar(kind.scalar());
    }

    if kind.is_mask() {
        if let Some(rule) = rules::find_rule(MASK_RULES, kind, width) {
            if let Some(register) = rule.select(features) {
                return StorageSpec::register(register);
            }
        }
        return lookup_storage(kind.paired_arithmetic(), width, features);
    }

    match rules::find_rule(STORAGE_RULES, kind, width) {
        Some(rule) => match rule.select(features) {
            Some(register) => StorageSpec::register(register),
            None => StorageSpec::array(kind.scalar(), width.lanes()),
        },
        None => StorageSpec::Undefined,
    }
}

/// Storage of the bit-reinterpretation partner of `kind` at `width`.
pub const fn lookup_cast_partner(
    kind: ElementKind,
    width: Width,
    features: FeatureSet,
) -> StorageSpec {
    if !rules::supports(CAST_SUPPORT, kind, width) {
        return StorageSpec::Undefined;
    }
    lookup_storage(kind.partner(), width, features)
}

/// Storage for one half of a `width`-lane vector of `kind`.
///
/// The half of a register is the next narrower register at the same tier.
/// Dedicated mask registers are never halved; mask kinds go through their
/// paired arithmetic kind.
pub const fn lookup_half(kind: ElementKind, width: Width, features: FeatureSet) -> StorageSpec {
    let half_lanes = match width.half_lanes() {
        Some(lanes) => lanes,
        None => return StorageSpec::Undefined,
    };
    if !rules::supports(HALF_SUPPORT, kind, width) {
        return StorageSpec::Undefined;
    }

    let base = kind.paired_arithmetic();
    match rules::find_rule(STORAGE_RULES, base, width) {
        Some(rule) => match rule.select_half(features) {
            Some(register) => StorageSpec::register(register),
            None => StorageSpec::array(base.scalar(), half_lanes),
        },
        None => StorageSpec::Undefined,
    }
}

/// Boolean kind of a per-lane predicate over `kind`. Total.
pub const fn resolve_mask_kind(kind: ElementKind) -> ElementKind {
    kind.mask_kind()
}

const fn defined(
    spec: StorageSpec,
    resolution: Resolution,
    kind: ElementKind,
    width: Width,
) -> Result<StorageSpec, ResolveError> {
    match spec {
        StorageSpec::Undefined => Err(ResolveError::UndefinedMapping {
            resolution,
            kind,
            lanes: width.lanes(),
        }),
        spec => Ok(spec),
    }
}

pub const fn resolve_storage(
    kind: ElementKind,
    width: Width,
    features: FeatureSet,
) -> Result<StorageSpec, ResolveError> {
    defined(lookup_storage(kind, width, features), Resolution::Storage, kind, width)
}

pub const fn resolve_cast_partner(
    kind: ElementKind,
    width: Width,
    features: FeatureSet,
) -> Result<StorageSpec, ResolveError> {
    defined(
        lookup_cast_partner(kind, width, features),
        Resolution::CastPartner,
        kind,
        width,
    )
}

pub const fn resolve_half(
    kind: ElementKind,
    width: Width,
    features: FeatureSet,
) -> Result<StorageSpec, ResolveError> {
    if width.is(Width::W1) {
        return Err(ResolveError::InvalidWidth {
            resolution: Resolution::HalfWidth,
            kind,
            lanes: 1,
        });
    }
    defined(lookup_half(kind, width, features), Resolution::HalfWidth, kind, width)
}

/// Resolver bound to one feature tier.
///
/// Takes raw lane counts so that out-of-range widths surface as
/// [`ResolveError::InvalidWidth`] instead of being unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolver {
    features: FeatureSet,
}

impl Resolver {
    pub const fn new(features: FeatureSet) -> Self {
        Resolver { features }
    }

    /// Resolver for the tier this crate was compiled for.
    pub const fn active() -> Self {
        Resolver::new(FeatureSet::BUILD)
    }

    pub const fn features(&self) -> FeatureSet {
        self.features
    }

    fn width(
        &self,
        resolution: Resolution,
        kind: ElementKind,
        lanes: usize,
    ) -> Result<Width, ResolveError> {
        Width::from_lanes(lanes).ok_or(ResolveError::InvalidWidth {
            resolution,
            kind,
            lanes,
        })
    }

    pub fn storage(&self, kind: ElementKind, lanes: usize) -> Result<StorageSpec, ResolveError> {
        let width = self.width(Resolution::Storage, kind, lanes)?;
        let spec = resolve_storage(kind, width, self.features)?;
        trace!("storage({} x {}) at {} -> {}", kind, lanes, self.features, spec);
        Ok(spec)
    }

    pub fn cast_partner(
        &self,
        kind: ElementKind,
        lanes: usize,
    ) -> Result<StorageSpec, ResolveError> {
        let width = self.width(Resolution::CastPartner, kind, lanes)?;
        let spec = resolve_cast_partner(kind, width, self.features)?;
        trace!(
            "cast_partner({} x {}) at {} -> {} ({})",
            kind,
            lanes,
            self.features,
            spec,
            kind.partner()
        );
        Ok(spec)
    }

    pub fn half(&self, kind: ElementKind, lanes: usize) -> Result<StorageSpec, ResolveError> {
        let width = self.width(Resolution::HalfWidth, kind, lanes)?;
        let spec = resolve_half(kind, width, self.features)?;
        trace!("half({} x {}) at {} -> {}", kind, lanes, self.features, spec);
        Ok(spec)
    }

    pub fn mask_kind(&self, kind: ElementKind) -> ElementKind {
        resolve_mask_kind(kind)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::active()
    }
}

#[cfg(test)]
mod tests;
