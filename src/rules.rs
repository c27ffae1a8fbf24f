// src/rules.rs

//! Declarative rule list behind every resolution.
//!
//! A [`StorageRule`] lists the hardware candidates for one (kind, width)
//! pair, most capable first. The resolver walks the list and takes the first
//! candidate the active tier enables; when none qualifies it falls back to a
//! `[scalar; width]` array. Pairs without a rule have no representation.
//!
//! Width 1 never appears here: it is always the plain scalar.

use crate::features::FeatureSet;
use crate::kind::ElementKind;
use crate::storage::Register;
use crate::width::Width;

use ElementKind::{Bool32, Float32, Float64, Int32, Int64};
use Width::{W1, W16, W4, W8};

/// One hardware representation and the tier needed to use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub requires: FeatureSet,
    pub register: Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageRule {
    pub kind: ElementKind,
    pub width: Width,
    /// Sorted by `requires`, highest first.
    pub candidates: &'static [Candidate],
}

const fn candidate(requires: FeatureSet, register: Register) -> Candidate {
    Candidate { requires, register }
}

const fn rule(kind: ElementKind, width: Width, candidates: &'static [Candidate]) -> StorageRule {
    StorageRule {
        kind,
        width,
        candidates,
    }
}

/// Arithmetic storage. Mask kinds borrow these through
/// [`ElementKind::paired_arithmetic`].
pub const STORAGE_RULES: &[StorageRule] = &[
    rule(Float32, W4, &[candidate(FeatureSet::Sse, Register::M128)]),
    rule(Float32, W8, &[candidate(FeatureSet::Avx, Register::M256)]),
    rule(Float32, W16, &[candidate(FeatureSet::Avx512F, Register::M512)]),
    rule(Int32, W4, &[candidate(FeatureSet::Sse, Register::M128i)]),
    rule(Int32, W8, &[candidate(FeatureSet::Avx, Register::M256i)]),
    rule(Int32, W16, &[candidate(FeatureSet::Avx512F, Register::M512i)]),
    rule(Float64, W4, &[candidate(FeatureSet::Avx, Register::M256d)]),
    // 256-bit integer registers exist under AVX, but 64-bit lanes are only
    // worth holding there once AVX2 can compute on them.
    rule(Int64, W4, &[candidate(FeatureSet::Avx2, Register::M256i)]),
];

/// Dedicated mask registers, tried before a mask kind falls through to its
/// paired arithmetic kind.
pub const MASK_RULES: &[StorageRule] = &[rule(
    Bool32,
    W16,
    &[candidate(FeatureSet::Avx512F, Register::Mask16)],
)];

/// Pairs with a defined reinterpretation partner.
pub const CAST_SUPPORT: &[(ElementKind, Width)] = &[
    (Float32, W1),
    (Float32, W4),
    (Float32, W8),
    (Float32, W16),
    (Int32, W1),
    (Int32, W4),
    (Int32, W8),
    (Int32, W16),
    (Float64, W1),
    (Int64, W1),
    (Bool32, W4),
];

/// Pairs with a defined half-width representation.
pub const HALF_SUPPORT: &[(ElementKind, Width)] = &[
    (Float32, W4),
    (Float32, W8),
    (Float32, W16),
    (Int32, W4),
    (Int32, W8),
    (Int32, W16),
    (Bool32, W8),
    (Bool32, W16),
];

impl StorageRule {
    /// First candidate enabled at `features`.
    pub const fn select(&self, features: FeatureSet) -> Option<Register> {
        let mut i = 0;
        while i < self.candidates.len() {
            let candidate = self.candidates[i];
            if features.enables(candidate.requires) {
                return Some(candidate.register);
            }
            i += 1;
        }
        None
    }

    /// First enabled candidate that can be split, as its half register.
    pub const fn select_half(&self, features: FeatureSet) -> Option<Register> {
        let mut i = 0;
        while i < self.candidates.len() {
            let candidate = self.candidates[i];
            if features.enables(candidate.requires) {
                if let Some(half) = candidate.register.half() {
                    return Some(half);
                }
            }
            i += 1;
        }
        None
    }
}

pub const fn find_rule(
    rules: &'static [StorageRule],
    kind: ElementKind,
    width: Width,
) -> Option<&'static StorageRule> {
    let mut i = 0;
    while i < rules.len() {
        let rule = &rules[i];
        if rule.kind.is(kind) && rule.width.is(width) {
            return Some(rule);
        }
        i += 1;
    }
    None
}

pub const fn supports(table: &[(ElementKind, Width)], kind: ElementKind, width: Width) -> bool {
    let mut i = 0;
    while i < table.len() {
        let (k, w) = table[i];
        if k.is(kind) && w.is(width) {
            return true;
        }
        i += 1;
    }
    false
}
