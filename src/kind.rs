// src/kind.rs

//! Logical element kinds understood by the storage resolver.
//!
//! An `ElementKind` names what a lane holds (a 32-bit float, a 64-bit mask,
//! ...). Every kind belongs to exactly one `LaneFamily`, and the family alone
//! decides which mask kind a predicate over that kind produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical scalar types a vector lane can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ElementKind {
    Float32 = 0,
    Int32 = 1,
    Bool32 = 2,
    Float64 = 3,
    Int64 = 4,
    Bool64 = 5,
}

/// Lane bit width shared by a group of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneFamily {
    Bits32,
    Bits64,
}

/// Underlying machine scalar of a kind, as stored in a single lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    F32,
    I32,
    F64,
    I64,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Float32,
        ElementKind::Int32,
        ElementKind::Bool32,
        ElementKind::Float64,
        ElementKind::Int64,
        ElementKind::Bool64,
    ];

    /// `==` usable from `const fn` (derived `PartialEq` is not const).
    #[inline]
    pub const fn is(self, other: ElementKind) -> bool {
        self as u8 == other as u8
    }

    pub const fn family(self) -> LaneFamily {
        match self {
            ElementKind::Float32 | ElementKind::Int32 | ElementKind::Bool32 => LaneFamily::Bits32,
            ElementKind::Float64 | ElementKind::Int64 | ElementKind::Bool64 => LaneFamily::Bits64,
        }
    }

    /// Whether this kind is a per-lane predicate rather than arithmetic data.
    pub const fn is_mask(self) -> bool {
        matches!(self, ElementKind::Bool32 | ElementKind::Bool64)
    }

    /// The machine scalar stored in one lane.
    ///
    /// Mask lanes live in the same bits as the float data they predicate,
    /// so `Bool32` is carried as `f32` and `Bool64` as `f64`.
    pub const fn scalar(self) -> ScalarType {
        match self {
            ElementKind::Float32 | ElementKind::Bool32 => ScalarType::F32,
            ElementKind::Int32 => ScalarType::I32,
            ElementKind::Float64 | ElementKind::Bool64 => ScalarType::F64,
            ElementKind::Int64 => ScalarType::I64,
        }
    }

    /// The arithmetic kind whose storage a mask kind shares.
    ///
    /// Arithmetic kinds map to themselves.
    pub const fn paired_arithmetic(self) -> ElementKind {
        match self {
            ElementKind::Bool32 => ElementKind::Float32,
            ElementKind::Bool64 => ElementKind::Float64,
            other => other,
        }
    }

    /// The same-width kind in the other numeric family.
    ///
    /// Floats and integers swap; a mask kind maps to its family's integer.
    pub const fn partner(self) -> ElementKind {
        match self {
            ElementKind::Float32 => ElementKind::Int32,
            ElementKind::Int32 => ElementKind::Float32,
            ElementKind::Bool32 => ElementKind::Int32,
            ElementKind::Float64 => ElementKind::Int64,
            ElementKind::Int64 => ElementKind::Float64,
            ElementKind::Bool64 => ElementKind::Int64,
        }
    }

    /// The boolean kind produced by comparing two values of this kind.
    pub const fn mask_kind(self) -> ElementKind {
        match self.family() {
            LaneFamily::Bits32 => ElementKind::Bool32,
            LaneFamily::Bits64 => ElementKind::Bool64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Float32 => "float32",
            ElementKind::Int32 => "int32",
            ElementKind::Bool32 => "bool32",
            ElementKind::Float64 => "float64",
            ElementKind::Int64 => "int64",
            ElementKind::Bool64 => "bool64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl LaneFamily {
    pub const fn bits(self) -> u32 {
        match self {
            LaneFamily::Bits32 => 32,
            LaneFamily::Bits64 => 64,
        }
    }
}

impl ScalarType {
    pub const fn bits(self) -> u32 {
        match self {
            ScalarType::F32 | ScalarType::I32 => 32,
            ScalarType::F64 | ScalarType::I64 => 64,
        }
    }

    /// Rust spelling of the scalar (`f32`, `i64`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::F32 => "f32",
            ScalarType::I32 => "i32",
            ScalarType::F64 => "f64",
            ScalarType::I64 => "i64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 32-bit boolean lane value.
///
/// Opaque here: the vector layer defines what it means. Only its size and
/// its `ElementKind` matter to storage resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Bool32(i32);

/// 64-bit boolean lane value. See [`Bool32`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Bool64(i64);

impl Bool32 {
    pub const fn new(value: bool) -> Self {
        Bool32(if value { -1 } else { 0 })
    }

    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl Bool64 {
    pub const fn new(value: bool) -> Self {
        Bool64(if value { -1 } else { 0 })
    }

    pub const fn get(self) -> bool {
        self.0 != 0
    }
}
