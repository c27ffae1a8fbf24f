// src/storage.rs

//! Resolved physical representations.

use crate::features::FeatureSet;
use crate::kind::ScalarType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad class of a register, as seen by instruction selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterClass {
    Float,
    Integer,
    Mask,
}

/// Hardware register types a vector may live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    M128,
    M128i,
    M128d,
    M256,
    M256i,
    M256d,
    M512,
    M512i,
    /// AVX-512 `k` register holding one bit per 32-bit lane of a 16-lane vector.
    Mask16,
}

impl Register {
    pub const fn bits(self) -> u32 {
        match self {
            Register::Mask16 => 16,
            Register::M128 | Register::M128i | Register::M128d => 128,
            Register::M256 | Register::M256i | Register::M256d => 256,
            Register::M512 | Register::M512i => 512,
        }
    }

    pub const fn class(self) -> RegisterClass {
        match self {
            Register::M128 | Register::M128d | Register::M256 | Register::M256d | Register::M512 => {
                RegisterClass::Float
            }
            Register::M128i | Register::M256i | Register::M512i => RegisterClass::Integer,
            Register::Mask16 => RegisterClass::Mask,
        }
    }

    /// Lowest tier at which the register type exists at all.
    ///
    /// Arithmetic on it may need more: 256-bit integer lanes are storable
    /// under AVX but only computed on under AVX2.
    pub const fn tier(self) -> FeatureSet {
        match self {
            Register::M128 | Register::M128i | Register::M128d => FeatureSet::Sse,
            Register::M256 | Register::M256i | Register::M256d => FeatureSet::Avx,
            Register::M512 | Register::M512i | Register::Mask16 => FeatureSet::Avx512F,
        }
    }

    /// The register holding the lower half of this one, if any.
    pub const fn half(self) -> Option<Register> {
        match self {
            Register::M512 => Some(Register::M256),
            Register::M512i => Some(Register::M256i),
            Register::M256 => Some(Register::M128),
            Register::M256i => Some(Register::M128i),
            Register::M256d => Some(Register::M128d),
            Register::M128 | Register::M128i | Register::M128d | Register::Mask16 => None,
        }
    }

    /// Intrinsic type name as spelled in `core::arch`.
    pub const fn name(self) -> &'static str {
        match self {
            Register::M128 => "__m128",
            Register::M128i => "__m128i",
            Register::M128d => "__m128d",
            Register::M256 => "__m256",
            Register::M256i => "__m256i",
            Register::M256d => "__m256d",
            Register::M512 => "__m512",
            Register::M512i => "__m512i",
            Register::Mask16 => "__mmask16",
        }
    }
}

/// The concrete representation backing a vector of some kind and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "repr", rename_all = "lowercase")]
pub enum StorageSpec {
    /// Single machine scalar; the `W1` case.
    Scalar { scalar: ScalarType },
    /// Hardware vector or mask register.
    Register { register: Register },
    /// `[scalar; lanes]`, used when no enabled tier provides a register.
    Array { scalar: ScalarType, lanes: u8 },
    /// No representation exists. Never handed out by the checked resolvers.
    Undefined,
}

impl StorageSpec {
    pub const fn scalar(scalar: ScalarType) -> StorageSpec {
        StorageSpec::Scalar { scalar }
    }

    pub const fn register(register: Register) -> StorageSpec {
        StorageSpec::Register { register }
    }

    /// `[scalar; lanes]`. Panics if `lanes` exceeds `u8::MAX`.
    pub const fn array(scalar: ScalarType, lanes: usize) -> StorageSpec {
        assert!(lanes <= u8::MAX as usize, "fallback array lane count out of range");
        StorageSpec::Array {
            scalar,
            lanes: lanes as u8,
        }
    }

    #[inline]
    pub const fn is_defined(&self) -> bool {
        !matches!(self, StorageSpec::Undefined)
    }

    /// Whether this is the generic scalar-array fallback.
    #[inline]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, StorageSpec::Array { .. })
    }

    #[inline]
    pub const fn is_register(&self) -> bool {
        matches!(self, StorageSpec::Register { .. })
    }

    /// Total payload bits. Zero for `Undefined`.
    pub const fn bits(&self) -> u32 {
        match *self {
            StorageSpec::Scalar { scalar } => scalar.bits(),
            StorageSpec::Register { register } => register.bits(),
            StorageSpec::Array { scalar, lanes } => scalar.bits() * lanes as u32,
            StorageSpec::Undefined => 0,
        }
    }

    /// In-memory size of the Rust type that carries this representation.
    pub const fn size_bytes(&self) -> usize {
        (self.bits() as usize).div_ceil(8)
    }

    /// Register class, treating scalars and arrays by their element type.
    pub const fn class(&self) -> Option<RegisterClass> {
        match *self {
            StorageSpec::Register { register } => Some(register.class()),
            StorageSpec::Scalar { scalar } | StorageSpec::Array { scalar, .. } => match scalar {
                ScalarType::F32 | ScalarType::F64 => Some(RegisterClass::Float),
                ScalarType::I32 | ScalarType::I64 => Some(RegisterClass::Integer),
            },
            StorageSpec::Undefined => None,
        }
    }
}

impl fmt::Display for StorageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageSpec::Scalar { scalar } => write!(f, "{}", scalar),
            StorageSpec::Register { register } => f.write_str(register.name()),
            StorageSpec::Array { scalar, lanes } => write!(f, "[{}; {}]", scalar, lanes),
            StorageSpec::Undefined => f.write_str("<undefined>"),
        }
    }
}
