// src/lib.rs

//! Storage type selection for a portable SIMD layer.
//!
//! Given an element kind (`f32`, `i64`, a 32-bit mask, ...) and a lane count,
//! this crate answers which concrete representation backs that vector on the
//! build target: an x86 vector or mask register when the enabled extensions
//! provide one, otherwise a plain `[scalar; lanes]` array. On top of that it
//! resolves the bit-cast partner, the half-width representation, and the
//! mask kind of a comparison result.
//!
//! All answers are fixed at compile time. The [`types`] module exposes them
//! as associated types (`<f32 as Lanes<8>>::Storage`); the [`resolve`]
//! module exposes the same rules as `const fn`s and a [`Resolver`] value that
//! can be pointed at any [`FeatureSet`], which is how the tables are tested
//! against every tier from one build.

pub mod config;
pub mod error;
pub mod features;
pub mod kind;
pub mod matrix;
pub mod resolve;
pub mod rules;
pub mod storage;
pub mod types;
pub mod width;

pub use config::BuildConfig;
pub use error::{Resolution, ResolveError};
pub use features::{active_feature_set, FeatureFlags, FeatureSet};
pub use kind::{Bool32, Bool64, ElementKind, LaneFamily, ScalarType};
pub use matrix::SupportMatrix;
pub use resolve::{
    lookup_cast_partner, lookup_half, lookup_storage, resolve_cast_partner, resolve_half,
    resolve_mask_kind, resolve_storage, Resolver,
};
pub use storage::{Register, RegisterClass, StorageSpec};
pub use types::{CastLanes, CastStorageOf, Element, HalfLanes, HalfStorageOf, Lanes, MaskOf, StorageOf};
pub use width::Width;
