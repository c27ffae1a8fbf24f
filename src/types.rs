// src/types.rs

//! Build-time binding of element types to concrete Rust storage types.
//!
//! The traits here are the compile-time face of the rule tables: `Lanes<W>`
//! is implemented for exactly the (element, width) pairs that have storage,
//! and its associated `Storage` type is chosen by the `lanes_*` cfg flags
//! emitted by `build.rs`. Asking for an undefined pair is a missing impl, so
//! it fails to compile instead of falling back to something nonsensical.
//!
//! Every impl also carries a `const` check that the chosen Rust type agrees
//! with the value-level rule table (same size, register vs array), so the
//! two can't drift apart.

use crate::features::FeatureSet;
use crate::kind::{Bool32, Bool64, ElementKind};
use crate::resolve::{lookup_cast_partner, lookup_half, lookup_storage};
use crate::storage::StorageSpec;
use crate::width::Width;

#[cfg(all(lanes_sse, target_arch = "x86_64"))]
use core::arch::x86_64 as arch;

#[cfg(all(lanes_sse, target_arch = "x86"))]
use core::arch::x86 as arch;

/// A scalar type that can occupy a vector lane.
pub trait Element: Copy + Default + Send + Sync + 'static {
    const KIND: ElementKind;

    /// Lane type of a comparison result over `Self`.
    type Mask: Element;
}

/// Storage of a `W`-lane vector of `Self`.
///
/// Only pairs with a storage rule implement it. 64-bit lanes stop at width 4:
///
/// ```compile_fail
/// let _wide: lanes::StorageOf<f64, 8>;
/// ```
pub trait Lanes<const W: usize>: Element {
    type Storage: Copy;

    /// Value-level description of `Storage` for this build.
    const SPEC: StorageSpec = match Width::from_lanes(W) {
        Some(width) => lookup_storage(Self::KIND, width, FeatureSet::BUILD),
        None => StorageSpec::Undefined,
    };
}

/// Bit-reinterpretation partner of a `W`-lane vector of `Self`.
///
/// `i64` has 4-lane storage but no 4-lane cast partner:
///
/// ```compile_fail
/// let _cast: lanes::CastStorageOf<i64, 4>;
/// ```
pub trait CastLanes<const W: usize>: Lanes<W> {
    /// Same-width element of the other numeric family.
    type Partner: Lanes<W>;

    /// `Partner`'s storage at the same width.
    type CastStorage: Copy;

    const CAST_SPEC: StorageSpec = match Width::from_lanes(W) {
        Some(width) => lookup_cast_partner(Self::KIND, width, FeatureSet::BUILD),
        None => StorageSpec::Undefined,
    };
}

/// Storage for one half of a `W`-lane vector of `Self`.
pub trait HalfLanes<const W: usize>: Lanes<W> {
    type HalfStorage: Copy;

    const HALF_SPEC: StorageSpec = match Width::from_lanes(W) {
        Some(width) => lookup_half(Self::KIND, width, FeatureSet::BUILD),
        None => StorageSpec::Undefined,
    };
}

pub type StorageOf<T, const W: usize> = <T as Lanes<W>>::Storage;
pub type CastStorageOf<T, const W: usize> = <T as CastLanes<W>>::CastStorage;
pub type HalfStorageOf<T, const W: usize> = <T as HalfLanes<W>>::HalfStorage;
pub type MaskOf<T> = <T as Element>::Mask;

macro_rules! element {
    ($($elem:ty => $kind:ident, $mask:ty;)*) => {
        $(
            impl Element for $elem {
                const KIND: ElementKind = ElementKind::$kind;
                type Mask = $mask;
            }

            const _: () = assert!(
                <$elem as Element>::KIND.mask_kind().is(<$mask as Element>::KIND),
                concat!("mask type of ", stringify!($elem), " disagrees with its lane family")
            );
            const _: () = assert!(
                core::mem::size_of::<$elem>() * 8 == <$elem as Element>::KIND.scalar().bits() as usize
            );
        )*
    };
}

element! {
    f32 => Float32, Bool32;
    i32 => Int32, Bool32;
    Bool32 => Bool32, Bool32;
    f64 => Float64, Bool64;
    i64 => Int64, Bool64;
    Bool64 => Bool64, Bool64;
}

/// Asserts at compile time that a bound type matches its table entry.
macro_rules! check_binding {
    ($spec:expr, $ty:ty, $register:expr, $what:literal, $elem:ty, $w:literal) => {
        const _: () = {
            let spec: StorageSpec = $spec;
            assert!(
                spec.is_defined(),
                concat!($what, stringify!($elem), " x ", stringify!($w), " has no table entry")
            );
            assert!(
                core::mem::size_of::<$ty>() == spec.size_bytes(),
                concat!($what, stringify!($elem), " x ", stringify!($w), " disagrees with the table size")
            );
            assert!(
                spec.is_register() == $register,
                concat!($what, stringify!($elem), " x ", stringify!($w), " disagrees with the table register")
            );
        };
    };
}

macro_rules! lanes {
    ($elem:ty, $w:literal => $tier:ident ? $register:ident : $fallback:ty) => {
        #[cfg($tier)]
        impl Lanes<$w> for $elem {
            type Storage = arch::$register;
        }
        #[cfg(not($tier))]
        impl Lanes<$w> for $elem {
            type Storage = $fallback;
        }
        check_binding!(
            <$elem as Lanes<$w>>::SPEC,
            <$elem as Lanes<$w>>::Storage,
            cfg!($tier),
            "storage of ", $elem, $w
        );
    };
    ($elem:ty, $w:literal => $storage:ty) => {
        impl Lanes<$w> for $elem {
            type Storage = $storage;
        }
        check_binding!(
            <$elem as Lanes<$w>>::SPEC,
            $storage,
            false,
            "storage of ", $elem, $w
        );
    };
}

lanes!(f32, 1 => f32);
lanes!(f32, 4 => lanes_sse ? __m128 : [f32; 4]);
lanes!(f32, 8 => lanes_avx ? __m256 : [f32; 8]);
lanes!(f32, 16 => lanes_avx512f ? __m512 : [f32; 16]);

lanes!(i32, 1 => i32);
lanes!(i32, 4 => lanes_sse ? __m128i : [i32; 4]);
lanes!(i32, 8 => lanes_avx ? __m256i : [i32; 8]);
lanes!(i32, 16 => lanes_avx512f ? __m512i : [i32; 16]);

lanes!(Bool32, 1 => f32);
lanes!(Bool32, 4 => lanes_sse ? __m128 : [f32; 4]);
lanes!(Bool32, 8 => lanes_avx ? __m256 : [f32; 8]);
lanes!(Bool32, 16 => lanes_avx512f ? __mmask16 : [f32; 16]);

lanes!(f64, 1 => f64);
lanes!(f64, 4 => lanes_avx ? __m256d : [f64; 4]);

lanes!(i64, 1 => i64);
lanes!(i64, 4 => lanes_avx2 ? __m256i : [i64; 4]);

lanes!(Bool64, 1 => f64);
lanes!(Bool64, 4 => lanes_avx ? __m256d : [f64; 4]);

macro_rules! cast_lanes {
    ($($elem:ty => $partner:ty, [$($w:literal),*];)*) => {
        $($(
            impl CastLanes<$w> for $elem {
                type Partner = $partner;
                type CastStorage = <$partner as Lanes<$w>>::Storage;
            }
            check_binding!(
                <$elem as CastLanes<$w>>::CAST_SPEC,
                CastStorageOf<$elem, $w>,
                <$partner as Lanes<$w>>::SPEC.is_register(),
                "cast of ", $elem, $w
            );
        )*)*
    };
}

cast_lanes! {
    f32 => i32, [1, 4, 8, 16];
    i32 => f32, [1, 4, 8, 16];
    f64 => i64, [1];
    i64 => f64, [1];
    Bool32 => i32, [4];
}

macro_rules! half_lanes {
    ($elem:ty, $w:literal => $tier:ident ? $register:ident : $fallback:ty) => {
        #[cfg($tier)]
        impl HalfLanes<$w> for $elem {
            type HalfStorage = arch::$register;
        }
        #[cfg(not($tier))]
        impl HalfLanes<$w> for $elem {
            type HalfStorage = $fallback;
        }
        check_binding!(
            <$elem as HalfLanes<$w>>::HALF_SPEC,
            <$elem as HalfLanes<$w>>::HalfStorage,
            cfg!($tier),
            "half of ", $elem, $w
        );
    };
    ($elem:ty, $w:literal => $storage:ty) => {
        impl HalfLanes<$w> for $elem {
            type HalfStorage = $storage;
        }
        check_binding!(
            <$elem as HalfLanes<$w>>::HALF_SPEC,
            $storage,
            false,
            "half of ", $elem, $w
        );
    };
}

half_lanes!(f32, 4 => [f32; 2]);
half_lanes!(f32, 8 => lanes_avx ? __m128 : [f32; 4]);
half_lanes!(f32, 16 => lanes_avx512f ? __m256 : [f32; 8]);

half_lanes!(i32, 4 => [i32; 2]);
half_lanes!(i32, 8 => lanes_avx ? __m128i : [i32; 4]);
half_lanes!(i32, 16 => lanes_avx512f ? __m256i : [i32; 8]);

half_lanes!(Bool32, 8 => lanes_avx ? __m128 : [f32; 4]);
half_lanes!(Bool32, 16 => lanes_avx512f ? __m256 : [f32; 8]);

/// Fails the build unless `$kind` x `$lanes` has storage on this target.
///
/// ```
/// lanes::require_storage!(Float32, 8);
/// ```
///
/// Pairs with no mapping on any target stop the build:
///
/// ```compile_fail
/// lanes::require_storage!(Float64, 8);
/// ```
#[macro_export]
macro_rules! require_storage {
    ($kind:ident, $lanes:expr) => {
        const _: () = match $crate::Width::from_lanes($lanes) {
            Some(width) => assert!(
                $crate::lookup_storage($crate::ElementKind::$kind, width, $crate::FeatureSet::BUILD)
                    .is_defined(),
                concat!(
                    "no storage for ",
                    stringify!($kind),
                    " x ",
                    stringify!($lanes),
                    " on this build target"
                )
            ),
            None => panic!(concat!(
                "invalid width ",
                stringify!($lanes),
                " for ",
                stringify!($kind),
                " (expected 1, 4, 8 or 16)"
            )),
        };
    };
}

/// Fails the build unless `$kind` x `$lanes` can be split in half.
///
/// ```
/// lanes::require_half!(Int32, 16);
/// ```
///
/// A scalar has no half, and neither does a pair outside the half-width set:
///
/// ```compile_fail
/// lanes::require_half!(Float32, 1);
/// ```
///
/// ```compile_fail
/// lanes::require_half!(Bool64, 4);
/// ```
#[macro_export]
macro_rules! require_half {
    ($kind:ident, $lanes:expr) => {
        const _: () = match $crate::Width::from_lanes($lanes) {
            Some($crate::Width::W1) | None => panic!(concat!(
                "invalid width ",
                stringify!($lanes),
                " for a half of ",
                stringify!($kind)
            )),
            Some(width) => assert!(
                $crate::lookup_half($crate::ElementKind::$kind, width, $crate::FeatureSet::BUILD)
                    .is_defined(),
                concat!(
                    "no half-width storage for ",
                    stringify!($kind),
                    " x ",
                    stringify!($lanes),
                    " on this build target"
                )
            ),
        };
    };
}
