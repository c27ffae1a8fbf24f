// src/resolve/tests.rs

//! Resolver tests, evaluated against every feature tier from a single build.

use super::*;
use crate::kind::ScalarType;
use crate::storage::Register;

use ElementKind::{Bool32, Bool64, Float32, Float64, Int32, Int64};

/// Pairs with a storage rule (or the scalar case).
fn supported_pairs() -> Vec<(ElementKind, Width)> {
    let mut pairs = Vec::new();
    for kind in ElementKind::ALL {
        for width in Width::ALL {
            let defined = match kind.family() {
                crate::kind::LaneFamily::Bits32 => true,
                crate::kind::LaneFamily::Bits64 => matches!(width, Width::W1 | Width::W4),
            };
            if defined {
                pairs.push((kind, width));
            }
        }
    }
    pairs
}

// --- Storage ---

#[test_log::test]
fn supported_pairs_resolve_at_every_tier() {
    for features in FeatureSet::ALL {
        let resolver = Resolver::new(features);
        for (kind, width) in supported_pairs() {
            let first = resolver
                .storage(kind, width.lanes())
                .unwrap_or_else(|e| panic!("{} at {}: {}", kind, features, e));
            let second = resolver.storage(kind, width.lanes()).unwrap();
            assert_eq!(first, second, "resolution must be stable");
        }
    }
}

#[test_log::test]
fn width_one_is_the_plain_scalar_at_every_tier() {
    for features in FeatureSet::ALL {
        for kind in ElementKind::ALL {
            assert_eq!(
                lookup_storage(kind, Width::W1, features),
                StorageSpec::scalar(kind.scalar()),
                "{} at {}",
                kind,
                features
            );
        }
    }
}

#[test_log::test]
fn no_features_means_fallback_arrays_everywhere() {
    let resolver = Resolver::new(FeatureSet::None);
    assert_eq!(
        resolver.storage(Float32, 8).unwrap(),
        StorageSpec::array(ScalarType::F32, 8)
    );
    assert_eq!(
        resolver.storage(Float32, 16).unwrap(),
        StorageSpec::array(ScalarType::F32, 16)
    );
    for (kind, width) in supported_pairs() {
        assert!(
            !resolver.storage(kind, width.lanes()).unwrap().is_register(),
            "{} x {} picked a register with no features",
            kind,
            width
        );
    }
}

#[test_log::test]
fn avx512_picks_512_bit_integer_registers() {
    let resolver = Resolver::new(FeatureSet::Avx512F);
    assert_eq!(
        resolver.storage(Int32, 16).unwrap(),
        StorageSpec::register(Register::M512i)
    );
    assert_eq!(
        resolver.half(Int32, 16).unwrap(),
        StorageSpec::register(Register::M256i)
    );
}

#[test_log::test]
fn registers_appear_only_from_their_tier_upwards() {
    let cases = [
        (Float32, Width::W4, FeatureSet::Sse, Register::M128),
        (Int32, Width::W4, FeatureSet::Sse, Register::M128i),
        (Float32, Width::W8, FeatureSet::Avx, Register::M256),
        (Int32, Width::W8, FeatureSet::Avx, Register::M256i),
        (Float64, Width::W4, FeatureSet::Avx, Register::M256d),
        (Int64, Width::W4, FeatureSet::Avx2, Register::M256i),
        (Float32, Width::W16, FeatureSet::Avx512F, Register::M512),
    ];
    for (kind, width, from, register) in cases {
        for features in FeatureSet::ALL {
            let spec = lookup_storage(kind, width, features);
            if features >= from {
                assert_eq!(spec, StorageSpec::register(register), "{} x {} at {}", kind, width, features);
            } else {
                assert_eq!(
                    spec,
                    StorageSpec::array(kind.scalar(), width.lanes()),
                    "{} x {} at {}",
                    kind,
                    width,
                    features
                );
            }
        }
    }
}

#[test_log::test]
fn masks_share_storage_with_their_float_kind() {
    for features in FeatureSet::ALL {
        for width in [Width::W1, Width::W4, Width::W8] {
            assert_eq!(
                lookup_storage(Bool32, width, features),
                lookup_storage(Float32, width, features)
            );
        }
        assert_eq!(
            lookup_storage(Bool64, Width::W4, features),
            lookup_storage(Float64, Width::W4, features)
        );
    }
}

#[test_log::test]
fn sixteen_wide_bool32_uses_a_mask_register_when_available() {
    assert_eq!(
        lookup_storage(Bool32, Width::W16, FeatureSet::Avx512F),
        StorageSpec::register(Register::Mask16)
    );
    assert_eq!(
        lookup_storage(Bool32, Width::W16, FeatureSet::Avx2),
        StorageSpec::array(ScalarType::F32, 16)
    );
}

#[test_log::test]
fn wide_64_bit_vectors_are_undefined() {
    let resolver = Resolver::new(FeatureSet::Avx512F);
    for kind in [Float64, Int64, Bool64] {
        for lanes in [8, 16] {
            assert_eq!(
                resolver.storage(kind, lanes),
                Err(ResolveError::UndefinedMapping {
                    resolution: Resolution::Storage,
                    kind,
                    lanes,
                })
            );
        }
    }
}

#[test_log::test]
fn unsupported_lane_counts_are_invalid_width() {
    let resolver = Resolver::active();
    for lanes in [0, 2, 3, 32] {
        let err = resolver.storage(Float32, lanes).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidWidth { .. }), "{}", err);
        assert_eq!(err.lanes(), lanes);
    }
}

// --- Cast partner ---

#[test_log::test]
fn cast_partner_is_the_storage_of_the_partner_kind() {
    for features in FeatureSet::ALL {
        let resolver = Resolver::new(features);
        assert_eq!(
            resolver.cast_partner(Float32, 8).unwrap(),
            resolver.storage(Int32, 8).unwrap()
        );
        assert_eq!(
            resolver.cast_partner(Int32, 16).unwrap(),
            resolver.storage(Float32, 16).unwrap()
        );
        assert_eq!(
            resolver.cast_partner(Bool32, 4).unwrap(),
            resolver.storage(Int32, 4).unwrap()
        );
        assert_eq!(
            resolver.cast_partner(Float64, 1).unwrap(),
            StorageSpec::scalar(ScalarType::I64)
        );
    }
}

#[test_log::test]
fn casting_back_recovers_the_original_layout() {
    for features in FeatureSet::ALL {
        for kind in ElementKind::ALL {
            for width in Width::ALL {
                if lookup_cast_partner(kind, width, features).is_defined()
                    && lookup_cast_partner(kind.partner(), width, features).is_defined()
                {
                    let original = lookup_storage(kind, width, features);
                    let back = lookup_cast_partner(kind.partner(), width, features);
                    assert_eq!(back.bits(), original.bits(), "{} x {} at {}", kind, width, features);
                    assert_eq!(back.class(), original.class());
                    assert_eq!(back, original);
                }
            }
        }
    }
}

#[test_log::test]
fn cast_partner_keeps_bit_width() {
    for features in FeatureSet::ALL {
        for &(kind, width) in crate::rules::CAST_SUPPORT {
            let own = lookup_storage(kind, width, features);
            let cast = lookup_cast_partner(kind, width, features);
            assert_eq!(own.bits(), cast.bits(), "{} x {} at {}", kind, width, features);
        }
    }
}

#[test_log::test]
fn unexercised_casts_are_undefined() {
    let resolver = Resolver::new(FeatureSet::Avx512F);
    for (kind, lanes) in [(Float64, 4), (Int64, 4), (Bool64, 1), (Bool32, 8), (Bool32, 1)] {
        assert_eq!(
            resolver.cast_partner(kind, lanes),
            Err(ResolveError::UndefinedMapping {
                resolution: Resolution::CastPartner,
                kind,
                lanes,
            })
        );
    }
}

// --- Half width ---

#[test_log::test]
fn half_of_scalar_is_invalid_width() {
    for kind in ElementKind::ALL {
        assert_eq!(
            resolve_half(kind, Width::W1, FeatureSet::Avx512F),
            Err(ResolveError::InvalidWidth {
                resolution: Resolution::HalfWidth,
                kind,
                lanes: 1,
            })
        );
    }
    assert!(matches!(
        Resolver::active().half(Float32, 1),
        Err(ResolveError::InvalidWidth { .. })
    ));
}

#[test_log::test]
fn half_is_one_register_tier_down() {
    assert_eq!(
        lookup_half(Float32, Width::W16, FeatureSet::Avx512F),
        StorageSpec::register(Register::M256)
    );
    assert_eq!(
        lookup_half(Float32, Width::W8, FeatureSet::Avx),
        StorageSpec::register(Register::M128)
    );
    assert_eq!(
        lookup_half(Int32, Width::W8, FeatureSet::Avx2),
        StorageSpec::register(Register::M128i)
    );
    // A 16-wide vector is an array below AVX-512, so its half is too.
    assert_eq!(
        lookup_half(Float32, Width::W16, FeatureSet::Avx2),
        StorageSpec::array(ScalarType::F32, 8)
    );
    // No 64-bit register exists for two 32-bit lanes.
    assert_eq!(
        lookup_half(Int32, Width::W4, FeatureSet::Avx512F),
        StorageSpec::array(ScalarType::I32, 2)
    );
}

#[test_log::test]
fn half_fallback_matches_narrower_storage_fallback() {
    for features in FeatureSet::ALL {
        for &(kind, width) in crate::rules::HALF_SUPPORT {
            let half = lookup_half(kind, width, features);
            let narrower = match width.half_lanes().and_then(Width::from_lanes) {
                Some(w) => lookup_storage(kind, w, features),
                None => continue,
            };
            if half.is_fallback() && narrower.is_fallback() {
                assert_eq!(half, narrower, "{} x {} at {}", kind, width, features);
            }
        }
    }
}

#[test_log::test]
fn half_carries_half_the_bits() {
    for features in FeatureSet::ALL {
        for &(kind, width) in crate::rules::HALF_SUPPORT {
            let full = lookup_storage(kind.paired_arithmetic(), width, features);
            let half = lookup_half(kind, width, features);
            assert_eq!(half.bits() * 2, full.bits(), "{} x {} at {}", kind, width, features);
        }
    }
}

#[test_log::test]
fn mask_halves_go_through_the_float_kind() {
    for features in FeatureSet::ALL {
        for width in [Width::W8, Width::W16] {
            assert_eq!(
                lookup_half(Bool32, width, features),
                lookup_half(Float32, width, features)
            );
        }
    }
    // Even where the full-width mask is a k register.
    assert_eq!(
        lookup_half(Bool32, Width::W16, FeatureSet::Avx512F),
        StorageSpec::register(Register::M256)
    );
}

#[test_log::test]
fn unlisted_halves_are_undefined() {
    let resolver = Resolver::new(FeatureSet::Avx512F);
    for (kind, lanes) in [(Float64, 4), (Int64, 4), (Bool64, 4), (Bool32, 4)] {
        assert_eq!(
            resolver.half(kind, lanes),
            Err(ResolveError::UndefinedMapping {
                resolution: Resolution::HalfWidth,
                kind,
                lanes,
            })
        );
    }
}

// --- Mask kind ---

#[test_log::test]
fn mask_kind_follows_lane_family() {
    assert_eq!(resolve_mask_kind(Float64), Bool64);
    assert_eq!(resolve_mask_kind(Int32), Bool32);
    for kind in ElementKind::ALL {
        let mask = resolve_mask_kind(kind);
        assert!(mask.is_mask());
        assert_eq!(mask.family(), kind.family());
        assert_eq!(resolve_mask_kind(mask), mask, "mask kinds are fixed points");
    }
}

#[test_log::test]
fn mask_kind_ignores_the_feature_tier() {
    for features in FeatureSet::ALL {
        let resolver = Resolver::new(features);
        for kind in ElementKind::ALL {
            assert_eq!(resolver.mask_kind(kind), resolve_mask_kind(kind));
        }
    }
}

// --- Const evaluation ---

const CONST_F32X8: StorageSpec = lookup_storage(Float32, Width::W8, FeatureSet::Avx);
const CONST_HALF: Result<StorageSpec, ResolveError> = resolve_half(Int32, Width::W1, FeatureSet::Sse);

#[test_log::test]
fn lookups_evaluate_in_const_context() {
    assert_eq!(CONST_F32X8, StorageSpec::register(Register::M256));
    assert!(CONST_HALF.is_err());
    assert_eq!(Resolver::default(), Resolver::active());
}
