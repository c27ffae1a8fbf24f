//! Error types for storage resolution.

use crate::kind::ElementKind;

/// Which resolution was being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Storage,
    CastPartner,
    HalfWidth,
}

/// Error returned when a (kind, width) pair cannot be resolved.
///
/// Both variants describe gaps in the support matrix, not transient
/// failures. Retrying with the same arguments always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The pair is valid in shape but no table defines a representation for it.
    UndefinedMapping {
        resolution: Resolution,
        kind: ElementKind,
        lanes: usize,
    },
    /// The lane count is outside 1/4/8/16, or a half was requested of width 1.
    InvalidWidth {
        resolution: Resolution,
        kind: ElementKind,
        lanes: usize,
    },
}

impl Resolution {
    pub const fn name(self) -> &'static str {
        match self {
            Resolution::Storage => "storage",
            Resolution::CastPartner => "cast partner",
            Resolution::HalfWidth => "half-width storage",
        }
    }
}

impl ResolveError {
    pub const fn kind(&self) -> ElementKind {
        match *self {
            ResolveError::UndefinedMapping { kind, .. } | ResolveError::InvalidWidth { kind, .. } => {
                kind
            }
        }
    }

    pub const fn lanes(&self) -> usize {
        match *self {
            ResolveError::UndefinedMapping { lanes, .. }
            | ResolveError::InvalidWidth { lanes, .. } => lanes,
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ResolveError::UndefinedMapping {
                resolution,
                kind,
                lanes,
            } => write!(
                f,
                "no {} defined for {} x {} (unsupported combination)",
                resolution.name(),
                kind,
                lanes
            ),
            ResolveError::InvalidWidth {
                resolution: Resolution::HalfWidth,
                kind,
                lanes: 1,
            } => write!(f, "{} x 1 is scalar and has no half width", kind),
            ResolveError::InvalidWidth {
                resolution,
                kind,
                lanes,
            } => write!(
                f,
                "invalid width {} for {} {} (expected 1, 4, 8 or 16)",
                lanes,
                kind,
                resolution.name()
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn messages_name_the_offending_pair() {
        let err = ResolveError::UndefinedMapping {
            resolution: Resolution::CastPartner,
            kind: ElementKind::Int64,
            lanes: 8,
        };
        assert_eq!(err.to_string(), "no cast partner defined for int64 x 8 (unsupported combination)");

        let err = ResolveError::InvalidWidth {
            resolution: Resolution::HalfWidth,
            kind: ElementKind::Float32,
            lanes: 1,
        };
        assert_eq!(err.to_string(), "float32 x 1 is scalar and has no half width");

        let err = ResolveError::InvalidWidth {
            resolution: Resolution::Storage,
            kind: ElementKind::Bool32,
            lanes: 3,
        };
        assert_eq!(err.to_string(), "invalid width 3 for bool32 storage (expected 1, 4, 8 or 16)");
        assert_eq!(err.kind(), ElementKind::Bool32);
        assert_eq!(err.lanes(), 3);
    }
}
