// src/width.rs

//! Supported vector lane counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of lanes in a vector. `W1` is the scalar case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
#[repr(u8)]
pub enum Width {
    W1 = 1,
    W4 = 4,
    W8 = 8,
    W16 = 16,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::W1, Width::W4, Width::W8, Width::W16];

    /// Maps a raw lane count onto the supported set.
    pub const fn from_lanes(lanes: usize) -> Option<Width> {
        match lanes {
            1 => Some(Width::W1),
            4 => Some(Width::W4),
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            _ => None,
        }
    }

    #[inline]
    pub const fn lanes(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is(self, other: Width) -> bool {
        self as u8 == other as u8
    }

    /// Lane count of one half of a vector at this width.
    ///
    /// `None` for `W1`, which cannot be split. The result may fall outside
    /// the supported widths (`W4` halves into 2 lanes).
    pub const fn half_lanes(self) -> Option<usize> {
        match self {
            Width::W1 => None,
            other => Some(other.lanes() / 2),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lanes())
    }
}

impl From<Width> for usize {
    fn from(width: Width) -> usize {
        width.lanes()
    }
}

impl TryFrom<usize> for Width {
    type Error = anyhow::Error;

    fn try_from(lanes: usize) -> Result<Self, Self::Error> {
        Width::from_lanes(lanes).ok_or_else(|| {
            anyhow::anyhow!("unsupported vector width {} (expected 1, 4, 8 or 16)", lanes)
        })
    }
}
