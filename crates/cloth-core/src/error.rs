//! Error types for cloth construction and stepping.

use std::fmt;

/// Errors raised before a rebuild or a tick starts.
///
/// Degenerate geometry met during a tick (zero-length springs, coincident
/// particles) is never reported here; those cases are skipped in place.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// A configuration value is out of its valid range.
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    /// Timestep must be positive and finite.
    InvalidTimestep { dt: f32 },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl ClothError {
    pub(crate) fn config(field: &'static str, reason: &'static str) -> Self {
        ClothError::InvalidConfiguration { field, reason }
    }
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration: `{}` {}", field, reason)
            }
            ClothError::InvalidTimestep { dt } => {
                write!(f, "timestep must be positive and finite, got {}", dt)
            }
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

impl std::error::Error for ClothError {}
