//! Error types for mesh generation.

use thiserror::Error;

/// Result type for mesh generation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while generating procedural meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A radius was zero, negative, or not finite.
    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),

    /// Too few sides for a closed cross-section.
    #[error("Cross-section needs at least {min} sides, got {actual}")]
    TooFewSides {
        /// Minimum number of sides.
        min: usize,
        /// Number of sides requested.
        actual: usize,
    },

    /// Too few rings to loft a surface.
    #[error("Loft needs at least {min} rings, got {actual}")]
    TooFewRings {
        /// Minimum number of rings.
        min: usize,
        /// Number of rings provided.
        actual: usize,
    },

    /// Rings in a loft have mismatched point counts.
    #[error("Ring {index} has {actual} points, expected {expected}")]
    RingArityMismatch {
        /// Index of the offending ring.
        index: usize,
        /// Points in the offending ring.
        actual: usize,
        /// Points in the first ring.
        expected: usize,
    },

    /// The axis between two points is too short to orient geometry on.
    #[error("Axis between endpoints is degenerate (length {length})")]
    DegenerateAxis {
        /// Measured axis length.
        length: f64,
    },

    /// A box extent was zero, negative, or not finite.
    #[error("Invalid extent: {0}")]
    InvalidExtent(f64),
}
