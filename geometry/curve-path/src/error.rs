//! Error types for curve construction and sampling.

use thiserror::Error;

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur when building or sampling a curve.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Too few control points to define the curve.
    #[error("Curve needs at least {min} control points, got {actual}")]
    TooFewPoints {
        /// Minimum number of control points.
        min: usize,
        /// Number of control points provided.
        actual: usize,
    },

    /// Too few samples requested for a meaningful polyline.
    #[error("Sampling needs at least {min} points, got {actual}")]
    TooFewSamples {
        /// Minimum number of samples.
        min: usize,
        /// Number of samples requested.
        actual: usize,
    },

    /// A control point contains a non-finite coordinate.
    #[error("Control point {index} is not finite")]
    NonFinitePoint {
        /// Index of the offending control point.
        index: usize,
    },
}
