//! Error types for conduit specification and construction.

use thiserror::Error;

/// Result type for conduit operations.
pub type ConduitResult<T> = Result<T, ConduitError>;

/// Errors that can occur while specifying or building a conduit.
///
/// None of these may escalate past the conduit boundary: builders turn
/// unresolvable endpoints into logged skips, and callers treat the rest as
/// local failures of one connection, never of the scene.
#[derive(Debug, Error)]
pub enum ConduitError {
    /// The spec radius is zero, negative, or not finite.
    #[error("Invalid conduit radius: {0}")]
    InvalidRadius(f64),

    /// A required endpoint was not provided to the spec builder.
    #[error("Conduit spec is missing its {which} endpoint")]
    MissingEndpoint {
        /// Which endpoint: `"start"` or `"end"`.
        which: &'static str,
    },

    /// A cross-section dimension is zero, negative, or not finite.
    #[error("Invalid cross-section dimension: {0}")]
    InvalidDimension(f64),

    /// The transition strategy was selected without its parameters.
    #[error("Transition strategy requires transition parameters")]
    MissingTransitionParams,

    /// The two legs of a transition duct are not perpendicular.
    #[error("Duct legs meet at {angle_deg:.1} degrees, expected 90")]
    NotPerpendicular {
        /// Measured angle between the legs, in degrees.
        angle_deg: f64,
    },

    /// The bend radius does not fit between the corner and an endpoint.
    #[error("Bend radius {bend_radius} exceeds available leg length {available}")]
    BendTooTight {
        /// Requested bend radius.
        bend_radius: f64,
        /// Shortest leg length it must fit into.
        available: f64,
    },

    /// Mesh generation failed.
    #[error("Mesh generation error: {0}")]
    Mesh(#[from] mesh_kit::MeshError),

    /// Curve construction failed.
    #[error("Curve error: {0}")]
    Curve(#[from] curve_path::CurveError),
}
