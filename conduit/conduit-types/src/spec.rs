//! Conduit connection specifications.

use nalgebra::Point3;

use crate::color::Color;
use crate::error::{ConduitError, ConduitResult};
use crate::resolve::Endpoint;

/// Which shape algorithm connects the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PathStrategy {
    /// A rigid straight pipe.
    #[default]
    Straight,
    /// A flexible S-curved hose swept along an interpolating spline.
    Spline,
    /// A rectangular-to-circular duct with a right-angle bend.
    Transition,
}

/// Cosmetic flow direction of the inner core highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FlowDirection {
    /// Start to end.
    #[default]
    Forward,
    /// End to start.
    Reverse,
}

/// Parameters of the transition-duct strategy.
///
/// The duct runs rectangular from the start to the corner, morphs to
/// circular through a quarter-circle elbow inscribed at the corner, and runs
/// circular from there to the end.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionParams {
    /// Width of the rectangular cross-section.
    pub rect_width: f64,
    /// Height of the rectangular cross-section.
    pub rect_height: f64,
    /// World point where the path turns 90 degrees.
    pub corner: Point3<f64>,
    /// Radius of the elbow arc.
    pub bend_radius: f64,
    /// Number of morph segments along the elbow.
    pub elbow_segments: usize,
    /// Supports taller than this get a post down to a floor pad.
    pub support_clearance: f64,
}

impl TransitionParams {
    /// Create parameters with the default elbow resolution and clearance.
    #[must_use]
    pub fn new(rect_width: f64, rect_height: f64, corner: Point3<f64>, bend_radius: f64) -> Self {
        Self {
            rect_width,
            rect_height,
            corner,
            bend_radius,
            elbow_segments: 12,
            support_clearance: 1.5,
        }
    }

    /// Set the number of elbow morph segments (builder pattern).
    #[must_use]
    pub fn with_elbow_segments(mut self, elbow_segments: usize) -> Self {
        self.elbow_segments = elbow_segments;
        self
    }

    /// Set the ground-clearance threshold for support posts (builder
    /// pattern).
    #[must_use]
    pub fn with_support_clearance(mut self, support_clearance: f64) -> Self {
        self.support_clearance = support_clearance;
        self
    }
}

/// Immutable description of one requested connection.
///
/// Built through [`ConduitSpec::builder`], which validates radius and
/// strategy parameters up front. Endpoint resolution and degeneracy are
/// build-time concerns of the conduit builder, not of the spec.
///
/// # Example
///
/// ```
/// use conduit_types::{Color, ConduitSpec, FlowDirection, PathStrategy};
/// use nalgebra::Point3;
///
/// let spec = ConduitSpec::builder("slurry_feed")
///     .start_port("pump_a", "outlet")
///     .end_port("tank_b", "inlet")
///     .radius(0.15)
///     .color(Color::STEEL)
///     .path_strategy(PathStrategy::Spline)
///     .show_flow(true)
///     .flow_direction(FlowDirection::Forward)
///     .build()
///     .unwrap();
///
/// assert!(spec.show_flow());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConduitSpec {
    id: String,
    start: Endpoint,
    end: Endpoint,
    radius: f64,
    color: Color,
    path_strategy: PathStrategy,
    show_flow: bool,
    flow_direction: FlowDirection,
    transition: Option<TransitionParams>,
}

impl ConduitSpec {
    /// Start building a spec with the given id.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> ConduitSpecBuilder {
        ConduitSpecBuilder {
            id: id.into(),
            start: None,
            end: None,
            radius: 0.2,
            color: Color::STEEL,
            path_strategy: PathStrategy::default(),
            show_flow: false,
            flow_direction: FlowDirection::default(),
            transition: None,
        }
    }

    /// Connection id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start endpoint.
    #[must_use]
    pub const fn start(&self) -> &Endpoint {
        &self.start
    }

    /// End endpoint.
    #[must_use]
    pub const fn end(&self) -> &Endpoint {
        &self.end
    }

    /// Outer radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Render color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Selected shape strategy.
    #[must_use]
    pub const fn path_strategy(&self) -> PathStrategy {
        self.path_strategy
    }

    /// Whether the cosmetic flow core is requested.
    #[must_use]
    pub const fn show_flow(&self) -> bool {
        self.show_flow
    }

    /// Cosmetic flow direction.
    #[must_use]
    pub const fn flow_direction(&self) -> FlowDirection {
        self.flow_direction
    }

    /// Transition parameters, present when the strategy is
    /// [`PathStrategy::Transition`].
    #[must_use]
    pub const fn transition(&self) -> Option<&TransitionParams> {
        self.transition.as_ref()
    }
}

/// Builder for [`ConduitSpec`].
#[derive(Debug, Clone)]
pub struct ConduitSpecBuilder {
    id: String,
    start: Option<Endpoint>,
    end: Option<Endpoint>,
    radius: f64,
    color: Color,
    path_strategy: PathStrategy,
    show_flow: bool,
    flow_direction: FlowDirection,
    transition: Option<TransitionParams>,
}

impl ConduitSpecBuilder {
    /// Start at an explicit world point.
    #[must_use]
    pub fn start_point(mut self, point: Point3<f64>) -> Self {
        self.start = Some(Endpoint::Point(point));
        self
    }

    /// Start at a named equipment port.
    #[must_use]
    pub fn start_port(mut self, equipment: impl Into<String>, port: impl Into<String>) -> Self {
        self.start = Some(Endpoint::port(equipment, port));
        self
    }

    /// End at an explicit world point.
    #[must_use]
    pub fn end_point(mut self, point: Point3<f64>) -> Self {
        self.end = Some(Endpoint::Point(point));
        self
    }

    /// End at a named equipment port.
    #[must_use]
    pub fn end_port(mut self, equipment: impl Into<String>, port: impl Into<String>) -> Self {
        self.end = Some(Endpoint::port(equipment, port));
        self
    }

    /// Outer radius (> 0).
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Render color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Shape strategy.
    #[must_use]
    pub fn path_strategy(mut self, path_strategy: PathStrategy) -> Self {
        self.path_strategy = path_strategy;
        self
    }

    /// Request the cosmetic flow core.
    #[must_use]
    pub fn show_flow(mut self, show_flow: bool) -> Self {
        self.show_flow = show_flow;
        self
    }

    /// Cosmetic flow direction.
    #[must_use]
    pub fn flow_direction(mut self, flow_direction: FlowDirection) -> Self {
        self.flow_direction = flow_direction;
        self
    }

    /// Parameters for the transition strategy.
    #[must_use]
    pub fn transition(mut self, transition: TransitionParams) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Validate and build the spec.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is missing, the radius is not a
    /// finite positive number, or the transition strategy was selected with
    /// missing or invalid parameters.
    pub fn build(self) -> ConduitResult<ConduitSpec> {
        let start = self.start.ok_or(ConduitError::MissingEndpoint { which: "start" })?;
        let end = self.end.ok_or(ConduitError::MissingEndpoint { which: "end" })?;
        if self.radius <= 0.0 || !self.radius.is_finite() {
            return Err(ConduitError::InvalidRadius(self.radius));
        }
        if self.path_strategy == PathStrategy::Transition {
            let params = self
                .transition
                .as_ref()
                .ok_or(ConduitError::MissingTransitionParams)?;
            for dim in [params.rect_width, params.rect_height, params.bend_radius] {
                if dim <= 0.0 || !dim.is_finite() {
                    return Err(ConduitError::InvalidDimension(dim));
                }
            }
        }

        Ok(ConduitSpec {
            id: self.id,
            start,
            end,
            radius: self.radius,
            color: self.color,
            path_strategy: self.path_strategy,
            show_flow: self.show_flow,
            flow_direction: self.flow_direction,
            transition: self.transition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let spec = ConduitSpec::builder("c")
            .start_point(Point3::origin())
            .end_point(Point3::new(1.0, 0.0, 0.0))
            .build()
            .unwrap();

        assert_eq!(spec.path_strategy(), PathStrategy::Straight);
        assert_eq!(spec.flow_direction(), FlowDirection::Forward);
        assert!(!spec.show_flow());
        assert_eq!(spec.color(), Color::STEEL);
        assert!((spec.radius() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_missing_endpoints_rejected() {
        let result = ConduitSpec::builder("c").end_point(Point3::origin()).build();
        assert!(matches!(
            result,
            Err(ConduitError::MissingEndpoint { which: "start" })
        ));

        let result = ConduitSpec::builder("c").start_point(Point3::origin()).build();
        assert!(matches!(
            result,
            Err(ConduitError::MissingEndpoint { which: "end" })
        ));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ConduitSpec::builder("c")
                .start_point(Point3::origin())
                .end_point(Point3::new(1.0, 0.0, 0.0))
                .radius(radius)
                .build();
            assert!(matches!(result, Err(ConduitError::InvalidRadius(_))));
        }
    }

    #[test]
    fn test_transition_requires_params() {
        let result = ConduitSpec::builder("duct")
            .start_point(Point3::new(0.0, 15.0, 0.0))
            .end_point(Point3::new(10.0, 2.0, 0.0))
            .path_strategy(PathStrategy::Transition)
            .build();
        assert!(matches!(result, Err(ConduitError::MissingTransitionParams)));
    }

    #[test]
    fn test_transition_validates_dimensions() {
        let result = ConduitSpec::builder("duct")
            .start_point(Point3::new(0.0, 15.0, 0.0))
            .end_point(Point3::new(10.0, 2.0, 0.0))
            .path_strategy(PathStrategy::Transition)
            .transition(TransitionParams::new(
                3.6,
                -2.4,
                Point3::new(0.0, 2.0, 0.0),
                2.0,
            ))
            .build();
        assert!(matches!(result, Err(ConduitError::InvalidDimension(_))));
    }

    #[test]
    fn test_transition_params_builders() {
        let params = TransitionParams::new(3.6, 2.4, Point3::origin(), 2.0)
            .with_elbow_segments(8)
            .with_support_clearance(2.0);
        assert_eq!(params.elbow_segments, 8);
        assert!((params.support_clearance - 2.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_spec_serde_round_trip() {
        let spec = ConduitSpec::builder("duct")
            .start_port("filter", "outlet")
            .end_point(Point3::new(10.0, 2.0, 8.0))
            .radius(1.3)
            .color(Color::DUCT)
            .path_strategy(PathStrategy::Transition)
            .show_flow(true)
            .flow_direction(FlowDirection::Reverse)
            .transition(TransitionParams::new(
                3.6,
                2.4,
                Point3::new(0.0, 2.0, 0.0),
                2.0,
            ))
            .build()
            .unwrap();

        let json = serde_json::to_string(&spec).unwrap();
        let back: ConduitSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
