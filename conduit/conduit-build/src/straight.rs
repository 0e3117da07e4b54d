//! The straight pipe strategy.

use conduit_types::{
    ConduitGeometry, ConduitResult, ConduitSegment, ConduitSpec, FlowDirection, SegmentRole,
    SegmentShape,
};
use mesh_kit::{cylinder_between, disc, orient_y_to};
use nalgebra::Point3;

/// Radial sides of the pipe body.
const BODY_SIDES: usize = 24;
/// Flange outer radius as a multiple of the pipe radius.
const FLANGE_RADIUS_RATIO: f64 = 1.6;
/// Flange thickness.
const FLANGE_THICKNESS: f64 = 0.08;
/// Flow core radius as a fraction of the pipe radius.
const FLOW_CORE_RATIO: f64 = 0.55;

/// Build a rigid straight pipe between two resolved world points.
///
/// One cylinder oriented by the minimal rotation from the canonical +Y axis
/// onto the run direction, centered on the midpoint, plus a flange at each
/// end. With `show_flow`, a thin inner core cylinder is colored by the flow
/// direction; it changes nothing but the rendering.
pub(crate) fn build(
    spec: &ConduitSpec,
    start: Point3<f64>,
    end: Point3<f64>,
) -> ConduitResult<ConduitGeometry> {
    let axis = end - start;
    let length = axis.norm();
    let direction = axis / length;
    let orientation = orient_y_to(direction);
    let midpoint = start + axis / 2.0;
    let radius = spec.radius();

    let mut segments = Vec::new();

    segments.push(ConduitSegment::new(
        SegmentShape::Cylinder { radius, length },
        SegmentRole::Body,
        midpoint,
        orientation,
        spec.color(),
        cylinder_between(start, end, radius, BODY_SIDES)?,
    ));

    if spec.show_flow() {
        let color = match spec.flow_direction() {
            FlowDirection::Forward => conduit_types::Color::FLOW_FORWARD,
            FlowDirection::Reverse => conduit_types::Color::FLOW_REVERSE,
        };
        segments.push(ConduitSegment::new(
            SegmentShape::Cylinder {
                radius: radius * FLOW_CORE_RATIO,
                length,
            },
            SegmentRole::FlowCore,
            midpoint,
            orientation,
            color,
            cylinder_between(start, end, radius * FLOW_CORE_RATIO, BODY_SIDES)?,
        ));
    }

    for endpoint in [start, end] {
        segments.push(ConduitSegment::new(
            SegmentShape::Cylinder {
                radius: radius * FLANGE_RADIUS_RATIO,
                length: FLANGE_THICKNESS,
            },
            SegmentRole::Flange,
            endpoint,
            orientation,
            conduit_types::Color::FLANGE,
            disc(
                endpoint,
                direction,
                radius * FLANGE_RADIUS_RATIO,
                FLANGE_THICKNESS,
                BODY_SIDES,
            )?,
        ));
    }

    Ok(ConduitGeometry::new(spec.id(), segments, length))
}
