//! The flexible spline-hose strategy.
//!
//! Reproduces how a real slurry hose hangs between a manifold stub and a
//! cyclone inlet: it leaves the start radially, bulges outward, tapers back
//! in toward the end, settles with a small overshoot, and sags a little
//! under its own weight in the middle span.

use conduit_types::{
    Color, ConduitGeometry, ConduitResult, ConduitSegment, ConduitSpec, FlowDirection,
    SegmentRole, SegmentShape,
};
use curve_path::{CatmullRom3, SampledPath};
use mesh_kit::{orient_y_to, tube};
use nalgebra::{Point3, Vector3};

/// Centerline samples along the hose.
const SAMPLES: usize = 64;
/// Radial sides of the outer wall.
const OUTER_SIDES: usize = 16;
/// Radial sides of the inner wall.
const INNER_SIDES: usize = 12;
/// Inner wall radius as a fraction of the outer radius.
const INNER_RADIUS_RATIO: f64 = 5.0 / 6.0;
/// Radial step out of the start port before the bulge.
const START_RADIAL_STEP: f64 = 0.3;
/// Initial vertical dip leaving the start.
const START_DIP: f64 = 0.1;
/// Maximum outward bulge as a fraction of the planar span.
const MAX_OUTWARD_RATIO: f64 = 0.4;
/// Radial and vertical settling overshoot short of the end.
const SETTLE_RADIAL: f64 = 0.1;
/// Vertical settling overshoot short of the end.
const SETTLE_LIFT: f64 = 0.15;
/// Gravity sag amplitude in the middle span.
const SAG_AMPLITUDE: f64 = 0.02;
/// Sag affects curve parameters strictly inside this range.
const SAG_RANGE: (f64, f64) = (0.3, 0.7);

/// Build a flexible S-curved hose between two resolved world points.
pub(crate) fn build(
    spec: &ConduitSpec,
    start: Point3<f64>,
    end: Point3<f64>,
) -> ConduitResult<ConduitGeometry> {
    let mut points = centerline(start, end)?;
    apply_sag(&mut points, SAG_AMPLITUDE);
    let path = SampledPath::new(points)?;

    let chord = orient_y_to(end - start);
    let mid = path.point_at_length(path.length() / 2.0);
    let radius = spec.radius();

    let mut segments = Vec::new();
    segments.push(ConduitSegment::new(
        SegmentShape::Tube {
            radius,
            length: path.length(),
        },
        SegmentRole::Body,
        mid,
        chord,
        spec.color(),
        tube(path.points(), radius, OUTER_SIDES, false)?,
    ));
    segments.push(ConduitSegment::new(
        SegmentShape::Tube {
            radius: radius * INNER_RADIUS_RATIO,
            length: path.length(),
        },
        SegmentRole::InnerWall,
        mid,
        chord,
        Color::from_hex(0x0000_0000),
        tube(path.points(), radius * INNER_RADIUS_RATIO, INNER_SIDES, false)?,
    ));

    if spec.show_flow() {
        let color = match spec.flow_direction() {
            FlowDirection::Forward => Color::FLOW_FORWARD,
            FlowDirection::Reverse => Color::FLOW_REVERSE,
        };
        segments.push(ConduitSegment::new(
            SegmentShape::Tube {
                radius: radius * 0.4,
                length: path.length(),
            },
            SegmentRole::FlowCore,
            mid,
            chord,
            color,
            tube(path.points(), radius * 0.4, INNER_SIDES, false)?,
        ));
    }

    let length = path.length();
    Ok(ConduitGeometry::new(spec.id(), segments, length))
}

/// The hose centerline: an interpolating spline through seven control
/// points, sampled at fixed resolution.
///
/// The five intermediate points shape the characteristic outward bulge and
/// inward taper. Radial directions come from the endpoint's angular position
/// about the shared vertical axis.
pub(crate) fn centerline(
    start: Point3<f64>,
    end: Point3<f64>,
) -> ConduitResult<Vec<Point3<f64>>> {
    let drop = end.y - start.y;
    let travel = Vector3::new(end.x - start.x, 0.0, end.z - start.z);
    let planar = travel.norm();

    let angle = start.z.atan2(start.x);
    let radial = Vector3::new(angle.cos(), 0.0, angle.sin());
    let max_outward = planar * MAX_OUTWARD_RATIO;

    // Leave the start radially, dipping slightly.
    let p1 = start + radial * START_RADIAL_STEP + Vector3::new(0.0, -START_DIP, 0.0);
    // Maximum outward reach, 20% of the way down.
    let p2 = start + radial * max_outward + Vector3::new(0.0, drop * 0.2, 0.0);
    // Turn inward: 40% of the travel, still radially offset, halfway down.
    let p3 = start + travel * 0.4 + radial * (max_outward * 0.5) + Vector3::new(0.0, drop * 0.5, 0.0);
    // Second bend: 70% of the travel, 80% down.
    let p4 = start + travel * 0.7 + Vector3::new(0.0, drop * 0.8, 0.0);
    // Settle just short of the end with a small radial and vertical
    // overshoot.
    let p5 = end + radial * SETTLE_RADIAL + Vector3::new(0.0, SETTLE_LIFT, 0.0);

    let curve = CatmullRom3::new(vec![start, p1, p2, p3, p4, p5, end])?;
    Ok(curve.sample(SAMPLES)?)
}

/// Subtract the gravity sag from the middle span of a sampled centerline.
///
/// Samples whose curve parameter falls strictly inside [`SAG_RANGE`] drop by
/// `amplitude · sin((t − 0.3)·π / 0.4)`; the endpoints never move.
pub(crate) fn apply_sag(points: &mut [Point3<f64>], amplitude: f64) {
    let n = points.len();
    if n < 2 {
        return;
    }
    for (i, p) in points.iter_mut().enumerate() {
        let t = i as f64 / (n - 1) as f64;
        if t > SAG_RANGE.0 && t < SAG_RANGE.1 {
            p.y -= amplitude * ((t - SAG_RANGE.0) * std::f64::consts::PI / 0.4).sin();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use conduit_types::PathStrategy;

    fn hose_spec() -> ConduitSpec {
        ConduitSpec::builder("hose")
            .start_point(Point3::new(2.0, 5.0, 0.0))
            .end_point(Point3::new(1.2, 1.0, 0.0))
            .radius(0.09)
            .path_strategy(PathStrategy::Spline)
            .build()
            .unwrap()
    }

    #[test]
    fn test_centerline_touches_both_endpoints() {
        let start = Point3::new(2.0, 5.0, 0.0);
        let end = Point3::new(1.2, 1.0, 0.0);
        let points = centerline(start, end).unwrap();

        assert_eq!(points.len(), SAMPLES);
        assert!((points[0] - start).norm() < 1e-3);
        assert!((points[SAMPLES - 1] - end).norm() < 1e-3);
    }

    #[test]
    fn test_endpoints_survive_sag() {
        let start = Point3::new(2.0, 5.0, 0.0);
        let end = Point3::new(1.2, 1.0, 0.0);
        let mut points = centerline(start, end).unwrap();
        apply_sag(&mut points, SAG_AMPLITUDE);

        assert!((points[0] - start).norm() < 1e-3);
        assert!((points[SAMPLES - 1] - end).norm() < 1e-3);
    }

    #[test]
    fn test_sag_midspan_only() {
        // A straight horizontal reference line makes the sag directly
        // readable.
        let mut points: Vec<Point3<f64>> = (0..65)
            .map(|i| Point3::new(f64::from(i), 10.0, 0.0))
            .collect();
        apply_sag(&mut points, 0.02);

        // t = 0.5 lands on index 32: full amplitude.
        assert_relative_eq!(points[32].y, 10.0 - 0.02, epsilon = 1e-12);
        // Outside (0.3, 0.7) nothing moves.
        assert_relative_eq!(points[0].y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(points[19].y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(points[45].y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(points[64].y, 10.0, epsilon = 1e-12);
        // Inside, the drop follows the half-sine: symmetric about the middle.
        assert_relative_eq!(points[26].y, points[38].y, epsilon = 1e-9);
    }

    #[test]
    fn test_single_outward_bulge() {
        // Radial distance from the vertical axis must rise to one maximum
        // and fall back: a single S, no oscillation.
        let points = centerline(Point3::new(2.0, 5.0, 0.0), Point3::new(1.2, 1.0, 0.0)).unwrap();
        let rho: Vec<f64> = points
            .iter()
            .map(|p| (p.x * p.x + p.z * p.z).sqrt())
            .collect();

        let peak = rho
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();

        const WIGGLE: f64 = 1e-3;
        for pair in rho[..=peak].windows(2) {
            assert!(pair[1] >= pair[0] - WIGGLE, "oscillation before the bulge");
        }
        for pair in rho[peak..].windows(2) {
            assert!(pair[1] <= pair[0] + WIGGLE, "oscillation after the bulge");
        }
    }

    #[test]
    fn test_double_wall_segments() {
        let spec = hose_spec();
        let geometry = build(&spec, Point3::new(2.0, 5.0, 0.0), Point3::new(1.2, 1.0, 0.0)).unwrap();

        let body: Vec<_> = geometry.segments_with_role(SegmentRole::Body).collect();
        let inner: Vec<_> = geometry.segments_with_role(SegmentRole::InnerWall).collect();
        assert_eq!(body.len(), 1);
        assert_eq!(inner.len(), 1);

        let outer_radius = match *body[0].shape() {
            SegmentShape::Tube { radius, .. } => radius,
            ref other => panic!("unexpected shape {other:?}"),
        };
        let inner_radius = match *inner[0].shape() {
            SegmentShape::Tube { radius, .. } => radius,
            ref other => panic!("unexpected shape {other:?}"),
        };
        assert!(inner_radius < outer_radius);
        assert_relative_eq!(inner_radius, 0.09 * INNER_RADIUS_RATIO, epsilon = 1e-12);
    }

    #[test]
    fn test_path_longer_than_chord() {
        let start = Point3::new(2.0, 5.0, 0.0);
        let end = Point3::new(1.2, 1.0, 0.0);
        let geometry = build(&hose_spec(), start, end).unwrap();
        assert!(geometry.path_length() > (end - start).norm());
    }

    #[test]
    fn test_vertical_drop_still_builds() {
        // Zero planar span: no bulge, but a valid hose.
        let start = Point3::new(0.0, 5.0, 0.0);
        let end = Point3::new(0.0, 1.0, 0.0);
        let spec = ConduitSpec::builder("drop")
            .start_point(start)
            .end_point(end)
            .radius(0.05)
            .path_strategy(PathStrategy::Spline)
            .build()
            .unwrap();

        let geometry = build(&spec, start, end).unwrap();
        assert!(geometry.path_length() >= 4.0);
        for segment in geometry.segments() {
            for v in &segment.mesh().vertices {
                assert!(v.position.x.is_finite());
            }
        }
    }
}
