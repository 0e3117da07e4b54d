//! The transition-duct strategy: rectangular to circular through a
//! right-angle bend.
//!
//! The duct runs rectangular from the start to the bend entry, morphs to
//! circular across a quarter-circle elbow inscribed at the corner, and runs
//! circular to the end. The elbow geometry is closed-form: entry at
//! `corner − dir_in·R`, exit at `corner + dir_out·R`, so both tangencies are
//! exact by construction instead of depending on the order of position
//! patches.

use conduit_types::{
    Color, ConduitError, ConduitGeometry, ConduitResult, ConduitSegment, ConduitSpec,
    SegmentRole, SegmentShape, TransitionParams,
};
use mesh_kit::{
    box_panel, circle_section, cylinder_between, disc, lerp_section, orient_y_to, rect_section,
    ring_loft, torus_ring,
};
use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector2, Vector3};

/// Points around every duct cross-section. Divisible by four so the section
/// extents hit the axes exactly.
const SECTION_ARITY: usize = 32;
/// Perpendicularity tolerance on the dot product of the two legs.
const PERP_TOLERANCE: f64 = 1e-6;
/// Square cross-section of the longitudinal corner ribs.
const RIB_SIZE: f64 = 0.06;
/// Rim added around the rectangular open-end flange.
const RECT_FLANGE_LIP: f64 = 0.2;
/// Rim added around the circular terminal flange.
const ROUND_FLANGE_LIP: f64 = 0.1;
/// Thickness of both flanges.
const FLANGE_THICKNESS: f64 = 0.08;
/// Station spacing for support brackets along the straight runs.
const SUPPORT_SPACING: f64 = 2.5;
/// Spacing of reinforcement rings along the circular run.
const RING_SPACING: f64 = 2.0;
/// Bracket extents (x, y, z), world axis aligned.
const BRACKET_EXTENTS: [f64; 3] = [0.8, 0.15, 0.4];
/// Support post radius.
const POST_RADIUS: f64 = 0.08;
/// Floor pad radius and thickness.
const PAD_RADIUS: f64 = 0.2;
const PAD_THICKNESS: f64 = 0.1;

/// Build a transition duct between two resolved world points.
pub(crate) fn build(
    spec: &ConduitSpec,
    start: Point3<f64>,
    end: Point3<f64>,
) -> ConduitResult<ConduitGeometry> {
    let params = spec
        .transition()
        .ok_or(ConduitError::MissingTransitionParams)?;
    let corner = params.corner;
    let bend_radius = params.bend_radius;

    let leg_in = corner - start;
    let leg_out = end - corner;
    let (len_in, len_out) = (leg_in.norm(), leg_out.norm());
    if bend_radius >= len_in || bend_radius >= len_out || len_in <= 0.0 || len_out <= 0.0 {
        return Err(ConduitError::BendTooTight {
            bend_radius,
            available: len_in.min(len_out),
        });
    }
    let dir_in = leg_in / len_in;
    let dir_out = leg_out / len_out;

    let dot = dir_in.dot(&dir_out);
    if dot.abs() > PERP_TOLERANCE {
        return Err(ConduitError::NotPerpendicular {
            angle_deg: dot.clamp(-1.0, 1.0).acos().to_degrees(),
        });
    }

    // Height axis of every cross-section: the bend plane normal. The width
    // axis follows the local tangent so rect sections stay upright through
    // the elbow.
    let plane_normal = dir_in.cross(&dir_out).normalize();
    let entry = corner - dir_in * bend_radius;
    let exit = corner + dir_out * bend_radius;

    let mut segments = Vec::new();
    rect_run(&mut segments, spec, params, start, entry, dir_in, plane_normal)?;
    elbow(&mut segments, spec, params, corner, dir_in, dir_out, plane_normal)?;
    round_run(&mut segments, spec, exit, end, dir_out)?;
    supports(&mut segments, params, start, entry, params.rect_height / 2.0)?;
    supports(&mut segments, params, exit, end, spec.radius())?;

    let path_length = (len_in - bend_radius)
        + std::f64::consts::FRAC_PI_2 * bend_radius
        + (len_out - bend_radius);
    Ok(ConduitGeometry::new(spec.id(), segments, path_length))
}

/// Orientation whose local x/y/z axes map onto `(width, tangent, height)`.
fn section_orientation(
    tangent: Vector3<f64>,
    plane_normal: Vector3<f64>,
) -> UnitQuaternion<f64> {
    let width_axis = tangent.cross(&plane_normal);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(
        Matrix3::from_columns(&[width_axis, tangent, plane_normal]),
    ))
}

/// Place a 2-D section ring at `center` with the given axes.
fn place_section(
    section: &[Vector2<f64>],
    center: Point3<f64>,
    width_axis: Vector3<f64>,
    height_axis: Vector3<f64>,
) -> Vec<Point3<f64>> {
    section
        .iter()
        .map(|p| center + width_axis * p.x + height_axis * p.y)
        .collect()
}

/// The straight rectangular run: body, longitudinal corner ribs, open-end
/// flange.
fn rect_run(
    segments: &mut Vec<ConduitSegment>,
    spec: &ConduitSpec,
    params: &TransitionParams,
    start: Point3<f64>,
    entry: Point3<f64>,
    dir_in: Vector3<f64>,
    plane_normal: Vector3<f64>,
) -> ConduitResult<()> {
    let (w, h) = (params.rect_width, params.rect_height);
    let length = (entry - start).norm();
    let center = start + (entry - start) / 2.0;
    let orientation = section_orientation(dir_in, plane_normal);
    let width_axis = dir_in.cross(&plane_normal);

    segments.push(ConduitSegment::new(
        SegmentShape::Panel {
            extents: [w, length, h],
        },
        SegmentRole::Body,
        center,
        orientation,
        spec.color(),
        box_panel(center, orientation, Vector3::new(w, length, h))?,
    ));

    // Angle-steel stiffeners along the four corners.
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            let offset = width_axis * (sx * (w + RIB_SIZE) / 2.0)
                + plane_normal * (sy * (h + RIB_SIZE) / 2.0);
            segments.push(ConduitSegment::new(
                SegmentShape::Panel {
                    extents: [RIB_SIZE, length, RIB_SIZE],
                },
                SegmentRole::Rib,
                center + offset,
                orientation,
                Color::SEAM,
                box_panel(center + offset, orientation, Vector3::new(RIB_SIZE, length, RIB_SIZE))?,
            ));
        }
    }

    segments.push(ConduitSegment::new(
        SegmentShape::Panel {
            extents: [w + RECT_FLANGE_LIP, FLANGE_THICKNESS, h + RECT_FLANGE_LIP],
        },
        SegmentRole::Flange,
        start,
        orientation,
        Color::FLANGE,
        box_panel(
            start,
            orientation,
            Vector3::new(w + RECT_FLANGE_LIP, FLANGE_THICKNESS, h + RECT_FLANGE_LIP),
        )?,
    ));

    Ok(())
}

/// The quarter-circle morph elbow inscribed at the corner.
fn elbow(
    segments: &mut Vec<ConduitSegment>,
    spec: &ConduitSpec,
    params: &TransitionParams,
    corner: Point3<f64>,
    dir_in: Vector3<f64>,
    dir_out: Vector3<f64>,
    plane_normal: Vector3<f64>,
) -> ConduitResult<()> {
    let (w, h) = (params.rect_width, params.rect_height);
    let radius = spec.radius();
    let bend_radius = params.bend_radius;
    let n = params.elbow_segments.max(1);

    let rect = rect_section(w, h, SECTION_ARITY);
    let circle = circle_section(radius, SECTION_ARITY);
    let arc_center = corner - dir_in * bend_radius + dir_out * bend_radius;

    let arc_point = |theta: f64| {
        arc_center - dir_out * (bend_radius * theta.cos()) + dir_in * (bend_radius * theta.sin())
    };
    let arc_tangent = |theta: f64| dir_in * theta.cos() + dir_out * theta.sin();

    // One ring per step, lofted pairwise into morph segments.
    let rings: Vec<Vec<Point3<f64>>> = (0..=n)
        .map(|i| {
            let f = i as f64 / n as f64;
            let theta = f * std::f64::consts::FRAC_PI_2;
            let section = lerp_section(&rect, &circle, f);
            let tangent = arc_tangent(theta);
            place_section(
                &section,
                arc_point(theta),
                tangent.cross(&plane_normal),
                plane_normal,
            )
        })
        .collect();

    let arc_step = std::f64::consts::FRAC_PI_2 * bend_radius / n as f64;
    for i in 0..n {
        let f0 = i as f64 / n as f64;
        let f1 = (i + 1) as f64 / n as f64;
        let theta_mid = (f0 + f1) / 2.0 * std::f64::consts::FRAC_PI_2;

        let lerp_dims = |f: f64| {
            (
                w + (2.0 * radius - w) * f,
                h + (2.0 * radius - h) * f,
            )
        };

        segments.push(ConduitSegment::new(
            SegmentShape::MorphRing {
                section_start: lerp_dims(f0),
                section_end: lerp_dims(f1),
                length: arc_step,
            },
            SegmentRole::Body,
            arc_point(theta_mid),
            orient_y_to(arc_tangent(theta_mid)),
            spec.color(),
            ring_loft(&rings[i..=i + 1], false)?,
        ));
    }

    Ok(())
}

/// The straight circular run: body, reinforcement rings, terminal flange
/// facing the travel direction.
fn round_run(
    segments: &mut Vec<ConduitSegment>,
    spec: &ConduitSpec,
    exit: Point3<f64>,
    end: Point3<f64>,
    dir_out: Vector3<f64>,
) -> ConduitResult<()> {
    let radius = spec.radius();
    let length = (end - exit).norm();

    segments.push(ConduitSegment::new(
        SegmentShape::Cylinder { radius, length },
        SegmentRole::Body,
        exit + (end - exit) / 2.0,
        orient_y_to(dir_out),
        spec.color(),
        cylinder_between(exit, end, radius, SECTION_ARITY)?,
    ));

    let ring_count = ((length / RING_SPACING).floor() as usize).max(3);
    for i in 1..ring_count {
        let position = exit + dir_out * (length * i as f64 / ring_count as f64);
        segments.push(ConduitSegment::new(
            SegmentShape::Ring {
                radius: radius + 0.05,
                band: 0.03,
            },
            SegmentRole::ReinforcementRing,
            position,
            orient_y_to(dir_out),
            Color::SEAM,
            torus_ring(position, dir_out, radius + 0.05, 0.03, 24, 8)?,
        ));
    }

    segments.push(ConduitSegment::new(
        SegmentShape::Cylinder {
            radius: radius + ROUND_FLANGE_LIP,
            length: FLANGE_THICKNESS,
        },
        SegmentRole::Flange,
        end,
        orient_y_to(dir_out),
        Color::FLANGE,
        disc(
            end,
            dir_out,
            radius + ROUND_FLANGE_LIP,
            FLANGE_THICKNESS,
            SECTION_ARITY,
        )?,
    ));

    Ok(())
}

/// Support brackets at regular stations along a straight run, with a post
/// down to a floor pad wherever the bracket rides above the clearance
/// threshold.
fn supports(
    segments: &mut Vec<ConduitSegment>,
    params: &TransitionParams,
    a: Point3<f64>,
    b: Point3<f64>,
    half_depth: f64,
) -> ConduitResult<()> {
    let run = b - a;
    let length = run.norm();
    let stations = ((length / SUPPORT_SPACING).floor() as usize).max(1);

    for i in 1..=stations {
        let f = i as f64 / (stations + 1) as f64;
        let p = a + run * f;
        let bracket_center = Point3::new(
            p.x,
            p.y - half_depth - BRACKET_EXTENTS[1] / 2.0,
            p.z,
        );

        segments.push(ConduitSegment::new(
            SegmentShape::Panel {
                extents: BRACKET_EXTENTS,
            },
            SegmentRole::Support,
            bracket_center,
            UnitQuaternion::identity(),
            Color::SUPPORT,
            box_panel(
                bracket_center,
                UnitQuaternion::identity(),
                Vector3::new(BRACKET_EXTENTS[0], BRACKET_EXTENTS[1], BRACKET_EXTENTS[2]),
            )?,
        ));

        let bracket_bottom = bracket_center.y - BRACKET_EXTENTS[1] / 2.0;
        if bracket_center.y > params.support_clearance && bracket_bottom > PAD_THICKNESS {
            let post_bottom = Point3::new(p.x, PAD_THICKNESS, p.z);
            let post_top = Point3::new(p.x, bracket_bottom, p.z);
            segments.push(ConduitSegment::new(
                SegmentShape::Cylinder {
                    radius: POST_RADIUS,
                    length: bracket_bottom - PAD_THICKNESS,
                },
                SegmentRole::Support,
                post_bottom + (post_top - post_bottom) / 2.0,
                UnitQuaternion::identity(),
                Color::SUPPORT,
                cylinder_between(post_bottom, post_top, POST_RADIUS, 12)?,
            ));
            segments.push(ConduitSegment::new(
                SegmentShape::Cylinder {
                    radius: PAD_RADIUS,
                    length: PAD_THICKNESS,
                },
                SegmentRole::Support,
                Point3::new(p.x, PAD_THICKNESS / 2.0, p.z),
                UnitQuaternion::identity(),
                Color::SUPPORT,
                disc(
                    Point3::new(p.x, PAD_THICKNESS / 2.0, p.z),
                    Vector3::y(),
                    PAD_RADIUS,
                    PAD_THICKNESS,
                    16,
                )?,
            ));
        }
    }

    Ok(())
}
