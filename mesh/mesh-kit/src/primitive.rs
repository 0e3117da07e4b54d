//! Solid primitives: cylinders, discs, rings and panels.

use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{TriMesh, Vertex};

/// Minimal rotation carrying the canonical +Y axis onto `direction`.
///
/// The near-antiparallel case (`direction ≈ -Y`) has no unique shortest arc;
/// a half-turn about +X is used so the result is always defined.
///
/// # Example
///
/// ```
/// use mesh_kit::orient_y_to;
/// use nalgebra::Vector3;
///
/// let q = orient_y_to(Vector3::new(0.0, -1.0, 0.0));
/// let mapped = q * Vector3::y();
/// assert!((mapped.y + 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn orient_y_to(direction: Vector3<f64>) -> UnitQuaternion<f64> {
    let direction = direction.try_normalize(f64::EPSILON).unwrap_or(Vector3::y());
    if direction.dot(&Vector3::y()) < -1.0 + 1e-9 {
        return UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI);
    }
    UnitQuaternion::rotation_between(&Vector3::y(), &direction)
        .unwrap_or_else(UnitQuaternion::identity)
}

/// Cylinder spanning `start` to `end` with the given radius.
///
/// Built on the canonical +Y axis, oriented by [`orient_y_to`], centered on
/// the segment midpoint and capped at both ends.
///
/// # Errors
///
/// Returns an error if the radius is invalid, `sides < 3`, or the endpoints
/// are too close to define an axis.
pub fn cylinder_between(
    start: Point3<f64>,
    end: Point3<f64>,
    radius: f64,
    sides: usize,
) -> MeshResult<TriMesh> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(MeshError::InvalidRadius(radius));
    }
    if sides < 3 {
        return Err(MeshError::TooFewSides {
            min: 3,
            actual: sides,
        });
    }
    let axis = end - start;
    let length = axis.norm();
    if length < f64::EPSILON {
        return Err(MeshError::DegenerateAxis { length });
    }

    // A cylinder is a two-ring capped sweep; reusing the tube path keeps one
    // winding convention for every curved surface in the crate.
    crate::sweep::tube(&[start, end], radius, sides, true)
}

/// Thin solid disc, used for flanges and floor pads.
///
/// `axis` is the disc's face normal; `thickness` is measured along it.
///
/// # Errors
///
/// Returns an error if the radius, thickness, or side count is invalid.
pub fn disc(
    center: Point3<f64>,
    axis: Vector3<f64>,
    radius: f64,
    thickness: f64,
    sides: usize,
) -> MeshResult<TriMesh> {
    if thickness <= 0.0 || !thickness.is_finite() {
        return Err(MeshError::InvalidExtent(thickness));
    }
    let axis = axis.try_normalize(f64::EPSILON).unwrap_or(Vector3::y());
    cylinder_between(
        center - axis * (thickness / 2.0),
        center + axis * (thickness / 2.0),
        radius,
        sides,
    )
}

/// Torus ring around `axis`, used for pipe reinforcement bands.
///
/// # Errors
///
/// Returns an error if either radius or segment count is invalid.
pub fn torus_ring(
    center: Point3<f64>,
    axis: Vector3<f64>,
    major_radius: f64,
    tube_radius: f64,
    major_sides: usize,
    tube_sides: usize,
) -> MeshResult<TriMesh> {
    if major_radius <= 0.0 || !major_radius.is_finite() {
        return Err(MeshError::InvalidRadius(major_radius));
    }
    if tube_radius <= 0.0 || !tube_radius.is_finite() {
        return Err(MeshError::InvalidRadius(tube_radius));
    }
    if major_sides < 3 || tube_sides < 3 {
        return Err(MeshError::TooFewSides {
            min: 3,
            actual: major_sides.min(tube_sides),
        });
    }

    // Canonical torus in the XZ plane around +Y, then oriented and placed.
    let mut mesh = TriMesh::new();
    for i in 0..major_sides {
        let theta = std::f64::consts::TAU * i as f64 / major_sides as f64;
        let (ring_x, ring_z) = (theta.cos(), theta.sin());
        for j in 0..tube_sides {
            let phi = std::f64::consts::TAU * j as f64 / tube_sides as f64;
            let r = major_radius + tube_radius * phi.cos();
            mesh.vertices.push(Vertex::new(Point3::new(
                r * ring_x,
                tube_radius * phi.sin(),
                r * ring_z,
            )));
        }
    }
    for i in 0..major_sides {
        for j in 0..tube_sides {
            let a = (i * tube_sides + j) as u32;
            let b = (i * tube_sides + (j + 1) % tube_sides) as u32;
            let c = (((i + 1) % major_sides) * tube_sides + j) as u32;
            let d = (((i + 1) % major_sides) * tube_sides + (j + 1) % tube_sides) as u32;
            mesh.faces.push([a, b, c]);
            mesh.faces.push([b, d, c]);
        }
    }
    mesh.recompute_normals();

    let placement = Translation3::from(center.coords).to_homogeneous()
        * orient_y_to(axis).to_homogeneous();
    Ok(mesh.transformed(&placement))
}

/// Axis-aligned box of the given extents, oriented and placed.
///
/// # Errors
///
/// Returns an error if any extent is zero, negative, or not finite.
pub fn box_panel(
    center: Point3<f64>,
    orientation: UnitQuaternion<f64>,
    extents: Vector3<f64>,
) -> MeshResult<TriMesh> {
    for extent in [extents.x, extents.y, extents.z] {
        if extent <= 0.0 || !extent.is_finite() {
            return Err(MeshError::InvalidExtent(extent));
        }
    }

    let h = extents / 2.0;
    let corners = [
        Point3::new(-h.x, -h.y, -h.z),
        Point3::new(h.x, -h.y, -h.z),
        Point3::new(h.x, h.y, -h.z),
        Point3::new(-h.x, h.y, -h.z),
        Point3::new(-h.x, -h.y, h.z),
        Point3::new(h.x, -h.y, h.z),
        Point3::new(h.x, h.y, h.z),
        Point3::new(-h.x, h.y, h.z),
    ];

    let mut mesh = TriMesh::new();
    // Each face gets its own vertices so normals stay flat after recompute.
    const FACES: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // -Z
        [4, 5, 6, 7], // +Z
        [0, 1, 5, 4], // -Y
        [3, 7, 6, 2], // +Y
        [0, 4, 7, 3], // -X
        [1, 2, 6, 5], // +X
    ];
    for quad in FACES {
        let base = u32::try_from(mesh.vertices.len()).unwrap_or(u32::MAX);
        for idx in quad {
            mesh.vertices.push(Vertex::new(corners[idx]));
        }
        mesh.faces.push([base, base + 1, base + 2]);
        mesh.faces.push([base, base + 2, base + 3]);
    }
    mesh.recompute_normals();

    let placement = Translation3::from(center.coords).to_homogeneous()
        * orientation.to_homogeneous();
    Ok(mesh.transformed(&placement))
}
