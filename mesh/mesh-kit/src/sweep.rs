//! Swept surfaces: tubes along centerlines and lofts between rings.

use curve_path::parallel_transport_frames;
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{TriMesh, Vertex};
use crate::section::circle_section;

/// Stitch a sequence of equal-arity cross-section rings into a surface.
///
/// Consecutive rings are connected with quads (two triangles each); with
/// `capped`, centroid fans close the first and last rings. Normals are
/// recomputed from the final geometry.
///
/// # Errors
///
/// Returns an error if fewer than two rings are given, any ring has fewer
/// than three points, or the rings disagree on point count.
pub fn ring_loft(rings: &[Vec<Point3<f64>>], capped: bool) -> MeshResult<TriMesh> {
    if rings.len() < 2 {
        return Err(MeshError::TooFewRings {
            min: 2,
            actual: rings.len(),
        });
    }
    let arity = rings[0].len();
    if arity < 3 {
        return Err(MeshError::TooFewSides {
            min: 3,
            actual: arity,
        });
    }
    for (index, ring) in rings.iter().enumerate() {
        if ring.len() != arity {
            return Err(MeshError::RingArityMismatch {
                index,
                actual: ring.len(),
                expected: arity,
            });
        }
    }

    let mut mesh = TriMesh::new();
    for ring in rings {
        for p in ring {
            mesh.vertices.push(Vertex::new(*p));
        }
    }
    for r in 0..rings.len() - 1 {
        for k in 0..arity {
            let a = (r * arity + k) as u32;
            let b = (r * arity + (k + 1) % arity) as u32;
            let c = ((r + 1) * arity + k) as u32;
            let d = ((r + 1) * arity + (k + 1) % arity) as u32;
            mesh.faces.push([a, b, c]);
            mesh.faces.push([b, d, c]);
        }
    }
    if capped {
        cap_ring(&mut mesh, 0, arity, true);
        cap_ring(&mut mesh, (rings.len() - 1) * arity, arity, false);
    }

    mesh.recompute_normals();
    Ok(mesh)
}

/// Close a ring of `sides` vertices starting at `ring_start` with a centroid
/// fan. `flip` reverses the winding for the ring whose outward side faces
/// against the sweep direction.
fn cap_ring(mesh: &mut TriMesh, ring_start: usize, sides: usize, flip: bool) {
    let mut centroid = Vector3::zeros();
    for v in &mesh.vertices[ring_start..ring_start + sides] {
        centroid += v.position.coords;
    }
    let center_idx = u32::try_from(mesh.vertices.len()).unwrap_or(u32::MAX);
    mesh.vertices
        .push(Vertex::new(Point3::from(centroid / sides as f64)));

    for k in 0..sides {
        let a = u32::try_from(ring_start + k).unwrap_or(u32::MAX);
        let b = u32::try_from(ring_start + (k + 1) % sides).unwrap_or(u32::MAX);
        if flip {
            mesh.faces.push([center_idx, b, a]);
        } else {
            mesh.faces.push([center_idx, a, b]);
        }
    }
}

/// Sweep a circle of the given radius along a sampled centerline.
///
/// Cross-sections are placed with rotation-minimizing frames so the tube
/// never twists, whatever the path curvature.
///
/// # Errors
///
/// Returns an error if fewer than two centerline points are given, the
/// radius is invalid, or `sides < 3`.
///
/// # Example
///
/// ```
/// use mesh_kit::tube;
/// use nalgebra::Point3;
///
/// let centerline = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
/// ];
/// let mesh = tube(&centerline, 0.1, 12, false).unwrap();
/// assert!(!mesh.is_empty());
/// ```
pub fn tube(
    points: &[Point3<f64>],
    radius: f64,
    sides: usize,
    capped: bool,
) -> MeshResult<TriMesh> {
    if points.len() < 2 {
        return Err(MeshError::TooFewRings {
            min: 2,
            actual: points.len(),
        });
    }
    if radius <= 0.0 || !radius.is_finite() {
        return Err(MeshError::InvalidRadius(radius));
    }
    if sides < 3 {
        return Err(MeshError::TooFewSides {
            min: 3,
            actual: sides,
        });
    }

    let frames = parallel_transport_frames(points);
    let section = circle_section(radius, sides);

    let rings: Vec<Vec<Point3<f64>>> = points
        .iter()
        .zip(frames.iter())
        .map(|(center, frame)| {
            section
                .iter()
                .map(|p| frame.place(*center, p.x, p.y))
                .collect()
        })
        .collect();

    ring_loft(&rings, capped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::section::{lerp_section, rect_section};
    use nalgebra::Vector3;

    #[test]
    fn test_ring_loft_counts() {
        let rings = vec![
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, -1.0),
            ],
            vec![
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 1.0),
                Point3::new(-1.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, -1.0),
            ],
        ];
        let mesh = ring_loft(&rings, false).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.face_count(), 8);

        let capped = ring_loft(&rings, true).unwrap();
        assert_eq!(capped.vertices.len(), 10);
        assert_eq!(capped.face_count(), 16);
    }

    #[test]
    fn test_ring_loft_rejects_arity_mismatch() {
        let rings = vec![
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(-1.0, 0.0, 0.0),
            ],
            vec![Point3::new(1.0, 2.0, 0.0), Point3::new(0.0, 2.0, 1.0)],
        ];
        assert!(matches!(
            ring_loft(&rings, false),
            Err(MeshError::RingArityMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_ring_loft_morph_sections() {
        // Rectangle to circle over four rings, stacked along +Y.
        let rect = rect_section(2.0, 1.0, 16);
        let circle = crate::section::circle_section(0.5, 16);
        let rings: Vec<Vec<Point3<f64>>> = (0..4)
            .map(|i| {
                let f = f64::from(i) / 3.0;
                lerp_section(&rect, &circle, f)
                    .into_iter()
                    .map(|p| Point3::new(p.x, f64::from(i), p.y))
                    .collect()
            })
            .collect();

        let mesh = ring_loft(&rings, true).unwrap();
        assert!(!mesh.is_empty());
        let (min, max) = mesh.aabb().unwrap();
        assert_relative_eq!(max.y - min.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tube_follows_straight_centerline() {
        let points: Vec<_> = (0..5)
            .map(|i| Point3::new(0.0, f64::from(i), 0.0))
            .collect();
        let mesh = tube(&points, 0.25, 8, true).unwrap();

        let (min, max) = mesh.aabb().unwrap();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 4.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_tube_radius_preserved_on_bend() {
        // Quarter bend; every ring vertex must stay one radius from its
        // centerline sample.
        let points: Vec<_> = (0..=16)
            .map(|i| {
                let t = f64::from(i) / 16.0 * std::f64::consts::FRAC_PI_2;
                Point3::new(t.sin() * 5.0, 5.0 - t.cos() * 5.0, 0.0)
            })
            .collect();
        let mesh = tube(&points, 0.3, 12, false).unwrap();

        for (i, center) in points.iter().enumerate() {
            for k in 0..12 {
                let v = mesh.vertices[i * 12 + k].position;
                assert_relative_eq!((v - center).norm(), 0.3, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_tube_rejects_bad_inputs() {
        let points = vec![Point3::origin(), Point3::new(0.0, 1.0, 0.0)];
        assert!(tube(&points[..1], 0.1, 8, false).is_err());
        assert!(tube(&points, 0.0, 8, false).is_err());
        assert!(tube(&points, 0.1, 2, false).is_err());
    }

    #[test]
    fn test_tube_normals_point_outward() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let mesh = tube(&points, 1.0, 16, false).unwrap();
        for v in &mesh.vertices {
            let radial = Vector3::new(v.position.x, 0.0, v.position.z).normalize();
            assert!(v.normal.dot(&radial) > 0.5, "normal not outward: {v:?}");
        }
    }
}
