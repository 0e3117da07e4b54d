//! Rotation-minimizing frames along a sampled path.
//!
//! Sweeping a cross-section along a curve needs a perpendicular basis at every
//! sample. A naive Frenet frame flips at inflection points; instead the frame
//! at each sample is obtained by rotating the previous frame with the minimal
//! rotation that carries the old tangent onto the new one.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// An orthonormal frame at a point on a curve.
#[derive(Debug, Clone, Copy)]
pub struct PathFrame {
    /// Forward direction along the curve.
    pub tangent: Vector3<f64>,
    /// First perpendicular axis.
    pub normal: Vector3<f64>,
    /// Second perpendicular axis (`tangent × normal`).
    pub binormal: Vector3<f64>,
}

impl PathFrame {
    /// Build an initial frame from a tangent direction.
    ///
    /// The normal is chosen deterministically from the world axis least
    /// aligned with the tangent.
    #[must_use]
    pub fn from_tangent(tangent: Vector3<f64>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::y());
        let normal = perpendicular_to(tangent);
        let binormal = tangent.cross(&normal);
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Carry this frame onto a new tangent with the minimal rotation.
    #[must_use]
    fn transported_to(&self, new_tangent: Vector3<f64>) -> Self {
        let new_tangent = new_tangent
            .try_normalize(f64::EPSILON)
            .unwrap_or(self.tangent);

        match UnitQuaternion::rotation_between(&self.tangent, &new_tangent) {
            Some(rotation) => {
                // Re-orthogonalize: numerical drift accumulates over many
                // transport steps.
                let rotated = rotation * self.normal;
                let normal = (rotated - new_tangent * rotated.dot(&new_tangent))
                    .try_normalize(f64::EPSILON)
                    .unwrap_or_else(|| perpendicular_to(new_tangent));
                Self {
                    tangent: new_tangent,
                    normal,
                    binormal: new_tangent.cross(&normal),
                }
            }
            // Tangent reversed: keep the normal, flip the binormal.
            None => Self {
                tangent: new_tangent,
                normal: self.normal,
                binormal: new_tangent.cross(&self.normal),
            },
        }
    }

    /// Offset a center point by 2-D cross-section coordinates in this frame.
    #[must_use]
    pub fn place(&self, center: Point3<f64>, x: f64, y: f64) -> Point3<f64> {
        center + self.normal * x + self.binormal * y
    }
}

/// A world axis guaranteed not parallel to `v`, crossed into a unit normal.
fn perpendicular_to(v: Vector3<f64>) -> Vector3<f64> {
    let axis = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::z())
}

/// Compute a rotation-minimizing frame at every point of a polyline.
///
/// Interior tangents average the incoming and outgoing chords; the endpoint
/// tangents use the single adjacent chord. Returns an empty vector for fewer
/// than two points.
///
/// # Example
///
/// ```
/// use curve_path::parallel_transport_frames;
/// use nalgebra::Point3;
///
/// let frames = parallel_transport_frames(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ]);
/// assert_eq!(frames.len(), 3);
/// ```
#[must_use]
pub fn parallel_transport_frames(points: &[Point3<f64>]) -> Vec<PathFrame> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut frames = Vec::with_capacity(points.len());
    frames.push(PathFrame::from_tangent(points[1] - points[0]));

    for i in 1..points.len() {
        let prev: PathFrame = frames[i - 1];
        let tangent = if i + 1 < points.len() {
            (points[i] - points[i - 1]) + (points[i + 1] - points[i])
        } else {
            points[i] - points[i - 1]
        };
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(prev.tangent);
        frames.push(prev.transported_to(tangent));
    }

    frames
}
