//! Catmull-Rom spline interpolation.
//!
//! A [`CatmullRom3`] passes through every one of its control points, which is
//! what makes it the right fit for hose routing: the resolved endpoints of a
//! connection become the first and last control points and the generated
//! centerline is guaranteed to touch both.

use nalgebra::Point3;

use crate::error::{CurveError, CurveResult};

/// An interpolating Catmull-Rom spline through 3-D control points.
///
/// Uses the uniform parameterization with reflected phantom endpoints, so the
/// curve interpolates its first and last control points exactly and starts and
/// ends tangent to the first and last chords.
///
/// # Example
///
/// ```
/// use curve_path::CatmullRom3;
/// use nalgebra::Point3;
///
/// let curve = CatmullRom3::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 5.0, 0.0),
/// ])
/// .unwrap();
///
/// let mid = curve.point_at(0.5);
/// assert!((mid.y - 2.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct CatmullRom3 {
    points: Vec<Point3<f64>>,
}

impl CatmullRom3 {
    /// Create a spline through the given control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given or any
    /// coordinate is not finite.
    pub fn new(points: Vec<Point3<f64>>) -> CurveResult<Self> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                min: 2,
                actual: points.len(),
            });
        }
        for (index, p) in points.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return Err(CurveError::NonFinitePoint { index });
            }
        }
        Ok(Self { points })
    }

    /// The control points the spline interpolates.
    #[must_use]
    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of cubic segments (one fewer than control points).
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Control point lookup with reflected phantoms beyond both ends.
    fn control(&self, i: isize) -> Point3<f64> {
        let n = self.points.len() as isize;
        if i < 0 {
            // Reflect the second point through the first.
            let p0 = self.points[0];
            let p1 = self.points[1];
            Point3::from(p0.coords * 2.0 - p1.coords)
        } else if i >= n {
            let pl = self.points[self.points.len() - 1];
            let pk = self.points[self.points.len() - 2];
            Point3::from(pl.coords * 2.0 - pk.coords)
        } else {
            self.points[usize::try_from(i).unwrap_or(0)]
        }
    }

    /// Evaluate the spline at parameter `t` in `[0, 1]`.
    ///
    /// The parameter is clamped; `t = 0` returns the first control point and
    /// `t = 1` the last.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let segments = self.num_segments() as f64;
        let u = t.clamp(0.0, 1.0) * segments;
        let seg = (u.floor() as isize).min(self.num_segments() as isize - 1);
        let s = u - seg as f64;

        let p0 = self.control(seg - 1).coords;
        let p1 = self.control(seg).coords;
        let p2 = self.control(seg + 1).coords;
        let p3 = self.control(seg + 2).coords;

        // Uniform Catmull-Rom basis (tension 0.5).
        let c0 = p1 * 2.0;
        let c1 = p2 - p0;
        let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
        let c3 = p1 * 3.0 - p0 - p2 * 3.0 + p3;

        Point3::from((c0 + c1 * s + c2 * (s * s) + c3 * (s * s * s)) * 0.5)
    }

    /// Sample the spline at `n` evenly spaced parameters.
    ///
    /// The first and last samples are exactly the first and last control
    /// points.
    ///
    /// # Errors
    ///
    /// Returns an error if `n < 2`.
    pub fn sample(&self, n: usize) -> CurveResult<Vec<Point3<f64>>> {
        if n < 2 {
            return Err(CurveError::TooFewSamples { min: 2, actual: n });
        }
        let mut out = Vec::with_capacity(n);
        out.push(self.points[0]);
        for i in 1..n - 1 {
            let t = i as f64 / (n - 1) as f64;
            out.push(self.point_at(t));
        }
        out.push(self.points[self.points.len() - 1]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn s_curve() -> CatmullRom3 {
        CatmullRom3::new(vec![
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(1.0, 4.0, 0.5),
            Point3::new(2.0, 2.5, 1.0),
            Point3::new(3.0, 1.0, 0.5),
            Point3::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_single_point() {
        let result = CatmullRom3::new(vec![Point3::origin()]);
        assert!(matches!(result, Err(CurveError::TooFewPoints { .. })));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = CatmullRom3::new(vec![
            Point3::origin(),
            Point3::new(f64::NAN, 0.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(CurveError::NonFinitePoint { index: 1 })
        ));
    }

    #[test]
    fn test_endpoints_interpolated_exactly() {
        let curve = s_curve();
        let samples = curve.sample(64).unwrap();

        assert_eq!(samples[0], Point3::new(0.0, 5.0, 0.0));
        assert_eq!(samples[63], Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_interior_control_points_interpolated() {
        let curve = s_curve();
        // Parameter of the middle control point of five is t = 0.5.
        let mid = curve.point_at(0.5);
        assert_relative_eq!(mid.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(mid.y, 2.5, epsilon = 1e-9);
        assert_relative_eq!(mid.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_two_point_spline_is_linear() {
        let curve = CatmullRom3::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ])
        .unwrap();

        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let p = curve.point_at(t);
            assert_relative_eq!(p.y, 10.0 * t, epsilon = 1e-9);
            assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parameter_clamped() {
        let curve = s_curve();
        assert_eq!(curve.point_at(-1.0), curve.point_at(0.0));
        assert_eq!(curve.point_at(2.0), curve.point_at(1.0));
    }

    #[test]
    fn test_samples_are_finite() {
        let curve = s_curve();
        for p in curve.sample(128).unwrap() {
            assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        }
    }

    #[test]
    fn test_coincident_interior_points_stay_finite() {
        let curve = CatmullRom3::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        for p in curve.sample(32).unwrap() {
            assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        }
    }

    #[test]
    fn test_too_few_samples() {
        let curve = s_curve();
        assert!(matches!(
            curve.sample(1),
            Err(CurveError::TooFewSamples { .. })
        ));
    }
}
