//! Sampled centerlines with arc-length lookup.

use nalgebra::Point3;

use crate::error::{CurveError, CurveResult};

/// A polyline sampled from a curve, with cumulative arc lengths.
///
/// Strategies that need stations "every N meters along the run" (support
/// brackets, reinforcement rings, flow markers) query this instead of
/// re-deriving chord sums.
///
/// # Example
///
/// ```
/// use curve_path::SampledPath;
/// use nalgebra::Point3;
///
/// let path = SampledPath::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 4.0),
/// ])
/// .unwrap();
///
/// assert!((path.length() - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SampledPath {
    points: Vec<Point3<f64>>,
    cumulative: Vec<f64>,
}

impl SampledPath {
    /// Build a sampled path from at least two points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given.
    pub fn new(points: Vec<Point3<f64>>) -> CurveResult<Self> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                min: 2,
                actual: points.len(),
            });
        }
        let mut cumulative = Vec::with_capacity(points.len());
        cumulative.push(0.0);
        for pair in points.windows(2) {
            let last = cumulative[cumulative.len() - 1];
            cumulative.push(last + (pair[1] - pair[0]).norm());
        }
        Ok(Self { points, cumulative })
    }

    /// The sample points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Total arc length of the polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no segments. Always `false` for a constructed
    /// path, kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    /// Point at the given arc length from the start, clamped to the path.
    #[must_use]
    pub fn point_at_length(&self, s: f64) -> Point3<f64> {
        let s = s.clamp(0.0, self.length());
        // The sample counts here are small; a linear scan beats bookkeeping.
        for i in 1..self.cumulative.len() {
            if s <= self.cumulative[i] {
                let span = self.cumulative[i] - self.cumulative[i - 1];
                if span <= f64::EPSILON {
                    return self.points[i];
                }
                let f = (s - self.cumulative[i - 1]) / span;
                return self.points[i - 1] + (self.points[i] - self.points[i - 1]) * f;
            }
        }
        self.points[self.points.len() - 1]
    }
}
