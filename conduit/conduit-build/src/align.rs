//! Tolerance-based endpoint alignment checking.
//!
//! Two independently computed versions of "the same" point - a tilted cone's
//! outlet and the terminus of the hose meant to meet it - rarely agree to
//! the last bit. The validator compares them per axis against a tolerance,
//! collects every mismatch for manual review, and never blocks the build.

use nalgebra::{Point3, Vector3};
use tracing::warn;

/// Default alignment tolerance in model units (1 mm at meter scale).
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Result of comparing two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentCheck {
    /// Component-wise absolute deviation.
    pub delta: Vector3<f64>,
    /// Largest single-axis deviation.
    pub max_delta: f64,
    /// Tolerance the check ran against.
    pub tolerance: f64,
}

impl AlignmentCheck {
    /// Compare two points against a tolerance.
    ///
    /// Symmetric in its arguments: `between(a, b, t) == between(b, a, t)`.
    ///
    /// # Example
    ///
    /// ```
    /// use conduit_build::AlignmentCheck;
    /// use nalgebra::Point3;
    ///
    /// let a = Point3::new(0.0, 5.0, 0.0);
    /// let b = Point3::new(0.0004, 5.0, 0.0);
    /// assert!(AlignmentCheck::between(a, b, 1e-3).passed());
    /// assert!(!AlignmentCheck::between(a, b, 1e-4).passed());
    /// ```
    #[must_use]
    pub fn between(a: Point3<f64>, b: Point3<f64>, tolerance: f64) -> Self {
        let delta = Vector3::new(
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
            (a.z - b.z).abs(),
        );
        Self {
            delta,
            max_delta: delta.x.max(delta.y).max(delta.z),
            tolerance,
        }
    }

    /// Whether the deviation is within tolerance.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.max_delta <= self.tolerance
    }
}

/// Collecting validator used as a build-time self-check.
///
/// Each [`AlignmentValidator::check`] logs a warning on mismatch and records
/// the result; nothing halts. After a batch of connections, the recorded
/// mismatches are the review list.
#[derive(Debug, Clone)]
pub struct AlignmentValidator {
    tolerance: f64,
    checks: Vec<(String, AlignmentCheck)>,
}

impl Default for AlignmentValidator {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl AlignmentValidator {
    /// Create a validator with the given tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            checks: Vec::new(),
        }
    }

    /// The tolerance in use.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compare two points, record the result, and warn on mismatch.
    ///
    /// Returns whether the check passed.
    pub fn check(&mut self, label: impl Into<String>, a: Point3<f64>, b: Point3<f64>) -> bool {
        let label = label.into();
        let check = AlignmentCheck::between(a, b, self.tolerance);
        let passed = check.passed();
        if !passed {
            warn!(
                connection = %label,
                dx = check.delta.x,
                dy = check.delta.y,
                dz = check.delta.z,
                max_delta = check.max_delta,
                tolerance = self.tolerance,
                "Alignment mismatch"
            );
        }
        self.checks.push((label, check));
        passed
    }

    /// All recorded checks in order.
    #[must_use]
    pub fn checks(&self) -> &[(String, AlignmentCheck)] {
        &self.checks
    }

    /// Only the failed checks.
    pub fn mismatches(&self) -> impl Iterator<Item = &(String, AlignmentCheck)> {
        self.checks.iter().filter(|(_, check)| !check.passed())
    }

    /// Whether every recorded check passed.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.checks.iter().all(|(_, check)| check.passed())
    }

    /// Number of recorded checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.1, 1.9, 3.05);
        let ab = AlignmentCheck::between(a, b, 1e-3);
        let ba = AlignmentCheck::between(b, a, 1e-3);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_identical_points_zero_delta() {
        let a = Point3::new(4.2, -1.0, 0.5);
        let check = AlignmentCheck::between(a, a, 1e-3);
        assert_relative_eq!(check.max_delta, 0.0);
        assert!(check.passed());
    }

    #[test]
    fn test_max_delta_is_worst_axis() {
        let check = AlignmentCheck::between(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.001, 0.05, 0.002),
            1e-3,
        );
        assert_relative_eq!(check.max_delta, 0.05, epsilon = 1e-12);
        assert!(!check.passed());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let check = AlignmentCheck::between(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-3, 0.0, 0.0),
            1e-3,
        );
        assert!(check.passed());
    }

    #[test]
    fn test_validator_collects_without_halting() {
        let mut validator = AlignmentValidator::default();
        assert!(validator.check("unit_1", Point3::origin(), Point3::origin()));
        assert!(!validator.check(
            "unit_2",
            Point3::origin(),
            Point3::new(0.5, 0.0, 0.0)
        ));
        assert!(validator.check("unit_3", Point3::origin(), Point3::origin()));

        assert_eq!(validator.len(), 3);
        assert!(!validator.is_aligned());
        let failed: Vec<_> = validator.mismatches().map(|(label, _)| label.as_str()).collect();
        assert_eq!(failed, ["unit_2"]);
    }
}
