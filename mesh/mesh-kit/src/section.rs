//! Cross-section rings with matched parameterization.
//!
//! The rectangle-to-circle morph only works if both shapes expose the same
//! number of boundary points at the same angular parameters. Both generators
//! here place point `k` on the ray at angle `2πk/arity` from the section
//! center, so `lerp_section` interpolates boundary points pairwise and the
//! section extents interpolate linearly with the blend factor.

use nalgebra::Vector2;

/// Boundary ring of a circle of the given radius.
///
/// Point `k` sits at angle `2πk/arity`.
#[must_use]
pub fn circle_section(radius: f64, arity: usize) -> Vec<Vector2<f64>> {
    (0..arity)
        .map(|k| {
            let angle = std::f64::consts::TAU * k as f64 / arity as f64;
            Vector2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Boundary ring of a `width × height` rectangle centered on the origin.
///
/// Point `k` is the intersection of the ray at angle `2πk/arity` with the
/// rectangle outline, matching [`circle_section`]'s parameterization.
#[must_use]
pub fn rect_section(width: f64, height: f64, arity: usize) -> Vec<Vector2<f64>> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    (0..arity)
        .map(|k| {
            let angle = std::f64::consts::TAU * k as f64 / arity as f64;
            let (sin, cos) = angle.sin_cos();
            let scale_w = if cos.abs() > f64::EPSILON {
                half_w / cos.abs()
            } else {
                f64::INFINITY
            };
            let scale_h = if sin.abs() > f64::EPSILON {
                half_h / sin.abs()
            } else {
                f64::INFINITY
            };
            let scale = scale_w.min(scale_h);
            Vector2::new(scale * cos, scale * sin)
        })
        .collect()
}

/// Pointwise linear interpolation between two equal-arity sections.
///
/// `f = 0` returns `a`, `f = 1` returns `b`. Callers must pass sections of
/// equal arity; extra points in the longer section are ignored.
#[must_use]
pub fn lerp_section(a: &[Vector2<f64>], b: &[Vector2<f64>], f: f64) -> Vec<Vector2<f64>> {
    a.iter()
        .zip(b.iter())
        .map(|(pa, pb)| pa + (pb - pa) * f)
        .collect()
}

/// Width and height of a section's bounding box.
#[must_use]
pub fn section_extents(section: &[Vector2<f64>]) -> (f64, f64) {
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for p in section {
        max_x = max_x.max(p.x.abs());
        max_y = max_y.max(p.y.abs());
    }
    (max_x * 2.0, max_y * 2.0)
}
