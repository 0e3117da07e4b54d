//! Spec dispatch and endpoint resolution.

use conduit_types::{ConduitGeometry, ConduitResult, ConduitSpec, PathStrategy, PortResolver};
use tracing::{debug, info, warn};

use crate::{duct, hose, straight};

/// Endpoints closer than this are a degenerate request, not an error.
const DEGENERATE_EPSILON: f64 = 1e-6;

/// Builds conduit geometry from specs, resolving ports through the host's
/// registry.
///
/// The builder owns no scene state: it borrows a [`PortResolver`] and leaves
/// attachment decisions to the caller. Failure handling follows the
/// local-recover-or-skip rule - an unresolvable endpoint logs a warning and
/// skips the connection, coincident endpoints skip silently, and only
/// genuinely malformed requests (non-perpendicular duct legs, oversized bend
/// radius) surface as errors.
///
/// # Example
///
/// ```
/// use conduit_build::ConduitBuilder;
/// use conduit_types::{ConduitSpec, PortResolver};
/// use nalgebra::Point3;
///
/// struct Fixed;
/// impl PortResolver for Fixed {
///     fn port_world_position(&self, _: &str, port: &str) -> Option<Point3<f64>> {
///         (port == "outlet").then(|| Point3::new(0.0, 2.0, 0.0))
///     }
/// }
///
/// let spec = ConduitSpec::builder("drain")
///     .start_port("tank", "outlet")
///     .end_point(Point3::new(4.0, 0.0, 0.0))
///     .build()
///     .unwrap();
///
/// let geometry = ConduitBuilder::new(&Fixed).build(&spec).unwrap();
/// assert!(geometry.is_some());
/// ```
#[derive(Debug)]
pub struct ConduitBuilder<'a, R: PortResolver> {
    resolver: &'a R,
}

impl<'a, R: PortResolver> ConduitBuilder<'a, R> {
    /// Create a builder over the given resolver.
    #[must_use]
    pub const fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Build the geometry for one spec.
    ///
    /// Returns `Ok(None)` when the connection is skipped: an endpoint port
    /// could not be resolved (logged), or the resolved endpoints coincide
    /// (silent). Returns geometry with segments ordered along the path
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected strategy rejects its inputs (e.g. a
    /// transition duct with non-perpendicular legs) or mesh generation
    /// fails. Errors are local to this connection; the scene is untouched.
    pub fn build(&self, spec: &ConduitSpec) -> ConduitResult<Option<ConduitGeometry>> {
        let Some(start) = spec.start().resolve(self.resolver) else {
            warn!(conduit = spec.id(), endpoint = "start", "Unresolved endpoint, skipping");
            return Ok(None);
        };
        let Some(end) = spec.end().resolve(self.resolver) else {
            warn!(conduit = spec.id(), endpoint = "end", "Unresolved endpoint, skipping");
            return Ok(None);
        };

        if (end - start).norm() < DEGENERATE_EPSILON {
            debug!(conduit = spec.id(), "Degenerate span, skipping");
            return Ok(None);
        }

        let geometry = match spec.path_strategy() {
            PathStrategy::Straight => straight::build(spec, start, end)?,
            PathStrategy::Spline => hose::build(spec, start, end)?,
            PathStrategy::Transition => duct::build(spec, start, end)?,
        };

        info!(
            conduit = spec.id(),
            strategy = ?spec.path_strategy(),
            segments = geometry.segments().len(),
            path_length = geometry.path_length(),
            "Built conduit"
        );
        Ok(Some(geometry))
    }
}
