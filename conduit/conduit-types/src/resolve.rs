//! Endpoint references and their resolution.

use nalgebra::Point3;

/// Resolves equipment port references to world positions.
///
/// Implemented by whatever registry the host application keeps its equipment
/// in. Returning `None` means the port could not be found; the caller logs
/// and skips, it never escalates.
pub trait PortResolver {
    /// World position of `port` on `equipment`, if both exist.
    fn port_world_position(&self, equipment: &str, port: &str) -> Option<Point3<f64>>;
}

/// One end of a requested connection.
///
/// Either an explicit world point or a named port reference that gets
/// resolved at build time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endpoint {
    /// An explicit world-space point.
    Point(Point3<f64>),
    /// A named port on a registered equipment instance.
    Port {
        /// Equipment id in the host registry.
        equipment: String,
        /// Port name on that equipment.
        port: String,
    },
}

impl Endpoint {
    /// Shorthand for a port reference.
    #[must_use]
    pub fn port(equipment: impl Into<String>, port: impl Into<String>) -> Self {
        Self::Port {
            equipment: equipment.into(),
            port: port.into(),
        }
    }

    /// Resolve to a world point through the given resolver.
    ///
    /// Explicit points resolve to themselves; port references return `None`
    /// when the resolver does not know them.
    #[must_use]
    pub fn resolve(&self, resolver: &impl PortResolver) -> Option<Point3<f64>> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Port { equipment, port } => resolver.port_world_position(equipment, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResolver;

    impl PortResolver for TestResolver {
        fn port_world_position(&self, equipment: &str, port: &str) -> Option<Point3<f64>> {
            (equipment == "pump" && port == "outlet").then(|| Point3::new(1.0, 2.0, 3.0))
        }
    }

    #[test]
    fn test_point_resolves_to_itself() {
        let endpoint = Endpoint::Point(Point3::new(4.0, 5.0, 6.0));
        assert_eq!(
            endpoint.resolve(&TestResolver),
            Some(Point3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn test_port_resolves_through_resolver() {
        assert_eq!(
            Endpoint::port("pump", "outlet").resolve(&TestResolver),
            Some(Point3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(Endpoint::port("pump", "drain").resolve(&TestResolver), None);
    }
}
