//! Named anchor points and per-equipment port tables.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;

/// A named, oriented anchor in a node's local frame.
///
/// Ports are where conduits start and end: a pump's outlet, a tank's inlet,
/// one of eight hose stubs around a manifold. The local direction defaults
/// to +Y, the canonical axis of all placed cylinders.
#[derive(Debug, Clone)]
pub struct Port {
    name: String,
    node: String,
    local_offset: Vector3<f64>,
    local_direction: Vector3<f64>,
}

impl Port {
    /// Create a port on `node` at the given local offset.
    #[must_use]
    pub fn new(name: impl Into<String>, node: impl Into<String>, local_offset: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            local_offset,
            local_direction: Vector3::y(),
        }
    }

    /// Set the outward direction in the owner's local frame (builder
    /// pattern).
    #[must_use]
    pub fn with_direction(mut self, local_direction: Vector3<f64>) -> Self {
        self.local_direction = local_direction;
        self
    }

    /// Port name, unique within its table.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the owning node.
    #[must_use]
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Anchor offset in the owner's local frame.
    #[must_use]
    pub const fn local_offset(&self) -> &Vector3<f64> {
        &self.local_offset
    }

    /// Outward direction in the owner's local frame.
    #[must_use]
    pub const fn local_direction(&self) -> &Vector3<f64> {
        &self.local_direction
    }
}

/// Insertion-ordered registry of an equipment's ports.
///
/// Ports are registered explicitly while the equipment is built; lookups
/// resolve through the owning node's world matrix. A missing name is
/// reported with a logged warning and `None` - callers supply a fallback
/// point or skip the connection, nothing throws.
///
/// # Example
///
/// ```
/// use scene_graph::{Port, PortTable, SceneGraph, TransformNode};
/// use nalgebra::Vector3;
///
/// let mut scene = SceneGraph::new();
/// scene.add_node(TransformNode::new("pump")).unwrap();
///
/// let mut ports = PortTable::new();
/// ports.register(Port::new("outlet", "pump", Vector3::new(0.0, 1.8, 0.0))).unwrap();
///
/// assert!(ports.world_position(&scene, "outlet").is_some());
/// assert!(ports.world_position(&scene, "drain").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortTable {
    ports: Vec<Port>,
    index: HashMap<String, usize>,
}

impl PortTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a port.
    ///
    /// # Errors
    ///
    /// Returns an error if a port with the same name is already registered.
    pub fn register(&mut self, port: Port) -> SceneResult<()> {
        if self.index.contains_key(port.name()) {
            return Err(SceneError::DuplicatePort {
                name: port.name().to_string(),
            });
        }
        self.index.insert(port.name().to_string(), self.ports.len());
        self.ports.push(port);
        Ok(())
    }

    /// Get a port by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Port> {
        self.index.get(name).map(|&i| &self.ports[i])
    }

    /// Ports in registration order.
    #[must_use]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Number of registered ports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the table has no ports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// World position of a named port.
    ///
    /// Returns `None` (with a logged warning) if the port is not registered
    /// or its owning node is gone from the scene.
    #[must_use]
    pub fn world_position(&self, scene: &SceneGraph, name: &str) -> Option<Point3<f64>> {
        let Some(port) = self.get(name) else {
            warn!(port = name, "Missing port");
            return None;
        };
        let Some(matrix) = scene.world_matrix(port.node()) else {
            warn!(port = name, node = port.node(), "Missing port owner node");
            return None;
        };
        Some(matrix.transform_point(&Point3::from(port.local_offset)))
    }

    /// World direction of a named port, normalized.
    ///
    /// Returns `None` (with a logged warning) under the same conditions as
    /// [`PortTable::world_position`], or if scaling collapses the direction.
    #[must_use]
    pub fn world_direction(&self, scene: &SceneGraph, name: &str) -> Option<Vector3<f64>> {
        let Some(port) = self.get(name) else {
            warn!(port = name, "Missing port");
            return None;
        };
        let matrix = scene.world_matrix(port.node())?;
        matrix
            .transform_vector(&port.local_direction)
            .try_normalize(f64::EPSILON)
    }

    /// World positions of every port, in registration order.
    ///
    /// Ports whose owner node is missing are skipped with a warning, so the
    /// result can be shorter than [`PortTable::len`].
    #[must_use]
    pub fn all_world_positions(&self, scene: &SceneGraph) -> Vec<Point3<f64>> {
        self.ports
            .iter()
            .filter_map(|port| self.world_position(scene, port.name()))
            .collect()
    }

    /// Compatibility fallback: scan the subtree under `root` for a node whose
    /// id ends with `name` and return that node's world origin.
    ///
    /// This exists for scenes assembled before explicit port registration and
    /// must not be relied on for new connections: it matches by naming
    /// convention (case-sensitive id suffix, first hit in depth-first child
    /// order) and knows nothing about port directions.
    #[must_use]
    pub fn resolve_by_node_scan(
        scene: &SceneGraph,
        root: &str,
        name: &str,
    ) -> Option<Point3<f64>> {
        for id in scene.descendants(root) {
            if id.ends_with(name) {
                return scene.world_position(&id);
            }
        }
        warn!(port = name, root, "Missing port (node scan fallback)");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TransformNode;
    use approx::assert_relative_eq;

    fn scene_with_scaled_tank() -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene
            .add_node(TransformNode::new("hall").with_position(50.0, 0.0, 0.0))
            .unwrap();
        scene
            .add_node(
                TransformNode::new("hall/tank")
                    .with_parent("hall")
                    .with_position(0.0, 2.0, 0.0)
                    .with_euler(0.0, std::f64::consts::FRAC_PI_2, 0.0)
                    .with_scale(0.5),
            )
            .unwrap();
        scene
    }

    #[test]
    fn test_register_and_lookup() {
        let mut ports = PortTable::new();
        ports
            .register(Port::new("inlet", "tank", Vector3::new(1.0, 0.0, 0.0)))
            .unwrap();

        assert_eq!(ports.len(), 1);
        assert_eq!(ports.get("inlet").map(Port::node), Some("tank"));
        assert!(ports.get("outlet").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut ports = PortTable::new();
        ports
            .register(Port::new("inlet", "tank", Vector3::zeros()))
            .unwrap();
        assert!(matches!(
            ports.register(Port::new("inlet", "other", Vector3::zeros())),
            Err(SceneError::DuplicatePort { .. })
        ));
    }

    #[test]
    fn test_world_position_under_transform() {
        let scene = scene_with_scaled_tank();
        let mut ports = PortTable::new();
        ports
            .register(Port::new("top", "hall/tank", Vector3::new(0.0, 4.0, 0.0)))
            .unwrap();

        let p = ports.world_position(&scene, "top").unwrap();
        // Scale halves the offset; the rotation leaves +Y alone.
        assert_relative_eq!(p.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_world_position_round_trip() {
        let scene = scene_with_scaled_tank();
        let mut ports = PortTable::new();
        let offset = Vector3::new(1.25, -0.5, 3.0);
        ports
            .register(Port::new("side", "hall/tank", offset))
            .unwrap();

        let world = ports.world_position(&scene, "side").unwrap();
        let inverse = scene
            .world_matrix("hall/tank")
            .unwrap()
            .try_inverse()
            .unwrap();
        let local = inverse.transform_point(&world);
        assert_relative_eq!((local.coords - offset).norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_world_direction_is_normalized() {
        let scene = scene_with_scaled_tank();
        let mut ports = PortTable::new();
        ports
            .register(
                Port::new("side", "hall/tank", Vector3::zeros())
                    .with_direction(Vector3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();

        let dir = ports.world_direction(&scene, "side").unwrap();
        assert_relative_eq!(dir.norm(), 1.0, epsilon = 1e-12);
        // Local +X turned 90 degrees about Y maps to world -Z.
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_port_is_none_not_panic() {
        let scene = scene_with_scaled_tank();
        let ports = PortTable::new();
        assert!(ports.world_position(&scene, "nope").is_none());
    }

    #[test]
    fn test_missing_owner_node_is_none() {
        let scene = SceneGraph::new();
        let mut ports = PortTable::new();
        ports
            .register(Port::new("inlet", "gone", Vector3::zeros()))
            .unwrap();
        assert!(ports.world_position(&scene, "inlet").is_none());
    }

    #[test]
    fn test_all_world_positions_ordered() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("manifold")).unwrap();

        let mut ports = PortTable::new();
        for i in 0..8 {
            let angle = std::f64::consts::TAU * f64::from(i) / 8.0;
            ports
                .register(Port::new(
                    format!("stub_{i}"),
                    "manifold",
                    Vector3::new(angle.cos() * 2.0, 0.0, angle.sin() * 2.0),
                ))
                .unwrap();
        }

        let positions = ports.all_world_positions(&scene);
        assert_eq!(positions.len(), 8);
        assert_relative_eq!(positions[0].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(positions[2].z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_node_scan_fallback() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("filter")).unwrap();
        scene
            .add_node(
                TransformNode::new("filter/outlet")
                    .with_parent("filter")
                    .with_position(0.0, 7.5, 0.0),
            )
            .unwrap();

        let p = PortTable::resolve_by_node_scan(&scene, "filter", "outlet").unwrap();
        assert_relative_eq!(p.y, 7.5, epsilon = 1e-12);

        assert!(PortTable::resolve_by_node_scan(&scene, "filter", "drain").is_none());
    }
}
