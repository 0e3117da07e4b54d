//! One registered piece of equipment.

use nalgebra::Point3;
use scene_graph::{PortTable, SceneGraph, SceneResult};
use scene_view::ViewStateController;

/// An equipment instance: root node, port table, view controller.
///
/// This is the contract each equipment exposes to the orchestration/UI
/// layer: get the root, resolve ports to world positions, flip between
/// exterior and interior.
#[derive(Debug)]
pub struct EquipmentInstance {
    id: String,
    root: String,
    ports: PortTable,
    view: ViewStateController,
}

impl EquipmentInstance {
    /// Assemble an instance.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        root: impl Into<String>,
        ports: PortTable,
        view: ViewStateController,
    ) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            ports,
            view,
        }
    }

    /// Equipment id within the registry.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the root scene node.
    #[must_use]
    pub fn root_node(&self) -> &str {
        &self.root
    }

    /// The port table.
    #[must_use]
    pub const fn ports(&self) -> &PortTable {
        &self.ports
    }

    /// The view controller.
    #[must_use]
    pub const fn view(&self) -> &ViewStateController {
        &self.view
    }

    /// Mutable view controller, for tagging conduits and signage.
    pub fn view_mut(&mut self) -> &mut ViewStateController {
        &mut self.view
    }

    /// World position of a named port, or `None` with a logged warning.
    #[must_use]
    pub fn port_world_position(&self, scene: &SceneGraph, name: &str) -> Option<Point3<f64>> {
        self.ports.world_position(scene, name)
    }

    /// World position of a named port, falling back to the compatibility
    /// node scan under this equipment's root when the table misses.
    #[must_use]
    pub fn port_world_position_with_fallback(
        &self,
        scene: &SceneGraph,
        name: &str,
    ) -> Option<Point3<f64>> {
        self.ports
            .world_position(scene, name)
            .or_else(|| PortTable::resolve_by_node_scan(scene, &self.root, name))
    }

    /// World positions of every port in registration order, for equipment
    /// with repeated/indexed ports.
    #[must_use]
    pub fn all_port_world_positions(&self, scene: &SceneGraph) -> Vec<Point3<f64>> {
        self.ports.all_world_positions(scene)
    }

    /// Switch this instance to its interior view.
    ///
    /// # Errors
    ///
    /// Propagates an interior-builder failure; the state is unchanged then.
    pub fn show_interior(&mut self, scene: &mut SceneGraph) -> SceneResult<()> {
        self.view.show_interior(scene)
    }

    /// Switch this instance to its exterior view.
    ///
    /// # Errors
    ///
    /// Never fails today; kept symmetric with
    /// [`EquipmentInstance::show_interior`].
    pub fn show_exterior(&mut self, scene: &mut SceneGraph) -> SceneResult<()> {
        self.view.show_exterior(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use scene_graph::{Port, TransformNode};
    use scene_view::ViewState;

    fn instance() -> (SceneGraph, EquipmentInstance) {
        let mut scene = SceneGraph::new();
        scene
            .add_node(TransformNode::new("tank").with_position(10.0, 0.0, 0.0))
            .unwrap();
        scene
            .add_node(
                TransformNode::new("tank/drain")
                    .with_parent("tank")
                    .with_position(0.0, -1.0, 0.0),
            )
            .unwrap();

        let mut ports = PortTable::new();
        ports
            .register(Port::new("inlet", "tank", Vector3::new(0.0, 3.0, 0.0)))
            .unwrap();

        let equipment = EquipmentInstance::new(
            "tank_b",
            "tank",
            ports,
            ViewStateController::new("tank"),
        );
        (scene, equipment)
    }

    #[test]
    fn test_port_resolution() {
        let (scene, equipment) = instance();
        let p = equipment.port_world_position(&scene, "inlet").unwrap();
        assert_eq!((p.x, p.y, p.z), (10.0, 3.0, 0.0));
        assert!(equipment.port_world_position(&scene, "drain").is_none());
    }

    #[test]
    fn test_fallback_scan_resolves_unregistered_port() {
        let (scene, equipment) = instance();
        let p = equipment
            .port_world_position_with_fallback(&scene, "drain")
            .unwrap();
        assert_eq!((p.x, p.y, p.z), (10.0, -1.0, 0.0));
    }

    #[test]
    fn test_view_toggles() {
        let (mut scene, mut equipment) = instance();
        equipment.show_interior(&mut scene).unwrap();
        assert_eq!(equipment.view().state(), ViewState::Interior);
        equipment.show_exterior(&mut scene).unwrap();
        assert_eq!(equipment.view().state(), ViewState::Exterior);
    }
}
