//! The plant-wide equipment registry.

use conduit_types::{Attachment, ConduitGeometry, PortResolver};
use hashbrown::HashMap;
use nalgebra::Point3;
use scene_graph::{SceneGraph, TransformNode};
use tracing::{debug, warn};

use crate::equipment::EquipmentInstance;
use crate::error::{PlantError, PlantResult};

/// All equipment of one plant, plus the injected world root.
///
/// Cross-equipment geometry (conduits) needs a frame-independent place to
/// hang; instead of a process-wide scene singleton, whoever assembles the
/// plant passes the world-root node id in here once and every attachment
/// goes through it.
#[derive(Debug)]
pub struct PlantRegistry {
    world_root: String,
    equipment: HashMap<String, EquipmentInstance>,
}

impl PlantRegistry {
    /// Create a registry rooted at the given world node.
    #[must_use]
    pub fn new(world_root: impl Into<String>) -> Self {
        Self {
            world_root: world_root.into(),
            equipment: HashMap::new(),
        }
    }

    /// Id of the injected world-root node.
    #[must_use]
    pub fn world_root(&self) -> &str {
        &self.world_root
    }

    /// Register an equipment instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken.
    pub fn add_equipment(&mut self, equipment: EquipmentInstance) -> PlantResult<()> {
        if self.equipment.contains_key(equipment.id()) {
            return Err(PlantError::DuplicateEquipment {
                id: equipment.id().to_string(),
            });
        }
        self.equipment
            .insert(equipment.id().to_string(), equipment);
        Ok(())
    }

    /// Get an equipment instance.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EquipmentInstance> {
        self.equipment.get(id)
    }

    /// Get a mutable equipment instance.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut EquipmentInstance> {
        self.equipment.get_mut(id)
    }

    /// Number of registered equipment instances.
    #[must_use]
    pub fn equipment_count(&self) -> usize {
        self.equipment.len()
    }

    /// World position of `port` on `equipment`, or `None` with a logged
    /// warning.
    #[must_use]
    pub fn world_position_of(
        &self,
        scene: &SceneGraph,
        equipment: &str,
        port: &str,
    ) -> Option<Point3<f64>> {
        let Some(instance) = self.equipment.get(equipment) else {
            warn!(equipment, port, "Unknown equipment in port lookup");
            return None;
        };
        instance.port_world_position(scene, port)
    }

    /// A [`PortResolver`] view over this registry and a scene, for the
    /// conduit builder.
    #[must_use]
    pub const fn resolver<'a>(&'a self, scene: &'a SceneGraph) -> PlantPortResolver<'a> {
        PlantPortResolver {
            registry: self,
            scene,
        }
    }

    /// Attach a built conduit to the scene and return its group node id.
    ///
    /// [`Attachment::WorldRoot`] hangs the group under the world root, which
    /// leaves world-space geometry untouched. [`Attachment::EquipmentLocal`]
    /// hangs it under the named equipment's root through a counter-transform
    /// anchor, so the equipment's transform is not applied a second time to
    /// the already-world-space mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment target does not exist or the
    /// group id is already taken.
    pub fn attach_conduit(
        &mut self,
        scene: &mut SceneGraph,
        geometry: &ConduitGeometry,
    ) -> PlantResult<String> {
        let group_id = format!("conduits/{}", geometry.id());
        match geometry.attachment() {
            Attachment::WorldRoot => {
                scene.add_node(
                    TransformNode::new(group_id.clone()).with_parent(self.world_root.clone()),
                )?;
            }
            Attachment::EquipmentLocal(equipment_id) => {
                let root = self
                    .equipment
                    .get(equipment_id.as_str())
                    .ok_or_else(|| PlantError::EquipmentNotFound {
                        id: equipment_id.clone(),
                    })?
                    .root_node()
                    .to_string();
                scene.add_world_anchor(&root, group_id.clone())?;
            }
        }
        debug!(
            conduit = geometry.id(),
            group = %group_id,
            segments = geometry.segments().len(),
            "Conduit attached"
        );
        Ok(group_id)
    }
}

/// Borrowed resolver view handed to the conduit builder.
#[derive(Debug, Clone, Copy)]
pub struct PlantPortResolver<'a> {
    registry: &'a PlantRegistry,
    scene: &'a SceneGraph,
}

impl PortResolver for PlantPortResolver<'_> {
    fn port_world_position(&self, equipment: &str, port: &str) -> Option<Point3<f64>> {
        self.registry
            .world_position_of(self.scene, equipment, port)
    }
}
