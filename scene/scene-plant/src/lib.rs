//! Equipment instances and the plant-wide registry.
//!
//! The glue between the transform layer, the port tables, the view states
//! and the conduit builder:
//!
//! - [`EquipmentInstance`] - one piece of equipment: a root node, its port
//!   table, and its exterior/interior view controller
//! - [`PlantRegistry`] - all equipment of a plant plus an explicitly
//!   injected world-root node. Resolves ports across equipment for conduit
//!   specs and attaches built conduits either under the world root or under
//!   one equipment's local group
//!
//! The registry is plain data handed around by the orchestration code;
//! there is no process-wide scene singleton to reach for.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use scene_graph::{Port, PortTable, SceneGraph, TransformNode};
//! use scene_plant::{EquipmentInstance, PlantRegistry};
//! use scene_view::ViewStateController;
//!
//! let mut scene = SceneGraph::new();
//! scene.add_node(TransformNode::new("world")).unwrap();
//! scene.add_node(TransformNode::new("pump").with_position(4.0, 0.0, 0.0)).unwrap();
//!
//! let mut ports = PortTable::new();
//! ports.register(Port::new("outlet", "pump", Vector3::new(0.0, 1.2, 0.0))).unwrap();
//!
//! let mut registry = PlantRegistry::new("world");
//! registry
//!     .add_equipment(EquipmentInstance::new("pump_a", "pump", ports, ViewStateController::new("pump")))
//!     .unwrap();
//!
//! let outlet = registry.world_position_of(&scene, "pump_a", "outlet").unwrap();
//! assert_eq!((outlet.x, outlet.y), (4.0, 1.2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod equipment;
mod error;
mod registry;

pub use equipment::EquipmentInstance;
pub use error::{PlantError, PlantResult};
pub use registry::{PlantPortResolver, PlantRegistry};
