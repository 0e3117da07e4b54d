//! Transform hierarchy and named anchor points for plant scenes.
//!
//! Every piece of equipment in a plant scene is modeled in its own local
//! frame and nested under translations, rotations and scales (room → shell →
//! tank → nozzle). This crate owns the machinery that makes positions
//! comparable across those frames:
//!
//! - [`SceneGraph`] / [`TransformNode`] - a flat-arena transform tree with
//!   world-matrix composition, visibility flags and cycle-safe validation
//! - [`Port`] / [`PortTable`] - named anchors in a node's local frame,
//!   resolved to world positions and directions
//!
//! # Example
//!
//! ```
//! use scene_graph::{Port, PortTable, SceneGraph, TransformNode};
//! use nalgebra::Vector3;
//!
//! let mut scene = SceneGraph::new();
//! scene.add_node(TransformNode::new("tank").with_position(10.0, 0.0, 5.0)).unwrap();
//! scene
//!     .add_node(TransformNode::new("tank/nozzle").with_parent("tank").with_position(0.0, 4.0, 0.0))
//!     .unwrap();
//!
//! let mut ports = PortTable::new();
//! ports.register(Port::new("outlet", "tank/nozzle", Vector3::new(0.0, 0.5, 0.0))).unwrap();
//!
//! let world = ports.world_position(&scene, "outlet").unwrap();
//! assert_eq!((world.x, world.y, world.z), (10.0, 4.5, 5.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod graph;
mod node;
mod port;

pub use error::{SceneError, SceneResult};
pub use graph::{SceneGraph, SceneValidation};
pub use node::TransformNode;
pub use port::{Port, PortTable};
