//! Exterior/interior view switching for equipment instances.
//!
//! Every equipment instance shows one of two states: its exterior shell or
//! its interior mechanical layout. [`ViewStateController`] owns that state
//! and flips the visibility of the involved scene groups - exterior shell,
//! lazily built interior, translucent ghost overlays, ground signage, and
//! external conduits tagged with the states they belong to.
//!
//! Transitions are synchronous, total and idempotent; there is no animation
//! and nothing here can fail in a way that leaves the scene half-switched.
//!
//! # Example
//!
//! ```
//! use scene_graph::{SceneGraph, TransformNode};
//! use scene_view::{ViewState, ViewStateController};
//!
//! let mut scene = SceneGraph::new();
//! scene.add_node(TransformNode::new("boiler/shell")).unwrap();
//!
//! let mut view = ViewStateController::new("boiler/shell").with_interior_builder(|scene| {
//!     scene.add_node(TransformNode::new("boiler/interior").with_visible(false))?;
//!     Ok("boiler/interior".to_string())
//! });
//!
//! view.show_interior(&mut scene).unwrap();
//! assert_eq!(view.state(), ViewState::Interior);
//! assert!(!scene.get("boiler/shell").unwrap().is_visible());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod controller;
mod state;

pub use controller::ViewStateController;
pub use state::{ViewState, VisibleIn};
