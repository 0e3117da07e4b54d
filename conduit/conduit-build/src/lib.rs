//! Procedural conduit construction.
//!
//! [`ConduitBuilder`] turns a [`ConduitSpec`](conduit_types::ConduitSpec)
//! into renderable [`ConduitGeometry`](conduit_types::ConduitGeometry) under
//! one of three shape strategies:
//!
//! - **Straight** - a rigid pipe: one oriented cylinder with end flanges
//! - **Spline** - a flexible hose: an S-curved interpolating spline swept as
//!   a double-walled tube, with a gravity sag in its middle span
//! - **Transition** - a rectangular-to-circular duct through a right-angle
//!   bend, with stiffening ribs, reinforcement rings, flanges and supports
//!
//! Port references resolve through the caller's
//! [`PortResolver`](conduit_types::PortResolver); an unresolvable endpoint
//! or a degenerate span skips the connection instead of failing the scene.
//!
//! The crate also houses [`AlignmentValidator`], the tolerance comparator
//! used to confirm that independently computed endpoints actually coincide.
//!
//! # Example
//!
//! ```
//! use conduit_build::ConduitBuilder;
//! use conduit_types::{ConduitSpec, PathStrategy, PortResolver};
//! use nalgebra::Point3;
//!
//! struct NoPorts;
//! impl PortResolver for NoPorts {
//!     fn port_world_position(&self, _: &str, _: &str) -> Option<Point3<f64>> {
//!         None
//!     }
//! }
//!
//! let spec = ConduitSpec::builder("riser")
//!     .start_point(Point3::new(0.0, 0.0, 0.0))
//!     .end_point(Point3::new(0.0, 5.0, 0.0))
//!     .radius(0.2)
//!     .path_strategy(PathStrategy::Straight)
//!     .build()
//!     .unwrap();
//!
//! let geometry = ConduitBuilder::new(&NoPorts).build(&spec).unwrap().unwrap();
//! assert!((geometry.path_length() - 5.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod align;
mod builder;
mod duct;
mod hose;
mod straight;

pub use align::{AlignmentCheck, AlignmentValidator, DEFAULT_TOLERANCE};
pub use builder::ConduitBuilder;
