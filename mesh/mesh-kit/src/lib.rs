//! Triangle mesh types and procedural primitives for conduit geometry.
//!
//! Everything a conduit shape strategy emits is ultimately a [`TriMesh`].
//! This crate owns the mesh representation and the generators shared by the
//! strategies:
//!
//! - [`cylinder_between`] - a cylinder spanning two world points, oriented by
//!   the minimal rotation from the canonical +Y axis
//! - [`tube`] - a circular sweep along a sampled centerline using
//!   rotation-minimizing frames
//! - [`ring_loft`] - stitch arbitrary equal-arity cross-section rings into a
//!   side mesh (the rectangle-to-circle morph is built on this)
//! - [`rect_section`] / [`circle_section`] - matched-parameter cross-section
//!   rings whose pointwise interpolation morphs one shape into the other
//! - [`disc`], [`torus_ring`], [`box_panel`] - flanges, reinforcement rings,
//!   duct bodies and support steel
//!
//! # Example
//!
//! ```
//! use mesh_kit::cylinder_between;
//! use nalgebra::Point3;
//!
//! let mesh = cylinder_between(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 5.0, 0.0),
//!     0.2,
//!     16,
//! )
//! .unwrap();
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod mesh;
mod primitive;
mod section;
mod sweep;

pub use error::{MeshError, MeshResult};
pub use mesh::{TriMesh, Vertex};
pub use primitive::{box_panel, cylinder_between, disc, orient_y_to, torus_ring};
pub use section::{circle_section, lerp_section, rect_section, section_extents};
pub use sweep::{ring_loft, tube};

// Math re-exports so downstream crates name one vector stack.
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
