//! Types shared by conduit construction and its callers.
//!
//! A conduit is one requested connection between two pieces of equipment.
//! This crate owns its vocabulary:
//!
//! - [`ConduitSpec`] - the immutable description of a requested connection
//!   (endpoints, radius, color, shape strategy, flow display), built through
//!   a validating builder
//! - [`Endpoint`] / [`PortResolver`] - explicit world points or named port
//!   references resolved through whatever registry the host provides
//! - [`ConduitSegment`] / [`ConduitGeometry`] - the renderable result: an
//!   ordered, immutable list of placed primitives with their meshes
//! - [`ConduitError`] - everything that can go wrong, none of it fatal to
//!   the hosting scene
//!
//! # Example
//!
//! ```
//! use conduit_types::{ConduitSpec, PathStrategy};
//! use nalgebra::Point3;
//!
//! let spec = ConduitSpec::builder("pump_to_tower")
//!     .start_point(Point3::new(0.0, 1.0, 0.0))
//!     .end_port("tower", "inlet")
//!     .radius(0.2)
//!     .path_strategy(PathStrategy::Straight)
//!     .build()
//!     .unwrap();
//! assert_eq!(spec.id(), "pump_to_tower");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod color;
mod error;
mod geometry;
mod resolve;
mod spec;

pub use color::Color;
pub use error::{ConduitError, ConduitResult};
pub use geometry::{Attachment, ConduitGeometry, ConduitSegment, SegmentRole, SegmentShape};
pub use resolve::{Endpoint, PortResolver};
pub use spec::{ConduitSpec, ConduitSpecBuilder, FlowDirection, PathStrategy, TransitionParams};
