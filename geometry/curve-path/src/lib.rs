//! Interpolating curves and sweep frames for conduit routing.
//!
//! This crate provides the path machinery every conduit shape strategy is
//! built on:
//!
//! - [`CatmullRom3`] - an interpolating spline through a sequence of control
//!   points, with exact endpoint interpolation
//! - [`PathFrame`] / [`parallel_transport_frames`] - rotation-minimizing
//!   frames along a polyline, so swept cross-sections never twist
//! - [`SampledPath`] - a sampled centerline with an arc-length table
//!
//! # Example
//!
//! ```
//! use curve_path::CatmullRom3;
//! use nalgebra::Point3;
//!
//! let curve = CatmullRom3::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 2.0, 0.0),
//!     Point3::new(3.0, 1.0, 0.0),
//! ])
//! .unwrap();
//!
//! let samples = curve.sample(32).unwrap();
//! assert_eq!(samples.len(), 32);
//! assert_eq!(samples[0], Point3::new(0.0, 0.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod catmull;
mod error;
mod frame;
mod sampled;

pub use catmull::CatmullRom3;
pub use error::{CurveError, CurveResult};
pub use frame::{PathFrame, parallel_transport_frames};
pub use sampled::SampledPath;
