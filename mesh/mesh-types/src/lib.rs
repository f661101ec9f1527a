//! Core mesh types for volume and surface estimation.
//!
//! This crate provides the foundational geometry shared by the estimation
//! engine and by scene providers:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box with union and overlap queries
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Servers
//! - Other game engines
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//! The estimation crates interpret them as world units (meters), so volumes
//! come out in m³ and surfaces in m².
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, Aabb, Point3};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.face_count(), 12);
//!
//! let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
//! let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
//! assert!((a.intersection_volume(&b) - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, unit_cube};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
