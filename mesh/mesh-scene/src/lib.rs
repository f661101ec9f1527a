//! Standalone scene graph for volume and surface estimation.
//!
//! A [`Scene`] is a hierarchy of [`Node`]s, each with a local transform
//! (rotation, translation and per-axis scale) and optional renderer and
//! collider components. The scene implements [`mesh_volume::SceneView`], so
//! it can be handed directly to the estimator.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Hosts with their
//! own scene graph implement [`mesh_volume::SceneView`] instead; this crate
//! covers tools, tests and offline pipelines.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_scene::{Collider, Node, Renderer, Scene};
//! use mesh_volume::{estimate_volume_and_surface, EstimateParams, Method};
//!
//! let mut scene = Scene::new("probe");
//! scene
//!     .add_node(Node::new("body").with_scale(4.0, 4.0, 4.0).with_renderer(Renderer::other()))
//!     .unwrap();
//! scene
//!     .add_node(
//!         Node::new("core")
//!             .with_parent("body")
//!             .with_renderer(Renderer::mesh(unit_cube())),
//!     )
//!     .unwrap();
//! scene
//!     .add_node(
//!         Node::new("shell")
//!             .with_parent("body")
//!             .with_translation(0.5, 0.5, 0.0)
//!             .with_renderer(Renderer::mesh(unit_cube())),
//!     )
//!     .unwrap();
//!
//! let report = estimate_volume_and_surface(&scene, "body", &[], &EstimateParams::default());
//! assert!(report.is_computed());
//! assert_eq!(report.best_method, Method::Mesh);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod node;
mod scene;
mod transform;

pub use error::{SceneError, SceneResult};
pub use node::{BlendShapeMesh, BlendTarget, Collider, ColliderShape, Node, Renderer, RendererMesh};
pub use scene::Scene;
pub use transform::Transform;
