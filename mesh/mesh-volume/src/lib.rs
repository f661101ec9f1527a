//! Volume and surface estimation for rigid objects built from several meshes.
//!
//! Real objects rarely come as one closed manifold. Render geometry is split
//! into pieces that overlap or nest, collision geometry is a separate and
//! often coarser set of meshes, and parts may be hollow. This crate measures
//! every candidate mesh, reconciles each geometry family into one estimate,
//! and picks the most trustworthy of three methods:
//!
//! - **Bounds**: the axis-aligned box of the whole object;
//! - **Collider**: the reconciled mesh colliders;
//! - **Mesh**: the reconciled render meshes.
//!
//! # Pipeline
//!
//! 1. [`sample_scene`] collects candidate meshes through a [`SceneView`].
//! 2. [`mesh_metrics`] integrates volume and surface of each candidate.
//! 3. [`reconcile`] drops noise and buried pieces and sums the rest.
//! 4. [`select_method`] checks plausibility against the box and agreement
//!    between families.
//! 5. The [`VolumeSurfaceReport`] stores every figure; surfaces are reduced
//!    by the attachment allowance when read.
//!
//! [`estimate_volume_and_surface`] runs the whole pipeline.
//!
//! # Layer 0 Crate
//!
//! The scene graph is only seen through the [`SceneView`] trait, so this
//! crate has no engine dependency. The `mesh-scene` crate provides a
//! standalone implementation.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, Aabb, Point3};
//! use mesh_volume::{reconcile, select_method, MeshSample, Method, ReconcileParams,
//!     SelectParams, SelectionInput};
//!
//! let hull = MeshSample::from_mesh(
//!     "hull",
//!     &unit_cube(),
//!     Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0)),
//! );
//! let mesh = reconcile(&[hull], &ReconcileParams::default());
//!
//! let input = SelectionInput { bounds_volume: 8.0, mesh, ..SelectionInput::default() };
//! assert_eq!(select_method(&input, &SelectParams::default()), Method::Mesh);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod attach;
mod bounds;
mod error;
mod estimate;
mod format;
mod metrics;
mod params;
mod reconcile;
mod report;
mod sample;
mod sampler;
mod scene;
mod select;

pub use attach::{
    ATTACH_DISC_AREAS, AttachPoint, MIN_ENABLED_RADIUS, MIN_EXPOSED_FRACTION, attach_nodes_surface,
    subtract_attach_surface,
};
pub use bounds::{
    CYLINDER_SURFACE_FACTOR, CYLINDER_VOLUME_FACTOR, bounds_intersection_volume, bounds_surface,
    bounds_volume, cylinder_bounds_surface, cylinder_bounds_volume, subtree_bounds,
};
pub use error::{VolumeError, VolumeResult};
pub use estimate::estimate_volume_and_surface;
pub use format::{human_readable_surface, human_readable_volume};
pub use metrics::{MeshMetrics, corner_centroid, mesh_metrics, mesh_surface, mesh_volume};
pub use params::{EstimateParams, ReconcileParams, SelectParams};
pub use reconcile::{
    FamilyTotals, Rejection, intersected_volume, is_hollow_enclosure, judge, min_mesh_volume,
    reconcile,
};
pub use report::{RECORD_KEYS, VolumeSurface, VolumeSurfaceReport};
pub use sample::MeshSample;
pub use sampler::{SceneSamples, apply_lossy_scale, sample_mesh_colliders, sample_render_meshes, sample_scene};
pub use scene::{
    BakeMesh, ColliderGeometry, ColliderView, PrimitiveShape, RendererGeometry, RendererView,
    SceneView,
};
pub use select::{Method, RULES, Rule, SelectionInput, is_valid, matching_rule, select_method};
