//! Full estimation pass over a scene subtree.

use tracing::{debug, info};

use crate::attach::{AttachPoint, attach_nodes_surface};
use crate::bounds::{bounds_surface, bounds_volume};
use crate::params::EstimateParams;
use crate::reconcile::{FamilyTotals, reconcile};
use crate::report::VolumeSurfaceReport;
use crate::sample::MeshSample;
use crate::sampler::sample_scene;
use crate::scene::SceneView;
use crate::select::{SelectionInput, matching_rule};

/// Estimate the volume and surface of the object rooted at `root`.
///
/// Samples render meshes and mesh colliders, reconciles each family,
/// measures the subtree bounding box and selects the most plausible method.
/// The returned report is always computed (its method is never
/// [`Method::Best`](crate::Method::Best)), even for an empty subtree, which
/// falls back to zero-sized bounds.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, IndexedMesh, Point3, Vector3, unit_cube};
/// use mesh_volume::{
///     estimate_volume_and_surface, EstimateParams, Method, RendererGeometry, RendererView,
///     SceneView, ColliderView,
/// };
///
/// struct Crate(IndexedMesh);
///
/// impl SceneView for Crate {
///     fn renderers(&self, _root: &str) -> Vec<RendererView<'_>> {
///         vec![RendererView {
///             name: "crate",
///             geometry: RendererGeometry::Static(&self.0),
///             enabled: true,
///             visible: true,
///             has_mesh_collider: false,
///             world_bounds: Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0)),
///             lossy_scale: Vector3::new(2.0, 2.0, 2.0),
///         }]
///     }
///
///     fn colliders(&self, _root: &str) -> Vec<ColliderView<'_>> {
///         Vec::new()
///     }
/// }
///
/// let report = estimate_volume_and_surface(&Crate(unit_cube()), "crate", &[], &EstimateParams::default());
/// // A solid box fills its own bounds, so the mesh estimate is not trusted.
/// assert_eq!(report.best_method, Method::Bounds);
/// assert!((report.mesh_volume - 8.0).abs() < 1e-9);
/// assert!((report.bounds_volume - 8.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn estimate_volume_and_surface<S: SceneView + ?Sized>(
    scene: &S,
    root: &str,
    attach_points: &[AttachPoint],
    params: &EstimateParams,
) -> VolumeSurfaceReport {
    let samples = sample_scene(scene, root, params);
    info!(
        root,
        render_meshes = samples.render.len(),
        mesh_colliders = samples.collider.len(),
        "Estimating volume and surface"
    );

    if params.log_all {
        log_samples("render", &samples.render);
        log_samples("collider", &samples.collider);
    }

    let mesh = reconcile(&samples.render, &params.reconcile);
    let collider = reconcile(&samples.collider, &params.reconcile);
    log_family("mesh", &mesh, params.log_all);
    log_family("collider", &collider, params.log_all);

    let input = SelectionInput {
        bounds_volume: bounds_volume(&samples.bounds),
        collider,
        mesh,
    };
    let rule = matching_rule(&input, &params.select);
    let best_method = (rule.outcome)(&input);

    let report = VolumeSurfaceReport {
        best_method,
        bounds_volume: input.bounds_volume,
        bounds_surface: bounds_surface(&samples.bounds),
        collider_volume: collider.volume,
        collider_surface: collider.surface,
        mesh_volume: mesh.volume,
        mesh_surface: mesh.surface,
        attach_nodes_surface: attach_nodes_surface(attach_points),
    };

    info!(
        root,
        method = %best_method,
        rule = rule.name,
        bounds_volume = report.bounds_volume,
        collider_volume = report.collider_volume,
        mesh_volume = report.mesh_volume,
        "Volume and surface estimated"
    );

    report
}

fn log_samples(family: &str, samples: &[MeshSample]) {
    for sample in samples {
        info!(family, "{sample}");
    }
}

fn log_family(family: &str, totals: &FamilyTotals, log_all: bool) {
    if log_all {
        info!(
            family,
            volume = totals.volume,
            surface = totals.surface,
            used = totals.used_count,
            "Family totals"
        );
    } else {
        debug!(
            family,
            volume = totals.volume,
            surface = totals.surface,
            used = totals.used_count,
            "Family totals"
        );
    }
}
