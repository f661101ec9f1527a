//! Collection of candidate meshes from a scene subtree.
//!
//! Render and collision geometry are sampled as two independent families.
//! Every candidate is measured in world units (lossy scale applied to the raw
//! vertices), while its bounds are the provider's own world-space bounds, so
//! a sample's box and its metrics may come from slightly different
//! representations of the same object.

use std::borrow::Cow;

use mesh_types::{Aabb, IndexedMesh, Vector3};
use rayon::prelude::*;
use tracing::debug;

use crate::bounds::subtree_bounds;
use crate::metrics::mesh_metrics;
use crate::params::EstimateParams;
use crate::sample::MeshSample;
use crate::scene::{ColliderGeometry, RendererGeometry, SceneView};

/// Candidate samples gathered under one node.
#[derive(Debug, Clone, Default)]
pub struct SceneSamples {
    /// Render-mesh family.
    pub render: Vec<MeshSample>,
    /// Mesh-collider family.
    pub collider: Vec<MeshSample>,
    /// Bounds of all enabled mesh renderers in the subtree.
    pub bounds: Aabb,
}

/// Sample both geometry families and the subtree bounds under `root`.
///
/// Missing geometry is not an error: the lists are simply empty.
#[must_use]
pub fn sample_scene<S: SceneView + ?Sized>(
    scene: &S,
    root: &str,
    params: &EstimateParams,
) -> SceneSamples {
    SceneSamples {
        render: sample_render_meshes(scene, root, params),
        collider: sample_mesh_colliders(scene, root, params),
        bounds: subtree_bounds(scene, root),
    }
}

/// Measure every render-mesh candidate under `root`.
///
/// A renderer is a candidate when it is enabled and visible, draws a mesh,
/// and its node does not also carry a mesh collider (that mesh is counted
/// with the collider family instead). Deformable renderers are baked to
/// their current pose, or skipped when
/// [`EstimateParams::ignore_deformable_meshes`] is set.
#[must_use]
pub fn sample_render_meshes<S: SceneView + ?Sized>(
    scene: &S,
    root: &str,
    params: &EstimateParams,
) -> Vec<MeshSample> {
    let jobs: Vec<Job<'_>> = scene
        .renderers(root)
        .into_iter()
        .filter(|r| r.enabled && r.visible && !r.has_mesh_collider)
        .filter_map(|r| {
            let source = match r.geometry {
                RendererGeometry::Static(mesh) => Source::Scaled(mesh, r.lossy_scale),
                RendererGeometry::Deformable(_) if params.ignore_deformable_meshes => {
                    debug!(name = r.name, "Ignoring deformable renderer");
                    return None;
                }
                RendererGeometry::Deformable(baker) => Source::Baked(baker, r.lossy_scale),
                RendererGeometry::Other => return None,
            };
            Some(Job {
                name: r.name,
                source,
                bounds: r.world_bounds,
            })
        })
        .collect();

    measure(jobs, params.parallel)
}

/// Measure every enabled mesh collider under `root`.
///
/// Box, sphere and capsule colliders are never sampled: they are mostly
/// hitboxes or rough stand-ins and say little about the enclosed volume.
#[must_use]
pub fn sample_mesh_colliders<S: SceneView + ?Sized>(
    scene: &S,
    root: &str,
    params: &EstimateParams,
) -> Vec<MeshSample> {
    let jobs: Vec<Job<'_>> = scene
        .colliders(root)
        .into_iter()
        .filter(|c| c.enabled)
        .filter_map(|c| match c.geometry {
            ColliderGeometry::Mesh(mesh) => Some(Job {
                name: c.name,
                source: Source::Scaled(mesh, c.lossy_scale),
                bounds: c.world_bounds,
            }),
            ColliderGeometry::Primitive(shape) => {
                debug!(name = c.name, ?shape, "Ignoring primitive collider");
                None
            }
        })
        .collect();

    measure(jobs, params.parallel)
}

/// Copy of `mesh` with `scale` applied, borrowed when every component of
/// the scale is exactly 1.
#[must_use]
pub fn apply_lossy_scale<'a>(mesh: &'a IndexedMesh, scale: &Vector3<f64>) -> Cow<'a, IndexedMesh> {
    if *scale == Vector3::repeat(1.0) {
        Cow::Borrowed(mesh)
    } else {
        Cow::Owned(mesh.scaled(scale))
    }
}

enum Source<'a> {
    Scaled(&'a IndexedMesh, Vector3<f64>),
    Baked(&'a dyn crate::scene::BakeMesh, Vector3<f64>),
}

struct Job<'a> {
    name: &'a str,
    source: Source<'a>,
    bounds: Aabb,
}

impl Job<'_> {
    fn run(&self) -> MeshSample {
        let metrics = match &self.source {
            Source::Scaled(mesh, scale) => mesh_metrics(&apply_lossy_scale(mesh, scale)),
            Source::Baked(baker, scale) => {
                let baked = baker.bake();
                mesh_metrics(&apply_lossy_scale(&baked, scale))
            }
        };
        MeshSample::from_metrics(self.name, metrics, self.bounds)
    }
}

fn measure(jobs: Vec<Job<'_>>, parallel: bool) -> Vec<MeshSample> {
    if parallel && jobs.len() > 1 {
        jobs.par_iter().map(Job::run).collect()
    } else {
        jobs.iter().map(Job::run).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BakeMesh, ColliderView, PrimitiveShape, RendererView};
    use mesh_types::{Point3, unit_cube};

    struct Pose(IndexedMesh);

    impl BakeMesh for Pose {
        fn bake(&self) -> IndexedMesh {
            self.0.clone()
        }
    }

    struct Fixture {
        cube: IndexedMesh,
        pose: Pose,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cube: unit_cube(),
                pose: Pose(unit_cube().scaled(&Vector3::new(2.0, 2.0, 2.0))),
            }
        }
    }

    fn one() -> Vector3<f64> {
        Vector3::new(1.0, 1.0, 1.0)
    }

    fn box_at(x: f64) -> Aabb {
        Aabb::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, 1.0))
    }

    impl SceneView for Fixture {
        fn renderers(&self, root: &str) -> Vec<RendererView<'_>> {
            if root != "part" {
                return Vec::new();
            }
            let view = |name, geometry, enabled, visible, has_mesh_collider, scale| RendererView {
                name,
                geometry,
                enabled,
                visible,
                has_mesh_collider,
                world_bounds: box_at(0.0),
                lossy_scale: scale,
            };
            vec![
                view("hull", RendererGeometry::Static(&self.cube), true, true, false, Vector3::new(2.0, 1.0, 3.0)),
                view("hidden", RendererGeometry::Static(&self.cube), true, false, false, one()),
                view("disabled", RendererGeometry::Static(&self.cube), false, true, false, one()),
                view("shared", RendererGeometry::Static(&self.cube), true, true, true, one()),
                view("inflatable", RendererGeometry::Deformable(&self.pose), true, true, false, Vector3::new(1.0, 1.0, 0.5)),
                view("particles", RendererGeometry::Other, true, true, false, one()),
            ]
        }

        fn colliders(&self, root: &str) -> Vec<ColliderView<'_>> {
            if root != "part" {
                return Vec::new();
            }
            vec![
                ColliderView {
                    name: "shared",
                    geometry: ColliderGeometry::Mesh(&self.cube),
                    enabled: true,
                    world_bounds: box_at(5.0),
                    lossy_scale: Vector3::new(1.0, 1.0, 0.5),
                },
                ColliderView {
                    name: "ladder",
                    geometry: ColliderGeometry::Primitive(PrimitiveShape::Box),
                    enabled: true,
                    world_bounds: box_at(9.0),
                    lossy_scale: one(),
                },
                ColliderView {
                    name: "off",
                    geometry: ColliderGeometry::Mesh(&self.cube),
                    enabled: false,
                    world_bounds: box_at(9.0),
                    lossy_scale: one(),
                },
            ]
        }
    }

    fn names(samples: &[MeshSample]) -> Vec<&str> {
        samples.iter().map(MeshSample::name).collect()
    }

    #[test]
    fn render_candidates_follow_exclusion_rules() {
        let scene = Fixture::new();
        let samples = sample_render_meshes(&scene, "part", &EstimateParams::default());
        assert_eq!(names(&samples), vec!["hull", "inflatable"]);

        // Lossy scale applies to the metrics only, not to the bounds.
        assert!((samples[0].volume() - 6.0).abs() < 1e-9);
        assert!((samples[0].bounds_volume() - 1.0).abs() < 1e-12);

        // Baked pose (a 2-cube) gets the lossy scale too.
        assert!((samples[1].volume() - 4.0).abs() < 1e-9);
        assert!((samples[1].surface() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn deformables_can_be_ignored() {
        let scene = Fixture::new();
        let params = EstimateParams::default().ignore_deformable_meshes(true);
        let samples = sample_render_meshes(&scene, "part", &params);
        assert_eq!(names(&samples), vec!["hull"]);
    }

    #[test]
    fn only_enabled_mesh_colliders_are_sampled() {
        let scene = Fixture::new();
        let samples = sample_mesh_colliders(&scene, "part", &EstimateParams::default());
        assert_eq!(names(&samples), vec!["shared"]);
        assert!((samples[0].volume() - 0.5).abs() < 1e-9);
        assert_eq!(*samples[0].bounds(), box_at(5.0));
    }

    #[test]
    fn parallel_matches_sequential() {
        let scene = Fixture::new();
        let par = sample_scene(&scene, "part", &EstimateParams::default().parallel(true));
        let seq = sample_scene(&scene, "part", &EstimateParams::default().parallel(false));
        assert_eq!(par.render, seq.render);
        assert_eq!(par.collider, seq.collider);
        assert_eq!(names(&par.render), names(&seq.render));
    }

    #[test]
    fn unknown_root_is_empty() {
        let scene = Fixture::new();
        let samples = sample_scene(&scene, "missing", &EstimateParams::default());
        assert!(samples.render.is_empty());
        assert!(samples.collider.is_empty());
        assert_eq!(samples.bounds, Aabb::default());
    }

    #[test]
    fn neutral_scale_borrows() {
        let cube = unit_cube();
        assert!(matches!(apply_lossy_scale(&cube, &one()), Cow::Borrowed(_)));
        assert!(matches!(
            apply_lossy_scale(&cube, &Vector3::new(2.0, 0.5, 1.0)),
            Cow::Owned(_)
        ));
        assert!(matches!(
            apply_lossy_scale(&cube, &Vector3::new(2.0, 1.0, 1.0)),
            Cow::Owned(_)
        ));
    }

    struct Squashed(IndexedMesh);

    impl SceneView for Squashed {
        fn renderers(&self, _root: &str) -> Vec<RendererView<'_>> {
            vec![RendererView {
                name: "panel",
                geometry: RendererGeometry::Static(&self.0),
                enabled: true,
                visible: true,
                has_mesh_collider: false,
                world_bounds: box_at(0.0),
                lossy_scale: Vector3::new(2.0, 0.5, 1.0),
            }]
        }

        fn colliders(&self, _root: &str) -> Vec<ColliderView<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn volume_preserving_scale_still_changes_surface() {
        let samples = sample_render_meshes(&Squashed(unit_cube()), "panel", &EstimateParams::default());
        assert!((samples[0].volume() - 1.0).abs() < 1e-9);
        // 2 * (2 * 0.5 + 2 * 1 + 0.5 * 1)
        assert!((samples[0].surface() - 7.0).abs() < 1e-9);
    }
}
