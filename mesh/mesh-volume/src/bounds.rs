//! Bounding-box estimate of a node subtree.

use mesh_types::Aabb;

use crate::scene::SceneView;

/// Ratio of an inscribed cylinder's volume to its box (π/4).
pub const CYLINDER_VOLUME_FACTOR: f64 = 0.785_398;

/// Ratio of an inscribed cylinder's surface to its box surface, for boxes
/// whose height equals their diameter.
pub const CYLINDER_SURFACE_FACTOR: f64 = 0.954_93;

/// Union of the world bounds of every enabled, visible mesh renderer (static
/// or deformable) on `root` and its descendants.
///
/// Non-mesh renderers are ignored. With no matching renderer the result is
/// `Aabb::default()`, a zero-sized box at the origin.
#[must_use]
pub fn subtree_bounds<S: SceneView + ?Sized>(scene: &S, root: &str) -> Aabb {
    scene
        .renderers(root)
        .iter()
        .filter(|r| r.enabled && r.visible && r.geometry.is_mesh())
        .map(|r| r.world_bounds)
        .reduce(|mut acc, b| {
            acc.encapsulate(&b);
            acc
        })
        .unwrap_or_default()
}

/// Box volume: `width · height · depth`.
#[inline]
#[must_use]
pub fn bounds_volume(bounds: &Aabb) -> f64 {
    bounds.volume()
}

/// Box surface: `2 · (wh + wd + hd)`.
#[inline]
#[must_use]
pub fn bounds_surface(bounds: &Aabb) -> f64 {
    bounds.surface_area()
}

/// Volume of the overlap of two boxes, zero when disjoint along any axis.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
/// use mesh_volume::bounds_intersection_volume;
///
/// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
/// let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
/// assert!((bounds_intersection_volume(&a, &b) - 1.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn bounds_intersection_volume(a: &Aabb, b: &Aabb) -> f64 {
    a.intersection_volume(b)
}

/// Volume of the box scaled down to an inscribed cylinder, for round
/// objects.
#[must_use]
pub fn cylinder_bounds_volume(bounds: &Aabb) -> f64 {
    bounds.volume() * CYLINDER_VOLUME_FACTOR
}

/// Surface of the box scaled down to an inscribed cylinder, for round
/// objects.
#[must_use]
pub fn cylinder_bounds_surface(bounds: &Aabb) -> f64 {
    bounds.surface_area() * CYLINDER_SURFACE_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RendererGeometry, RendererView};
    use mesh_types::{IndexedMesh, Point3, Vector3};

    struct Renderers(Vec<(RendererGeometry<'static>, bool, Aabb)>);

    impl SceneView for Renderers {
        fn renderers(&self, _root: &str) -> Vec<RendererView<'_>> {
            self.0
                .iter()
                .map(|&(geometry, enabled, world_bounds)| RendererView {
                    name: "r",
                    geometry,
                    enabled,
                    visible: true,
                    has_mesh_collider: false,
                    world_bounds,
                    lossy_scale: Vector3::new(1.0, 1.0, 1.0),
                })
                .collect()
        }

        fn colliders(&self, _root: &str) -> Vec<crate::scene::ColliderView<'_>> {
            Vec::new()
        }
    }

    static EMPTY: IndexedMesh = IndexedMesh::new();

    fn boxed(min: [f64; 3], max: [f64; 3]) -> Aabb {
        Aabb::new(Point3::from(min), Point3::from(max))
    }

    #[test]
    fn no_renderers_gives_default_box() {
        let bounds = subtree_bounds(&Renderers(Vec::new()), "root");
        assert_eq!(bounds, Aabb::default());
        assert!(bounds_volume(&bounds).abs() < f64::EPSILON);
        assert!(bounds_surface(&bounds).abs() < f64::EPSILON);
    }

    #[test]
    fn union_skips_disabled_and_non_mesh() {
        let scene = Renderers(vec![
            (RendererGeometry::Static(&EMPTY), true, boxed([0.0; 3], [1.0; 3])),
            (RendererGeometry::Static(&EMPTY), true, boxed([2.0, 0.0, 0.0], [3.0, 1.0, 1.0])),
            (RendererGeometry::Static(&EMPTY), false, boxed([-50.0; 3], [50.0; 3])),
            (RendererGeometry::Other, true, boxed([0.0; 3], [100.0; 3])),
        ]);
        let bounds = subtree_bounds(&scene, "root");
        assert_eq!(bounds, boxed([0.0; 3], [3.0, 1.0, 1.0]));
        assert!((bounds_volume(&bounds) - 3.0).abs() < f64::EPSILON);
        assert!((bounds_surface(&bounds) - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = boxed([0.0, 0.0, 0.0], [4.0, 1.0, 2.0]);
        let b = boxed([3.0, -1.0, 1.0], [5.0, 0.5, 8.0]);
        let ab = bounds_intersection_volume(&a, &b);
        let ba = bounds_intersection_volume(&b, &a);
        assert!((ab - 0.5).abs() < 1e-12);
        assert!((ab - ba).abs() < f64::EPSILON);
        assert!((bounds_intersection_volume(&a, &a) - bounds_volume(&a)).abs() < 1e-12);
    }

    #[test]
    fn cylinder_factors() {
        let b = boxed([0.0; 3], [2.0; 3]);
        assert!((cylinder_bounds_volume(&b) - 8.0 * CYLINDER_VOLUME_FACTOR).abs() < 1e-12);
        assert!((cylinder_bounds_surface(&b) - 24.0 * CYLINDER_SURFACE_FACTOR).abs() < 1e-12);
    }
}
