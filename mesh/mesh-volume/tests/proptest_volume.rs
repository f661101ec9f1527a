//! Property-based tests for volume, surface and box arithmetic.
//!
//! Run with: cargo test -p mesh-volume -- proptest

#![allow(clippy::cast_possible_truncation)]

use approx::assert_relative_eq;
use mesh_types::{Aabb, IndexedMesh, Point3, Vector3, Vertex, unit_cube};
use mesh_volume::{
    FamilyTotals, MeshSample, ReconcileParams, SelectParams, SelectionInput, bounds_intersection_volume,
    bounds_volume, mesh_metrics, reconcile, select_method,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

fn arb_aabb() -> impl Strategy<Value = Aabb> {
    (arb_position(), arb_position()).prop_map(|(a, b)| Aabb::new(Point3::from(a), Point3::from(b)))
}

/// Random triangle soup with valid indices.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    (3..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(arb_position(), num_vertices);
        let faces = prop::collection::vec(prop::array::uniform3(0..num_vertices as u32), 0..=max_faces);
        (vertices, faces).prop_map(|(vertices, faces)| {
            IndexedMesh::from_parts(vertices.into_iter().map(Vertex::from).collect(), faces)
        })
    })
}

fn arb_sample() -> impl Strategy<Value = MeshSample> {
    (0.0..50.0f64, 0.0..200.0f64, arb_aabb()).prop_map(|(v, s, b)| MeshSample::new("s", v, s, b))
}

fn arb_family() -> impl Strategy<Value = FamilyTotals> {
    (0.0..200.0f64, 0.0..500.0f64, 0usize..6).prop_map(|(volume, surface, used_count)| FamilyTotals {
        volume,
        surface,
        used_count,
    })
}

// =============================================================================
// Property Tests: Mesh Metrics
// =============================================================================

proptest! {
    /// Volume and surface are never negative, whatever the triangle soup.
    #[test]
    fn metrics_are_non_negative(mesh in arb_mesh(20, 40)) {
        let m = mesh_metrics(&mesh);
        prop_assert!(m.volume >= 0.0 && m.volume.is_finite());
        prop_assert!(m.surface >= 0.0 && m.surface.is_finite());
    }

    /// Scaling a closed mesh by k scales volume by k³ and surface by k².
    #[test]
    fn scaling_closed_mesh(k in 0.1..20.0f64) {
        let cube = unit_cube();
        let scaled = cube.scaled(&Vector3::new(k, k, k));
        let base = mesh_metrics(&cube);
        let m = mesh_metrics(&scaled);
        prop_assert!((m.volume - base.volume * k.powi(3)).abs() <= 1e-9 * k.powi(3));
        prop_assert!((m.surface - base.surface * k.powi(2)).abs() <= 1e-9 * k.powi(2));
    }

    /// Non-uniform scale of a box multiplies its volume by the scale product.
    #[test]
    fn non_uniform_box_scale(sx in 0.1..10.0f64, sy in 0.1..10.0f64, sz in 0.1..10.0f64) {
        let m = mesh_metrics(&unit_cube().scaled(&Vector3::new(sx, sy, sz)));
        assert_relative_eq!(m.volume, sx * sy * sz, max_relative = 1e-9);
        assert_relative_eq!(m.surface, 2.0 * (sx * sy + sx * sz + sy * sz), max_relative = 1e-9);
    }

    /// Translating a closed mesh does not change its metrics.
    #[test]
    fn translation_invariance(offset in arb_position()) {
        let mut cube = unit_cube();
        cube.translate(Vector3::from(offset));
        let m = mesh_metrics(&cube);
        prop_assert!((m.volume - 1.0).abs() < 1e-6);
        prop_assert!((m.surface - 6.0).abs() < 1e-6);
    }
}

// =============================================================================
// Property Tests: Bounding Boxes
// =============================================================================

proptest! {
    /// Intersection volume is symmetric and bounded by both volumes.
    #[test]
    fn intersection_is_symmetric(a in arb_aabb(), b in arb_aabb()) {
        let ab = bounds_intersection_volume(&a, &b);
        let ba = bounds_intersection_volume(&b, &a);
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= bounds_volume(&a) + 1e-9);
        prop_assert!(ab <= bounds_volume(&b) + 1e-9);
    }

    /// A box intersected with itself is its own volume.
    #[test]
    fn self_intersection_is_volume(a in arb_aabb()) {
        assert_relative_eq!(bounds_intersection_volume(&a, &a), bounds_volume(&a), max_relative = 1e-12);
    }
}

// =============================================================================
// Property Tests: Reconciliation and Selection
// =============================================================================

proptest! {
    /// A single sample is always used as-is.
    #[test]
    fn single_sample_reconciles_to_itself(sample in arb_sample()) {
        let totals = reconcile(std::slice::from_ref(&sample), &ReconcileParams::default());
        prop_assert_eq!(totals.used_count, 1);
        prop_assert_eq!(totals.volume, sample.volume());
        prop_assert_eq!(totals.surface, sample.surface());
    }

    /// Totals never exceed the plain sums and the count never exceeds the
    /// number of samples.
    #[test]
    fn reconcile_is_bounded(samples in prop::collection::vec(arb_sample(), 0..12)) {
        let totals = reconcile(&samples, &ReconcileParams::default());
        let volume: f64 = samples.iter().map(MeshSample::volume).sum();
        let surface: f64 = samples.iter().map(MeshSample::surface).sum();
        prop_assert!(totals.used_count <= samples.len());
        prop_assert!(totals.volume <= volume + 1e-9);
        prop_assert!(totals.surface <= surface + 1e-9);
        prop_assert_eq!(totals.used_count == 0, samples.is_empty());
    }

    /// The selector always returns a concrete method.
    #[test]
    fn selector_is_total(bounds_volume in 0.0..300.0f64, collider in arb_family(), mesh in arb_family()) {
        let input = SelectionInput { bounds_volume, collider, mesh };
        prop_assert!(select_method(&input, &SelectParams::default()).is_concrete());
    }
}
