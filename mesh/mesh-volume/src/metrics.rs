//! Volume and surface integration for a single triangle mesh.
//!
//! Positions must already be in world units (lossy scale applied). Both
//! quantities are exact for closed, non-self-intersecting meshes; for open or
//! overlapping geometry they are approximations that the reconciler is built
//! to tolerate.

// Triangle counts are converted to f64 for averaging; exact below 2^53.
#![allow(clippy::cast_precision_loss)]

use mesh_types::{IndexedMesh, Point3, Triangle, Vector3};
use tracing::warn;

/// Volume and surface of one mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshMetrics {
    /// Enclosed volume (always ≥ 0).
    pub volume: f64,
    /// Total triangle area (always ≥ 0).
    pub surface: f64,
}

/// Total surface area: the sum over faces of half the cross product
/// magnitude of two edges sharing a corner.
///
/// Exact for any triangulated surface, closed or not.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_volume::mesh_surface;
///
/// assert!((mesh_surface(&unit_cube()) - 6.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn mesh_surface(mesh: &IndexedMesh) -> f64 {
    resolved_triangles(mesh).iter().map(Triangle::area).sum()
}

/// Enclosed volume by tetrahedral decomposition.
///
/// The apex of every tetrahedron is the mean of all triangle-corner
/// occurrences (each vertex counted once per face using it), which keeps
/// the apex close to where the triangles are dense. Signed volumes are
/// summed and the absolute value returned, so winding only needs to be
/// consistent, not outward.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Vector3};
/// use mesh_volume::mesh_volume;
///
/// let box_mesh = unit_cube().scaled(&Vector3::new(2.0, 3.0, 4.0));
/// assert!((mesh_volume(&box_mesh) - 24.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn mesh_volume(mesh: &IndexedMesh) -> f64 {
    volume_of(&resolved_triangles(mesh))
}

/// Volume and surface in a single pass over the faces.
///
/// A mesh without faces yields zero for both.
#[must_use]
pub fn mesh_metrics(mesh: &IndexedMesh) -> MeshMetrics {
    let triangles = resolved_triangles(mesh);
    MeshMetrics {
        volume: volume_of(&triangles),
        surface: triangles.iter().map(Triangle::area).sum(),
    }
}

/// Mean of every triangle-corner occurrence. `None` without triangles.
#[must_use]
pub fn corner_centroid(triangles: &[Triangle]) -> Option<Point3<f64>> {
    if triangles.is_empty() {
        return None;
    }
    let sum = triangles
        .iter()
        .fold(Vector3::zeros(), |acc, t| acc + t.v0.coords + t.v1.coords + t.v2.coords);
    Some(Point3::from(sum / (triangles.len() * 3) as f64))
}

fn volume_of(triangles: &[Triangle]) -> f64 {
    let Some(apex) = corner_centroid(triangles) else {
        return 0.0;
    };
    triangles
        .iter()
        .map(|t| t.signed_volume_to(&apex))
        .sum::<f64>()
        .abs()
}

fn resolved_triangles(mesh: &IndexedMesh) -> Vec<Triangle> {
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    let skipped = mesh.face_count() - triangles.len();
    if skipped > 0 {
        warn!(
            skipped,
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            "Skipping faces with out-of-range vertex indices"
        );
    }
    triangles
}
