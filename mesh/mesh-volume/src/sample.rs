//! Per-mesh measurement used as reconciler input.

use std::fmt;

use mesh_types::{Aabb, IndexedMesh};

use crate::metrics::{MeshMetrics, mesh_metrics};

/// Volume, surface and world bounds of one candidate mesh.
///
/// Samples are immutable once built; `bounds_volume` is always derived from
/// `bounds`. Equality ignores the name: two samples with identical volume,
/// surface and bounds are the same geometry for reconciliation purposes.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Aabb, Point3};
/// use mesh_volume::MeshSample;
///
/// let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
/// let sample = MeshSample::from_mesh("hull", &unit_cube(), bounds);
/// assert!((sample.volume() - 1.0).abs() < 1e-9);
/// assert!((sample.bounds_volume() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct MeshSample {
    name: String,
    volume: f64,
    surface: f64,
    bounds: Aabb,
    bounds_volume: f64,
}

impl MeshSample {
    /// Build a sample from precomputed figures.
    ///
    /// Negative or non-finite volume/surface values are clamped to zero.
    #[must_use]
    pub fn new(name: impl Into<String>, volume: f64, surface: f64, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            volume: non_negative(volume),
            surface: non_negative(surface),
            bounds,
            bounds_volume: bounds.volume(),
        }
    }

    /// Measure `mesh` (already in world units) and pair it with the
    /// provider's world bounds.
    #[must_use]
    pub fn from_mesh(name: impl Into<String>, mesh: &IndexedMesh, bounds: Aabb) -> Self {
        Self::from_metrics(name, mesh_metrics(mesh), bounds)
    }

    /// Build a sample from computed [`MeshMetrics`].
    #[must_use]
    pub fn from_metrics(name: impl Into<String>, metrics: MeshMetrics, bounds: Aabb) -> Self {
        Self::new(name, metrics.volume, metrics.surface, bounds)
    }

    /// Identifier of the renderer or collider the mesh came from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosed mesh volume.
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// Mesh surface area.
    #[must_use]
    pub const fn surface(&self) -> f64 {
        self.surface
    }

    /// World-space bounds reported by the provider.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Volume of [`Self::bounds`].
    #[must_use]
    pub const fn bounds_volume(&self) -> f64 {
        self.bounds_volume
    }
}

impl PartialEq for MeshSample {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.volume == other.volume && self.surface == other.surface && self.bounds == other.bounds
    }
}

impl fmt::Display for MeshSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" : VOLUME={:.2}m3 - SURFACE={:.2}m2 - BOUNDS VOLUME={:.2}m3",
            self.name, self.volume, self.surface, self.bounds_volume
        )
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Point3;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0))
    }

    #[test]
    fn bounds_volume_is_derived() {
        let sample = MeshSample::new("a", 2.0, 3.0, unit_box());
        assert!((sample.bounds_volume() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equality_ignores_name() {
        let a = MeshSample::new("a", 2.0, 3.0, unit_box());
        let b = MeshSample::new("b", 2.0, 3.0, unit_box());
        let c = MeshSample::new("a", 2.0, 3.5, unit_box());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_figures_clamp_to_zero() {
        let sample = MeshSample::new("bad", -1.0, f64::NAN, unit_box());
        assert!(sample.volume().abs() < f64::EPSILON);
        assert!(sample.surface().abs() < f64::EPSILON);
    }

    #[test]
    fn display_lists_figures() {
        let sample = MeshSample::new("tank", 12.346, 30.0, unit_box());
        let text = sample.to_string();
        assert_eq!(
            text,
            "\"tank\" : VOLUME=12.35m3 - SURFACE=30.00m2 - BOUNDS VOLUME=6.00m3"
        );
    }
}
