//! Local node transforms.

use mesh_types::{Aabb, Point3, Vector3};
use nalgebra::{Isometry3, Matrix4, Unit, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rotation and translation followed by a per-axis scale.
///
/// Points are scaled first, then rotated and translated, so the scale is
/// expressed along the node's own axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Rigid part of the transform.
    pub isometry: Isometry3<f64>,
    /// Per-axis scale, applied before the isometry.
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            isometry: Isometry3::translation(x, y, z),
            ..Self::identity()
        }
    }

    /// Set the rotation from an axis and an angle in radians.
    ///
    /// A zero-length axis leaves the rotation unchanged.
    pub fn set_rotation(&mut self, axis: Vector3<f64>, angle: f64) {
        if let Some(axis) = Unit::try_new(axis, 1e-10) {
            self.isometry.rotation = UnitQuaternion::from_axis_angle(&axis, angle);
        }
    }

    /// Homogeneous matrix of the transform.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.isometry.to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a local point into the parent space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.isometry * Point3::from(point.coords.component_mul(&self.scale))
    }
}

/// Axis-aligned bounds of `points` after mapping them through `matrix`.
pub(crate) fn transformed_bounds<'a>(
    matrix: &Matrix4<f64>,
    points: impl Iterator<Item = &'a Point3<f64>>,
) -> Aabb {
    let mapped: Vec<Point3<f64>> = points.map(|p| matrix.transform_point(p)).collect();
    if mapped.is_empty() {
        return Aabb::from_point(matrix.transform_point(&Point3::origin()));
    }
    Aabb::from_points(mapped.iter())
}
