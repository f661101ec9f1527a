//! Vertex type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex.
///
/// Only the position takes part in volume and surface integration, so no
/// per-vertex attributes are carried.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in mesh-local or world units.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a vertex at the given position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Create a vertex from raw coordinates.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Return a copy of this vertex scaled component-wise around the origin.
    ///
    /// ```
    /// use mesh_types::{Vertex, Vector3};
    ///
    /// let v = Vertex::from_coords(1.0, 1.0, 1.0).scaled(&Vector3::new(2.0, 3.0, 4.0));
    /// assert!((v.position.z - 4.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn scaled(&self, scale: &Vector3<f64>) -> Self {
        Self::new(Point3::from(self.position.coords.component_mul(scale)))
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from(c: [f64; 3]) -> Self {
        Self::from_coords(c[0], c[1], c[2])
    }
}
