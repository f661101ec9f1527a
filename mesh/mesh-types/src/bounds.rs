//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Represents a 3D box aligned with the coordinate axes, defined by
/// minimum and maximum corner points. A box whose extent is zero along any
/// axis is degenerate and has zero volume.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 3.0, 4.0),
/// );
///
/// assert!((aabb.volume() - 24.0).abs() < 1e-12);
/// assert!((aabb.surface_area() - 52.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two opposite corners.
    ///
    /// The corners are reordered per axis if `min > max`.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an AABB from its center and full size.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3, Vector3};
    ///
    /// let aabb = Aabb::from_center_size(Point3::origin(), Vector3::new(2.0, 2.0, 2.0));
    /// assert_eq!(aabb.min, Point3::new(-1.0, -1.0, -1.0));
    /// ```
    #[must_use]
    pub fn from_center_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create a zero-sized AABB located at a single point.
    #[inline]
    #[must_use]
    pub const fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create an inverted AABB, used as the identity for accumulation.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if the AABB is inverted (min > max on some axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Width, height and depth of the box. Zero for empty boxes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Volume of the box: `width · height · depth`.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Surface area of the box: `2 · (wh + wd + hd)`.
    #[inline]
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        let s = self.size();
        2.0 * s.z.mul_add(s.x, s.x.mul_add(s.y, s.y * s.z))
    }

    /// Volume shared by this box and `other`.
    ///
    /// Per axis the overlap is `max(0, min(max_a, max_b) - max(min_a, min_b))`;
    /// the result is the product of the three overlaps, so boxes that are
    /// disjoint (or only touch) along any axis share no volume.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0));
    /// let b = Aabb::new(Point3::new(2.0, 2.0, -1.0), Point3::new(6.0, 5.0, 1.0));
    /// assert!((a.intersection_volume(&b) - 4.0).abs() < 1e-12);
    /// assert!((b.intersection_volume(&a) - 4.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn intersection_volume(&self, other: &Self) -> f64 {
        let overlap = |a_min: f64, a_max: f64, b_min: f64, b_max: f64| {
            (a_max.min(b_max) - a_min.max(b_min)).max(0.0)
        };
        overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            * overlap(self.min.y, self.max.y, other.min.y, other.max.y)
            * overlap(self.min.z, self.max.z, other.min.z, other.max.z)
    }

    /// Compute the union (enclosing AABB) of two AABBs.
    ///
    /// Empty boxes are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow this box in place so that it also encloses `other`.
    pub fn encapsulate(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Expand the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Get the eight corner points of the AABB.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ]
    }
}

impl Default for Aabb {
    /// A zero-sized box at the origin: the bounds of "no geometry".
    fn default() -> Self {
        Self::from_point(Point3::origin())
    }
}
