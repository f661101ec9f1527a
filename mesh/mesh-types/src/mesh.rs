//! Indexed triangle mesh.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Nothing here assumes the mesh is closed: render and
/// collision geometry is frequently open, overlapping or split into pieces.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A mesh without vertices or without faces encloses nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Resolve a face into a [`Triangle`].
    ///
    /// Returns `None` if the face index or any of its vertex indices is out
    /// of range.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.position(i0)?,
            self.position(i1)?,
            self.position(i2)?,
        ))
    }

    /// Iterate over all faces whose indices resolve, as [`Triangle`]s.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter().map(|v| &v.position)
    }

    fn position(&self, index: u32) -> Option<Point3<f64>> {
        self.vertices.get(index as usize).map(|v| v.position)
    }

    /// Bounding box of all vertex positions (empty for a mesh without
    /// vertices).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions())
    }

    /// Return a copy with every vertex scaled component-wise around the
    /// origin. Faces are shared unchanged.
    ///
    /// ```
    /// use mesh_types::{unit_cube, Vector3};
    ///
    /// let slab = unit_cube().scaled(&Vector3::new(4.0, 2.0, 0.5));
    /// assert!((slab.bounds().volume() - 4.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn scaled(&self, scale: &Vector3<f64>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.scaled(scale)).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Translate mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }
}

/// Create a closed unit cube mesh from (0,0,0) to (1,1,1).
///
/// Eight shared vertices, twelve triangles, counter-clockwise winding seen
/// from outside.
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let vertices = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ]
    .into_iter()
    .map(Vertex::from)
    .collect();

    let faces = vec![
        // z = 0
        [0, 2, 1],
        [0, 3, 2],
        // z = 1
        [4, 5, 6],
        [4, 6, 7],
        // y = 0
        [0, 1, 5],
        [0, 5, 4],
        // y = 1
        [3, 7, 6],
        [3, 6, 2],
        // x = 0
        [0, 4, 7],
        [0, 7, 3],
        // x = 1
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mesh_is_empty() {
        let mut mesh = IndexedMesh::new();
        assert!(mesh.is_empty());

        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        assert!(mesh.is_empty());

        mesh.faces.push([0, 0, 0]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn out_of_range_faces_are_skipped() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]].map(Vertex::from);
        let mesh = IndexedMesh::from_parts(vertices.to_vec(), vec![[0, 1, 2], [0, 1, 7]]);

        assert!(mesh.triangle(1).is_none());
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn cube_bounds() {
        let bounds = unit_cube().bounds();
        assert_eq!(bounds.min, Point3::origin());
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_mesh_bounds() {
        assert!(IndexedMesh::new().bounds().is_empty());
    }

    #[test]
    fn cube_triangle_areas_sum_to_six() {
        let area: f64 = unit_cube().triangles().map(|t| t.area()).sum();
        assert_relative_eq!(area, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn mesh_translate() {
        let mut mesh = unit_cube();
        mesh.translate(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.bounds().min, Point3::new(1.0, 2.0, 3.0));
    }
}
