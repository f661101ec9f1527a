//! Scene nodes and the components they carry.
//!
//! A [`Node`] has a local [`Transform`], an optional parent, and at most one
//! renderer and one collider, the way game objects carry components.

use mesh_types::{Aabb, IndexedMesh, Point3, Vector3};
use mesh_volume::{BakeMesh, PrimitiveShape};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// A mesh whose pose is driven by blend-shape weights.
///
/// Positions are in the node's local units, like a static mesh; the node's
/// world transform and scale apply to the bake.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Vector3};
/// use mesh_scene::BlendShapeMesh;
/// use mesh_volume::BakeMesh;
///
/// // Inflate the top face of a cube.
/// let mut deltas = vec![Vector3::zeros(); 8];
/// for d in &mut deltas[4..] {
///     *d = Vector3::new(0.0, 0.0, 1.0);
/// }
/// let mut balloon = BlendShapeMesh::new(unit_cube());
/// let inflate = balloon.add_target("inflate", deltas);
/// balloon.set_weight(inflate, 0.5);
///
/// let baked = balloon.bake();
/// assert!((baked.vertices[6].position.z - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlendShapeMesh {
    base: IndexedMesh,
    targets: Vec<BlendTarget>,
}

/// One blend-shape target: a per-vertex offset and its current weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlendTarget {
    /// Target name.
    pub name: String,
    /// Offset of every base vertex at full weight.
    pub deltas: Vec<Vector3<f64>>,
    /// Current weight, usually in `0..=1`.
    pub weight: f64,
}

impl BlendShapeMesh {
    /// Wrap a rest-pose mesh without any target.
    #[must_use]
    pub fn new(base: IndexedMesh) -> Self {
        Self {
            base,
            targets: Vec::new(),
        }
    }

    /// Rest-pose mesh.
    #[must_use]
    pub fn base(&self) -> &IndexedMesh {
        &self.base
    }

    /// Blend-shape targets.
    #[must_use]
    pub fn targets(&self) -> &[BlendTarget] {
        &self.targets
    }

    /// Add a target at zero weight and return its index.
    ///
    /// A target whose delta count differs from the base vertex count is
    /// kept but never applied.
    pub fn add_target(&mut self, name: impl Into<String>, deltas: Vec<Vector3<f64>>) -> usize {
        let name = name.into();
        if deltas.len() != self.base.vertex_count() {
            warn!(
                target = %name,
                deltas = deltas.len(),
                vertices = self.base.vertex_count(),
                "Blend target does not match base mesh"
            );
        }
        self.targets.push(BlendTarget {
            name,
            deltas,
            weight: 0.0,
        });
        self.targets.len() - 1
    }

    /// Set the weight of target `index`. Unknown indices are ignored.
    pub fn set_weight(&mut self, index: usize, weight: f64) {
        if let Some(target) = self.targets.get_mut(index) {
            target.weight = weight;
        }
    }
}

impl BakeMesh for BlendShapeMesh {
    fn bake(&self) -> IndexedMesh {
        let vertex_count = self.base.vertex_count();
        let mut offsets = vec![Vector3::zeros(); vertex_count];
        for target in &self.targets {
            if target.deltas.len() != vertex_count || target.weight == 0.0 {
                continue;
            }
            for (offset, delta) in offsets.iter_mut().zip(&target.deltas) {
                *offset += delta * target.weight;
            }
        }

        let mut baked = self.base.clone();
        for (vertex, offset) in baked.vertices.iter_mut().zip(offsets) {
            vertex.position += offset;
        }
        baked
    }
}

/// Geometry drawn by a renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RendererMesh {
    /// Static mesh in local units.
    Static(IndexedMesh),
    /// Pose-dependent mesh.
    Deformable(BlendShapeMesh),
    /// Non-triangle renderer (particles, trails, sprites).
    Other,
}

/// A renderer component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Renderer {
    /// Drawn geometry.
    pub mesh: RendererMesh,
    /// Component enabled flag.
    pub enabled: bool,
}

impl Renderer {
    /// Enabled renderer drawing a static mesh.
    #[must_use]
    pub fn mesh(mesh: IndexedMesh) -> Self {
        Self {
            mesh: RendererMesh::Static(mesh),
            enabled: true,
        }
    }

    /// Enabled renderer drawing a deformable mesh.
    #[must_use]
    pub fn deformable(mesh: BlendShapeMesh) -> Self {
        Self {
            mesh: RendererMesh::Deformable(mesh),
            enabled: true,
        }
    }

    /// Enabled renderer without triangle geometry.
    #[must_use]
    pub fn other() -> Self {
        Self {
            mesh: RendererMesh::Other,
            enabled: true,
        }
    }

    /// Set the enabled flag (builder pattern).
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Shape of a collider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColliderShape {
    /// Triangle mesh in local units.
    Mesh(IndexedMesh),
    /// Box centered on the node.
    Box {
        /// Edge lengths.
        size: Vector3<f64>,
    },
    /// Sphere centered on the node.
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Capsule along the node's Y axis.
    Capsule {
        /// Radius of the caps.
        radius: f64,
        /// Total height, caps included.
        height: f64,
    },
}

impl ColliderShape {
    /// The primitive kind, `None` for a mesh.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveShape> {
        match self {
            Self::Mesh(_) => None,
            Self::Box { .. } => Some(PrimitiveShape::Box),
            Self::Sphere { .. } => Some(PrimitiveShape::Sphere),
            Self::Capsule { .. } => Some(PrimitiveShape::Capsule),
        }
    }

    /// Bounds in the node's local space.
    #[must_use]
    pub fn local_bounds(&self) -> Aabb {
        match self {
            Self::Mesh(mesh) => mesh.bounds(),
            Self::Box { size } => Aabb::from_center_size(Point3::origin(), *size),
            Self::Sphere { radius } => {
                Aabb::from_center_size(Point3::origin(), Vector3::repeat(2.0 * radius.abs()))
            }
            Self::Capsule { radius, height } => {
                let r = radius.abs();
                let half = (height.abs() * 0.5).max(r);
                Aabb::new(Point3::new(-r, -half, -r), Point3::new(r, half, r))
            }
        }
    }
}

/// A collider component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collider {
    /// Collision shape.
    pub shape: ColliderShape,
    /// Component enabled flag.
    pub enabled: bool,
}

impl Collider {
    /// Enabled collider with the given shape.
    #[must_use]
    pub const fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            enabled: true,
        }
    }

    /// Enabled mesh collider.
    #[must_use]
    pub const fn mesh(mesh: IndexedMesh) -> Self {
        Self::new(ColliderShape::Mesh(mesh))
    }

    /// Set the enabled flag (builder pattern).
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this is a mesh collider.
    #[must_use]
    pub const fn is_mesh(&self) -> bool {
        matches!(self.shape, ColliderShape::Mesh(_))
    }
}

/// A node of the scene hierarchy.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scene::{Collider, Node, Renderer};
///
/// let node = Node::new("tank")
///     .with_parent("hull")
///     .with_translation(0.0, 2.0, 0.0)
///     .with_scale(1.0, 3.0, 1.0)
///     .with_renderer(Renderer::mesh(unit_cube()))
///     .with_collider(Collider::mesh(unit_cube()));
///
/// assert_eq!(node.parent_id(), Some("hull"));
/// assert!(node.has_mesh_collider());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    id: String,
    parent_id: Option<String>,
    transform: Transform,
    renderer: Option<Renderer>,
    collider: Option<Collider>,
    active: bool,
}

impl Node {
    /// Create an active node with identity transform and no components.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            transform: Transform::identity(),
            renderer: None,
            collider: None,
            active: true,
        }
    }

    /// Node ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parent node ID.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub(crate) fn clear_parent(&mut self) {
        self.parent_id = None;
    }

    /// Local transform.
    #[must_use]
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Renderer component.
    #[must_use]
    pub const fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    /// Mutable renderer component.
    pub fn renderer_mut(&mut self) -> Option<&mut Renderer> {
        self.renderer.as_mut()
    }

    /// Collider component.
    #[must_use]
    pub const fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Mutable collider component.
    pub fn collider_mut(&mut self) -> Option<&mut Collider> {
        self.collider.as_mut()
    }

    /// Whether the node itself is active. Inactive nodes hide their subtree.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Set the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the node carries a mesh collider, enabled or not.
    #[must_use]
    pub fn has_mesh_collider(&self) -> bool {
        self.collider.as_ref().is_some_and(Collider::is_mesh)
    }

    /// Set the parent node ID (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the local transform (builder pattern).
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the translation (builder pattern).
    #[must_use]
    pub fn with_translation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.isometry.translation.vector = Vector3::new(x, y, z);
        self
    }

    /// Set the rotation from an axis and an angle in radians (builder
    /// pattern).
    #[must_use]
    pub fn with_rotation(mut self, axis: Vector3<f64>, angle: f64) -> Self {
        self.transform.set_rotation(axis, angle);
        self
    }

    /// Set the per-axis scale (builder pattern).
    #[must_use]
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.scale = Vector3::new(x, y, z);
        self
    }

    /// Attach a renderer (builder pattern).
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Attach a collider (builder pattern).
    #[must_use]
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Set the active flag (builder pattern).
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
