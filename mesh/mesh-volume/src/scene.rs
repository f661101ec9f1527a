//! Read-only view of the host scene graph.
//!
//! The estimator never walks a concrete scene type. A host exposes the
//! renderers and colliders found under a node through [`SceneView`], and the
//! geometry core only ever sees these borrowed views. Tests can implement the
//! trait over plain vectors.

use mesh_types::{Aabb, IndexedMesh, Vector3};

/// On-demand baking of pose-dependent geometry.
///
/// Implemented by deformable (skinned, morphed) meshes. Baking is only
/// requested when the sampler actually needs the geometry.
///
/// Baked positions are in the renderer's local units, like a static mesh:
/// the sampler applies the view's lossy scale afterwards. Hosts whose bakes
/// already carry the scale report a unit lossy scale for that renderer.
pub trait BakeMesh: Send + Sync {
    /// Snapshot of the mesh in its current pose, in local units.
    fn bake(&self) -> IndexedMesh;
}

/// Geometry behind a renderer.
#[derive(Clone, Copy)]
pub enum RendererGeometry<'a> {
    /// A static mesh in local units; the sampler applies the lossy scale.
    Static(&'a IndexedMesh),
    /// A pose-dependent mesh, baked when sampled; the sampler applies the
    /// lossy scale to the bake.
    Deformable(&'a dyn BakeMesh),
    /// A renderer without triangle geometry (particles, lines, sprites).
    Other,
}

impl std::fmt::Debug for RendererGeometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(mesh) => f
                .debug_tuple("Static")
                .field(&format_args!("{} faces", mesh.face_count()))
                .finish(),
            Self::Deformable(_) => f.write_str("Deformable"),
            Self::Other => f.write_str("Other"),
        }
    }
}

impl RendererGeometry<'_> {
    /// Whether the renderer draws triangle geometry at all.
    #[must_use]
    pub const fn is_mesh(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// One renderer found under the queried node.
#[derive(Debug, Clone, Copy)]
pub struct RendererView<'a> {
    /// Name of the node carrying the renderer.
    pub name: &'a str,
    /// The rendered geometry.
    pub geometry: RendererGeometry<'a>,
    /// Renderer component enabled flag.
    pub enabled: bool,
    /// Whether the node is active/visible in the hierarchy.
    pub visible: bool,
    /// The same node also carries a mesh collider.
    pub has_mesh_collider: bool,
    /// World-space bounds as reported by the host.
    pub world_bounds: Aabb,
    /// Accumulated non-uniform world scale of the node.
    pub lossy_scale: Vector3<f64>,
}

/// Primitive collider shapes, never used as volume evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveShape {
    /// Box collider.
    Box,
    /// Sphere collider.
    Sphere,
    /// Capsule collider.
    Capsule,
}

/// Geometry behind a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderGeometry<'a> {
    /// Triangle mesh collider in local units.
    Mesh(&'a IndexedMesh),
    /// Analytic primitive.
    Primitive(PrimitiveShape),
}

/// One collider found under the queried node.
#[derive(Debug, Clone, Copy)]
pub struct ColliderView<'a> {
    /// Name of the node carrying the collider.
    pub name: &'a str,
    /// The collision geometry.
    pub geometry: ColliderGeometry<'a>,
    /// Collider component enabled flag (and node active).
    pub enabled: bool,
    /// World-space bounds as reported by the host.
    pub world_bounds: Aabb,
    /// Accumulated non-uniform world scale of the node.
    pub lossy_scale: Vector3<f64>,
}

/// Capability interface over a host scene graph.
///
/// Both queries return every component on `root` and all of its
/// descendants, in a stable order. An unknown `root` yields empty lists.
pub trait SceneView {
    /// Renderers on `root` and its descendants.
    fn renderers(&self, root: &str) -> Vec<RendererView<'_>>;

    /// Colliders on `root` and its descendants.
    fn colliders(&self, root: &str) -> Vec<ColliderView<'_>>;
}

impl<T: SceneView + ?Sized> SceneView for &T {
    fn renderers(&self, root: &str) -> Vec<RendererView<'_>> {
        (**self).renderers(root)
    }

    fn colliders(&self, root: &str) -> Vec<ColliderView<'_>> {
        (**self).colliders(root)
    }
}
