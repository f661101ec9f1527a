//! Scene hierarchy.
//!
//! The [`Scene`] owns its nodes, keyed by ID, and remembers insertion order
//! so queries return components in a stable order.

use hashbrown::HashMap;
use mesh_types::{Aabb, Vector3};
use mesh_volume::{BakeMesh, ColliderGeometry, ColliderView, RendererGeometry, RendererView, SceneView};
use nalgebra::{Isometry3, Matrix4};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::node::{ColliderShape, Node, RendererMesh};
use crate::transform::transformed_bounds;

/// A hierarchy of nodes carrying renderers and colliders.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scene::{Node, Renderer, Scene};
///
/// let mut scene = Scene::new("rover");
/// scene.add_node(Node::new("chassis").with_renderer(Renderer::mesh(unit_cube()))).unwrap();
/// scene
///     .add_node(
///         Node::new("wheel")
///             .with_parent("chassis")
///             .with_translation(2.0, 0.0, 0.0),
///     )
///     .unwrap();
///
/// assert_eq!(scene.node_count(), 2);
/// assert_eq!(scene.descendants("chassis").len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    name: String,
    nodes: HashMap<String, Node>,
    order: Vec<String>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Node Management
    // =========================================================================

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A node with the same ID already exists
    /// - The specified parent node does not exist
    pub fn add_node(&mut self, node: Node) -> SceneResult<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(SceneError::DuplicateNode {
                id: node.id().to_string(),
            });
        }

        if let Some(parent_id) = node.parent_id()
            && !self.nodes.contains_key(parent_id)
        {
            return Err(SceneError::ParentNotFound {
                child_id: node.id().to_string(),
                parent_id: parent_id.to_string(),
            });
        }

        self.order.push(node.id().to_string());
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    /// Remove a node.
    ///
    /// Its children become roots. Returns the removed node, or `None` if not
    /// found.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        self.order.retain(|other| other != id);
        for other in self.nodes.values_mut() {
            if other.parent_id() == Some(id) {
                other.clear_parent();
            }
        }
        Some(node)
    }

    /// Get a node by ID.
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Check if a node exists.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Activate or deactivate a node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node does not exist.
    pub fn set_active(&mut self, id: &str, active: bool) -> SceneResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::NodeNotFound { id: id.to_string() })?;
        node.set_active(active);
        Ok(())
    }

    // =========================================================================
    // Hierarchy Queries
    // =========================================================================

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Direct children of a node.
    #[must_use]
    pub fn children(&self, parent_id: &str) -> Vec<&Node> {
        self.nodes()
            .filter(|n| n.parent_id() == Some(parent_id))
            .collect()
    }

    /// `root` and all of its descendants, in insertion order.
    ///
    /// Empty when `root` does not exist.
    #[must_use]
    pub fn descendants(&self, root: &str) -> Vec<&Node> {
        if !self.nodes.contains_key(root) {
            return Vec::new();
        }
        self.nodes()
            .filter(|n| self.ancestors_and_self(n.id()).any(|a| a.id() == root))
            .collect()
    }

    /// Whether the node and all of its ancestors are active.
    #[must_use]
    pub fn is_active_in_hierarchy(&self, id: &str) -> bool {
        self.nodes.contains_key(id) && self.ancestors_and_self(id).all(Node::is_active)
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// World rigid transform of a node, scale left out.
    #[must_use]
    pub fn world_isometry(&self, id: &str) -> Option<Isometry3<f64>> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        Some(
            self.ancestors_and_self(id)
                .fold(Isometry3::identity(), |acc, n| n.transform().isometry * acc),
        )
    }

    /// World transform of a node as a homogeneous matrix.
    #[must_use]
    pub fn world_matrix(&self, id: &str) -> Option<Matrix4<f64>> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        Some(
            self.ancestors_and_self(id)
                .fold(Matrix4::identity(), |acc, n| n.transform().to_homogeneous() * acc),
        )
    }

    /// Accumulated per-axis scale of a node.
    ///
    /// Like any lossy scale it ignores rotation between levels, so it is
    /// exact only when parents are not rotated relative to their children's
    /// scale axes.
    #[must_use]
    pub fn lossy_scale(&self, id: &str) -> Option<Vector3<f64>> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        Some(
            self.ancestors_and_self(id)
                .fold(Vector3::new(1.0, 1.0, 1.0), |acc, n| {
                    acc.component_mul(&n.transform().scale)
                }),
        )
    }

    /// Walk up the parent chain, bounded by the node count so a parent
    /// cycle cannot loop.
    fn ancestors_and_self<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        let mut next = self.nodes.get(id);
        std::iter::from_fn(move || {
            let node = next?;
            next = node.parent_id().and_then(|p| self.nodes.get(p));
            Some(node)
        })
        .take(self.nodes.len())
    }

    fn renderer_bounds(&self, node: &Node, mesh: &RendererMesh) -> Aabb {
        let matrix = self.world_matrix(node.id()).unwrap_or_else(Matrix4::identity);
        match mesh {
            RendererMesh::Static(mesh) => transformed_bounds(&matrix, mesh.positions()),
            RendererMesh::Deformable(mesh) => transformed_bounds(&matrix, mesh.bake().positions()),
            RendererMesh::Other => transformed_bounds(&matrix, std::iter::empty()),
        }
    }
}

impl SceneView for Scene {
    fn renderers(&self, root: &str) -> Vec<RendererView<'_>> {
        let views: Vec<RendererView<'_>> = self
            .descendants(root)
            .into_iter()
            .filter_map(|node| {
                let renderer = node.renderer()?;
                let geometry = match &renderer.mesh {
                    RendererMesh::Static(mesh) => RendererGeometry::Static(mesh),
                    RendererMesh::Deformable(mesh) => RendererGeometry::Deformable(mesh),
                    RendererMesh::Other => RendererGeometry::Other,
                };
                Some(RendererView {
                    name: node.id(),
                    geometry,
                    enabled: renderer.enabled,
                    visible: self.is_active_in_hierarchy(node.id()),
                    has_mesh_collider: node.has_mesh_collider(),
                    world_bounds: self.renderer_bounds(node, &renderer.mesh),
                    lossy_scale: self
                        .lossy_scale(node.id())
                        .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0)),
                })
            })
            .collect();
        debug!(root, renderers = views.len(), "Collected renderers");
        views
    }

    fn colliders(&self, root: &str) -> Vec<ColliderView<'_>> {
        self.descendants(root)
            .into_iter()
            .filter_map(|node| {
                let collider = node.collider()?;
                let matrix = self.world_matrix(node.id()).unwrap_or_else(Matrix4::identity);
                let (geometry, world_bounds) = match &collider.shape {
                    ColliderShape::Mesh(mesh) => (
                        ColliderGeometry::Mesh(mesh),
                        transformed_bounds(&matrix, mesh.positions()),
                    ),
                    shape => (
                        ColliderGeometry::Primitive(shape.primitive()?),
                        transformed_bounds(&matrix, shape.local_bounds().corners().iter()),
                    ),
                };
                Some(ColliderView {
                    name: node.id(),
                    geometry,
                    enabled: collider.enabled && self.is_active_in_hierarchy(node.id()),
                    world_bounds,
                    lossy_scale: self
                        .lossy_scale(node.id())
                        .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0)),
                })
            })
            .collect()
    }
}
