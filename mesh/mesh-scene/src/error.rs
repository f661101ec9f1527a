//! Error types for scene operations.

use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building or editing a scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Node with the given ID already exists.
    #[error("Node '{id}' already exists in scene")]
    DuplicateNode {
        /// The duplicate node ID.
        id: String,
    },

    /// Parent node does not exist.
    #[error("Parent node '{parent_id}' does not exist for node '{child_id}'")]
    ParentNotFound {
        /// The child node ID.
        child_id: String,
        /// The missing parent ID.
        parent_id: String,
    },

    /// Node with the given ID was not found.
    #[error("Node '{id}' not found in scene")]
    NodeNotFound {
        /// The missing node ID.
        id: String,
    },
}
