//! Error types for scene graph operations.

use thiserror::Error;

/// Result type for scene graph operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building or mutating a scene graph.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Node with the given id already exists.
    #[error("Node '{id}' already exists in the scene")]
    DuplicateNode {
        /// The duplicate node id.
        id: String,
    },

    /// Node with the given id was not found.
    #[error("Node '{id}' not found in the scene")]
    NodeNotFound {
        /// The missing node id.
        id: String,
    },

    /// Parent node does not exist.
    #[error("Parent '{parent_id}' does not exist for node '{id}'")]
    ParentNotFound {
        /// The child node id.
        id: String,
        /// The missing parent id.
        parent_id: String,
    },

    /// A port with the same name is already registered on this table.
    #[error("Port '{name}' is already registered")]
    DuplicatePort {
        /// The duplicate port name.
        name: String,
    },

    /// A world transform could not be inverted (zero scale somewhere in the
    /// ancestor chain).
    #[error("World transform of '{id}' is not invertible")]
    NonInvertibleTransform {
        /// The node whose world transform is singular.
        id: String,
    },
}
