//! Error types for plant registry operations.

use thiserror::Error;

/// Result type for plant registry operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors that can occur while managing a plant registry.
#[derive(Debug, Error)]
pub enum PlantError {
    /// Equipment with the given id already exists.
    #[error("Equipment '{id}' already registered")]
    DuplicateEquipment {
        /// The duplicate equipment id.
        id: String,
    },

    /// Equipment with the given id was not found.
    #[error("Equipment '{id}' not registered")]
    EquipmentNotFound {
        /// The missing equipment id.
        id: String,
    },

    /// A scene operation failed.
    #[error("Scene error: {0}")]
    Scene(#[from] scene_graph::SceneError),
}
