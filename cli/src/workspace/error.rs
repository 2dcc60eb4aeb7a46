//! Workspace-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors specific to workspace operations.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Workspace with the given name is not in the store.
    #[error("Workspace '{0}' not found.")]
    NotFound(String),

    /// Internal workspaces need the manage-internal-workspaces capability.
    #[error("Workspace '{0}' is internal and you are not allowed to manage internal workspaces.")]
    InternalNotManageable(String),

    /// Requested base workspace is not one of the selectable options.
    #[error("'{0}' is not a selectable base workspace.")]
    InvalidBaseWorkspace(String),

    /// Requested owner is not one of the selectable users.
    #[error("'{0}' is not a selectable owner.")]
    InvalidOwner(String),

    /// No snapshot of the module data has been stored yet.
    #[error("No workspace snapshot found at {}. Save the module data from the backend there or pass --snapshot.", .0.display())]
    SnapshotMissing(PathBuf),

    /// The backend returned a workspace record that does not fit the model.
    #[error("Invalid workspace record from the backend: {0}")]
    InvalidRecord(String),

    /// Failed to deserialize the snapshot.
    #[error("Workspace snapshot corrupted: {0}")]
    Corrupted(String),
}
