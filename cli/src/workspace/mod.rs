//! Workspace data and state for the workspace module.
//!
//! - [`types`] - Records exchanged with the backend
//! - [`store`] - In-memory workspace state and response merging
//! - [`snapshot`] - The module data the store is initialized from

pub mod error;
pub mod snapshot;
pub mod store;
pub mod types;

pub use error::WorkspaceError;
pub use snapshot::ModuleProps;
pub use store::WorkspaceStore;
pub use types::{
    ChangesCounts, FlashMessage, Severity, SortBy, UserLabel, UserName, Workspace, WorkspaceList,
    WorkspaceName, WorkspaceTitle,
};
