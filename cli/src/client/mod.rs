//! Backend client for the workspace module.
//!
//! - [`WorkspaceApiClient`] - requests against the module endpoints
//! - [`WorkspaceEndpoints`] - endpoint URLs from the module data
//! - [`UpdateWorkspaceForm`] - multipart body of a workspace edit

pub mod api;
pub mod endpoints;
pub mod form;
pub mod middleware;

pub use api::{DeleteWorkspaceResponse, WorkspaceApiClient};
pub use endpoints::{prepare_workspace_action_url, WorkspaceEndpoints};
pub use form::UpdateWorkspaceForm;
