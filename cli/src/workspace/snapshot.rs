//! Snapshot of the module data the backend renders into the workspace page.
//!
//! The snapshot is the starting point of every command: it is read from a
//! JSON file, turned into a [`crate::context::WorkspaceContext`], and written
//! back after a command changed the store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::WorkspaceEndpoints;
use crate::error::Result;
use crate::workspace::error::WorkspaceError;
use crate::workspace::types::{UserLabel, UserName, WorkspaceList, WorkspaceName, WorkspaceTitle};

/// Data the workspace module is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProps {
    /// Personal workspace of the current user.
    pub user_workspace: WorkspaceName,

    #[serde(default)]
    pub workspace_list: WorkspaceList,

    /// Workspaces that may be chosen as a base, name to title.
    #[serde(default)]
    pub base_workspace_options: BTreeMap<WorkspaceName, WorkspaceTitle>,

    /// Users that may own a workspace, name to label.
    #[serde(default)]
    pub owner_options: BTreeMap<UserName, UserLabel>,

    pub endpoints: WorkspaceEndpoints,

    pub csrf_token: String,

    #[serde(default)]
    pub user_can_manage_internal_workspaces: bool,
}

impl ModuleProps {
    /// Reads a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::SnapshotMissing`] if the file does not exist
    /// and [`WorkspaceError::Corrupted`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WorkspaceError::SnapshotMissing(path.to_path_buf()).into());
        }

        let contents = fs::read_to_string(path)?;
        let props = serde_json::from_str(&contents)
            .map_err(|e| WorkspaceError::Corrupted(e.to_string()))?;

        Ok(props)
    }

    /// Writes the snapshot to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }
}
