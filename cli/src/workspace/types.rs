//! Workspace data types as exchanged with the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of a workspace, unique within the backend.
pub type WorkspaceName = String;

/// Human readable title of a workspace.
pub type WorkspaceTitle = String;

/// Backend user name (owner reference).
pub type UserName = String;

/// Display label for a backend user.
pub type UserLabel = String;

/// All known workspaces keyed by name.
pub type WorkspaceList = BTreeMap<WorkspaceName, Workspace>;

/// Name of the canonical public workspace.
pub const LIVE_WORKSPACE_NAME: &str = "live";

/// Title of the canonical public workspace.
pub const LIVE_WORKSPACE_TITLE: &str = "Live";

/// Reference to the workspace another one is staged on top of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseWorkspace {
    pub name: WorkspaceName,
    #[serde(default)]
    pub title: WorkspaceTitle,
}

impl BaseWorkspace {
    /// The live workspace, which children of deleted workspaces are moved onto.
    #[must_use]
    pub fn live() -> Self {
        Self {
            name: LIVE_WORKSPACE_NAME.to_string(),
            title: LIVE_WORKSPACE_TITLE.to_string(),
        }
    }
}

/// Owner of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceOwner {
    pub name: UserName,
    #[serde(default)]
    pub label: UserLabel,
}

/// Number of pending changes in a workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesCounts {
    #[serde(default, alias = "new")]
    pub added: u32,
    #[serde(default, alias = "changed")]
    pub modified: u32,
    #[serde(default, alias = "removed")]
    pub deleted: u32,
}

impl ChangesCounts {
    /// Sum of all pending changes.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.added
            .saturating_add(self.modified)
            .saturating_add(self.deleted)
    }
}

/// A content staging workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique workspace name.
    pub name: WorkspaceName,

    #[serde(default)]
    pub title: WorkspaceTitle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<WorkspaceOwner>,

    /// Workspace this one is staged on top of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_workspace: Option<BaseWorkspace>,

    /// Pending changes, filled in lazily by the changes endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_counts: Option<ChangesCounts>,

    #[serde(default)]
    pub is_personal: bool,

    #[serde(default)]
    pub is_internal: bool,

    /// The base workspace has moved on since this one was last rebased.
    #[serde(default)]
    pub is_stale: bool,

    /// Unix timestamp (seconds) of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_timestamp: Option<i64>,
}

impl Workspace {
    /// Creates a bare workspace with only a name and title.
    #[must_use]
    pub fn new(name: impl Into<WorkspaceName>, title: impl Into<WorkspaceTitle>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: None,
            owner: None,
            base_workspace: None,
            changes_counts: None,
            is_personal: false,
            is_internal: false,
            is_stale: false,
            last_changed_timestamp: None,
        }
    }

    /// Title to show, falling back to the name for untitled workspaces.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// Ordering key for workspace listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Most recently changed first.
    #[default]
    LastModified,
    /// Alphabetical by title.
    Title,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastModified => write!(f, "last modified"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// Severity of a flash message returned by a backend action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "OK")]
    Ok,
    #[serde(alias = "Warning")]
    Warning,
    #[serde(alias = "Error")]
    Error,
    #[default]
    #[serde(other)]
    Info,
}

/// One-shot notification produced by a backend action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}
