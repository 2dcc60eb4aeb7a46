//! Backend endpoints of the workspace module.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Substring of an action URL that stands for the workspace name.
pub const WORKSPACE_PLACEHOLDER: &str = "---workspace---";

/// Characters escaped in a workspace name, same set as `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// URLs of the backend actions, absolute or relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEndpoints {
    pub get_changes: String,
    /// Contains [`WORKSPACE_PLACEHOLDER`].
    pub delete_workspace: String,
    pub update_workspace: String,
    /// Contains [`WORKSPACE_PLACEHOLDER`].
    pub show_workspace: String,
}

/// Substitutes the URL-encoded workspace name into an action URL.
pub fn prepare_workspace_action_url(endpoint: &str, workspace_name: &str) -> String {
    let encoded = utf8_percent_encode(workspace_name, COMPONENT).to_string();
    endpoint.replace(WORKSPACE_PLACEHOLDER, &encoded)
}
