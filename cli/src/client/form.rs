//! Form data sent when editing a workspace.

use reqwest::multipart::Form;

use crate::workspace::{UserName, WorkspaceName, WorkspaceTitle};

/// Prefix the backend controller expects for action arguments.
const ARGUMENT_PREFIX: &str = "moduleArguments";

/// Edit of a single workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWorkspaceForm {
    pub workspace_name: WorkspaceName,
    pub title: WorkspaceTitle,
    pub description: Option<String>,
    pub base_workspace: Option<WorkspaceName>,
    pub owner: Option<UserName>,
    pub csrf_token: String,
}

impl UpdateWorkspaceForm {
    /// Form fields in the order they are sent.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("__csrfToken".to_string(), self.csrf_token.clone()),
            (argument("workspaceName"), self.workspace_name.clone()),
            (argument("title"), self.title.clone()),
        ];
        if let Some(description) = &self.description {
            fields.push((argument("description"), description.clone()));
        }
        if let Some(base_workspace) = &self.base_workspace {
            fields.push((argument("baseWorkspace"), base_workspace.clone()));
        }
        if let Some(owner) = &self.owner {
            fields.push((argument("owner"), owner.clone()));
        }
        fields
    }

    /// Multipart body for the update request.
    pub fn to_multipart(&self) -> Form {
        self.fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
    }
}

fn argument(name: &str) -> String {
    format!("{ARGUMENT_PREFIX}[{name}]")
}
