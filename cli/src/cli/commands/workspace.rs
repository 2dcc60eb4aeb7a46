//! Workspace command handlers for the wsm CLI.
//!
//! Every handler builds a [`WorkspaceContext`] from the module snapshot,
//! runs one sync operation, and writes the snapshot back when the store
//! may have changed:
//! - [`handle_list`] - List workspaces (`wsm list`)
//! - [`handle_refresh`] - Reload change counts (`wsm refresh`)
//! - [`handle_delete`] - Delete a workspace (`wsm delete`)
//! - [`handle_update`] - Edit a workspace (`wsm update`)
//! - [`handle_show`] - Open a workspace page (`wsm show`)

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::{UpdateWorkspaceForm, WorkspaceApiClient};
use crate::config::{load_config, snapshot_path};
use crate::context::WorkspaceContext;
use crate::error::{ModuleError, Result};
use crate::navigate::BrowserNavigator;
use crate::notify::ConsoleNotifier;
use crate::workspace::{ModuleProps, SortBy, Workspace, WorkspaceError, WorkspaceList};

/// Arguments of `wsm update`.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub base_workspace: Option<String>,
}

/// Context together with the snapshot file it was read from.
struct Module {
    context: WorkspaceContext,
    snapshot_file: PathBuf,
}

impl Module {
    async fn open(snapshot: Option<PathBuf>, mount: bool) -> Result<Self> {
        let config = load_config()?;
        let snapshot_file = snapshot_path(&config, snapshot)?;
        let props = ModuleProps::load(&snapshot_file)?;
        let client = WorkspaceApiClient::new(&config.api)?;

        let notifier = Arc::new(ConsoleNotifier);
        let navigator = Arc::new(BrowserNavigator);
        let context = if mount {
            WorkspaceContext::mount(props, client, notifier, navigator).await
        } else {
            WorkspaceContext::new(props, client, notifier, navigator)
        };

        Ok(Self {
            context,
            snapshot_file,
        })
    }

    async fn save(&self) -> Result<()> {
        self.context.snapshot().await.save(&self.snapshot_file)?;
        tracing::debug!(path = %self.snapshot_file.display(), "Saved snapshot");
        Ok(())
    }
}

/// Handles the `wsm list` command.
///
/// Loads the change counts like the workspace page does on load, then
/// prints all workspaces in the requested order.
pub async fn handle_list(snapshot: Option<PathBuf>, sort: SortBy) -> Result<()> {
    let module = Module::open(snapshot, true).await?;
    let context = &module.context;
    context.set_sorting(sort).await;

    let workspaces = context.sorted_workspaces().await;
    if workspaces.is_empty() {
        println!("No workspaces.");
    } else {
        println!("Workspaces (sorted by {}):\n", context.sorting().await);
        for workspace in &workspaces {
            print_workspace(context, workspace);
        }
    }

    module.save().await
}

/// Handles the `wsm refresh` command.
pub async fn handle_refresh(snapshot: Option<PathBuf>) -> Result<()> {
    let module = Module::open(snapshot, false).await?;
    let before = module.context.workspaces().await;

    module.context.load_changes_counts().await;

    let after = module.context.workspaces().await;
    if before == after {
        println!("Change counts are up to date.");
    } else {
        let pending = after
            .values()
            .filter(|ws| ws.changes_counts.is_some_and(|c| c.total() > 0))
            .count();
        println!("Refreshed change counts, {pending} workspace(s) with pending changes.");
    }

    module.save().await
}

/// Handles the `wsm delete <name>` command.
///
/// # Errors
///
/// Returns an error if:
/// - The workspace is unknown or may not be managed by the user
/// - The backend refused or failed the deletion
pub async fn handle_delete(snapshot: Option<PathBuf>, name: &str, yes: bool) -> Result<()> {
    let module = Module::open(snapshot, false).await?;
    let context = &module.context;

    let workspace = context
        .workspace(name)
        .await
        .ok_or_else(|| WorkspaceError::NotFound(name.to_string()))?;
    ensure_manageable(&workspace, context.user_can_manage_internal_workspaces())?;

    context
        .set_selected_workspace_for_deletion(Some(name.to_string()))
        .await;

    if !yes {
        let workspaces = context.workspaces().await;
        let children = dependent_workspaces(&workspaces, name);
        if !children.is_empty() {
            println!(
                "These workspaces will be rebased on live: {}",
                children.join(", ")
            );
        }
        if !confirm(&format!("Delete workspace '{}'?", workspace.display_title()))? {
            context.set_selected_workspace_for_deletion(None).await;
            println!("Cancelled.");
            return Ok(());
        }
    }

    let success = context.delete_workspace(name).await;
    module.save().await?;

    if success {
        Ok(())
    } else {
        Err(ModuleError::OperationFailed("Deleting the workspace"))
    }
}

/// Handles the `wsm update <name>` command.
///
/// Unset arguments keep the current values of the workspace.
///
/// # Errors
///
/// Returns an error if:
/// - The workspace is unknown or may not be managed by the user
/// - Owner or base workspace are not among the selectable options
/// - The backend failed the update
pub async fn handle_update(snapshot: Option<PathBuf>, name: &str, args: UpdateArgs) -> Result<()> {
    let module = Module::open(snapshot, false).await?;
    let context = &module.context;

    let workspace = context
        .workspace(name)
        .await
        .ok_or_else(|| WorkspaceError::NotFound(name.to_string()))?;
    ensure_manageable(&workspace, context.user_can_manage_internal_workspaces())?;

    if let Some(base) = &args.base_workspace {
        if !context.base_workspace_options().contains_key(base) {
            return Err(WorkspaceError::InvalidBaseWorkspace(base.clone()).into());
        }
    }
    if let Some(owner) = &args.owner {
        if !context.owner_options().contains_key(owner) {
            return Err(WorkspaceError::InvalidOwner(owner.clone()).into());
        }
    }

    let form = build_update_form(&workspace, args, context.csrf_token());
    let updated = context.update_workspace(&form).await;

    match updated {
        Some(workspace) => {
            module.save().await?;
            print_workspace(context, &workspace);
            Ok(())
        }
        None => Err(ModuleError::OperationFailed("Updating the workspace")),
    }
}

/// Handles the `wsm show <name>` command.
pub async fn handle_show(snapshot: Option<PathBuf>, name: &str) -> Result<()> {
    let module = Module::open(snapshot, false).await?;

    if module.context.show_workspace(name) {
        Ok(())
    } else {
        Err(ModuleError::OperationFailed("Opening the workspace"))
    }
}

/// Refuses internal workspaces unless the user may manage them.
fn ensure_manageable(workspace: &Workspace, can_manage_internal: bool) -> Result<()> {
    if workspace.is_internal && !can_manage_internal {
        return Err(WorkspaceError::InternalNotManageable(workspace.name.clone()).into());
    }
    Ok(())
}

/// Names of the workspaces based on `name`.
fn dependent_workspaces<'a>(workspaces: &'a WorkspaceList, name: &str) -> Vec<&'a str> {
    workspaces
        .values()
        .filter(|ws| ws.base_workspace.as_ref().is_some_and(|base| base.name == name))
        .map(|ws| ws.name.as_str())
        .collect()
}

fn build_update_form(workspace: &Workspace, args: UpdateArgs, csrf_token: &str) -> UpdateWorkspaceForm {
    UpdateWorkspaceForm {
        workspace_name: workspace.name.clone(),
        title: args.title.unwrap_or_else(|| workspace.title.clone()),
        description: args.description.or_else(|| workspace.description.clone()),
        base_workspace: args
            .base_workspace
            .or_else(|| workspace.base_workspace.as_ref().map(|b| b.name.clone())),
        owner: args
            .owner
            .or_else(|| workspace.owner.as_ref().map(|o| o.name.clone())),
        csrf_token: csrf_token.to_string(),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_workspace(context: &WorkspaceContext, workspace: &Workspace) {
    let mut markers = Vec::new();
    if workspace.name == context.user_workspace() {
        markers.push("yours");
    }
    if workspace.is_personal {
        markers.push("personal");
    }
    if workspace.is_internal {
        markers.push("internal");
    }
    if workspace.is_stale {
        markers.push("stale");
    }

    if markers.is_empty() {
        println!("  {} ({})", workspace.display_title(), workspace.name);
    } else {
        println!(
            "  {} ({}) [{}]",
            workspace.display_title(),
            workspace.name,
            markers.join(", ")
        );
    }

    if let Some(base) = &workspace.base_workspace {
        let title = if base.title.is_empty() {
            &base.name
        } else {
            &base.title
        };
        println!("    Based on: {title}");
    }
    if let Some(owner) = &workspace.owner {
        let label = context
            .owner_options()
            .get(&owner.name)
            .unwrap_or(&owner.label);
        println!("    Owner: {label}");
    }
    if let Some(desc) = &workspace.description {
        println!("    Description: {desc}");
    }
    match workspace.changes_counts {
        Some(counts) if counts.total() > 0 => println!(
            "    Changes: +{} ~{} -{}",
            counts.added, counts.modified, counts.deleted
        ),
        Some(_) => println!("    Changes: none"),
        None => {}
    }
    if let Some(changed) = workspace
        .last_changed_timestamp
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
    {
        println!("    Last modified: {}", changed.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();
}
