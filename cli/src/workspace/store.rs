//! In-memory workspace state.
//!
//! [`WorkspaceStore`] owns the list of workspaces together with the UI-local
//! sort and selection state. The merge methods apply one backend response
//! each: names that are not (or no longer) in the store are skipped.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::workspace::error::WorkspaceError;
use crate::workspace::types::{
    BaseWorkspace, ChangesCounts, SortBy, Workspace, WorkspaceList, WorkspaceName,
};

/// Workspaces plus sort and selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceStore {
    workspaces: WorkspaceList,
    sorting: SortBy,
    selected_for_deletion: Option<WorkspaceName>,
    selected_for_edit: Option<WorkspaceName>,
}

impl WorkspaceStore {
    /// Creates a store from the server-provided workspace list.
    #[must_use]
    pub fn new(workspaces: WorkspaceList) -> Self {
        Self {
            workspaces,
            ..Self::default()
        }
    }

    pub const fn workspaces(&self) -> &WorkspaceList {
        &self.workspaces
    }

    pub fn get(&self, name: &str) -> Option<&Workspace> {
        self.workspaces.get(name)
    }

    /// Replaces the whole workspace list.
    pub fn set_workspaces(&mut self, workspaces: WorkspaceList) {
        self.workspaces = workspaces;
    }

    pub const fn sorting(&self) -> SortBy {
        self.sorting
    }

    pub fn set_sorting(&mut self, sorting: SortBy) {
        self.sorting = sorting;
    }

    pub fn selected_for_deletion(&self) -> Option<&str> {
        self.selected_for_deletion.as_deref()
    }

    pub fn set_selected_for_deletion(&mut self, name: Option<WorkspaceName>) {
        self.selected_for_deletion = name;
    }

    pub fn selected_for_edit(&self) -> Option<&str> {
        self.selected_for_edit.as_deref()
    }

    pub fn set_selected_for_edit(&mut self, name: Option<WorkspaceName>) {
        self.selected_for_edit = name;
    }

    /// Workspaces in the order given by the current sort state.
    ///
    /// `LastModified` puts the most recent first and workspaces without a
    /// timestamp last; ties fall back to the name.
    pub fn sorted(&self) -> Vec<&Workspace> {
        let mut list: Vec<&Workspace> = self.workspaces.values().collect();
        match self.sorting {
            SortBy::LastModified => {
                list.sort_by(|a, b| {
                    b.last_changed_timestamp
                        .cmp(&a.last_changed_timestamp)
                        .then_with(|| a.name.cmp(&b.name))
                });
            }
            SortBy::Title => {
                list.sort_by_cached_key(|ws| (ws.display_title().to_lowercase(), ws.name.clone()));
            }
        }
        list
    }

    /// Sets the change counts of every known workspace that has an entry in
    /// `changes`. Returns how many workspaces were updated.
    pub fn apply_changes_counts(
        &mut self,
        changes: &HashMap<WorkspaceName, Option<ChangesCounts>>,
    ) -> usize {
        let mut updated = 0;
        for (name, workspace) in &mut self.workspaces {
            if let Some(Some(counts)) = changes.get(name) {
                workspace.changes_counts = Some(*counts);
                updated += 1;
            }
        }
        updated
    }

    /// Removes a deleted workspace and moves its former children onto live.
    ///
    /// Returns `true` if the workspace was still present.
    pub fn remove_workspace(&mut self, name: &str, rebased: &[Workspace]) -> bool {
        let removed = self.workspaces.remove(name).is_some();

        for child in rebased {
            if let Some(workspace) = self.workspaces.get_mut(&child.name) {
                workspace.base_workspace = Some(BaseWorkspace::live());
            }
        }

        if self.selected_for_deletion.as_deref() == Some(name) {
            self.selected_for_deletion = None;
        }
        if self.selected_for_edit.as_deref() == Some(name) {
            self.selected_for_edit = None;
        }

        removed
    }

    /// Overlays an update response onto the stored workspace.
    ///
    /// Only the fields present in `update` replace stored values. The change
    /// counts of the existing entry are kept since the update response does
    /// not carry them. `fallback_name` is used when the response has no
    /// `name`; unknown workspaces are inserted.
    pub fn merge_updated(
        &mut self,
        fallback_name: &str,
        update: Map<String, Value>,
    ) -> Result<&Workspace, WorkspaceError> {
        let name = update
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(fallback_name)
            .to_string();

        let existing = self.workspaces.get(&name);
        let changes_counts = existing.and_then(|ws| ws.changes_counts);
        let mut record = match existing {
            Some(ws) => serde_json::to_value(ws)
                .map_err(|e| WorkspaceError::InvalidRecord(e.to_string()))?,
            None => json!({ "name": &name }),
        };
        if let Value::Object(fields) = &mut record {
            fields.extend(update);
        }

        let mut merged: Workspace = serde_json::from_value(record)
            .map_err(|e| WorkspaceError::InvalidRecord(e.to_string()))?;
        merged.changes_counts = changes_counts;

        self.workspaces.insert(name.clone(), merged);
        Ok(&self.workspaces[&name])
    }
}
