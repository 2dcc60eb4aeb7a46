//! Workspace context: the state store plus the operations that sync it with
//! the backend.
//!
//! A [`WorkspaceContext`] is built once from the module data and handed to
//! every consumer by reference. Each sync operation performs a single
//! request and folds the response into the store. Failures are logged,
//! reported through the [`Notifier`] and leave the store untouched; the
//! operations themselves never return an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::{UpdateWorkspaceForm, WorkspaceApiClient, WorkspaceEndpoints};
use crate::error::Result;
use crate::navigate::Navigator;
use crate::notify::{dispatch_flash_messages, Notifier};
use crate::workspace::{
    ModuleProps, SortBy, UserLabel, UserName, Workspace, WorkspaceList, WorkspaceName,
    WorkspaceStore, WorkspaceTitle,
};

/// Shared workspace state and its sync operations.
pub struct WorkspaceContext {
    user_workspace: WorkspaceName,
    base_workspace_options: BTreeMap<WorkspaceName, WorkspaceTitle>,
    owner_options: BTreeMap<UserName, UserLabel>,
    endpoints: WorkspaceEndpoints,
    csrf_token: String,
    user_can_manage_internal_workspaces: bool,
    store: RwLock<WorkspaceStore>,
    client: WorkspaceApiClient,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl WorkspaceContext {
    /// Creates a context without contacting the backend.
    pub fn new(
        props: ModuleProps,
        client: WorkspaceApiClient,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            user_workspace: props.user_workspace,
            base_workspace_options: props.base_workspace_options,
            owner_options: props.owner_options,
            endpoints: props.endpoints,
            csrf_token: props.csrf_token,
            user_can_manage_internal_workspaces: props.user_can_manage_internal_workspaces,
            store: RwLock::new(WorkspaceStore::new(props.workspace_list)),
            client,
            notifier,
            navigator,
        }
    }

    /// Creates a context and loads the change counts once, as on page load.
    pub async fn mount(
        props: ModuleProps,
        client: WorkspaceApiClient,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let context = Self::new(props, client, notifier, navigator);
        context.load_changes_counts().await;
        context
    }

    pub fn user_workspace(&self) -> &str {
        &self.user_workspace
    }

    pub const fn base_workspace_options(&self) -> &BTreeMap<WorkspaceName, WorkspaceTitle> {
        &self.base_workspace_options
    }

    pub const fn owner_options(&self) -> &BTreeMap<UserName, UserLabel> {
        &self.owner_options
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub const fn user_can_manage_internal_workspaces(&self) -> bool {
        self.user_can_manage_internal_workspaces
    }

    /// Current workspace list.
    pub async fn workspaces(&self) -> WorkspaceList {
        self.store.read().await.workspaces().clone()
    }

    pub async fn workspace(&self, name: &str) -> Option<Workspace> {
        self.store.read().await.get(name).cloned()
    }

    /// Current workspaces in listing order.
    pub async fn sorted_workspaces(&self) -> Vec<Workspace> {
        self.store
            .read()
            .await
            .sorted()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn set_workspaces(&self, workspaces: WorkspaceList) {
        self.store.write().await.set_workspaces(workspaces);
    }

    pub async fn sorting(&self) -> SortBy {
        self.store.read().await.sorting()
    }

    pub async fn set_sorting(&self, sorting: SortBy) {
        self.store.write().await.set_sorting(sorting);
    }

    pub async fn selected_workspace_for_deletion(&self) -> Option<WorkspaceName> {
        self.store
            .read()
            .await
            .selected_for_deletion()
            .map(str::to_string)
    }

    pub async fn set_selected_workspace_for_deletion(&self, name: Option<WorkspaceName>) {
        self.store.write().await.set_selected_for_deletion(name);
    }

    pub async fn selected_workspace_for_edit(&self) -> Option<WorkspaceName> {
        self.store.read().await.selected_for_edit().map(str::to_string)
    }

    pub async fn set_selected_workspace_for_edit(&self, name: Option<WorkspaceName>) {
        self.store.write().await.set_selected_for_edit(name);
    }

    /// Refreshes the change counts of all known workspaces.
    pub async fn load_changes_counts(&self) {
        match self.client.get_changes(&self.endpoints.get_changes).await {
            Ok(changes) => {
                let updated = self.store.write().await.apply_changes_counts(&changes);
                tracing::debug!(updated, "Loaded change counts");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load changes for workspaces");
                self.notifier
                    .error("Failed to load changes for workspaces", &e.to_string());
            }
        }
    }

    /// Deletes a workspace. Returns `true` if the backend reported success.
    ///
    /// Workspaces that were based on the deleted one are moved onto live.
    /// Flash messages from the backend are always shown.
    pub async fn delete_workspace(&self, workspace_name: &str) -> bool {
        let response = match self
            .client
            .delete_workspace(
                &self.endpoints.delete_workspace,
                workspace_name,
                &self.csrf_token,
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, workspace = workspace_name, "Failed to delete workspace");
                self.notifier.error("Failed to delete workspace", &e.to_string());
                return false;
            }
        };

        if response.success {
            let removed = self
                .store
                .write()
                .await
                .remove_workspace(workspace_name, &response.rebased_workspaces);
            tracing::debug!(
                workspace = workspace_name,
                removed,
                rebased = response.rebased_workspaces.len(),
                "Deleted workspace"
            );
        }
        dispatch_flash_messages(self.notifier.as_ref(), &response.messages);

        response.success
    }

    /// Submits a workspace edit and returns the stored record.
    ///
    /// Fields missing from the response and the change counts already known
    /// for the workspace are kept.
    pub async fn update_workspace(&self, form: &UpdateWorkspaceForm) -> Option<Workspace> {
        match self.submit_update(form).await {
            Ok(merged) => {
                self.notifier.ok("Workspace updated");
                Some(merged)
            }
            Err(e) => {
                tracing::error!(error = %e, workspace = %form.workspace_name, "Failed to update workspace");
                self.notifier.error("Failed to update workspace", &e.to_string());
                None
            }
        }
    }

    async fn submit_update(&self, form: &UpdateWorkspaceForm) -> Result<Workspace> {
        let update = self
            .client
            .update_workspace(&self.endpoints.update_workspace, form)
            .await?;
        let mut store = self.store.write().await;
        Ok(store.merge_updated(&form.workspace_name, update)?.clone())
    }

    /// Opens the page of a workspace. Returns `true` if navigation started.
    pub fn show_workspace(&self, workspace_name: &str) -> bool {
        let result = self
            .client
            .workspace_action_url(&self.endpoints.show_workspace, workspace_name)
            .and_then(|url| self.navigator.open(&url));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, workspace = workspace_name, "Failed to show workspace");
                self.notifier.error("Failed to show workspace", &e.to_string());
                false
            }
        }
    }

    /// The module data as it stands now, for persisting between runs.
    pub async fn snapshot(&self) -> ModuleProps {
        ModuleProps {
            user_workspace: self.user_workspace.clone(),
            workspace_list: self.workspaces().await,
            base_workspace_options: self.base_workspace_options.clone(),
            owner_options: self.owner_options.clone(),
            endpoints: self.endpoints.clone(),
            csrf_token: self.csrf_token.clone(),
            user_can_manage_internal_workspaces: self.user_can_manage_internal_workspaces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::navigate::MockNavigator;
    use crate::notify::MockNotifier;
    use crate::workspace::snapshot::tests::sample_props;
    use crate::workspace::types::{BaseWorkspace, WorkspaceOwner};
    use crate::workspace::ChangesCounts;
    use mockall::predicate::eq;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WorkspaceApiClient {
        let config = ApiConfig {
            base_url: Url::parse(&server.uri()).unwrap(),
            ..ApiConfig::default()
        };
        WorkspaceApiClient::new(&config).unwrap()
    }

    /// Client pointed at a port nothing listens on.
    fn unreachable_client() -> WorkspaceApiClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ApiConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            ..ApiConfig::default()
        };
        WorkspaceApiClient::new(&config).unwrap()
    }

    fn context(server: &MockServer, props: ModuleProps, notifier: MockNotifier) -> WorkspaceContext {
        WorkspaceContext::new(
            props,
            client_for(server),
            Arc::new(notifier),
            Arc::new(MockNavigator::new()),
        )
    }

    fn counts(added: u32) -> ChangesCounts {
        ChangesCounts {
            added,
            ..ChangesCounts::default()
        }
    }

    /// Store of the delete example: `a` has changes, `b` is based on `a`.
    fn props_with_child() -> ModuleProps {
        let mut props = sample_props();
        let mut a = Workspace::new("a", "A");
        a.changes_counts = Some(counts(3));
        let mut b = Workspace::new("b", "B");
        b.base_workspace = Some(BaseWorkspace {
            name: "a".to_string(),
            title: "A".to_string(),
        });
        props.workspace_list = [a, b].into_iter().map(|ws| (ws.name.clone(), ws)).collect();
        props
    }

    async fn mount_delete(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/workspaces/a/delete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn mount_loads_change_counts_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workspaces/changes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "changesByWorkspace": {"review": {"added": 2}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let context = WorkspaceContext::mount(
            sample_props(),
            client_for(&server),
            Arc::new(MockNotifier::new()),
            Arc::new(MockNavigator::new()),
        )
        .await;

        assert_eq!(
            context.workspace("review").await.unwrap().changes_counts,
            Some(counts(2))
        );
        assert_eq!(
            context.workspace("user-jane").await.unwrap().changes_counts,
            None
        );
    }

    #[tokio::test]
    async fn failed_change_load_notifies_and_keeps_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to load changes for workspaces")
            .times(1)
            .return_const(());

        let context = context(&server, sample_props(), notifier);
        let before = context.workspaces().await;

        context.load_changes_counts().await;

        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn changes_payload_without_map_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to load changes for workspaces")
            .times(1)
            .return_const(());

        let context = context(&server, sample_props(), notifier);
        let before = context.workspaces().await;

        context.load_changes_counts().await;

        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn empty_changes_list_is_quiet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"changesByWorkspace": []})),
            )
            .mount(&server)
            .await;

        let context = context(&server, sample_props(), MockNotifier::new());
        let before = context.workspaces().await;

        context.load_changes_counts().await;

        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn unreachable_backend_notifies_and_keeps_store() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to load changes for workspaces")
            .times(1)
            .return_const(());
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to delete workspace")
            .times(1)
            .return_const(());

        let context = WorkspaceContext::new(
            props_with_child(),
            unreachable_client(),
            Arc::new(notifier),
            Arc::new(MockNavigator::new()),
        );
        let before = context.workspaces().await;

        context.load_changes_counts().await;
        assert!(!context.delete_workspace("a").await);

        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn delete_removes_workspace_and_rebases_children() {
        let server = MockServer::start().await;
        mount_delete(
            &server,
            json!({"success": true, "rebasedWorkspaces": [{"name": "b"}]}),
        )
        .await;

        let context = context(&server, props_with_child(), MockNotifier::new());

        assert!(context.delete_workspace("a").await);

        let workspaces = context.workspaces().await;
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces["b"].base_workspace, Some(BaseWorkspace::live()));
    }

    #[tokio::test]
    async fn unsuccessful_delete_shows_messages_and_keeps_store() {
        let server = MockServer::start().await;
        mount_delete(
            &server,
            json!({
                "success": false,
                "rebasedWorkspaces": [],
                "messages": [{"title": "Cannot delete", "message": "Workspace has changes", "severity": "Error"}]
            }),
        )
        .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .with(eq("Cannot delete"), eq("Workspace has changes"))
            .times(1)
            .return_const(());

        let context = context(&server, props_with_child(), notifier);
        let before = context.workspaces().await;

        assert!(!context.delete_workspace("a").await);
        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn successful_delete_shows_messages_too() {
        let server = MockServer::start().await;
        mount_delete(
            &server,
            json!({
                "success": true,
                "rebasedWorkspaces": [],
                "messages": [{"title": "", "message": "Workspace deleted", "severity": "OK"}]
            }),
        )
        .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_ok()
            .with(eq("Workspace deleted"))
            .times(1)
            .return_const(());

        let context = context(&server, props_with_child(), notifier);
        assert!(context.delete_workspace("a").await);
    }

    #[tokio::test]
    async fn deleting_twice_is_harmless() {
        let server = MockServer::start().await;
        mount_delete(&server, json!({"success": true, "rebasedWorkspaces": []})).await;

        let context = context(&server, props_with_child(), MockNotifier::new());

        let (first, second) = tokio::join!(context.delete_workspace("a"), context.delete_workspace("a"));

        assert!(first && second);
        assert_eq!(context.workspaces().await.keys().collect::<Vec<_>>(), ["b"]);
    }

    #[tokio::test]
    async fn failed_delete_notifies_and_keeps_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to delete workspace")
            .times(1)
            .return_const(());

        let context = context(&server, props_with_child(), notifier);
        let before = context.workspaces().await;

        assert!(!context.delete_workspace("a").await);
        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn update_overwrites_fields_but_keeps_counts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workspaces/update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "a",
                "title": "Renamed",
                "description": "Now with a description",
                "owner": {"name": "jane", "label": "Jane Doe"},
                "baseWorkspace": {"name": "live", "title": "Live"},
                "changesCounts": {"added": 0}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_ok()
            .with(eq("Workspace updated"))
            .times(1)
            .return_const(());

        let context = context(&server, props_with_child(), notifier);
        let form = UpdateWorkspaceForm {
            workspace_name: "a".to_string(),
            title: "Renamed".to_string(),
            description: Some("Now with a description".to_string()),
            base_workspace: Some("live".to_string()),
            owner: Some("jane".to_string()),
            csrf_token: context.csrf_token().to_string(),
        };

        let updated = context.update_workspace(&form).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.owner.as_ref().unwrap().label, "Jane Doe");
        assert_eq!(updated.changes_counts, Some(counts(3)));
        assert_eq!(context.workspace("a").await, Some(updated));
    }

    #[tokio::test]
    async fn partial_update_response_keeps_other_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workspaces/update"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"name": "a", "title": "Renamed"})),
            )
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier.expect_ok().times(1).return_const(());

        let mut props = props_with_child();
        let a = props.workspace_list.get_mut("a").unwrap();
        a.description = Some("Spring campaign".to_string());
        a.owner = Some(WorkspaceOwner {
            name: "jane".to_string(),
            label: "Jane Doe".to_string(),
        });

        let context = context(&server, props, notifier);
        let form = UpdateWorkspaceForm {
            workspace_name: "a".to_string(),
            title: "Renamed".to_string(),
            description: None,
            base_workspace: None,
            owner: None,
            csrf_token: context.csrf_token().to_string(),
        };

        let updated = context.update_workspace(&form).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("Spring campaign"));
        assert_eq!(updated.owner.map(|o| o.label), Some("Jane Doe".to_string()));
        assert_eq!(updated.changes_counts, Some(counts(3)));
    }

    #[tokio::test]
    async fn failed_update_notifies_and_keeps_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|title, _| title == "Failed to update workspace")
            .times(1)
            .return_const(());

        let context = context(&server, props_with_child(), notifier);
        let before = context.workspaces().await;
        let form = UpdateWorkspaceForm {
            workspace_name: "a".to_string(),
            title: "Renamed".to_string(),
            description: None,
            base_workspace: None,
            owner: None,
            csrf_token: context.csrf_token().to_string(),
        };

        assert!(context.update_workspace(&form).await.is_none());
        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn show_opens_workspace_url() {
        let server = MockServer::start().await;
        let expected = Url::parse(&format!("{}/workspaces/review/show", server.uri())).unwrap();

        let mut navigator = MockNavigator::new();
        navigator
            .expect_open()
            .withf(move |url| *url == expected)
            .times(1)
            .returning(|_| Ok(()));

        let context = WorkspaceContext::new(
            sample_props(),
            client_for(&server),
            Arc::new(MockNotifier::new()),
            Arc::new(navigator),
        );
        let before = context.workspaces().await;

        assert!(context.show_workspace("review"));
        assert_eq!(context.workspaces().await, before);
    }

    #[tokio::test]
    async fn selection_and_sorting_setters() {
        let server = MockServer::start().await;
        let context = context(&server, sample_props(), MockNotifier::new());

        assert_eq!(context.sorting().await, SortBy::LastModified);
        context.set_sorting(SortBy::Title).await;
        assert_eq!(context.sorting().await, SortBy::Title);

        context
            .set_selected_workspace_for_deletion(Some("review".to_string()))
            .await;
        assert_eq!(
            context.selected_workspace_for_deletion().await.as_deref(),
            Some("review")
        );
        assert_eq!(context.selected_workspace_for_edit().await, None);

        let names: Vec<_> = context
            .sorted_workspaces()
            .await
            .into_iter()
            .map(|ws| ws.name)
            .collect();
        assert_eq!(names, ["user-jane", "review"]);

        let mut list = WorkspaceList::new();
        list.insert("solo".to_string(), Workspace::new("solo", "Solo"));
        context.set_workspaces(list.clone()).await;
        assert_eq!(context.workspaces().await, list);
    }

    #[tokio::test]
    async fn snapshot_reflects_store() {
        let server = MockServer::start().await;
        mount_delete(&server, json!({"success": true, "rebasedWorkspaces": [{"name": "b"}]})).await;

        let context = context(&server, props_with_child(), MockNotifier::new());
        context.delete_workspace("a").await;

        let snapshot = context.snapshot().await;
        assert_eq!(snapshot.csrf_token, "csrf-123");
        assert!(!snapshot.workspace_list.contains_key("a"));
        assert_eq!(
            snapshot.workspace_list["b"].base_workspace,
            Some(BaseWorkspace::live())
        );
    }
}
