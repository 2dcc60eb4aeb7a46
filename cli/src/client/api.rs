//! HTTP client for the workspace module backend.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::client::endpoints::prepare_workspace_action_url;
use crate::client::form::UpdateWorkspaceForm;
use crate::client::middleware::SessionMiddleware;
use crate::config::ApiConfig;
use crate::error::{ModuleError, Result};
use crate::workspace::{ChangesCounts, FlashMessage, Workspace, WorkspaceName};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

type ChangesByWorkspace = HashMap<WorkspaceName, Option<ChangesCounts>>;

/// Payload of the changes endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangesResponse {
    #[serde(deserialize_with = "map_or_empty_list")]
    changes_by_workspace: ChangesByWorkspace,
}

/// Accepts `[]` as an empty map, which is how PHP encodes an empty
/// associative array.
fn map_or_empty_list<'de, D>(deserializer: D) -> std::result::Result<ChangesByWorkspace, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(ChangesByWorkspace),
        List(Vec<Value>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(list) if list.is_empty() => Ok(HashMap::new()),
        MapOrList::List(_) => Err(D::Error::custom(
            "expected a map of workspace names to change counts",
        )),
    }
}

/// Payload of the delete endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkspaceResponse {
    pub success: bool,
    /// Former children of the deleted workspace, now based on live.
    #[serde(default)]
    pub rebased_workspaces: Vec<Workspace>,
    #[serde(default)]
    pub messages: Vec<FlashMessage>,
}

/// Client for the workspace module endpoints.
pub struct WorkspaceApiClient {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl WorkspaceApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(format!("wsm/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let inner_client = builder.build()?;

        let client = ClientBuilder::new(inner_client)
            .with(SessionMiddleware::new(config.session_cookie.as_deref()))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve an endpoint, absolute or relative to the base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Resolve an action endpoint for a single workspace.
    pub fn workspace_action_url(&self, endpoint: &str, workspace_name: &str) -> Result<Url> {
        self.resolve(&prepare_workspace_action_url(endpoint, workspace_name))
    }

    /// Fetch the pending change counts of all workspaces.
    ///
    /// Entries may be `null` for workspaces the backend could not count.
    pub async fn get_changes(
        &self,
        endpoint: &str,
    ) -> Result<ChangesByWorkspace> {
        let response = self
            .client
            .get(self.resolve(endpoint)?)
            .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await?;

        let data: ChangesResponse = decode(response).await?;
        Ok(data.changes_by_workspace)
    }

    /// Delete a workspace.
    pub async fn delete_workspace(
        &self,
        endpoint: &str,
        workspace_name: &str,
        csrf_token: &str,
    ) -> Result<DeleteWorkspaceResponse> {
        let body = serde_json::json!({ "__csrfToken": csrf_token });

        let response = self
            .client
            .post(self.workspace_action_url(endpoint, workspace_name)?)
            .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_string(&body)?)
            .send()
            .await?;

        decode(response).await
    }

    /// Submit a workspace edit.
    ///
    /// Returns the fields of the record the backend sent back, which may be
    /// a subset of the workspace.
    pub async fn update_workspace(
        &self,
        endpoint: &str,
        form: &UpdateWorkspaceForm,
    ) -> Result<Map<String, Value>> {
        let response = self
            .client
            .post(self.resolve(endpoint)?)
            .multipart(form.to_multipart())
            .send()
            .await?;

        decode(response).await
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ModuleError::SessionRejected {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ModuleError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
