//! Application configuration settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Main configuration for the workspace module client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Local snapshot settings.
    pub module: SnapshotConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL that relative endpoint paths are resolved against.
    #[serde(with = "url_serde")]
    pub base_url: Url,
    /// Request timeout in seconds. Unset means the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Session cookie sent with every request, e.g. `Neos_Session=...`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8081").expect("valid default URL"),
            timeout_secs: None,
            session_cookie: None,
        }
    }
}

/// Where the module snapshot is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Snapshot file; defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_file: Option<PathBuf>,
}

/// Custom serde module for URL serialization.
mod url_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(url.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const API_URL: &str = "WSM_API_URL";
    pub const SESSION: &str = "WSM_SESSION";
    pub const LOG_LEVEL: &str = "WSM_LOG";
}

impl ModuleConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(env::API_URL).ok(),
            std::env::var(env::SESSION).ok(),
        )
    }

    fn with_overrides(mut self, api_url: Option<String>, session: Option<String>) -> Self {
        if let Some(url) = api_url {
            match Url::parse(&url) {
                Ok(parsed) => self.api.base_url = parsed,
                Err(e) => tracing::warn!("Ignoring {}={url}: {e}", env::API_URL),
            }
        }

        if let Some(cookie) = session.filter(|c| !c.is_empty()) {
            self.api.session_cookie = Some(cookie);
        }

        self
    }
}
