//! Error types and result aliases for the workspace module client.
//!
//! This module provides the crate-wide error handling:
//! - Specific error variants for transport, configuration and storage failures
//! - User-friendly error messages with recovery suggestions
//! - Automatic conversion from common error types

use thiserror::Error;

use crate::workspace::WorkspaceError;

/// Main error type for workspace module operations.
///
/// Each variant includes a user-friendly message with a recovery hint where
/// one exists.
#[derive(Error, Debug)]
pub enum ModuleError {
    /// Backend returned a non-success status code.
    #[error("API request failed ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message (or body excerpt) from the backend.
        message: String,
    },

    /// Backend rejected the session (401 or 403).
    #[error("The backend rejected the session ({status}). Log in again and run 'wsm session <cookie>' with the new session cookie.")]
    SessionRejected {
        /// HTTP status code.
        status: u16,
    },

    /// Backend is unreachable.
    #[error("Backend is unavailable. Check the configured base URL and your network connection.")]
    ApiUnavailable,

    /// Request timed out.
    #[error("Request timed out. The backend may be slow or unreachable.")]
    Timeout,

    /// Network error during HTTP request.
    #[error("Network error: {0}")]
    Network(String),

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// Failed to write configuration file.
    #[error("Failed to write configuration file: {0}. Check directory permissions.")]
    ConfigWrite(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Data serialization error: {0}")]
    Serialization(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Opening a workspace page failed.
    #[error("Could not open '{url}': {reason}")]
    Navigation {
        /// The URL that was to be opened.
        url: String,
        /// Why the browser could not be launched.
        reason: String,
    },

    /// A sync operation failed and was already reported to the user.
    #[error("{0} did not complete. See the messages above.")]
    OperationFailed(&'static str),

    /// Workspace operation error.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

/// Result type alias using [`ModuleError`].
pub type Result<T> = std::result::Result<T, ModuleError>;

impl From<serde_json::Error> for ModuleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for ModuleError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for ModuleError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigWrite(format!("TOML serialize error: {err}"))
    }
}

impl From<reqwest::Error> for ModuleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ApiUnavailable
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for ModuleError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            reqwest_middleware::Error::Middleware(inner) => Self::Network(inner.to_string()),
        }
    }
}
