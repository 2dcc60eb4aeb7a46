//! Opening workspace pages.

use url::Url;

use crate::error::{ModuleError, Result};

/// Target of "show workspace" navigation.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigates to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL could not be opened.
    fn open(&self, url: &Url) -> Result<()>;
}

/// Opens URLs in the system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &Url) -> Result<()> {
        open::that(url.as_str()).map_err(|e| ModuleError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
