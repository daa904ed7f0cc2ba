//! Browser automation abstraction used by the heavy engine.
//!
//! The heavy engine only needs a handful of operations from a browser
//! backend: open a page, navigate, wait for the network to go quiet, read
//! the first element matching a selector, close. Keeping them behind a trait
//! lets the engine's resource handling be tested without a real browser.

use async_trait::async_trait;

use crate::error::BrowserResult;
use crate::types::selector::SelectorSpec;

/// Launches browsing sessions.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Open a fresh page. The caller owns the session and must close it.
    async fn open_session(
        &self,
        user_agent: Option<&str>,
    ) -> BrowserResult<Box<dyn BrowserSession>>;

    /// Get the driver name (for logging/debugging).
    fn name(&self) -> &str {
        "browser"
    }
}

/// A single open page.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to a URL and wait for the load event.
    async fn navigate(&mut self, url: &str) -> BrowserResult<()>;

    /// Wait until network activity has settled.
    async fn wait_for_network_idle(&mut self) -> BrowserResult<()>;

    /// Read the first element matching `selector`: its attribute when the
    /// selector names one, otherwise its visible text. `Ok(None)` when
    /// nothing matches.
    async fn select_first(&mut self, selector: &SelectorSpec) -> BrowserResult<Option<String>>;

    /// Release the page. Errors are logged, not returned.
    async fn close(self: Box<Self>);
}
