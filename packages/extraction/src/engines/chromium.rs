//! Chromium-backed browser driver (CDP via `chromiumoxide`).
//!
//! Requires the `chromium` feature and a Chrome/Chromium binary on the host.
//! One browser process is launched per driver; each session is a fresh tab.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::cdp::browser_protocol::target::CreateTargetParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{BrowserError, BrowserResult};
use crate::traits::browser::{BrowserDriver, BrowserSession};
use crate::types::selector::{normalize_value, SelectorSpec};

/// How long the resource count must stay unchanged to count as idle.
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Interval between network-activity checks.
const NETWORK_POLL_INTERVAL: Duration = Duration::from_millis(100);

const RESOURCE_COUNT_SCRIPT: &str = "performance.getEntriesByType('resource').length";
const READY_STATE_SCRIPT: &str = "document.readyState";

/// Headless Chromium driver.
pub struct ChromiumDriver {
    browser: Mutex<Browser>,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a headless browser process.
    pub async fn launch() -> BrowserResult<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // The CDP connection only makes progress while its handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        info!("Headless browser launched");

        Ok(Self {
            browser: Mutex::new(browser),
            handler,
        })
    }

    /// Close the browser process. Call once at shutdown.
    pub async fn shutdown(&self) {
        let mut browser = self.browser.lock().await;
        if let Err(e) = browser.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        self.handler.abort();
        info!("Headless browser closed");
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn open_session(
        &self,
        user_agent: Option<&str>,
    ) -> BrowserResult<Box<dyn BrowserSession>> {
        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page(CreateTargetParams::new("about:blank"))
                .await
                .map_err(|e| BrowserError::Session(e.to_string()))?
        };

        let session = ChromiumSession { page };

        if let Some(agent) = user_agent {
            if let Err(e) = session
                .page
                .execute(SetUserAgentOverrideParams::new(agent))
                .await
            {
                // Close before bailing so the tab does not leak.
                Box::new(session).close().await;
                return Err(BrowserError::Session(e.to_string()));
            }
        }

        Ok(Box::new(session))
    }

    fn name(&self) -> &str {
        "chromium"
    }
}

struct ChromiumSession {
    page: Page,
}

impl ChromiumSession {
    async fn eval<T: serde::de::DeserializeOwned>(&self, script: &str) -> BrowserResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        self.page
            .goto(NavigateParams::new(url))
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_network_idle(&mut self) -> BrowserResult<()> {
        // Idle: document complete and no new resource entries for a full
        // quiet window. Unbounded here; the engine deadline caps it.
        let mut last_count: i64 = -1;
        let mut stable_since = Instant::now();

        loop {
            let ready: String = self.eval(READY_STATE_SCRIPT).await?;
            let count: i64 = self.eval(RESOURCE_COUNT_SCRIPT).await?;

            if count != last_count {
                last_count = count;
                stable_since = Instant::now();
            } else if ready == "complete" && stable_since.elapsed() >= NETWORK_QUIET_WINDOW {
                debug!(resources = count, "Network idle");
                return Ok(());
            }

            tokio::time::sleep(NETWORK_POLL_INTERVAL).await;
        }
    }

    async fn select_first(&mut self, selector: &SelectorSpec) -> BrowserResult<Option<String>> {
        let query_error = |e: chromiumoxide::error::CdpError| BrowserError::Query {
            selector: selector.css.clone(),
            reason: e.to_string(),
        };

        let elements = self
            .page
            .find_elements(selector.css.as_str())
            .await
            .map_err(query_error)?;

        let Some(element) = elements.into_iter().next() else {
            return Ok(None);
        };

        let raw = match selector.attribute.as_deref() {
            Some(name) => element.attribute(name).await.map_err(query_error)?,
            None => element.inner_text().await.map_err(query_error)?,
        };

        Ok(raw.map(|value| normalize_value(&value)))
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self.page.close().await {
            warn!(error = %e, "Failed to close browser page");
        }
    }
}
