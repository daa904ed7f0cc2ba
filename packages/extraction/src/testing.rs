//! Testing utilities including mock implementations.
//!
//! These let applications exercise the orchestrator and the heavy engine
//! without a running fast backend or a real browser.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{BrowserError, BrowserResult};
use crate::traits::browser::{BrowserDriver, BrowserSession};
use crate::traits::engine::ExtractionEngine;
use crate::types::request::ExtractionRequest;
use crate::types::result::{EngineOutcome, FieldMap};
use crate::types::selector::SelectorSpec;

/// A scripted extraction engine.
///
/// Outcomes queued with [`then`](Self::then) are returned in order; once the
/// queue is empty every call returns the default outcome.
pub struct MockEngine {
    name: String,
    default_outcome: EngineOutcome,
    queued: Arc<RwLock<VecDeque<EngineOutcome>>>,
    delay: Option<Duration>,
    hang: bool,
    requests: Arc<RwLock<Vec<ExtractionRequest>>>,
}

impl MockEngine {
    /// An engine that always succeeds with `fields`.
    pub fn succeeding(name: impl Into<String>, fields: FieldMap) -> Self {
        Self::with_default(name, EngineOutcome::Succeeded { fields })
    }

    /// An engine that always fails with `reason`.
    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_default(name, EngineOutcome::failed(reason))
    }

    /// An engine that never answers.
    pub fn hanging(name: impl Into<String>) -> Self {
        let mut engine = Self::failing(name, "unreachable");
        engine.hang = true;
        engine
    }

    fn with_default(name: impl Into<String>, default_outcome: EngineOutcome) -> Self {
        Self {
            name: name.into(),
            default_outcome,
            queued: Arc::new(RwLock::new(VecDeque::new())),
            delay: None,
            hang: false,
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue an outcome to return before falling back to the default.
    pub fn then(self, outcome: EngineOutcome) -> Self {
        self.queued.write().unwrap().push_back(outcome);
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `fetch` was entered.
    pub fn calls(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// Every request seen, in call order.
    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionEngine for MockEngine {
    async fn fetch(&self, request: &ExtractionRequest) -> EngineOutcome {
        self.requests.write().unwrap().push(request.clone());

        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.queued.write().unwrap().pop_front();
        queued.unwrap_or_else(|| self.default_outcome.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

type ElementKey = (String, String, Option<String>);

#[derive(Default)]
struct BrowserState {
    elements: RwLock<HashMap<ElementKey, String>>,
    navigations: RwLock<Vec<String>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// An in-memory browser.
///
/// Pages are described element by element; anything not registered reads as
/// missing. Session open/close counts are tracked so tests can assert that
/// no page leaks.
#[derive(Default)]
pub struct MockBrowserDriver {
    state: Arc<BrowserState>,
    fail_open: Option<String>,
    fail_navigation: Option<String>,
    hang_on_idle: bool,
}

impl MockBrowserDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text of the first element matching `css` on `url`.
    pub fn with_element(self, url: &str, css: &str, text: &str) -> Self {
        self.state
            .elements
            .write()
            .unwrap()
            .insert((url.to_string(), css.to_string(), None), text.to_string());
        self
    }

    /// Register an attribute value of the first element matching `css`.
    pub fn with_attribute(self, url: &str, css: &str, attribute: &str, value: &str) -> Self {
        self.state.elements.write().unwrap().insert(
            (url.to_string(), css.to_string(), Some(attribute.to_string())),
            value.to_string(),
        );
        self
    }

    /// Make `open_session` fail.
    pub fn failing_open(mut self, reason: &str) -> Self {
        self.fail_open = Some(reason.to_string());
        self
    }

    /// Make every navigation fail after the session is open.
    pub fn failing_navigation(mut self, reason: &str) -> Self {
        self.fail_navigation = Some(reason.to_string());
        self
    }

    /// Make the network-idle wait never finish.
    pub fn hanging_on_idle(mut self) -> Self {
        self.hang_on_idle = true;
        self
    }

    pub fn opened_sessions(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn closed_sessions(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// URLs navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.read().unwrap().clone()
    }
}

#[async_trait]
impl BrowserDriver for MockBrowserDriver {
    async fn open_session(
        &self,
        _user_agent: Option<&str>,
    ) -> BrowserResult<Box<dyn BrowserSession>> {
        if let Some(reason) = &self.fail_open {
            return Err(BrowserError::Session(reason.clone()));
        }

        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockBrowserSession {
            state: self.state.clone(),
            fail_navigation: self.fail_navigation.clone(),
            hang_on_idle: self.hang_on_idle,
            current_url: None,
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct MockBrowserSession {
    state: Arc<BrowserState>,
    fail_navigation: Option<String>,
    hang_on_idle: bool,
    current_url: Option<String>,
}

#[async_trait]
impl BrowserSession for MockBrowserSession {
    async fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        self.state.navigations.write().unwrap().push(url.to_string());

        if let Some(reason) = &self.fail_navigation {
            return Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }

        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_network_idle(&mut self) -> BrowserResult<()> {
        if self.hang_on_idle {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn select_first(&mut self, selector: &SelectorSpec) -> BrowserResult<Option<String>> {
        let Some(url) = self.current_url.clone() else {
            return Ok(None);
        };
        let key = (url, selector.css.clone(), selector.attribute.clone());
        Ok(self.state.elements.read().unwrap().get(&key).cloned())
    }

    async fn close(self: Box<Self>) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ExtractionRequest {
        ExtractionRequest::new(
            "https://shop.com/p/1",
            [("title".to_string(), "h1".to_string())].into(),
        )
    }

    #[tokio::test]
    async fn test_mock_engine_queue_then_default() {
        let engine = MockEngine::failing("fast", "down").then(EngineOutcome::Succeeded {
            fields: FieldMap::new(),
        });

        assert!(engine.fetch(&request()).await.is_ok());
        assert!(!engine.fetch(&request()).await.is_ok());
        assert_eq!(engine.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_browser_reads_registered_elements() {
        let driver = MockBrowserDriver::new()
            .with_element("https://shop.com/p/1", "h1", "Product A")
            .with_attribute("https://shop.com/p/1", "img", "src", "/a.png");

        let mut session = driver.open_session(None).await.unwrap();
        session.navigate("https://shop.com/p/1").await.unwrap();

        let title = session.select_first(&SelectorSpec::parse("h1")).await.unwrap();
        let image = session.select_first(&SelectorSpec::parse("img::attr(src)")).await.unwrap();
        let price = session.select_first(&SelectorSpec::parse(".price")).await.unwrap();

        assert_eq!(title.as_deref(), Some("Product A"));
        assert_eq!(image.as_deref(), Some("/a.png"));
        assert!(price.is_none());

        session.close().await;
        assert_eq!(driver.opened_sessions(), 1);
        assert_eq!(driver.closed_sessions(), 1);
    }
}
